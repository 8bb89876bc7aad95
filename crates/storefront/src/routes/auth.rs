//! Authentication route handlers.
//!
//! Mock login against the demo credential pair, always-succeeding signup and
//! logout. Form errors are rendered inline; no backend round trip is made
//! for a form that fails validation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use super::layout::Nav;
use crate::error::Result;
use crate::filters;
use crate::middleware::Stores;
use crate::state::AppState;
use crate::validation::{FormError, SignupInput, validate_login, validate_signup};

/// Seconds the signup success page waits before going home.
pub const SIGNUP_REDIRECT_SECONDS: u32 = 2;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    /// Checkbox: present (any value) when ticked.
    pub agree_to_terms: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub email: String,
    pub error: Option<String>,
    pub demo_email: String,
    pub demo_password: String,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub nav: Nav,
    pub name: String,
    pub email: String,
    pub agree_to_terms: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub redirect_seconds: u32,
}

impl LoginTemplate {
    fn new(state: &AppState, stores: &Stores, email: String, error: Option<String>) -> Self {
        let demo = &state.config().demo_account;
        Self {
            nav: Nav::new(stores),
            email,
            error,
            demo_email: demo.email.clone(),
            demo_password: demo.password.expose_secret().to_string(),
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(State(state): State<AppState>, stores: Stores) -> impl IntoResponse {
    LoginTemplate::new(&state, &stores, String::new(), None)
}

/// Handle login form submission.
///
/// Success goes to the home page; a mismatch shows the login form again with
/// the email kept.
#[instrument(skip(state, stores, form))]
pub async fn login(
    State(state): State<AppState>,
    mut stores: Stores,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let email = form.email.trim().to_string();

    if let Err(e) = validate_login(&email, &form.password) {
        return Ok(LoginTemplate::new(&state, &stores, email, Some(e.to_string())).into_response());
    }

    if stores.session.login(&email, &form.password).await? {
        return Ok(Redirect::to("/").into_response());
    }

    let error = FormError::InvalidCredentials.to_string();
    Ok(LoginTemplate::new(&state, &stores, email, Some(error)).into_response())
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(stores: Stores) -> impl IntoResponse {
    SignupTemplate {
        nav: Nav::new(&stores),
        name: String::new(),
        email: String::new(),
        agree_to_terms: false,
        error: None,
        success: None,
        redirect_seconds: SIGNUP_REDIRECT_SECONDS,
    }
}

/// Handle signup form submission.
///
/// A valid form always creates the account and signs the visitor in.
#[instrument(skip(stores, form))]
pub async fn signup(mut stores: Stores, Form(form): Form<SignupForm>) -> Result<Response> {
    let agree_to_terms = form.agree_to_terms.is_some();
    let input = SignupInput {
        name: &form.name,
        email: form.email.trim(),
        password: &form.password,
        confirm_password: &form.confirm_password,
        agree_to_terms,
    };

    let email = match validate_signup(&input) {
        Ok(email) => email,
        Err(e) => {
            return Ok(SignupTemplate {
                nav: Nav::new(&stores),
                name: form.name.clone(),
                email: form.email.trim().to_string(),
                agree_to_terms,
                error: Some(e.to_string()),
                success: None,
                redirect_seconds: SIGNUP_REDIRECT_SECONDS,
            }
            .into_response());
        }
    };

    stores.session.signup(&form.name, email).await?;

    Ok(SignupTemplate {
        nav: Nav::new(&stores),
        name: String::new(),
        email: String::new(),
        agree_to_terms: false,
        error: None,
        success: Some("Account created successfully! Redirecting...".to_string()),
        redirect_seconds: SIGNUP_REDIRECT_SECONDS,
    }
    .into_response())
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout and return to the landing page.
#[instrument(skip(stores))]
pub async fn logout(mut stores: Stores) -> Result<Redirect> {
    stores.session.logout().await?;
    Ok(Redirect::to("/"))
}
