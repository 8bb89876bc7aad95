//! Contact form route handlers.
//!
//! Submissions are validated, held for the simulated delivery delay and
//! acknowledged. Nothing is sent anywhere.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use super::layout::Nav;
use crate::filters;
use crate::middleware::Stores;
use crate::state::AppState;
use crate::validation::validate_contact;

/// Contact form data.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub nav: Nav,
    pub form: ContactForm,
    pub error: Option<String>,
    pub success: bool,
}

/// Display the contact form.
pub async fn contact_page(stores: Stores) -> impl IntoResponse {
    ContactTemplate {
        nav: Nav::new(&stores),
        form: ContactForm::default(),
        error: None,
        success: false,
    }
}

/// Handle contact form submission.
///
/// An invalid form is shown again with its values and the first error. A
/// valid one is acknowledged after the contact delay with an empty form.
#[instrument(skip(state, stores, form), fields(subject = %form.subject))]
pub async fn submit(
    State(state): State<AppState>,
    stores: Stores,
    Form(form): Form<ContactForm>,
) -> impl IntoResponse {
    let nav = Nav::new(&stores);

    if let Err(e) = validate_contact(&form.name, &form.email, &form.subject, &form.message) {
        return ContactTemplate {
            nav,
            form,
            error: Some(e.to_string()),
            success: false,
        };
    }

    tokio::time::sleep(state.config().latency.contact).await;
    tracing::info!("Contact message received");

    ContactTemplate {
        nav,
        form: ContactForm::default(),
        error: None,
        success: true,
    }
}
