//! Newsletter signup route handler.
//!
//! Acknowledges the address; there is no mailing list behind it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use super::layout::Nav;
use crate::filters;
use crate::middleware::Stores;
use crate::validation::parse_email;

/// Newsletter signup form data.
#[derive(Debug, Deserialize)]
pub struct NewsletterForm {
    #[serde(default)]
    pub email: String,
}

/// Newsletter acknowledgment template.
#[derive(Template, WebTemplate)]
#[template(path = "newsletter.html")]
pub struct NewsletterTemplate {
    pub nav: Nav,
    pub message: String,
    pub success: bool,
}

/// Handle the footer newsletter form.
///
/// A blank address goes back to the home page.
#[instrument(skip(stores, form))]
pub async fn subscribe(stores: Stores, Form(form): Form<NewsletterForm>) -> Response {
    let email = form.email.trim();
    if email.is_empty() {
        return Redirect::to("/").into_response();
    }

    let (message, success) = match parse_email(email) {
        Ok(email) => {
            tracing::info!(domain = %email.domain(), "Newsletter signup");
            (format!("Thank you for subscribing with: {email}"), true)
        }
        Err(e) => (e.to_string(), false),
    };

    NewsletterTemplate {
        nav: Nav::new(&stores),
        message,
        success,
    }
    .into_response()
}
