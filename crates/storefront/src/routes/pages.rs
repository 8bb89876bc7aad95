//! Static page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use super::layout::Nav;
use crate::filters;
use crate::middleware::Stores;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub nav: Nav,
}

/// Display the about page.
pub async fn about(stores: Stores) -> impl IntoResponse {
    AboutTemplate {
        nav: Nav::new(&stores),
    }
}
