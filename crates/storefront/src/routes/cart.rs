//! Cart route handlers.
//!
//! Every mutation is a form POST that redirects back (post/redirect/get), so
//! a reload never repeats it. Only `/cart/add` is open to anonymous visitors;
//! the rest sit behind the login guard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use bookverse_core::{BookId, Price};
use serde::Deserialize;
use tracing::instrument;

use super::layout::{CartLineView, Nav};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::Stores;
use crate::state::AppState;

/// Sales tax applied at checkout, in percent.
pub const TAX_RATE_PERCENT: u32 = 8;

/// Seconds the order confirmation waits before going home.
pub const CHECKOUT_REDIRECT_SECONDS: u32 = 1;

const CART_PATH: &str = "/cart";

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data. A missing, blank or non-numeric quantity adds
/// one copy.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub book_id: String,
    #[serde(default)]
    pub quantity: String,
    /// Local page to go back to after adding.
    pub return_to: Option<String>,
}

/// Quantity input form data. The raw text is kept so a blank or non-numeric
/// entry can be ignored instead of rejected.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityForm {
    pub book_id: String,
    #[serde(default)]
    pub quantity: String,
}

/// Form naming a single cart line.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub book_id: String,
}

/// Cart page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CartQuery {
    pub notice: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Order totals shown on the cart and confirmation pages.
#[derive(Debug, Clone)]
pub struct Totals {
    pub items: u32,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl Totals {
    fn new(items: u32, subtotal: Price) -> Self {
        let tax = subtotal.percent(TAX_RATE_PERCENT);
        Self {
            items,
            subtotal: subtotal.to_string(),
            tax: tax.to_string(),
            total: (subtotal + tax).to_string(),
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub nav: Nav,
    pub lines: Vec<CartLineView>,
    pub totals: Totals,
    pub tax_rate: u32,
    pub notice: Option<String>,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout_success.html")]
pub struct CheckoutSuccessTemplate {
    pub nav: Nav,
    pub totals: Totals,
    pub redirect_seconds: u32,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the cart page.
pub async fn show(stores: Stores, Query(query): Query<CartQuery>) -> impl IntoResponse {
    let notice = match query.notice.as_deref() {
        Some("empty") => Some("Your cart is empty!".to_string()),
        _ => None,
    };

    CartTemplate {
        nav: Nav::new(&stores),
        lines: stores.cart.lines().iter().map(CartLineView::from).collect(),
        totals: Totals::new(stores.cart.total_items(), stores.cart.total_price()),
        tax_rate: TAX_RATE_PERCENT,
        notice,
    }
}

/// Add a book to the cart and go back to the page the visitor came from.
///
/// The book is looked up in the catalog (listed books are already cached).
#[instrument(skip(state, stores, form), fields(book_id = %form.book_id))]
pub async fn add(
    State(state): State<AppState>,
    mut stores: Stores,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let id = BookId::new(form.book_id.trim());
    if id.as_str().is_empty() {
        return Err(AppError::BadRequest("missing book id".to_string()));
    }

    let book = state
        .catalog()
        .book_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book {id}")))?;

    let title = book.title.clone();
    stores.cart.add(book, add_quantity(&form.quantity)).await?;

    add_breadcrumb("cart", &format!("Added {id} to cart"), None);
    tracing::info!(book_id = %id, items = stores.cart.total_items(), "Added to cart");

    Ok(Redirect::to(&added_redirect(form.return_to.as_deref(), &title)))
}

/// Set a line's quantity from the quantity input.
///
/// Only whole numbers above zero are applied; anything else leaves the line
/// as it was.
#[instrument(skip(stores, form), fields(book_id = %form.book_id))]
pub async fn update(mut stores: Stores, Form(form): Form<UpdateQuantityForm>) -> Result<Redirect> {
    match form.quantity.trim().parse::<i64>() {
        Ok(quantity) if quantity > 0 => {
            stores
                .cart
                .update_quantity(&BookId::new(form.book_id), quantity)
                .await?;
        }
        _ => tracing::debug!(quantity = %form.quantity, "Ignoring invalid quantity"),
    }
    Ok(Redirect::to(CART_PATH))
}

/// Add one copy to a line.
pub async fn increase(mut stores: Stores, Form(form): Form<LineForm>) -> Result<Redirect> {
    let id = BookId::new(form.book_id);
    if let Some(quantity) = stores.cart.quantity_of(&id) {
        stores
            .cart
            .update_quantity(&id, i64::from(quantity) + 1)
            .await?;
    }
    Ok(Redirect::to(CART_PATH))
}

/// Take one copy off a line. A line never drops below one this way; use
/// remove for that.
pub async fn decrease(mut stores: Stores, Form(form): Form<LineForm>) -> Result<Redirect> {
    let id = BookId::new(form.book_id);
    if let Some(quantity) = stores.cart.quantity_of(&id).filter(|q| *q > 1) {
        stores
            .cart
            .update_quantity(&id, i64::from(quantity) - 1)
            .await?;
    }
    Ok(Redirect::to(CART_PATH))
}

/// Remove a line.
#[instrument(skip(stores, form), fields(book_id = %form.book_id))]
pub async fn remove(mut stores: Stores, Form(form): Form<LineForm>) -> Result<Redirect> {
    stores.cart.remove(&BookId::new(form.book_id)).await?;
    Ok(Redirect::to(CART_PATH))
}

/// Empty the cart.
#[instrument(skip(stores))]
pub async fn clear(mut stores: Stores) -> Result<Redirect> {
    stores.cart.clear().await?;
    Ok(Redirect::to(CART_PATH))
}

/// Place the (simulated) order.
///
/// An empty cart goes back to the cart page with a notice. Otherwise the
/// totals are captured, the checkout delay is waited out and the cart is
/// emptied before the confirmation is shown.
#[instrument(skip(state, stores))]
pub async fn checkout(State(state): State<AppState>, mut stores: Stores) -> Result<Response> {
    if stores.cart.is_empty() {
        return Ok(Redirect::to("/cart?notice=empty").into_response());
    }

    let totals = Totals::new(stores.cart.total_items(), stores.cart.total_price());

    tokio::time::sleep(state.config().latency.checkout).await;
    stores.cart.clear().await?;

    add_breadcrumb("checkout", "Order placed", None);
    tracing::info!(items = totals.items, total = %totals.total, "Order placed");

    Ok(CheckoutSuccessTemplate {
        nav: Nav::new(&stores),
        totals,
        redirect_seconds: CHECKOUT_REDIRECT_SECONDS,
    }
    .into_response())
}

fn add_quantity(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(1)
}

/// Where to send the visitor after adding `title` to the cart.
///
/// `return_to` is honoured only for local paths; anything else (missing,
/// absolute or protocol-relative) goes to the home page.
fn added_redirect(return_to: Option<&str>, title: &str) -> String {
    let target = return_to
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or("/");
    let separator = if target.contains('?') { '&' } else { '?' };
    format!(
        "{target}{separator}added={}",
        urlencoding::encode(title)
    )
}
