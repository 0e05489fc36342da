//! Cart route handlers.
//!
//! Every mutation is a plain form POST followed by a redirect, so the
//! browser always re-renders from the current cart state. Removal needs an
//! explicit confirmation: `GET /cart/remove` asks, and only a `POST` carrying
//! `confirm=yes` deletes the line.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use paradise_nursery_core::{CartAction, CartStore, CheckoutOutcome};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// Value of the `confirm` field that authorizes a removal.
pub const CONFIRM_YES: &str = "yes";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub name: String,
    pub image: String,
    pub description: Option<String>,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
    pub can_decrement: bool,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub line_count: usize,
    pub total_quantity: u64,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl CartView {
    /// Whether the empty-cart page should be shown instead of the summary.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        let totals = cart.totals();

        let items = cart
            .lines()
            .iter()
            .zip(&totals.lines)
            .map(|(line, line_total)| CartItemView {
                name: line.name.clone(),
                image: line.image.clone(),
                description: line.description.clone(),
                price: line.cost.to_string(),
                quantity: line.quantity,
                line_total: line_total.subtotal.display(),
                can_decrement: line.can_decrement(),
            })
            .collect();

        Self {
            items,
            line_count: totals.line_count,
            total_quantity: totals.total_quantity,
            subtotal: totals.subtotal.display(),
            tax: totals.tax.display(),
            total: totals.total.display(),
        }
    }
}

/// Form naming a catalog plant or cart line.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub name: String,
}

/// Remove form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub name: String,
    #[serde(default)]
    pub confirm: Option<String>,
}

impl RemoveForm {
    fn is_confirmed(&self) -> bool {
        self.confirm.as_deref() == Some(CONFIRM_YES)
    }
}

/// Cart page template (also renders the empty-cart state).
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u64,
}

/// Removal confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/confirm_remove.html")]
pub struct ConfirmRemoveTemplate {
    pub name: String,
    pub cart_count: u64,
}

/// Checkout notice page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/notice.html")]
pub struct CheckoutNoticeTemplate {
    pub message: &'static str,
    pub blocking: bool,
    pub cart_count: u64,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

fn require_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("missing plant name".to_string()));
    }
    Ok(name)
}

/// Display the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().await;

    CartShowTemplate {
        cart: CartView::from(&*cart),
        cart_count: cart.total_quantity(),
    }
}

/// Add a catalog plant to the cart.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<LineForm>) -> Result<Redirect> {
    let name = require_name(&form.name)?;
    let line = state.catalog().find(name)?.to_cart_line();

    state.cart_mut().await.dispatch(CartAction::AddItem(line))?;

    tracing::info!(plant = name, "Added plant to cart");
    add_breadcrumb("cart", "Added plant", Some(&[("plant", name)]));

    Ok(Redirect::to("/plants"))
}

/// Increase a line's quantity by one.
#[instrument(skip(state))]
pub async fn increment(
    State(state): State<AppState>,
    Form(form): Form<LineForm>,
) -> Result<Redirect> {
    let name = require_name(&form.name)?;
    let quantity = state.cart_mut().await.increment(name)?;

    tracing::debug!(plant = name, quantity, "Incremented cart line");
    add_breadcrumb("cart", "Incremented quantity", Some(&[("plant", name)]));

    Ok(Redirect::to("/cart"))
}

/// Decrease a line's quantity by one; a line at 1 is left as is.
#[instrument(skip(state))]
pub async fn decrement(
    State(state): State<AppState>,
    Form(form): Form<LineForm>,
) -> Result<Redirect> {
    let name = require_name(&form.name)?;
    let quantity = state.cart_mut().await.decrement(name)?;

    tracing::debug!(plant = name, quantity, "Decremented cart line");
    add_breadcrumb("cart", "Decremented quantity", Some(&[("plant", name)]));

    Ok(Redirect::to("/cart"))
}

/// Ask the shopper to confirm a removal.
///
/// Redirects back to the cart if the line is no longer there.
#[instrument(skip(state))]
pub async fn confirm_remove(
    State(state): State<AppState>,
    Query(query): Query<LineForm>,
) -> Response {
    let cart = state.cart().await;
    let Some(line) = cart.get(query.name.trim()) else {
        return Redirect::to("/cart").into_response();
    };

    ConfirmRemoveTemplate {
        name: line.name.clone(),
        cart_count: cart.total_quantity(),
    }
    .into_response()
}

/// Remove a line if the shopper confirmed; otherwise leave the cart alone.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Form(form): Form<RemoveForm>) -> Result<Redirect> {
    let name = require_name(&form.name)?;

    if !form.is_confirmed() {
        tracing::debug!(plant = name, "Removal cancelled");
        return Ok(Redirect::to("/cart"));
    }

    state.cart_mut().await.dispatch(CartAction::RemoveItem {
        name: name.to_string(),
    })?;

    tracing::info!(plant = name, "Removed plant from cart");
    add_breadcrumb("cart", "Removed plant", Some(&[("plant", name)]));

    Ok(Redirect::to("/cart"))
}

/// Cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart_count().await,
    }
}

/// Checkout stub: a notice page, never a state change.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().await;
    let outcome = cart.checkout();

    if outcome == CheckoutOutcome::EmptyCart {
        tracing::info!("Checkout attempted with an empty cart");
    } else {
        tracing::info!(lines = cart.len(), "Checkout requested");
    }

    CheckoutNoticeTemplate {
        message: outcome.message(),
        blocking: outcome.is_blocking(),
        cart_count: cart.total_quantity(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use paradise_nursery_core::{CartLine, Cost};

    use super::*;

    #[test]
    fn test_cart_view_from_store() {
        let mut cart = CartStore::new();
        cart.add(CartLine::new("Fern", Cost::text("$15.00"), "fern.jpg").with_description("Lush"));
        cart.add(CartLine::new("Fern", Cost::text("$15.00"), "fern.jpg"));

        let view = CartView::from(&cart);
        assert!(!view.is_empty());
        assert_eq!(view.line_count, 1);
        assert_eq!(view.total_quantity, 2);
        assert_eq!(view.subtotal, "$30.00");
        assert_eq!(view.tax, "$3.00");
        assert_eq!(view.total, "$33.00");

        let item = &view.items[0];
        assert_eq!(item.price, "$15.00");
        assert_eq!(item.line_total, "$30.00");
        assert_eq!(item.description.as_deref(), Some("Lush"));
        assert!(item.can_decrement);
    }

    #[test]
    fn test_cart_view_empty() {
        let view = CartView::from(&CartStore::new());
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "$0.00");
    }

    #[test]
    fn test_remove_form_confirmation() {
        let confirmed = RemoveForm {
            name: "Fern".to_string(),
            confirm: Some("yes".to_string()),
        };
        let cancelled = RemoveForm {
            name: "Fern".to_string(),
            confirm: None,
        };
        assert!(confirmed.is_confirmed());
        assert!(!cancelled.is_confirmed());
    }

    #[test]
    fn test_require_name() {
        assert_eq!(require_name("  Mint ").unwrap(), "Mint");
        assert!(matches!(require_name("   "), Err(AppError::BadRequest(_))));
    }
}
