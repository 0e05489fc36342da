//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Landing page
//! GET  /health            - Health check
//!
//! # Catalog
//! GET  /plants            - Plant catalog grouped by category
//!
//! # Cart
//! GET  /cart              - Cart page (or empty-cart page)
//! POST /cart/add          - Add a plant (upsert by name), redirect to /plants
//! POST /cart/increment    - Quantity + 1, redirect to /cart
//! POST /cart/decrement    - Quantity - 1 (never below 1), redirect to /cart
//! GET  /cart/remove       - Removal confirmation page
//! POST /cart/remove       - Remove when confirmed, redirect to /cart
//! GET  /cart/count        - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout          - Checkout notice
//! ```

pub mod cart;
pub mod home;
pub mod plants;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", get(cart::confirm_remove).post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::home))
        // Catalog
        .route("/plants", get(plants::index))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout stub
        .route("/checkout", post(cart::checkout))
}
