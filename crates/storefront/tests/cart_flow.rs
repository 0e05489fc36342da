//! End-to-end tests for the shopping flow.
//!
//! These drive the full router (middleware included) in-process with
//! `tower::ServiceExt::oneshot`, so no server or network is needed. The
//! router shares one `AppState`, so the cart persists across requests within
//! a test exactly as it does in the running binary.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use paradise_nursery_storefront::{
    app, catalog::Catalog, config::StorefrontConfig, middleware::REQUEST_ID_HEADER,
    state::AppState,
};
use tower::ServiceExt;

fn test_app() -> Router {
    let catalog = Catalog::embedded().expect("embedded catalog should load");
    app(AppState::new(StorefrontConfig::default(), catalog))
}

fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", value.replace(' ', "+")))
        .collect::<Vec<_>>()
        .join("&")
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

/// POST a form and return the status and `Location` header.
async fn post_form(app: &Router, uri: &str, pairs: &[(&str, &str)]) -> (StatusCode, Option<String>) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(pairs)))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    (response.status(), location)
}

async fn post_page(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::post(uri).body(Body::empty()).expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn add(app: &Router, name: &str) {
    let (status, location) = post_form(app, "/cart/add", &[("name", name)]).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/plants"));
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_landing_page() {
    let app = test_app();
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Welcome To Paradise Nursery"));
    assert!(body.contains("href=\"/plants\""));
}

#[tokio::test]
async fn test_catalog_lists_plants() {
    let app = test_app();
    let (status, body) = get(&app, "/plants").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Air Purifying Plants"));
    assert!(body.contains("Snake Plant"));
    assert!(body.contains("Add to Cart"));
    assert!(!body.contains("Added to Cart"));
}

#[tokio::test]
async fn test_catalog_marks_added_plants() {
    let app = test_app();
    add(&app, "Lavender").await;

    let (_, body) = get(&app, "/plants").await;
    assert!(body.contains("Added to Cart"));
    assert!(body.contains("<span class=\"cart-badge\">1</span>"));
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    assert_eq!(
        response.headers().get(header::X_FRAME_OPTIONS).map(|v| v.as_bytes()),
        Some(&b"DENY"[..])
    );
    assert!(response.headers().contains_key(header::CONTENT_SECURITY_POLICY));
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_empty_cart_view() {
    let app = test_app();
    let (status, body) = get(&app, "/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your Cart is Empty"));
    assert!(body.contains("Start Shopping"));
    assert!(!body.contains("Order Summary"));
}

#[tokio::test]
async fn test_add_twice_totals() {
    let app = test_app();
    add(&app, "Snake Plant").await;
    add(&app, "Snake Plant").await;

    let (status, body) = get(&app, "/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Order Summary"));
    assert!(body.contains("1 item"));
    assert!(body.contains("<span class=\"quantity-value\">2</span>"));
    assert!(body.contains("<span class=\"total-value\">$30.00</span>"));
    assert!(body.contains("id=\"summary-subtotal\">$30.00<"));
    assert!(body.contains("id=\"summary-tax\">$3.00<"));
    assert!(body.contains("id=\"summary-total\">$33.00<"));
}

#[tokio::test]
async fn test_multiple_lines_summary() {
    let app = test_app();
    add(&app, "Snake Plant").await;
    add(&app, "Jasmine").await;

    let (_, body) = get(&app, "/cart").await;
    assert!(body.contains("2 items"));
    // 15 + 18
    assert!(body.contains("id=\"summary-subtotal\">$33.00<"));
    assert!(body.contains("id=\"summary-tax\">$3.30<"));
    assert!(body.contains("id=\"summary-total\">$36.30<"));
}

#[tokio::test]
async fn test_add_unknown_plant() {
    let app = test_app();
    let (status, _) = post_form(&app, "/cart/add", &[("name", "Venus Flytrap")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_blank_name() {
    let app = test_app();
    let (status, _) = post_form(&app, "/cart/add", &[("name", " ")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_increment_and_decrement_floor() {
    let app = test_app();
    add(&app, "Mint").await;

    let (status, location) = post_form(&app, "/cart/increment", &[("name", "Mint")]).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/cart"));
    let (_, body) = get(&app, "/cart").await;
    assert!(body.contains("<span class=\"quantity-value\">2</span>"));

    for _ in 0..3 {
        let (status, _) = post_form(&app, "/cart/decrement", &[("name", "Mint")]).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
    }

    let (_, body) = get(&app, "/cart").await;
    assert!(body.contains("<span class=\"quantity-value\">1</span>"));
    assert!(body.contains("aria-label=\"Decrease quantity\" disabled>"));
    assert!(body.contains("id=\"summary-total\">$13.20<"));
}

#[tokio::test]
async fn test_increment_missing_line() {
    let app = test_app();
    let (status, _) = post_form(&app, "/cart/increment", &[("name", "Mint")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_requires_confirmation() {
    let app = test_app();
    add(&app, "Rosemary").await;

    let (status, body) = get(&app, "/cart/remove?name=Rosemary").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Remove Rosemary from cart?"));

    // Cancelled: no confirm field
    let (status, location) = post_form(&app, "/cart/remove", &[("name", "Rosemary")]).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/cart"));
    let (_, body) = get(&app, "/cart").await;
    assert!(body.contains("Rosemary"));
    assert!(!body.contains("Your Cart is Empty"));

    // Confirmed
    let (status, _) = post_form(
        &app,
        "/cart/remove",
        &[("name", "Rosemary"), ("confirm", "yes")],
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let (_, body) = get(&app, "/cart").await;
    assert!(body.contains("Your Cart is Empty"));
}

#[tokio::test]
async fn test_remove_confirmation_for_missing_line_redirects() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(
            Request::get("/cart/remove?name=Basil")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_cart_count_fragment() {
    let app = test_app();
    add(&app, "Oregano").await;
    add(&app, "Oregano").await;
    add(&app, "Basil").await;

    let (status, body) = get(&app, "/cart/count").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(">3</span>"));
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_empty_cart_blocks() {
    let app = test_app();
    let (status, body) = post_page(&app, "/checkout").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is empty. Please add items before checkout."));
    assert!(body.contains("blocking"));
}

#[tokio::test]
async fn test_checkout_with_items_is_stub() {
    let app = test_app();
    add(&app, "Peace Lily").await;

    let (status, body) = post_page(&app, "/checkout").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Checkout functionality coming soon!"));

    // Cart untouched
    let (_, body) = get(&app, "/cart").await;
    assert!(body.contains("Peace Lily"));
    assert!(body.contains("<span class=\"quantity-value\">1</span>"));
}
