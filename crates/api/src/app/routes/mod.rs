use axum::{Router, routing::post};

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .route("/create-payment-intent", post(checkout::create_payment_intent))
}
