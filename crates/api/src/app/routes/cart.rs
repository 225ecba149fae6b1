use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{
        IntoResponse,
        sse::{Event as SseEvent, KeepAlive, Sse},
    },
    routing::get,
};
use tokio_stream::{StreamExt, wrappers::BroadcastStream};

use shopflow_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_cart).post(add_line).delete(clear_cart))
        .route("/stream", get(stream))
        .route("/:productId", axum::routing::patch(update_line).delete(remove_line))
}

pub async fn get_cart(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let state = services.cart().state();
    (StatusCode::OK, Json(dto::cart_state_to_json(&state))).into_response()
}

/// POST /api/cart
///
/// Put a catalog product in the cart, merging quantity into an existing
/// line for the same product.
pub async fn add_line(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddCartLineRequest>,
) -> axum::response::Response {
    let product_id = ProductId::new(body.product_id);
    let Some(product) = services.catalog().get(product_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found");
    };

    let quantity = body.quantity.unwrap_or(1);
    match services.cart().add(&product, quantity) {
        Ok(state) => (StatusCode::CREATED, Json(dto::cart_state_to_json(&state))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// PATCH /api/cart/:productId
///
/// Set a line's quantity. Zero removes the line; an unknown product id
/// leaves the cart unchanged.
pub async fn update_line(
    Extension(services): Extension<Arc<AppServices>>,
    Path(product_id): Path<String>,
    Json(body): Json<dto::UpdateCartLineRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match product_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    let state = services.cart().set_quantity(product_id, body.quantity);
    (StatusCode::OK, Json(dto::cart_state_to_json(&state))).into_response()
}

pub async fn remove_line(
    Extension(services): Extension<Arc<AppServices>>,
    Path(product_id): Path<String>,
) -> axum::response::Response {
    let product_id: ProductId = match product_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    services.cart().remove(product_id);
    StatusCode::NO_CONTENT.into_response()
}

pub async fn clear_cart(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    services.cart().clear();
    StatusCode::NO_CONTENT.into_response()
}

/// GET /api/cart/stream
///
/// Cart-state updates over SSE. Lossy: slow consumers skip ahead to newer
/// states.
pub async fn stream(
    Extension(services): Extension<Arc<AppServices>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = services.cart_updates().subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(state) => {
            let data = dto::cart_state_to_json(&state).to_string();
            Some(Ok(SseEvent::default().event("cart.updated").data(data)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
