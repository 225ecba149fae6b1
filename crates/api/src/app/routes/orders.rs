use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use shopflow_core::OrderId;
use shopflow_orders::OrderStatus;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order))
        .route("/:id", get(get_order))
        .route("/:id/status", post(update_status))
}

/// POST /api/orders
///
/// Submit a checkout. Totals are recomputed server-side from the submitted
/// lines; the order is recorded as pending.
pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(mut body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let payment_intent_id = body.payment_intent_id.take();

    let draft = match body.into_draft() {
        Ok(draft) => draft,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut order = match services.orders().create(draft) {
        Ok(order) => order,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Some(intent_id) = payment_intent_id {
        order = match services
            .orders()
            .attach_payment_intent(order.id_typed(), intent_id)
        {
            Ok(order) => order,
            Err(e) => return errors::domain_error_to_response(e),
        };
    }

    (StatusCode::CREATED, Json(dto::order_to_json(&order))).into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id");
        }
    };

    match services.orders().get(id) {
        Some(order) => (StatusCode::OK, Json(dto::order_to_json(&order))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
    }
}

/// POST /api/orders/:id/status
///
/// Move an order through its lifecycle (settlement callbacks, manual
/// cancellation).
pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderStatusRequest>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id");
        }
    };

    let status: OrderStatus = match body.status.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.orders().set_status(id, status) {
        Ok(order) => (StatusCode::OK, Json(dto::order_to_json(&order))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
