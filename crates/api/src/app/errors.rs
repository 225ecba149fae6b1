use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopflow_catalog::ProductSort;
use shopflow_core::DomainError;
use shopflow_payments::PaymentError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
    }
}

pub fn payment_error_to_response(err: PaymentError) -> axum::response::Response {
    match err {
        PaymentError::AmountTooSmall { .. } => {
            json_error(StatusCode::BAD_REQUEST, "amount_too_small", err.to_string())
        }
        PaymentError::UnsupportedCurrency(_) => json_error(
            StatusCode::BAD_REQUEST,
            "unsupported_currency",
            err.to_string(),
        ),
        PaymentError::InvalidIntentId(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_intent_id", err.to_string())
        }
        PaymentError::IntentNotFound => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "payment intent not found",
        ),
        PaymentError::Gateway(msg) => json_error(StatusCode::BAD_GATEWAY, "gateway_error", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_sort(s: Option<&str>) -> Result<ProductSort, axum::response::Response> {
    match s.unwrap_or("default") {
        "default" => Ok(ProductSort::Default),
        "price-asc" => Ok(ProductSort::PriceAsc),
        "price-desc" => Ok(ProductSort::PriceDesc),
        "rating" => Ok(ProductSort::Rating),
        "popular" => Ok(ProductSort::Popular),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "invalid_sort",
            "sort must be one of: default, price-asc, price-desc, rating, popular",
        )),
    }
}
