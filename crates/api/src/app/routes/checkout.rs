use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// POST /api/create-payment-intent
///
/// Open a processor-side intent for the checkout total and hand back the
/// client secret the storefront confirms against.
pub async fn create_payment_intent(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreatePaymentIntentRequest>,
) -> axum::response::Response {
    let amount_cents = match dto::dollars_to_cents(body.amount) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .gateway()
        .create_intent(amount_cents, services.currency())
    {
        Ok(intent) => (
            StatusCode::OK,
            Json(serde_json::json!({ "clientSecret": intent.client_secret })),
        )
            .into_response(),
        Err(e) => errors::payment_error_to_response(e),
    }
}
