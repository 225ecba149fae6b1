use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use shopflow_catalog::ProductFilter;
use shopflow_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
}

/// GET /api/products?search=&category=&minPrice=&maxPrice=&sort=
///
/// Filtered, sorted catalog listing. Price bounds are decimal dollars;
/// `sort` is one of `default`, `price-asc`, `price-desc`, `rating`,
/// `popular`.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ProductListQuery>,
) -> axum::response::Response {
    let sort = match errors::parse_sort(query.sort.as_deref()) {
        Ok(sort) => sort,
        Err(response) => return response,
    };

    let min_price_cents = match query.min_price.as_deref().map(dto::parse_dollars).transpose() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let max_price_cents = match query.max_price.as_deref().map(dto::parse_dollars).transpose() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let filter = ProductFilter {
        category: query.category,
        min_price_cents,
        max_price_cents,
        search: query.search,
    };

    let items = services
        .catalog()
        .list(&filter, sort)
        .iter()
        .map(dto::product_to_json)
        .collect::<Vec<_>>();

    (StatusCode::OK, Json(serde_json::Value::Array(items))).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    match services.catalog().get(id) {
        Some(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}
