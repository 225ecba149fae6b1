//! Request/response DTOs and JSON mapping helpers.
//!
//! The wire format keeps the storefront client's conventions: camelCase
//! field names, catalog prices and order totals as decimal-dollar strings,
//! cart amounts and payment amounts as dollar numbers. Internally everything
//! is integer cents.

use serde::Deserialize;

use shopflow_cart::{CartLine, CartState};
use shopflow_catalog::Product;
use shopflow_core::{DomainError, DomainResult, ProductId};
use shopflow_orders::{CustomerDetails, Order, OrderDraft, OrderLine, ShippingAddress};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Inclusive lower price bound, in decimal dollars.
    pub min_price: Option<String>,
    /// Inclusive upper price bound, in decimal dollars.
    pub max_price: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartLineRequest {
    pub product_id: u64,
    /// Defaults to 1.
    pub quantity: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartLineRequest {
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressRequest {
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub id: u64,
    pub name: String,
    /// Unit price in dollars, as the storefront client holds it.
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: ShippingAddressRequest,
    pub items: Vec<OrderItemRequest>,
    pub payment_intent_id: Option<String>,
}

impl CreateOrderRequest {
    /// Validate the submission into a draft. Totals are recomputed from the
    /// lines; any totals the client sent along are ignored.
    pub fn into_draft(self) -> DomainResult<OrderDraft> {
        let customer = CustomerDetails::new(
            self.customer_name,
            self.customer_email,
            self.customer_phone,
        )?;
        let address = ShippingAddress::new(
            self.shipping_address.address,
            self.shipping_address.city,
            self.shipping_address.zip_code,
        )?;

        let lines = self
            .items
            .into_iter()
            .map(|item| {
                Ok(OrderLine {
                    product_id: ProductId::new(item.id),
                    name: item.name,
                    unit_price_cents: dollars_to_cents(item.price)?,
                    quantity: item.quantity,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        OrderDraft::new(customer, address, lines)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Charge amount in dollars.
    pub amount: f64,
}

// -------------------------
// Money helpers
// -------------------------

/// Convert a dollar amount to cents, rounding to the nearest cent.
pub fn dollars_to_cents(amount: f64) -> DomainResult<u64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(DomainError::validation("amount must be a positive number"));
    }

    let cents = (amount * 100.0).round();
    if cents > u64::MAX as f64 {
        return Err(DomainError::validation("amount is out of range"));
    }

    Ok(cents as u64)
}

/// Parse a decimal-dollar query parameter into cents.
pub fn parse_dollars(raw: &str) -> DomainResult<u64> {
    let amount: f64 = raw
        .parse()
        .map_err(|_| DomainError::validation(format!("invalid amount: {raw}")))?;
    dollars_to_cents(amount)
}

/// Render cents as a decimal-dollar string ("199.99").
pub fn cents_to_dollars(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

fn cents_to_dollars_number(cents: u64) -> f64 {
    cents as f64 / 100.0
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(product: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id.as_u64(),
        "name": product.name,
        "description": product.description,
        "price": cents_to_dollars(product.price_cents),
        "originalPrice": product.original_price_cents.map(cents_to_dollars),
        "image": product.image,
        "category": product.category,
        "rating": product.rating.to_string(),
        "reviewCount": product.review_count,
        "badge": product.badge,
        "inStock": product.in_stock,
    })
}

pub fn cart_line_to_json(line: &CartLine) -> serde_json::Value {
    serde_json::json!({
        "id": line.product_id.as_u64(),
        "name": line.name,
        "price": cents_to_dollars_number(line.unit_price_cents),
        "image": line.image,
        "quantity": line.quantity,
    })
}

pub fn cart_state_to_json(state: &CartState) -> serde_json::Value {
    serde_json::json!({
        "items": state.lines.iter().map(cart_line_to_json).collect::<Vec<_>>(),
        "total": cents_to_dollars_number(state.total_cents),
        "itemCount": state.item_count,
    })
}

pub fn order_line_to_json(line: &OrderLine) -> serde_json::Value {
    serde_json::json!({
        "id": line.product_id.as_u64(),
        "name": line.name,
        "price": cents_to_dollars_number(line.unit_price_cents),
        "quantity": line.quantity,
    })
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    let totals = order.totals();

    serde_json::json!({
        "id": order.id_typed().as_u64(),
        "customerName": order.customer().name,
        "customerEmail": order.customer().email,
        "customerPhone": order.customer().phone,
        "shippingAddress": {
            "address": order.shipping_address().address,
            "city": order.shipping_address().city,
            "zipCode": order.shipping_address().zip_code,
        },
        "items": order.lines().iter().map(order_line_to_json).collect::<Vec<_>>(),
        "subtotal": cents_to_dollars(totals.subtotal_cents),
        "shipping": cents_to_dollars(totals.shipping_cents),
        "tax": cents_to_dollars(totals.tax_cents),
        "total": cents_to_dollars(totals.total_cents),
        "status": order.status().to_string(),
        "paymentIntentId": order.payment_intent_id(),
        "createdAt": order.created_at().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollars_round_trip_to_cents() {
        assert_eq!(dollars_to_cents(199.99).unwrap(), 19999);
        assert_eq!(dollars_to_cents(0.0).unwrap(), 0);
        assert_eq!(dollars_to_cents(441.97).unwrap(), 44197);
    }

    #[test]
    fn negative_and_non_finite_amounts_are_rejected() {
        assert!(dollars_to_cents(-1.0).is_err());
        assert!(dollars_to_cents(f64::NAN).is_err());
        assert!(dollars_to_cents(f64::INFINITY).is_err());
    }

    #[test]
    fn parse_dollars_rejects_garbage() {
        assert_eq!(parse_dollars("50").unwrap(), 5000);
        assert_eq!(parse_dollars("49.99").unwrap(), 4999);
        assert!(parse_dollars("abc").is_err());
    }

    #[test]
    fn cents_render_with_two_decimal_places() {
        assert_eq!(cents_to_dollars(19999), "199.99");
        assert_eq!(cents_to_dollars(999), "9.99");
        assert_eq!(cents_to_dollars(3200), "32.00");
        assert_eq!(cents_to_dollars(5), "0.05");
    }
}
