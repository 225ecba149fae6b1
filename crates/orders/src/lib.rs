//! Orders domain module.
//!
//! Business rules for finalized purchase requests: checkout input
//! validation, money totals, and the order status lifecycle. No IO, no
//! HTTP, no storage.

pub mod order;

pub use order::{
    CustomerDetails, Order, OrderDraft, OrderLine, OrderStatus, OrderTotals, SHIPPING_FLAT_CENTS,
    ShippingAddress, TAX_RATE_PERCENT,
};
pub use shopflow_core::OrderId;
