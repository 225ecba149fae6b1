use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopflow_cart::CartLine;
use shopflow_core::{DomainError, DomainResult, Entity, OrderId, ProductId, ValueObject};

/// Flat-rate shipping charged on every order, in cents.
pub const SHIPPING_FLAT_CENTS: u64 = 999;

/// Sales tax applied to the merchandise subtotal, in percent.
pub const TAX_RATE_PERCENT: u64 = 8;

/// Shipping destination captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

impl ShippingAddress {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> DomainResult<Self> {
        let address = address.into();
        let city = city.into();
        let zip_code = zip_code.into();

        if address.trim().is_empty() {
            return Err(DomainError::validation("address cannot be empty"));
        }
        if city.trim().is_empty() {
            return Err(DomainError::validation("city cannot be empty"));
        }
        if zip_code.trim().len() < 5 {
            return Err(DomainError::validation(
                "zip code must be at least 5 characters",
            ));
        }

        Ok(Self {
            address,
            city,
            zip_code,
        })
    }
}

impl ValueObject for ShippingAddress {}

/// Customer identity captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl CustomerDetails {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation("email address is invalid"));
        }
        if let Some(phone) = &phone {
            if phone.trim().len() < 10 {
                return Err(DomainError::validation(
                    "phone number must be at least 10 characters",
                ));
            }
        }

        Ok(Self { name, email, phone })
    }
}

impl ValueObject for CustomerDetails {}

/// Order line derived from a cart line at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price_cents: u64,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total_cents(&self) -> u64 {
        self.unit_price_cents * u64::from(self.quantity)
    }
}

impl From<CartLine> for OrderLine {
    fn from(line: CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name,
            unit_price_cents: line.unit_price_cents,
            quantity: line.quantity,
        }
    }
}

/// Order money summary. All amounts in smallest currency unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal_cents: u64,
    pub shipping_cents: u64,
    pub tax_cents: u64,
    pub total_cents: u64,
}

impl OrderTotals {
    /// Flat-rate shipping plus tax on the merchandise subtotal, rounded
    /// half-up to the nearest cent.
    pub fn compute(lines: &[OrderLine]) -> Self {
        let subtotal_cents: u64 = lines.iter().map(OrderLine::line_total_cents).sum();
        let tax_cents = (subtotal_cents * TAX_RATE_PERCENT + 50) / 100;
        let shipping_cents = SHIPPING_FLAT_CENTS;

        Self {
            subtotal_cents,
            shipping_cents,
            tax_cents,
            total_cents: subtotal_cents + shipping_cents + tax_cents,
        }
    }
}

impl ValueObject for OrderTotals {}

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Failed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal statuses accept no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Failed => "failed",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "failed" => Ok(OrderStatus::Failed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// Validated checkout submission.
///
/// Ids, timestamps and the initial status are assigned by the order store at
/// creation time. Totals are computed here from the submitted lines;
/// client-supplied totals are never trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    customer: CustomerDetails,
    shipping_address: ShippingAddress,
    lines: Vec<OrderLine>,
    totals: OrderTotals,
}

impl OrderDraft {
    pub fn new(
        customer: CustomerDetails,
        shipping_address: ShippingAddress,
        lines: Vec<OrderLine>,
    ) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::validation(
                "cannot place an order without lines",
            ));
        }

        for line in &lines {
            if line.quantity == 0 {
                return Err(DomainError::validation("quantity must be positive"));
            }
            if line.unit_price_cents == 0 {
                return Err(DomainError::validation("unit price must be positive"));
            }
        }

        let totals = OrderTotals::compute(&lines);

        Ok(Self {
            customer,
            shipping_address,
            lines,
            totals,
        })
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn totals(&self) -> OrderTotals {
        self.totals
    }
}

/// A finalized purchase request submitted for payment processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    customer: CustomerDetails,
    shipping_address: ShippingAddress,
    lines: Vec<OrderLine>,
    totals: OrderTotals,
    status: OrderStatus,
    payment_intent_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Admit a validated draft as a pending order.
    pub fn place(id: OrderId, draft: OrderDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            customer: draft.customer,
            shipping_address: draft.shipping_address,
            lines: draft.lines,
            totals: draft.totals,
            status: OrderStatus::Pending,
            payment_intent_id: None,
            created_at,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn totals(&self) -> OrderTotals {
        self.totals
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn payment_intent_id(&self) -> Option<&str> {
        self.payment_intent_id.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Move the order to a new status.
    ///
    /// Allowed moves: pending orders settle as paid, failed or cancelled;
    /// failed orders may return to pending for a retry. Paid and cancelled
    /// are terminal.
    pub fn transition(&mut self, to: OrderStatus) -> DomainResult<()> {
        if to == self.status {
            return Err(DomainError::conflict(format!("order is already {to}")));
        }

        let allowed = matches!(
            (self.status, to),
            (OrderStatus::Pending, OrderStatus::Paid)
                | (OrderStatus::Pending, OrderStatus::Failed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Failed, OrderStatus::Pending)
        );

        if !allowed {
            return Err(DomainError::invariant(format!(
                "cannot move order from {} to {}",
                self.status, to
            )));
        }

        self.status = to;
        Ok(())
    }

    /// Record the processor-side intent backing this order's payment.
    ///
    /// Only pending orders accept an intent, and only once.
    pub fn attach_payment_intent(&mut self, intent_id: impl Into<String>) -> DomainResult<()> {
        if self.status != OrderStatus::Pending {
            return Err(DomainError::invariant(
                "payment intent can only be attached to a pending order",
            ));
        }
        if self.payment_intent_id.is_some() {
            return Err(DomainError::conflict("payment intent already attached"));
        }

        self.payment_intent_id = Some(intent_id.into());
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
