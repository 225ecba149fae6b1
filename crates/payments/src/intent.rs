use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Minimum charge the processor accepts, in cents.
pub const MINIMUM_CHARGE_CENTS: u64 = 50;

/// Identifier of a payment intent on the processor side.
///
/// Wire form is `pi_<hex>` (e.g. `pi_018f3c6e...`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentIntentId(Uuid);

impl PaymentIntentId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing ids explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PaymentIntentId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PaymentIntentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "pi_{}", self.0.simple())
    }
}

impl FromStr for PaymentIntentId {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("pi_")
            .ok_or_else(|| PaymentError::InvalidIntentId(s.to_string()))?;
        let uuid =
            Uuid::from_str(hex).map_err(|_| PaymentError::InvalidIntentId(s.to_string()))?;
        Ok(Self(uuid))
    }
}

/// Processor-side intent lifecycle (the slice the storefront observes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPayment,
    Succeeded,
    Canceled,
}

/// Processor record authorizing a client to collect payment.
///
/// The `client_secret` is the credential the storefront client uses against
/// the processor's hosted surface; the server never uses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: PaymentIntentId,
    pub client_secret: String,
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: u64,
    /// Lowercase ISO currency code (e.g. "usd").
    pub currency: String,
    pub status: IntentStatus,
    pub created_at: DateTime<Utc>,
}

/// Payment-side error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The requested charge is below the processor's floor.
    #[error("amount must be at least {minimum} cents")]
    AmountTooSmall { minimum: u64 },

    /// The processor does not settle in this currency.
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// An intent id failed to parse.
    #[error("invalid payment intent id: {0}")]
    InvalidIntentId(String),

    /// No intent with the given id exists on the processor.
    #[error("payment intent not found")]
    IntentNotFound,

    /// The processor rejected the request.
    #[error("gateway failure: {0}")]
    Gateway(String),
}
