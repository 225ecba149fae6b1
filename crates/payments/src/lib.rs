//! Payment processing seam.
//!
//! The storefront delegates payment collection to an external processor's
//! hosted integration. This crate holds only the server-side half of that
//! handshake: creating a payment intent and handing its client secret to the
//! storefront client. No card data or confirmation logic lives here.

pub mod gateway;
pub mod intent;

pub use gateway::{InProcessGateway, PaymentGateway};
pub use intent::{
    IntentStatus, MINIMUM_CHARGE_CENTS, PaymentError, PaymentIntent, PaymentIntentId,
};
