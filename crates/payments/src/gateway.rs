//! Gateway seam to the external payment processor.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use uuid::Uuid;

use crate::intent::{
    IntentStatus, MINIMUM_CHARGE_CENTS, PaymentError, PaymentIntent, PaymentIntentId,
};

/// The external processor, seen from the storefront server.
///
/// Card collection and confirmation happen against the processor's hosted
/// surface; the server only creates and looks up intents.
pub trait PaymentGateway: Send + Sync {
    /// Open an intent for `amount_cents` and return it with a fresh client
    /// secret.
    fn create_intent(
        &self,
        amount_cents: u64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Look up a previously created intent.
    fn retrieve(&self, id: &PaymentIntentId) -> Result<PaymentIntent, PaymentError>;
}

impl<G> PaymentGateway for Arc<G>
where
    G: PaymentGateway + ?Sized,
{
    fn create_intent(
        &self,
        amount_cents: u64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        (**self).create_intent(amount_cents, currency)
    }

    fn retrieve(&self, id: &PaymentIntentId) -> Result<PaymentIntent, PaymentError> {
        (**self).retrieve(id)
    }
}

/// In-process gateway for dev/test.
///
/// Behaves like the hosted processor's intent API: validates the amount and
/// currency, mints an id + client secret, and remembers the intent for
/// lookup. Nothing ever settles on its own.
#[derive(Debug)]
pub struct InProcessGateway {
    supported_currencies: Vec<String>,
    intents: RwLock<HashMap<PaymentIntentId, PaymentIntent>>,
}

impl InProcessGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_currencies(currencies: impl IntoIterator<Item = String>) -> Self {
        Self {
            supported_currencies: currencies.into_iter().collect(),
            intents: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InProcessGateway {
    fn default() -> Self {
        Self::with_currencies(["usd".to_string()])
    }
}

impl PaymentGateway for InProcessGateway {
    fn create_intent(
        &self,
        amount_cents: u64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if amount_cents < MINIMUM_CHARGE_CENTS {
            return Err(PaymentError::AmountTooSmall {
                minimum: MINIMUM_CHARGE_CENTS,
            });
        }

        let currency = currency.to_lowercase();
        if !self.supported_currencies.contains(&currency) {
            return Err(PaymentError::UnsupportedCurrency(currency));
        }

        let id = PaymentIntentId::new();
        let intent = PaymentIntent {
            id,
            client_secret: format!("{id}_secret_{}", Uuid::now_v7().simple()),
            amount_cents,
            currency,
            status: IntentStatus::RequiresPayment,
            created_at: Utc::now(),
        };

        let mut intents = self
            .intents
            .write()
            .map_err(|_| PaymentError::Gateway("intent store lock poisoned".to_string()))?;
        intents.insert(id, intent.clone());

        Ok(intent)
    }

    fn retrieve(&self, id: &PaymentIntentId) -> Result<PaymentIntent, PaymentError> {
        let intents = self
            .intents
            .read()
            .map_err(|_| PaymentError::Gateway("intent store lock poisoned".to_string()))?;
        intents.get(id).cloned().ok_or(PaymentError::IntentNotFound)
    }
}
