//! Infrastructure wiring for the HTTP API.

use std::sync::Arc;

use tokio::sync::broadcast;

use shopflow_cart::{CartManager, CartState, InMemoryKeyValueStore};
use shopflow_infra::{CatalogStore, InMemoryCatalogStore, InMemoryOrderStore, OrderStore, seed};
use shopflow_payments::{InProcessGateway, PaymentGateway};

use crate::config::Config;

/// Shared services handed to every handler via `Extension`.
pub struct AppServices {
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
    gateway: Arc<dyn PaymentGateway>,
    cart: CartManager<Arc<InMemoryKeyValueStore>>,
    cart_updates: broadcast::Sender<CartState>,
    currency: String,
}

impl AppServices {
    pub fn catalog(&self) -> &dyn CatalogStore {
        self.catalog.as_ref()
    }

    pub fn orders(&self) -> &dyn OrderStore {
        self.orders.as_ref()
    }

    pub fn gateway(&self) -> &dyn PaymentGateway {
        self.gateway.as_ref()
    }

    pub fn cart(&self) -> &CartManager<Arc<InMemoryKeyValueStore>> {
        &self.cart
    }

    pub fn cart_updates(&self) -> &broadcast::Sender<CartState> {
        &self.cart_updates
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

/// In-memory wiring: stores + cart + gateway.
///
/// State is memory-resident and reinitialized on start.
pub fn build_services(config: &Config) -> AppServices {
    let catalog = Arc::new(InMemoryCatalogStore::new());

    if config.seed_catalog {
        if let Err(e) = seed::load(catalog.as_ref()) {
            tracing::warn!("failed to seed catalog: {e}");
        }
    }

    let cart = CartManager::new(Arc::new(InMemoryKeyValueStore::new()));

    // Realtime channel (SSE): lossy broadcast, fed from the cart manager's
    // subscription by `spawn_cart_forwarder`.
    let (cart_updates, _cart_rx) = broadcast::channel::<CartState>(256);

    AppServices {
        catalog,
        orders: Arc::new(InMemoryOrderStore::new()),
        gateway: Arc::new(InProcessGateway::new()),
        cart,
        cart_updates,
        currency: config.currency.clone(),
    }
}

/// Bridge the cart manager's subscription onto the broadcast channel that
/// feeds the SSE route. Lossy; no backpressure on the cart.
pub fn spawn_cart_forwarder(services: &Arc<AppServices>) {
    let sub = services.cart.subscribe();
    let tx = services.cart_updates.clone();

    tokio::task::spawn_blocking(move || {
        loop {
            match sub.recv() {
                Ok(state) => {
                    let _ = tx.send(state);
                }
                Err(_) => break,
            }
        }
    });
}
