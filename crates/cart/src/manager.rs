use shopflow_catalog::Product;
use shopflow_core::{DomainError, DomainResult, ProductId};

use crate::notify::{SubscriberRegistry, Subscription};
use crate::state::{CartLine, CartState};
use crate::storage::KeyValueStore;

/// Storage key the cart serializes under.
pub const CART_STORAGE_KEY: &str = "shopflow-cart";

/// Client-held cart: line items in persistent key-value storage, with
/// subscriber notification on every change.
///
/// Reads always go through storage, so multiple handles over the same store
/// observe the same cart.
#[derive(Debug)]
pub struct CartManager<S: KeyValueStore> {
    storage: S,
    subscribers: SubscriberRegistry<CartState>,
}

impl<S: KeyValueStore> CartManager<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            subscribers: SubscriberRegistry::default(),
        }
    }

    /// Current cart state, derived from storage.
    ///
    /// An unreadable store yields an empty cart rather than an error
    /// (matching a cleared browser store).
    pub fn state(&self) -> CartState {
        CartState::from_lines(self.load_lines())
    }

    /// Subscribe to cart-state updates. Drop the subscription to
    /// unsubscribe.
    pub fn subscribe(&self) -> Subscription<CartState> {
        self.subscribers.subscribe()
    }

    /// Put `quantity` of `product` in the cart, merging into an existing
    /// line for the same product.
    pub fn add(&self, product: &Product, quantity: u32) -> DomainResult<CartState> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        if !product.can_be_sold() {
            return Err(DomainError::invariant("product is out of stock"));
        }

        let mut lines = self.load_lines();
        match lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity += quantity,
            None => lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price_cents: product.price_cents,
                image: product.image.clone(),
                quantity,
            }),
        }

        Ok(self.save_lines(lines))
    }

    /// Set the quantity of an existing line. Zero removes the line; an
    /// unknown product id is a no-op.
    pub fn set_quantity(&self, product_id: ProductId, quantity: u32) -> CartState {
        let mut lines = self.load_lines();
        if !lines.iter().any(|l| l.product_id == product_id) {
            return CartState::from_lines(lines);
        }

        if quantity == 0 {
            lines.retain(|l| l.product_id != product_id);
        } else if let Some(line) = lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }

        self.save_lines(lines)
    }

    /// Drop the line for `product_id`, if present.
    pub fn remove(&self, product_id: ProductId) -> CartState {
        let mut lines = self.load_lines();
        lines.retain(|l| l.product_id != product_id);
        self.save_lines(lines)
    }

    /// Empty the cart.
    pub fn clear(&self) -> CartState {
        self.save_lines(Vec::new())
    }

    fn load_lines(&self) -> Vec<CartLine> {
        let Some(raw) = self.storage.get(CART_STORAGE_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!("discarding unreadable cart payload: {e}");
                Vec::new()
            }
        }
    }

    /// Persist, derive the new state, then notify every subscriber.
    fn save_lines(&self, lines: Vec<CartLine>) -> CartState {
        match serde_json::to_string(&lines) {
            Ok(raw) => self.storage.set(CART_STORAGE_KEY, raw),
            Err(e) => tracing::warn!("failed to serialize cart: {e}"),
        }

        let state = CartState::from_lines(lines);
        self.subscribers.publish(state.clone());
        state
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shopflow_catalog::{NewProduct, Rating};

    use super::*;
    use crate::storage::InMemoryKeyValueStore;

    fn test_product(id: u64, price_cents: u64) -> Product {
        NewProduct {
            name: format!("product-{id}"),
            description: "a product".to_string(),
            price_cents,
            original_price_cents: None,
            image: "https://example.com/p.jpg".to_string(),
            category: "Electronics".to_string(),
            rating: Rating::from_tenths(40).unwrap(),
            review_count: 10,
            badge: None,
            in_stock: true,
        }
        .into_product(ProductId::new(id))
        .unwrap()
    }

    fn test_manager() -> CartManager<InMemoryKeyValueStore> {
        CartManager::new(InMemoryKeyValueStore::new())
    }

    #[test]
    fn add_creates_a_line_and_derives_totals() {
        let cart = test_manager();
        let state = cart.add(&test_product(1, 19999), 2).unwrap();

        assert_eq!(state.lines.len(), 1);
        assert_eq!(state.lines[0].quantity, 2);
        assert_eq!(state.total_cents, 39998);
        assert_eq!(state.item_count, 2);
    }

    #[test]
    fn add_merges_quantity_for_the_same_product() {
        let cart = test_manager();
        let product = test_product(1, 19999);
        cart.add(&product, 1).unwrap();
        let state = cart.add(&product, 2).unwrap();

        assert_eq!(state.lines.len(), 1);
        assert_eq!(state.lines[0].quantity, 3);
    }

    #[test]
    fn add_rejects_zero_quantity() {
        let cart = test_manager();
        let err = cart.add(&test_product(1, 19999), 0).unwrap_err();
        assert_eq!(err, DomainError::validation("quantity must be positive"));
    }

    #[test]
    fn add_rejects_out_of_stock_product() {
        let cart = test_manager();
        let mut product = test_product(1, 19999);
        product.in_stock = false;

        let err = cart.add(&product, 1).unwrap_err();
        assert_eq!(err, DomainError::invariant("product is out of stock"));
    }

    #[test]
    fn set_quantity_zero_removes_the_line() {
        let cart = test_manager();
        cart.add(&test_product(1, 19999), 2).unwrap();

        let state = cart.set_quantity(ProductId::new(1), 0);
        assert!(state.is_empty());
    }

    #[test]
    fn set_quantity_for_unknown_product_is_a_noop() {
        let cart = test_manager();
        cart.add(&test_product(1, 19999), 2).unwrap();

        let state = cart.set_quantity(ProductId::new(99), 5);
        assert_eq!(state.lines.len(), 1);
        assert_eq!(state.lines[0].quantity, 2);
    }

    #[test]
    fn remove_drops_only_the_matching_line() {
        let cart = test_manager();
        cart.add(&test_product(1, 19999), 1).unwrap();
        cart.add(&test_product(2, 3999), 1).unwrap();

        let state = cart.remove(ProductId::new(1));
        assert_eq!(state.lines.len(), 1);
        assert_eq!(state.lines[0].product_id, ProductId::new(2));
    }

    #[test]
    fn clear_empties_the_cart() {
        let cart = test_manager();
        cart.add(&test_product(1, 19999), 2).unwrap();

        let state = cart.clear();
        assert!(state.is_empty());
        assert!(cart.state().is_empty());
    }

    #[test]
    fn corrupt_storage_payload_yields_an_empty_cart() {
        let storage = InMemoryKeyValueStore::new();
        storage.set(CART_STORAGE_KEY, "not json".to_string());

        let cart = CartManager::new(storage);
        assert!(cart.state().is_empty());

        // The next mutation writes a clean payload.
        cart.add(&test_product(1, 19999), 1).unwrap();
        assert_eq!(cart.state().lines.len(), 1);
    }

    #[test]
    fn subscribers_receive_the_state_of_every_mutation() {
        let cart = test_manager();
        let sub = cart.subscribe();

        cart.add(&test_product(1, 19999), 2).unwrap();
        let first = sub.recv().unwrap();
        assert_eq!(first.item_count, 2);

        cart.clear();
        let second = sub.recv().unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn handles_over_a_shared_store_observe_the_same_cart() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let a = CartManager::new(storage.clone());
        let b = CartManager::new(storage);

        a.add(&test_product(1, 19999), 1).unwrap();
        assert_eq!(b.state().lines.len(), 1);
    }
}
