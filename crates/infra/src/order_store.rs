use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use shopflow_core::{DomainError, DomainResult, OrderId};
use shopflow_orders::{Order, OrderDraft, OrderStatus};

/// Order storage seam.
pub trait OrderStore: Send + Sync {
    /// Record a validated draft as a pending order, assigning the next id
    /// and the creation timestamp.
    fn create(&self, draft: OrderDraft) -> DomainResult<Order>;

    fn get(&self, id: OrderId) -> Option<Order>;

    /// Move an order through its status lifecycle.
    fn set_status(&self, id: OrderId, status: OrderStatus) -> DomainResult<Order>;

    /// Record the processor-side intent backing an order's payment.
    fn attach_payment_intent(&self, id: OrderId, intent_id: String) -> DomainResult<Order>;
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn create(&self, draft: OrderDraft) -> DomainResult<Order> {
        (**self).create(draft)
    }

    fn get(&self, id: OrderId) -> Option<Order> {
        (**self).get(id)
    }

    fn set_status(&self, id: OrderId, status: OrderStatus) -> DomainResult<Order> {
        (**self).set_status(id, status)
    }

    fn attach_payment_intent(&self, id: OrderId, intent_id: String) -> DomainResult<Order> {
        (**self).attach_payment_intent(id, intent_id)
    }
}

#[derive(Debug)]
struct OrderInner {
    orders: BTreeMap<OrderId, Order>,
    next_id: u64,
}

/// In-memory order store.
#[derive(Debug)]
pub struct InMemoryOrderStore {
    inner: RwLock<OrderInner>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_order<T>(
        &self,
        id: OrderId,
        f: impl FnOnce(&mut Order) -> DomainResult<T>,
    ) -> DomainResult<Order> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("order store lock poisoned"))?;

        let order = inner.orders.get_mut(&id).ok_or(DomainError::NotFound)?;
        f(order)?;
        Ok(order.clone())
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self {
            inner: RwLock::new(OrderInner {
                orders: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl OrderStore for InMemoryOrderStore {
    fn create(&self, draft: OrderDraft) -> DomainResult<Order> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("order store lock poisoned"))?;

        let id = OrderId::new(inner.next_id);
        inner.next_id += 1;

        let order = Order::place(id, draft, Utc::now());
        inner.orders.insert(id, order.clone());

        Ok(order)
    }

    fn get(&self, id: OrderId) -> Option<Order> {
        let inner = self.inner.read().ok()?;
        inner.orders.get(&id).cloned()
    }

    fn set_status(&self, id: OrderId, status: OrderStatus) -> DomainResult<Order> {
        self.with_order(id, |order| order.transition(status))
    }

    fn attach_payment_intent(&self, id: OrderId, intent_id: String) -> DomainResult<Order> {
        self.with_order(id, |order| order.attach_payment_intent(intent_id))
    }
}

#[cfg(test)]
mod tests {
    use shopflow_core::ProductId;
    use shopflow_orders::{CustomerDetails, OrderLine, ShippingAddress};

    use super::*;

    fn test_draft() -> OrderDraft {
        let customer = CustomerDetails::new("Jane Doe", "jane@example.com", None).unwrap();
        let address = ShippingAddress::new("123 Main Street", "Springfield", "10001").unwrap();
        let lines = vec![OrderLine {
            product_id: ProductId::new(1),
            name: "Headphones".to_string(),
            unit_price_cents: 19999,
            quantity: 2,
        }];
        OrderDraft::new(customer, address, lines).unwrap()
    }

    #[test]
    fn created_orders_get_sequential_ids_and_start_pending() {
        let store = InMemoryOrderStore::new();
        let a = store.create(test_draft()).unwrap();
        let b = store.create(test_draft()).unwrap();

        assert_eq!(a.id_typed(), OrderId::new(1));
        assert_eq!(b.id_typed(), OrderId::new(2));
        assert_eq!(a.status(), OrderStatus::Pending);
    }

    #[test]
    fn get_returns_the_stored_order() {
        let store = InMemoryOrderStore::new();
        let created = store.create(test_draft()).unwrap();
        let fetched = store.get(created.id_typed()).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn set_status_applies_the_lifecycle_rules() {
        let store = InMemoryOrderStore::new();
        let order = store.create(test_draft()).unwrap();

        let paid = store.set_status(order.id_typed(), OrderStatus::Paid).unwrap();
        assert_eq!(paid.status(), OrderStatus::Paid);

        // Paid is terminal; the stored order is untouched on failure.
        let err = store
            .set_status(order.id_typed(), OrderStatus::Pending)
            .unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("expected InvariantViolation"),
        }
        assert_eq!(
            store.get(order.id_typed()).unwrap().status(),
            OrderStatus::Paid
        );
    }

    #[test]
    fn set_status_for_unknown_order_is_not_found() {
        let store = InMemoryOrderStore::new();
        let err = store
            .set_status(OrderId::new(9), OrderStatus::Paid)
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn attach_payment_intent_persists_on_the_order() {
        let store = InMemoryOrderStore::new();
        let order = store.create(test_draft()).unwrap();

        let updated = store
            .attach_payment_intent(order.id_typed(), "pi_test".to_string())
            .unwrap();
        assert_eq!(updated.payment_intent_id(), Some("pi_test"));
        assert_eq!(
            store.get(order.id_typed()).unwrap().payment_intent_id(),
            Some("pi_test")
        );
    }
}
