use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use shopflow_catalog::{NewProduct, Product, ProductFilter, ProductSort};
use shopflow_core::{DomainError, DomainResult, ProductId};

/// Queryable catalog storage seam.
pub trait CatalogStore: Send + Sync {
    /// Admit a product, assigning the next id.
    fn insert(&self, product: NewProduct) -> DomainResult<Product>;

    fn get(&self, id: ProductId) -> Option<Product>;

    /// Filtered, sorted listing (linear scan).
    fn list(&self, filter: &ProductFilter, sort: ProductSort) -> Vec<Product>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        (**self).insert(product)
    }

    fn get(&self, id: ProductId) -> Option<Product> {
        (**self).get(id)
    }

    fn list(&self, filter: &ProductFilter, sort: ProductSort) -> Vec<Product> {
        (**self).list(filter, sort)
    }
}

#[derive(Debug)]
struct CatalogInner {
    /// Keyed by ascending id, so iteration order is insertion order.
    products: BTreeMap<ProductId, Product>,
    next_id: u64,
}

/// In-memory catalog store.
///
/// Not optimized for performance; listing is a linear scan over a small
/// catalog.
#[derive(Debug)]
pub struct InMemoryCatalogStore {
    inner: RwLock<CatalogInner>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self {
            inner: RwLock::new(CatalogInner {
                products: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("catalog store lock poisoned"))?;

        let id = ProductId::new(inner.next_id);
        let product = product.into_product(id)?;
        inner.next_id += 1;
        inner.products.insert(id, product.clone());

        Ok(product)
    }

    fn get(&self, id: ProductId) -> Option<Product> {
        let inner = self.inner.read().ok()?;
        inner.products.get(&id).cloned()
    }

    fn list(&self, filter: &ProductFilter, sort: ProductSort) -> Vec<Product> {
        let inner = match self.inner.read() {
            Ok(inner) => inner,
            Err(_) => return Vec::new(),
        };

        let mut results: Vec<Product> = inner
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        sort.apply(&mut results);
        results
    }
}

#[cfg(test)]
mod tests {
    use shopflow_catalog::Rating;

    use super::*;

    fn test_new_product(name: &str, category: &str, price_cents: u64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            price_cents,
            original_price_cents: None,
            image: "https://example.com/p.jpg".to_string(),
            category: category.to_string(),
            rating: Rating::from_tenths(40).unwrap(),
            review_count: 10,
            badge: None,
            in_stock: true,
        }
    }

    #[test]
    fn ids_start_at_one_and_increment() {
        let store = InMemoryCatalogStore::new();
        let a = store
            .insert(test_new_product("A", "Electronics", 100))
            .unwrap();
        let b = store
            .insert(test_new_product("B", "Electronics", 200))
            .unwrap();

        assert_eq!(a.id, ProductId::new(1));
        assert_eq!(b.id, ProductId::new(2));
    }

    #[test]
    fn insert_rejects_invalid_products_without_consuming_an_id() {
        let store = InMemoryCatalogStore::new();
        let mut bad = test_new_product("A", "Electronics", 100);
        bad.name = String::new();

        assert!(store.insert(bad).is_err());

        let next = store
            .insert(test_new_product("B", "Electronics", 200))
            .unwrap();
        assert_eq!(next.id, ProductId::new(1));
    }

    #[test]
    fn get_returns_none_for_unknown_ids() {
        let store = InMemoryCatalogStore::new();
        assert_eq!(store.get(ProductId::new(42)), None);
    }

    #[test]
    fn list_applies_filter_then_sort() {
        let store = InMemoryCatalogStore::new();
        store
            .insert(test_new_product("Laptop", "Electronics", 89999))
            .unwrap();
        store
            .insert(test_new_product("Headphones", "Electronics", 19999))
            .unwrap();
        store
            .insert(test_new_product("Jacket", "Fashion", 14999))
            .unwrap();

        let filter = ProductFilter {
            category: Some("Electronics".to_string()),
            ..ProductFilter::default()
        };
        let results = store.list(&filter, ProductSort::PriceAsc);

        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Headphones", "Laptop"]);
    }

    #[test]
    fn default_listing_preserves_insertion_order() {
        let store = InMemoryCatalogStore::new();
        store
            .insert(test_new_product("Zebra", "Electronics", 300))
            .unwrap();
        store
            .insert(test_new_product("Apple", "Electronics", 100))
            .unwrap();

        let results = store.list(&ProductFilter::default(), ProductSort::Default);
        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zebra", "Apple"]);
    }
}
