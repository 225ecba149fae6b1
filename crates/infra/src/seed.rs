//! Demo catalog loaded at startup.
//!
//! The storefront has no persistence; every start begins from this sample
//! catalog.

use shopflow_catalog::{NewProduct, Rating};
use shopflow_core::DomainResult;

use crate::catalog_store::CatalogStore;

fn product(
    name: &str,
    description: &str,
    price_cents: u64,
    original_price_cents: Option<u64>,
    image: &str,
    category: &str,
    rating_tenths: u16,
    review_count: u32,
    badge: Option<&str>,
) -> DomainResult<NewProduct> {
    Ok(NewProduct {
        name: name.to_string(),
        description: description.to_string(),
        price_cents,
        original_price_cents,
        image: image.to_string(),
        category: category.to_string(),
        rating: Rating::from_tenths(rating_tenths)?,
        review_count,
        badge: badge.map(str::to_string),
        in_stock: true,
    })
}

/// The demo products shipped with the storefront.
pub fn sample_catalog() -> DomainResult<Vec<NewProduct>> {
    Ok(vec![
        product(
            "Premium Wireless Headphones",
            "High-quality sound with noise cancellation",
            19999,
            Some(24999),
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=800&h=600",
            "Electronics",
            50,
            124,
            Some("Best Seller"),
        )?,
        product(
            "Smart Fitness Watch",
            "Track your health and fitness goals",
            29999,
            None,
            "https://images.unsplash.com/photo-1434494878577-86c23bcb06b9?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=800&h=600",
            "Electronics",
            42,
            89,
            None,
        )?,
        product(
            "Ultra-thin Laptop",
            "Powerful performance in a sleek design",
            89999,
            Some(109999),
            "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=800&h=600",
            "Electronics",
            48,
            256,
            Some("20% OFF"),
        )?,
        product(
            "Latest Smartphone",
            "Advanced camera and lightning-fast performance",
            79999,
            None,
            "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=800&h=600",
            "Electronics",
            41,
            342,
            None,
        )?,
        product(
            "Designer Jacket",
            "Premium quality materials and craftsmanship",
            14999,
            None,
            "https://images.unsplash.com/photo-1441986300917-64674bd600d8?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=800&h=600",
            "Fashion",
            47,
            76,
            Some("New"),
        )?,
        product(
            "Modern Plant Pot",
            "Elevate your home with stylish decor",
            3999,
            None,
            "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=800&h=600",
            "Home & Garden",
            43,
            45,
            None,
        )?,
        product(
            "Fitness Equipment Set",
            "Complete workout solution for home",
            19999,
            None,
            "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=800&h=600",
            "Sports",
            49,
            112,
            None,
        )?,
        product(
            "Coffee Maker Pro",
            "Brew the perfect cup every time",
            12999,
            None,
            "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=800&h=600",
            "Home & Garden",
            44,
            93,
            None,
        )?,
    ])
}

/// Load the demo products into `store`. Returns how many were admitted.
pub fn load<S: CatalogStore + ?Sized>(store: &S) -> DomainResult<usize> {
    let products = sample_catalog()?;
    let count = products.len();

    for product in products {
        store.insert(product)?;
    }

    tracing::info!("seeded catalog with {count} demo products");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use shopflow_catalog::{ProductFilter, ProductSort};
    use shopflow_core::ProductId;

    use super::*;
    use crate::catalog_store::InMemoryCatalogStore;

    #[test]
    fn seed_loads_eight_products_in_insertion_order() {
        let store = InMemoryCatalogStore::new();
        let count = load(&store).unwrap();
        assert_eq!(count, 8);

        let products = store.list(&ProductFilter::default(), ProductSort::Default);
        assert_eq!(products.len(), 8);
        assert_eq!(products[0].name, "Premium Wireless Headphones");
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[7].name, "Coffee Maker Pro");
        assert_eq!(products[7].id, ProductId::new(8));
    }

    #[test]
    fn seed_spans_multiple_categories() {
        let store = InMemoryCatalogStore::new();
        load(&store).unwrap();

        let fashion = store.list(
            &ProductFilter {
                category: Some("Fashion".to_string()),
                ..ProductFilter::default()
            },
            ProductSort::Default,
        );
        assert_eq!(fashion.len(), 1);
        assert_eq!(fashion[0].name, "Designer Jacket");
    }

    #[test]
    fn discounted_seed_products_carry_their_original_price() {
        let store = InMemoryCatalogStore::new();
        load(&store).unwrap();

        let headphones = store.get(ProductId::new(1)).unwrap();
        assert!(headphones.is_discounted());
        assert_eq!(headphones.original_price_cents, Some(24999));
        assert_eq!(headphones.badge.as_deref(), Some("Best Seller"));
    }
}
