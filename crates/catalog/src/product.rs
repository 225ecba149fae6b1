use serde::{Deserialize, Serialize};

use shopflow_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Category sentinel meaning "no category constraint".
pub const ALL_CATEGORIES: &str = "All Categories";

/// Star rating in tenths of a star (`42` renders as "4.2").
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u16);

impl Rating {
    /// Ratings run from zero to five stars.
    pub const MAX_TENTHS: u16 = 50;

    pub fn from_tenths(tenths: u16) -> DomainResult<Self> {
        if tenths > Self::MAX_TENTHS {
            return Err(DomainError::validation(format!(
                "rating must be at most {} tenths, got {tenths}",
                Self::MAX_TENTHS
            )));
        }
        Ok(Self(tenths))
    }

    pub fn tenths(&self) -> u16 {
        self.0
    }
}

impl core::fmt::Display for Rating {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl ValueObject for Rating {}

/// Catalog record for a sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price_cents: u64,
    /// Pre-discount price; present only while the product is on sale.
    pub original_price_cents: Option<u64>,
    pub image: String,
    pub category: String,
    pub rating: Rating,
    pub review_count: u32,
    pub badge: Option<String>,
    pub in_stock: bool,
}

impl Product {
    pub fn is_discounted(&self) -> bool {
        self.original_price_cents.is_some()
    }

    /// Check if product can be sold (out-of-stock products stay listed but
    /// cannot enter a cart).
    pub fn can_be_sold(&self) -> bool {
        self.in_stock
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input record for a product not yet admitted to the catalog.
///
/// The catalog store assigns the id at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price_cents: u64,
    pub original_price_cents: Option<u64>,
    pub image: String,
    pub category: String,
    pub rating: Rating,
    pub review_count: u32,
    pub badge: Option<String>,
    pub in_stock: bool,
}

impl NewProduct {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        if self.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }

        if self.price_cents == 0 {
            return Err(DomainError::validation("price must be positive"));
        }

        if let Some(original) = self.original_price_cents {
            if original <= self.price_cents {
                return Err(DomainError::validation(
                    "original price must exceed the sale price",
                ));
            }
        }

        Ok(())
    }

    pub fn into_product(self, id: ProductId) -> DomainResult<Product> {
        self.validate()?;

        Ok(Product {
            id,
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
            original_price_cents: self.original_price_cents,
            image: self.image,
            category: self.category,
            rating: self.rating,
            review_count: self.review_count,
            badge: self.badge,
            in_stock: self.in_stock,
        })
    }
}

/// Catalog listing filter.
///
/// Absent constraints match everything; present constraints combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact category match. The `"All Categories"` sentinel matches everything.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price_cents: Option<u64>,
    /// Inclusive upper price bound.
    pub max_price_cents: Option<u64>,
    /// Case-insensitive substring match against name or description.
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self == &ProductFilter::default()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if category != ALL_CATEGORIES && product.category != *category {
                return false;
            }
        }

        if let Some(min) = self.min_price_cents {
            if product.price_cents < min {
                return false;
            }
        }

        if let Some(max) = self.max_price_cents {
            if product.price_cents > max {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_description = product.description.to_lowercase().contains(&needle);
            if !in_name && !in_description {
                return false;
            }
        }

        true
    }
}

/// Catalog listing order.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductSort {
    /// Insertion order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    /// Highest rating first.
    Rating,
    /// Most reviewed first.
    Popular,
}

impl ProductSort {
    /// Reorder `products` in place. Sorts are stable, so ties keep their
    /// insertion order.
    pub fn apply(self, products: &mut [Product]) {
        match self {
            ProductSort::Default => {}
            ProductSort::PriceAsc => products.sort_by_key(|p| p.price_cents),
            ProductSort::PriceDesc => {
                products.sort_by(|a, b| b.price_cents.cmp(&a.price_cents))
            }
            ProductSort::Rating => products.sort_by(|a, b| b.rating.cmp(&a.rating)),
            ProductSort::Popular => {
                products.sort_by(|a, b| b.review_count.cmp(&a.review_count))
            }
        }
    }
}
