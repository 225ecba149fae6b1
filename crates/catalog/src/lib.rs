//! Catalog domain module.
//!
//! This crate contains business rules for the sellable product catalog:
//! record validation, filtered listing and sorting. No IO, no HTTP, no
//! storage.

pub mod product;

pub use product::{
    ALL_CATEGORIES, NewProduct, Product, ProductFilter, ProductSort, Rating,
};
pub use shopflow_core::ProductId;
