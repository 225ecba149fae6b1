//! Client-held shopping cart.
//!
//! The cart is a thin manager over persistent key-value storage: line items
//! serialize as JSON under a single key, totals and counts are derived on
//! read, and every mutation notifies subscribers with the fresh state.

pub mod manager;
pub mod notify;
pub mod state;
pub mod storage;

pub use manager::{CART_STORAGE_KEY, CartManager};
pub use notify::Subscription;
pub use state::{CartLine, CartState};
pub use storage::{InMemoryKeyValueStore, KeyValueStore};
