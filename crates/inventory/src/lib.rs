//! Inventory domain module.
//!
//! Business rules for stock on hand, implemented purely as deterministic
//! domain logic (no IO).

pub mod item;

pub use item::{Inventory, StockItem};
