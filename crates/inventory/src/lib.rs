//! Inventory domain: physical items tracked per wedding.

pub mod item;

pub use item::{Item, ItemStatus};
