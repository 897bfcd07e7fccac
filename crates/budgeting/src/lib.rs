//! Budgeting domain: per-wedding budgets, categories and line items.

pub mod budget;

pub use budget::{
    Budget, BudgetCategory, BudgetItem, BudgetItemId, CategoryBreakdown, CategoryId, ItemPatch,
};
