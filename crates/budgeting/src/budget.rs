//! Budget aggregate: categories own line items; the total is derived.
//!
//! Invariant maintained by every mutation: `total_amount` equals the sum of
//! all item amounts across all categories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vowplan_core::{BudgetId, DomainError, DomainResult, Entity, Money, WeddingId};

/// Identifier of a budget category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of a budget line item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetItemId(Uuid);

impl BudgetItemId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for BudgetItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// One budgeted expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: BudgetItemId,
    pub name: String,
    pub amount: Money,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub is_paid: bool,
}

impl BudgetItem {
    pub fn new(name: impl Into<String>, amount: Money) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if amount.is_negative() {
            return Err(DomainError::validation("item amount cannot be negative"));
        }
        Ok(Self {
            id: BudgetItemId::new(),
            name,
            amount,
            supplier: None,
            notes: None,
            is_paid: false,
        })
    }
}

/// Partial update of a line item; `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub amount: Option<Money>,
    pub supplier: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: CategoryId,
    pub name: String,
    pub items: Vec<BudgetItem>,
}

impl BudgetCategory {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }
        Ok(Self {
            id: CategoryId::new(),
            name,
            items: Vec::new(),
        })
    }

    fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.amount).sum()
    }
}

/// Per-category slice of the total, for distribution charts.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub category_id: CategoryId,
    pub name: String,
    pub amount: Money,
    /// Share of the budget total, in [0.0, 1.0]. Zero when the total is zero.
    pub share: f64,
}

/// A wedding's budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    id: BudgetId,
    wedding_id: WeddingId,
    categories: Vec<BudgetCategory>,
    total_amount: Money,
    notes: Option<String>,
}

impl Entity for Budget {
    type Id = BudgetId;

    fn id(&self) -> &BudgetId {
        &self.id
    }
}

impl Budget {
    pub fn new(id: BudgetId, wedding_id: WeddingId) -> Self {
        Self {
            id,
            wedding_id,
            categories: Vec::new(),
            total_amount: Money::ZERO,
            notes: None,
        }
    }

    pub fn wedding_id(&self) -> WeddingId {
        self.wedding_id
    }

    pub fn categories(&self) -> &[BudgetCategory] {
        &self.categories
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = Some(notes.into());
    }

    pub fn add_category(&mut self, category: BudgetCategory) -> CategoryId {
        let id = category.id;
        self.categories.push(category);
        self.recalculate();
        id
    }

    /// Add an item to a category. Unknown category is [`DomainError::NotFound`].
    pub fn add_item(&mut self, category_id: CategoryId, item: BudgetItem) -> DomainResult<BudgetItemId> {
        let category = self.category_mut(category_id)?;
        let id = item.id;
        category.items.push(item);
        self.recalculate();
        Ok(id)
    }

    /// Apply a partial update to one item, then re-derive the total.
    pub fn edit_item(
        &mut self,
        category_id: CategoryId,
        item_id: BudgetItemId,
        patch: ItemPatch,
    ) -> DomainResult<()> {
        let category = self.category_mut(category_id)?;
        let item = category
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(DomainError::NotFound)?;

        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("item name cannot be empty"));
            }
            item.name = name;
        }
        if let Some(amount) = patch.amount {
            if amount.is_negative() {
                return Err(DomainError::validation("item amount cannot be negative"));
            }
            item.amount = amount;
        }
        if let Some(supplier) = patch.supplier {
            item.supplier = supplier;
        }
        if let Some(notes) = patch.notes {
            item.notes = notes;
        }
        if let Some(is_paid) = patch.is_paid {
            item.is_paid = is_paid;
        }

        self.recalculate();
        Ok(())
    }

    /// Move an item between categories, optionally patching it in the same
    /// step. When source and destination are the same category this is just
    /// an in-place edit.
    pub fn move_item(
        &mut self,
        from: CategoryId,
        to: CategoryId,
        item_id: BudgetItemId,
        patch: ItemPatch,
    ) -> DomainResult<()> {
        if from == to {
            return self.edit_item(from, item_id, patch);
        }
        // Destination must exist, and the patch must apply cleanly, before
        // the item is detached; a failure on either leaves the item where it
        // was.
        self.category_mut(to)?;
        self.edit_item(from, item_id, patch)?;

        let source = self.category_mut(from)?;
        let position = source
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or(DomainError::NotFound)?;
        let item = source.items.remove(position);

        let destination = self.category_mut(to)?;
        destination.items.push(item);

        self.recalculate();
        Ok(())
    }

    pub fn remove_item(&mut self, category_id: CategoryId, item_id: BudgetItemId) -> DomainResult<()> {
        let category = self.category_mut(category_id)?;
        let before = category.items.len();
        category.items.retain(|i| i.id != item_id);
        if category.items.len() == before {
            return Err(DomainError::NotFound);
        }
        self.recalculate();
        Ok(())
    }

    /// Per-category totals and their share of the overall total.
    pub fn breakdown(&self) -> Vec<CategoryBreakdown> {
        let total = self.total_amount.cents();
        self.categories
            .iter()
            .map(|category| {
                let amount = category.subtotal();
                let share = if total == 0 {
                    0.0
                } else {
                    amount.cents() as f64 / total as f64
                };
                CategoryBreakdown {
                    category_id: category.id,
                    name: category.name.clone(),
                    amount,
                    share,
                }
            })
            .collect()
    }

    /// Sum of everything not yet marked paid.
    pub fn unpaid_amount(&self) -> Money {
        self.categories
            .iter()
            .flat_map(|c| &c.items)
            .filter(|i| !i.is_paid)
            .map(|i| i.amount)
            .sum()
    }

    fn category_mut(&mut self, id: CategoryId) -> DomainResult<&mut BudgetCategory> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::NotFound)
    }

    fn recalculate(&mut self) {
        self.total_amount = self.categories.iter().map(BudgetCategory::subtotal).sum();
    }
}
