//! Inventory item: pending → acquired → delivered.

use serde::{Deserialize, Serialize};

use vowplan_core::{DomainError, DomainResult, Entity, ItemId, Money, WeddingId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Acquired,
    Delivered,
}

impl ItemStatus {
    fn next(self) -> Option<ItemStatus> {
        match self {
            ItemStatus::Pending => Some(ItemStatus::Acquired),
            ItemStatus::Acquired => Some(ItemStatus::Delivered),
            ItemStatus::Delivered => None,
        }
    }
}

/// A physical item needed for one wedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    wedding_id: WeddingId,
    name: String,
    quantity: u32,
    supplier: Option<String>,
    category: String,
    status: ItemStatus,
    notes: Option<String>,
    price: Option<Money>,
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

impl Item {
    pub fn new(
        id: ItemId,
        wedding_id: WeddingId,
        name: impl Into<String>,
        quantity: u32,
        category: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        Ok(Self {
            id,
            wedding_id,
            name,
            quantity,
            supplier: None,
            category: category.into(),
            status: ItemStatus::Pending,
            notes: None,
            price: None,
        })
    }

    pub fn wedding_id(&self) -> WeddingId {
        self.wedding_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn supplier(&self) -> Option<&str> {
        self.supplier.as_deref()
    }

    pub fn price(&self) -> Option<Money> {
        self.price
    }

    pub fn set_supplier(&mut self, supplier: impl Into<String>) {
        self.supplier = Some(supplier.into());
    }

    pub fn set_price(&mut self, price: Money) -> DomainResult<()> {
        if price.is_negative() {
            return Err(DomainError::validation("price cannot be negative"));
        }
        self.price = Some(price);
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Move to the next status. No skipping, no regressing.
    pub fn advance(&mut self) -> DomainResult<ItemStatus> {
        match self.status.next() {
            Some(next) => {
                self.status = next;
                Ok(next)
            }
            None => Err(DomainError::conflict("item already delivered")),
        }
    }

    /// Total cost when a unit price is known.
    pub fn total_price(&self) -> Option<Money> {
        self.price
            .map(|p| Money::from_cents(p.cents().saturating_mul(i64::from(self.quantity))))
    }
}
