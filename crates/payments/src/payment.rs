//! Payment: due date, optional settlement, derived overdue state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vowplan_core::{DomainError, DomainResult, Entity, Money, PaymentId, WeddingId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

/// A payment owed to some recipient for one wedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    id: PaymentId,
    wedding_id: WeddingId,
    title: String,
    amount: Money,
    due_date: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
    recipient: String,
    category: Option<String>,
    method: Option<String>,
    notes: Option<String>,
}

impl Entity for Payment {
    type Id = PaymentId;

    fn id(&self) -> &PaymentId {
        &self.id
    }
}

impl Payment {
    pub fn new(
        id: PaymentId,
        wedding_id: WeddingId,
        title: impl Into<String>,
        amount: Money,
        due_date: DateTime<Utc>,
        recipient: impl Into<String>,
    ) -> DomainResult<Self> {
        let title = title.into();
        let recipient = recipient.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("payment title cannot be empty"));
        }
        if recipient.trim().is_empty() {
            return Err(DomainError::validation("recipient cannot be empty"));
        }
        if amount <= Money::ZERO {
            return Err(DomainError::validation("payment amount must be positive"));
        }
        Ok(Self {
            id,
            wedding_id,
            title,
            amount,
            due_date,
            paid_at: None,
            recipient,
            category: None,
            method: None,
            notes: None,
        })
    }

    pub fn wedding_id(&self) -> WeddingId {
        self.wedding_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn is_paid(&self) -> bool {
        self.paid_at.is_some()
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into());
    }

    pub fn set_method(&mut self, method: impl Into<String>) {
        self.method = Some(method.into());
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = Some(notes.into());
    }

    /// Settle the payment. Settling twice is a conflict.
    pub fn mark_paid(&mut self, paid_at: DateTime<Utc>) -> DomainResult<()> {
        if self.paid_at.is_some() {
            return Err(DomainError::conflict("payment already settled"));
        }
        self.paid_at = Some(paid_at);
        Ok(())
    }

    /// Status derived from settlement and due date; overdue is never stored.
    pub fn status_as_of(&self, now: DateTime<Utc>) -> PaymentStatus {
        if self.is_paid() {
            PaymentStatus::Paid
        } else if now > self.due_date {
            PaymentStatus::Overdue
        } else {
            PaymentStatus::Pending
        }
    }
}

/// Unsettled payments, in due-date order.
pub fn pending_payments<'a>(payments: &'a [Payment], now: DateTime<Utc>) -> Vec<&'a Payment> {
    let mut pending: Vec<&Payment> = payments
        .iter()
        .filter(|p| p.status_as_of(now) != PaymentStatus::Paid)
        .collect();
    pending.sort_by_key(|p| p.due_date());
    pending
}

/// Sum owed across all unsettled payments.
pub fn outstanding_total(payments: &[Payment], now: DateTime<Utc>) -> Money {
    payments
        .iter()
        .filter(|p| p.status_as_of(now) != PaymentStatus::Paid)
        .map(Payment::amount)
        .sum()
}
