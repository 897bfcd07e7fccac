//! Wedding: the top-level grouping entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use vowplan_core::{DomainError, DomainResult, Entity, Money, WeddingId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeddingStatus {
    Upcoming,
    Completed,
    Canceled,
}

/// A wedding under planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wedding {
    id: WeddingId,
    title: String,
    date: NaiveDate,
    location: String,
    client_names: String,
    status: WeddingStatus,
    budget: Money,
    total_paid: Money,
    cover_image: Option<String>,
}

impl Entity for Wedding {
    type Id = WeddingId;

    fn id(&self) -> &WeddingId {
        &self.id
    }
}

impl Wedding {
    /// Create an upcoming wedding with nothing paid yet.
    pub fn new(
        id: WeddingId,
        title: impl Into<String>,
        date: NaiveDate,
        location: impl Into<String>,
        client_names: impl Into<String>,
        budget: Money,
    ) -> DomainResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if budget.is_negative() {
            return Err(DomainError::validation("budget cannot be negative"));
        }

        Ok(Self {
            id,
            title,
            date,
            location: location.into(),
            client_names: client_names.into(),
            status: WeddingStatus::Upcoming,
            budget,
            total_paid: Money::ZERO,
            cover_image: None,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn client_names(&self) -> &str {
        &self.client_names
    }

    pub fn status(&self) -> WeddingStatus {
        self.status
    }

    pub fn budget(&self) -> Money {
        self.budget
    }

    pub fn total_paid(&self) -> Money {
        self.total_paid
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }

    pub fn set_cover_image(&mut self, url: impl Into<String>) {
        self.cover_image = Some(url.into());
    }

    /// What remains of the budget. Negative when payments exceed it.
    pub fn balance_due(&self) -> Money {
        self.budget.saturating_sub(self.total_paid)
    }

    /// Record an outgoing payment against this wedding.
    ///
    /// Amounts must be positive; paying more than the budget is allowed (the
    /// balance just goes negative), going over is a planning problem, not an
    /// invariant.
    pub fn record_payment(&mut self, amount: Money) -> DomainResult<()> {
        if amount <= Money::ZERO {
            return Err(DomainError::validation("payment amount must be positive"));
        }
        if self.status == WeddingStatus::Canceled {
            return Err(DomainError::conflict("cannot record payments on a canceled wedding"));
        }
        self.total_paid = self.total_paid.saturating_add(amount);
        Ok(())
    }

    pub fn complete(&mut self) -> DomainResult<()> {
        match self.status {
            WeddingStatus::Upcoming => {
                self.status = WeddingStatus::Completed;
                Ok(())
            }
            WeddingStatus::Completed => Err(DomainError::conflict("wedding already completed")),
            WeddingStatus::Canceled => Err(DomainError::conflict("wedding was canceled")),
        }
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        match self.status {
            WeddingStatus::Upcoming => {
                self.status = WeddingStatus::Canceled;
                Ok(())
            }
            WeddingStatus::Completed => Err(DomainError::conflict("wedding already completed")),
            WeddingStatus::Canceled => Err(DomainError::conflict("wedding already canceled")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wedding() -> Wedding {
        Wedding::new(
            WeddingId::new(),
            "Ana & Bruno",
            NaiveDate::from_ymd_opt(2027, 6, 19).unwrap(),
            "Sintra",
            "Ana, Bruno",
            Money::from_cents(5_000_000),
        )
        .unwrap()
    }

    #[test]
    fn new_wedding_is_upcoming_with_nothing_paid() {
        let w = wedding();
        assert_eq!(w.status(), WeddingStatus::Upcoming);
        assert_eq!(w.total_paid(), Money::ZERO);
        assert_eq!(w.balance_due(), Money::from_cents(5_000_000));
    }

    #[test]
    fn blank_title_and_negative_budget_are_rejected() {
        let date = NaiveDate::from_ymd_opt(2027, 6, 19).unwrap();
        assert!(
            Wedding::new(WeddingId::new(), " ", date, "x", "x", Money::ZERO).is_err()
        );
        assert!(
            Wedding::new(WeddingId::new(), "W", date, "x", "x", Money::from_cents(-1)).is_err()
        );
    }

    #[test]
    fn payments_accumulate_and_reduce_balance() {
        let mut w = wedding();
        w.record_payment(Money::from_cents(1_000_000)).unwrap();
        w.record_payment(Money::from_cents(500_000)).unwrap();
        assert_eq!(w.total_paid(), Money::from_cents(1_500_000));
        assert_eq!(w.balance_due(), Money::from_cents(3_500_000));
    }

    #[test]
    fn non_positive_payment_is_rejected() {
        let mut w = wedding();
        assert!(w.record_payment(Money::ZERO).is_err());
        assert!(w.record_payment(Money::from_cents(-5)).is_err());
    }

    #[test]
    fn canceled_wedding_rejects_payments_and_completion() {
        let mut w = wedding();
        w.cancel().unwrap();
        assert!(w.record_payment(Money::from_cents(1)).is_err());
        assert!(w.complete().is_err());
    }

    #[test]
    fn lifecycle_transitions_are_one_way() {
        let mut w = wedding();
        w.complete().unwrap();
        assert!(w.complete().is_err());
        assert!(w.cancel().is_err());
    }
}
