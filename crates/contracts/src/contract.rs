//! Contract lifecycle: pending → active → completed, with expiry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vowplan_core::{ContractId, DomainError, DomainResult, Entity, Money, WeddingId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    Client,
    Supplier,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Pending,
    Active,
    Expired,
    Completed,
}

/// An agreement scoped to one wedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    id: ContractId,
    wedding_id: WeddingId,
    title: String,
    kind: ContractKind,
    supplier_name: Option<String>,
    category: Option<String>,
    signed_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    value: Money,
    document_url: Option<String>,
    status: ContractStatus,
}

impl Entity for Contract {
    type Id = ContractId;

    fn id(&self) -> &ContractId {
        &self.id
    }
}

impl Contract {
    /// Draft a pending, unsigned contract.
    pub fn new(
        id: ContractId,
        wedding_id: WeddingId,
        title: impl Into<String>,
        kind: ContractKind,
        value: Money,
    ) -> DomainResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("contract title cannot be empty"));
        }
        if value.is_negative() {
            return Err(DomainError::validation("contract value cannot be negative"));
        }
        Ok(Self {
            id,
            wedding_id,
            title,
            kind,
            supplier_name: None,
            category: None,
            signed_at: None,
            expires_at: None,
            value,
            document_url: None,
            status: ContractStatus::Pending,
        })
    }

    pub fn wedding_id(&self) -> WeddingId {
        self.wedding_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    pub fn status(&self) -> ContractStatus {
        self.status
    }

    pub fn value(&self) -> Money {
        self.value
    }

    pub fn signed_at(&self) -> Option<DateTime<Utc>> {
        self.signed_at
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn supplier_name(&self) -> Option<&str> {
        self.supplier_name.as_deref()
    }

    pub fn document_url(&self) -> Option<&str> {
        self.document_url.as_deref()
    }

    pub fn set_supplier_name(&mut self, name: impl Into<String>) {
        self.supplier_name = Some(name.into());
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into());
    }

    pub fn set_document_url(&mut self, url: impl Into<String>) {
        self.document_url = Some(url.into());
    }

    pub fn set_expiry(&mut self, expires_at: DateTime<Utc>) {
        self.expires_at = Some(expires_at);
    }

    /// Sign a pending contract, activating it.
    pub fn sign(&mut self, signed_at: DateTime<Utc>) -> DomainResult<()> {
        if self.status != ContractStatus::Pending {
            return Err(DomainError::conflict("only pending contracts can be signed"));
        }
        if let Some(expires_at) = self.expires_at {
            if signed_at >= expires_at {
                return Err(DomainError::conflict("contract has already expired"));
            }
        }
        self.signed_at = Some(signed_at);
        self.status = ContractStatus::Active;
        Ok(())
    }

    /// Close out an active contract.
    pub fn complete(&mut self) -> DomainResult<()> {
        if self.status != ContractStatus::Active {
            return Err(DomainError::conflict("only active contracts can be completed"));
        }
        self.status = ContractStatus::Completed;
        Ok(())
    }

    /// Whether the expiry date has passed as of `now`. Completed contracts
    /// never count as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        if self.status == ContractStatus::Completed {
            return false;
        }
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// Derive and store the expired status. Idempotent.
    pub fn refresh_expiry(&mut self, now: DateTime<Utc>) {
        if self.is_expired(now) {
            self.status = ContractStatus::Expired;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn contract() -> Contract {
        Contract::new(
            ContractId::new(),
            WeddingId::new(),
            "Catering agreement",
            ContractKind::Supplier,
            Money::from_cents(250_000),
        )
        .unwrap()
    }

    #[test]
    fn sign_activates_and_stamps_date() {
        let mut c = contract();
        let now = Utc::now();
        c.sign(now).unwrap();
        assert_eq!(c.status(), ContractStatus::Active);
        assert_eq!(c.signed_at(), Some(now));
    }

    #[test]
    fn signing_twice_is_a_conflict() {
        let mut c = contract();
        c.sign(Utc::now()).unwrap();
        assert!(c.sign(Utc::now()).is_err());
    }

    #[test]
    fn complete_requires_active() {
        let mut c = contract();
        assert!(c.complete().is_err());
        c.sign(Utc::now()).unwrap();
        c.complete().unwrap();
        assert_eq!(c.status(), ContractStatus::Completed);
    }

    #[test]
    fn cannot_sign_past_expiry() {
        let mut c = contract();
        let now = Utc::now();
        c.set_expiry(now - Duration::days(1));
        assert!(c.sign(now).is_err());
    }

    #[test]
    fn expiry_derivation() {
        let mut c = contract();
        let now = Utc::now();
        c.set_expiry(now + Duration::days(30));
        assert!(!c.is_expired(now));
        assert!(c.is_expired(now + Duration::days(31)));

        c.refresh_expiry(now + Duration::days(31));
        assert_eq!(c.status(), ContractStatus::Expired);
    }

    #[test]
    fn completed_contracts_never_expire() {
        let mut c = contract();
        let now = Utc::now();
        c.set_expiry(now + Duration::days(1));
        c.sign(now).unwrap();
        c.complete().unwrap();
        assert!(!c.is_expired(now + Duration::days(2)));
    }

    #[test]
    fn blank_title_and_negative_value_are_rejected() {
        assert!(
            Contract::new(ContractId::new(), WeddingId::new(), " ", ContractKind::Client, Money::ZERO)
                .is_err()
        );
        assert!(
            Contract::new(
                ContractId::new(),
                WeddingId::new(),
                "C",
                ContractKind::Client,
                Money::from_cents(-1)
            )
            .is_err()
        );
    }
}
