//! Profile: the multi-tenant scoping unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vowplan_core::{DomainError, DomainResult, Entity, ProfileId, UserId, WeddingId};

/// A named sub-account under a user, owning a subset of weddings.
///
/// All tenancy checks go through [`Profile::owns`]: an operation on a wedding
/// the profile does not own must be refused before it reaches the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: ProfileId,
    user_id: UserId,
    name: String,
    weddings: Vec<WeddingId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Entity for Profile {
    type Id = ProfileId;

    fn id(&self) -> &ProfileId {
        &self.id
    }
}

impl Profile {
    pub fn new(
        id: ProfileId,
        user_id: UserId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("profile name cannot be empty"));
        }
        Ok(Self {
            id,
            user_id,
            name,
            weddings: Vec::new(),
            created_at,
            updated_at: created_at,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weddings(&self) -> &[WeddingId] {
        &self.weddings
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The tenancy check: does this profile own the wedding?
    pub fn owns(&self, wedding_id: WeddingId) -> bool {
        self.weddings.contains(&wedding_id)
    }

    /// Attach a wedding to this profile. Owning it twice is a conflict.
    pub fn add_wedding(&mut self, wedding_id: WeddingId, now: DateTime<Utc>) -> DomainResult<()> {
        if self.owns(wedding_id) {
            return Err(DomainError::conflict("wedding already owned by this profile"));
        }
        self.weddings.push(wedding_id);
        self.updated_at = now;
        Ok(())
    }

    /// Detach a wedding. Unknown ids are [`DomainError::NotFound`].
    pub fn remove_wedding(&mut self, wedding_id: WeddingId, now: DateTime<Utc>) -> DomainResult<()> {
        let before = self.weddings.len();
        self.weddings.retain(|w| *w != wedding_id);
        if self.weddings.len() == before {
            return Err(DomainError::not_found());
        }
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile::new(ProfileId::new(), UserId::new(), "Atelier Norte", Utc::now()).unwrap()
    }

    #[test]
    fn fresh_profile_owns_nothing() {
        let p = profile();
        assert!(p.weddings().is_empty());
        assert!(!p.owns(WeddingId::new()));
    }

    #[test]
    fn add_then_remove_wedding_round_trips_ownership() {
        let mut p = profile();
        let wedding = WeddingId::new();

        p.add_wedding(wedding, Utc::now()).unwrap();
        assert!(p.owns(wedding));

        p.remove_wedding(wedding, Utc::now()).unwrap();
        assert!(!p.owns(wedding));
    }

    #[test]
    fn double_add_is_a_conflict() {
        let mut p = profile();
        let wedding = WeddingId::new();
        p.add_wedding(wedding, Utc::now()).unwrap();
        assert!(matches!(
            p.add_wedding(wedding, Utc::now()),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn removing_unknown_wedding_is_not_found() {
        let mut p = profile();
        assert_eq!(
            p.remove_wedding(WeddingId::new(), Utc::now()),
            Err(DomainError::NotFound)
        );
    }

    #[test]
    fn mutations_touch_updated_at() {
        let created = Utc::now();
        let mut p = Profile::new(ProfileId::new(), UserId::new(), "Atelier", created).unwrap();
        let later = created + chrono::Duration::hours(1);
        p.add_wedding(WeddingId::new(), later).unwrap();
        assert_eq!(p.updated_at(), later);
        assert_eq!(p.created_at(), created);
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(Profile::new(ProfileId::new(), UserId::new(), "  ", Utc::now()).is_err());
    }
}
