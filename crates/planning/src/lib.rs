//! Planning domain: profiles and the weddings they manage.
//!
//! A profile is the multi-tenant scoping unit (a named sub-account under a
//! user); every wedding belongs to exactly one profile, and everything else
//! (budget, contracts, items, payments, events) is scoped to one wedding.

pub mod profile;
pub mod wedding;

pub use profile::Profile;
pub use wedding::{Wedding, WeddingStatus};
