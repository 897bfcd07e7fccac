//! Contracts domain: client and supplier agreements scoped to a wedding.

pub mod contract;

pub use contract::{Contract, ContractKind, ContractStatus};
