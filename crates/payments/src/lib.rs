//! Payments domain: scheduled payments per wedding, with derived status.

pub mod payment;

pub use payment::{Payment, PaymentStatus, outstanding_total, pending_payments};
