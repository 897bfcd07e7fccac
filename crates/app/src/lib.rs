//! Application composition: wires the planner domain to the bus.
//!
//! This crate owns the closed [`PlannerEvent`] union, the [`Planner`] facade
//! through which all calendar mutations flow, and the bus consumers that keep
//! derived view state fresh (dashboard cache, notification center).

pub mod dashboard;
pub mod event;
pub mod notify;
pub mod planner;

pub use dashboard::{DashboardCache, DashboardSnapshot, DashboardStats};
pub use event::{PlannerBus, PlannerEvent, PlannerTopic};
pub use notify::attach_notifications;
pub use planner::{Planner, PlannerError};
