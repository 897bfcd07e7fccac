//! Event reminders: who needs a toast, and how many are unread.
//!
//! This crate renders nothing. It decides *whether* an observed calendar
//! event deserves a notification and keeps the unread counter; showing a
//! toast or badge is the embedding UI's job.

pub mod center;

pub use center::{Notification, NotificationCenter, Urgency, kind_badge};
