//! Bus wiring for the notification center.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use vowplan_events::Subscription;
use vowplan_notifications::NotificationCenter;

use crate::event::{PlannerBus, PlannerEvent, PlannerTopic};

/// Subscribe the notification center to newly created events.
///
/// The center is shared behind a mutex so the UI can read the unread counter
/// while the bus handler feeds it. The handler must never be invoked while
/// the caller already holds the lock; planner flows publish only after
/// releasing their own state, so this holds in practice.
pub fn attach_notifications(
    bus: &PlannerBus,
    center: Arc<Mutex<NotificationCenter>>,
) -> Subscription<PlannerEvent> {
    bus.subscribe(PlannerTopic::EventCreated, move |message| {
        let PlannerEvent::EventCreated(event) = message else {
            return Ok(());
        };
        let mut center = center
            .lock()
            .map_err(|_| anyhow::anyhow!("notification center lock poisoned"))?;
        center.observe(event, Utc::now());
        Ok(())
    })
}
