//! Dashboard view state: derived, cached, invalidated by the bus.
//!
//! The snapshot is recomputed from planner state rather than patched
//! incrementally; calendar mutations only mark the cache stale.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use vowplan_calendar::CalendarEvent;
use vowplan_core::{Money, WeddingId};
use vowplan_events::Subscription;
use vowplan_payments::{Payment, PaymentStatus, outstanding_total};
use vowplan_planning::WeddingStatus;

use crate::event::{PlannerBus, PlannerEvent, PlannerTopic};
use crate::planner::Planner;

/// How far ahead "upcoming" reaches.
const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Aggregate counters across all weddings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_weddings: usize,
    pub upcoming_weddings: usize,
    pub total_budget: Money,
    pub total_paid: Money,
}

/// Everything the dashboard screen shows for the active wedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub active_wedding: Option<WeddingId>,
    /// Events starting within the next 30 days, soonest first.
    pub upcoming_events: Vec<CalendarEvent>,
    /// Unsettled payments, due-date order.
    pub pending_payments: Vec<Payment>,
    pub outstanding: Money,
    pub stats: DashboardStats,
}

impl DashboardSnapshot {
    /// Recompute from current planner state.
    pub fn compute(planner: &Planner, now: DateTime<Utc>) -> Self {
        let window_end = now + Duration::days(UPCOMING_WINDOW_DAYS);
        let active_wedding = planner.active_wedding();

        let (upcoming_events, pending_payments, outstanding) = match active_wedding {
            Some(id) => {
                let mut events: Vec<CalendarEvent> = planner
                    .events(id)
                    .iter()
                    .filter(|e| e.start > now && e.start < window_end)
                    .cloned()
                    .collect();
                events.sort_by_key(|e| e.start);

                let payments = planner.payments(id);
                let pending: Vec<Payment> = payments
                    .iter()
                    .filter(|p| p.status_as_of(now) != PaymentStatus::Paid)
                    .cloned()
                    .collect();
                (events, pending, outstanding_total(payments, now))
            }
            None => (Vec::new(), Vec::new(), Money::ZERO),
        };

        let stats = DashboardStats {
            total_weddings: planner.weddings().count(),
            upcoming_weddings: planner
                .weddings()
                .filter(|w| w.status() == WeddingStatus::Upcoming)
                .count(),
            total_budget: planner.weddings().map(|w| w.budget()).sum(),
            total_paid: planner.weddings().map(|w| w.total_paid()).sum(),
        };

        Self {
            active_wedding,
            upcoming_events,
            pending_payments,
            outstanding,
            stats,
        }
    }
}

/// Stale-flag cache invalidated by calendar and selection events.
///
/// Subscribers only flip a flag; the snapshot itself is recomputed on demand
/// by whoever owns the planner. This keeps bus handlers free of references
/// into planner state.
pub struct DashboardCache {
    stale: Arc<AtomicBool>,
    snapshot: Option<DashboardSnapshot>,
    subscriptions: Vec<Subscription<PlannerEvent>>,
}

impl DashboardCache {
    /// Subscribe invalidation handlers on every topic the dashboard derives
    /// from. The cache starts stale.
    pub fn attach(bus: &PlannerBus) -> Self {
        let stale = Arc::new(AtomicBool::new(true));
        let topics = [
            PlannerTopic::EventCreated,
            PlannerTopic::EventUpdated,
            PlannerTopic::EventDeleted,
            PlannerTopic::WeddingSelected,
        ];
        let subscriptions = topics
            .into_iter()
            .map(|topic| {
                let stale = Arc::clone(&stale);
                bus.subscribe(topic, move |_| {
                    stale.store(true, Ordering::Relaxed);
                    Ok(())
                })
            })
            .collect();

        Self {
            stale,
            snapshot: None,
            subscriptions,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Relaxed)
    }

    /// Return the cached snapshot, recomputing only when stale.
    pub fn refresh(&mut self, planner: &Planner, now: DateTime<Utc>) -> &DashboardSnapshot {
        if self.is_stale() {
            self.snapshot = Some(DashboardSnapshot::compute(planner, now));
            self.stale.store(false, Ordering::Relaxed);
        }
        self.snapshot
            .get_or_insert_with(|| DashboardSnapshot::compute(planner, now))
    }

    /// Remove the invalidation handlers from the bus.
    pub fn detach(mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.cancel();
        }
    }
}
