//! Demo: seed a profile with one wedding, run the planning flows, print the
//! dashboard. Useful for eyeballing the wiring end to end.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, Utc};

use vowplan_app::{DashboardCache, Planner, PlannerBus, attach_notifications};
use vowplan_budgeting::{Budget, BudgetCategory, BudgetItem, ItemPatch};
use vowplan_calendar::{EventDraft, EventKind};
use vowplan_contracts::{Contract, ContractKind};
use vowplan_core::{BudgetId, ContractId, ItemId, Money, PaymentId, ProfileId, UserId, WeddingId};
use vowplan_inventory::Item;
use vowplan_notifications::NotificationCenter;
use vowplan_payments::Payment;
use vowplan_planning::{Profile, Wedding};

fn main() -> Result<()> {
    vowplan_observability::init();

    let bus = PlannerBus::new();
    let mut planner = Planner::new(bus.clone());
    let center = Arc::new(Mutex::new(NotificationCenter::new()));
    let _notifications = attach_notifications(&bus, Arc::clone(&center));
    let mut dashboard = DashboardCache::attach(&bus);

    // Tenant scoping: one profile, one wedding.
    let mut profile = Profile::new(ProfileId::new(), UserId::new(), "Atelier Norte", Utc::now())?;
    let wedding = Wedding::new(
        WeddingId::new(),
        "Ana & Bruno",
        NaiveDate::from_ymd_opt(2027, 6, 19).context("invalid wedding date")?,
        "Sintra",
        "Ana, Bruno",
        Money::from_cents(5_000_000),
    )?;
    let wedding_id = planner.add_wedding(wedding);
    profile.add_wedding(wedding_id, Utc::now())?;
    planner.select_wedding(wedding_id)?;

    // Calendar flows.
    let tomorrow = Utc::now() + Duration::days(1);
    let saved = planner.save_event(
        EventDraft::new(wedding_id)
            .title("Venue walkthrough")
            .between(tomorrow, tomorrow + Duration::hours(2))
            .kind(EventKind::Meeting)
            .location("Quinta do Lago")
            .attendees_from_list("Ana, Bruno, photographer"),
    )?;
    let mut edited = saved.clone();
    edited.title = "Venue walkthrough + tasting".to_string();
    planner.update_event(edited)?;

    // A payment due soon shows up as pending on the dashboard.
    planner.add_payment(Payment::new(
        PaymentId::new(),
        wedding_id,
        "Venue deposit",
        Money::from_cents(1_000_000),
        Utc::now() + Duration::days(14),
        "Quinta do Lago",
    )?)?;

    // Budget with a couple of categories.
    let mut budget = Budget::new(BudgetId::new(), wedding_id);
    let catering = budget.add_category(BudgetCategory::new("Catering")?);
    budget.add_category(BudgetCategory::new("Venue")?);
    let buffet = budget.add_item(catering, BudgetItem::new("Buffet", Money::from_cents(1_200_000))?)?;
    budget.edit_item(
        catering,
        buffet,
        ItemPatch {
            supplier: Some(Some("Sabores do Minho".to_string())),
            ..ItemPatch::default()
        },
    )?;

    // A signed supplier contract and an item on its way.
    let mut contract = Contract::new(
        ContractId::new(),
        wedding_id,
        "Catering agreement",
        ContractKind::Supplier,
        Money::from_cents(1_200_000),
    )?;
    contract.sign(Utc::now())?;

    let mut chairs = Item::new(ItemId::new(), wedding_id, "Chairs", 120, "Furniture")?;
    chairs.advance()?;

    let snapshot = dashboard.refresh(&planner, Utc::now());
    println!("{}", serde_json::to_string_pretty(snapshot)?);

    let unread = center
        .lock()
        .map_err(|_| anyhow::anyhow!("notification center lock poisoned"))?
        .unread();
    tracing::info!(
        unread,
        contract_status = ?contract.status(),
        chairs_status = ?chairs.status(),
        budget_total = %budget.total_amount(),
        "demo finished"
    );

    Ok(())
}
