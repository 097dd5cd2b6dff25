// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use pocketledger::error::LedgerError;
use pocketledger::ledger::Ledger;
use pocketledger::models::{Frequency, TxKind};
use pocketledger::recurring::RecurrenceScheduler;
use pocketledger::store::MemStore;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn due_template_materializes_once_and_advances_from_previous_due_date() {
    let store = MemStore::new();
    let mut ledger = Ledger::load(&store).unwrap();
    let mut scheduler = RecurrenceScheduler::load(&store).unwrap();
    scheduler
        .add(
            "alice",
            dec("1200"),
            "Rent",
            "monthly rent",
            TxKind::Expense,
            Frequency::Monthly,
            date("2024-01-01"),
        )
        .unwrap();

    // Months late: still exactly one occurrence, and the cursor advances by
    // the fixed 30-day offset from the PREVIOUS due date, not from today.
    let made = scheduler
        .process(&mut ledger, "alice", date("2024-03-15"))
        .unwrap();
    assert_eq!(made.len(), 1);
    assert_eq!(made[0].amount, dec("1200.00"));
    assert_eq!(made[0].category, "Rent");
    assert_eq!(ledger.list_for("alice").len(), 1);
    assert_eq!(
        scheduler.list_for("alice")[0].next_due_date,
        date("2024-01-31")
    );
}

#[test]
fn not_yet_due_template_is_untouched() {
    let store = MemStore::new();
    let mut ledger = Ledger::load(&store).unwrap();
    let mut scheduler = RecurrenceScheduler::load(&store).unwrap();
    scheduler
        .add(
            "alice",
            dec("50"),
            "Gym",
            "",
            TxKind::Expense,
            Frequency::Weekly,
            date("2024-06-01"),
        )
        .unwrap();

    let made = scheduler
        .process(&mut ledger, "alice", date("2024-05-31"))
        .unwrap();
    assert!(made.is_empty());
    assert!(ledger.list_for("alice").is_empty());
    assert_eq!(
        scheduler.list_for("alice")[0].next_due_date,
        date("2024-06-01")
    );
}

#[test]
fn daily_and_weekly_offsets() {
    let store = MemStore::new();
    let mut ledger = Ledger::load(&store).unwrap();
    let mut scheduler = RecurrenceScheduler::load(&store).unwrap();
    scheduler
        .add("bob", dec("3"), "Coffee", "", TxKind::Expense, Frequency::Daily, date("2024-01-01"))
        .unwrap();
    scheduler
        .add("bob", dec("20"), "Savings", "", TxKind::Income, Frequency::Weekly, date("2024-01-01"))
        .unwrap();

    let made = scheduler
        .process(&mut ledger, "bob", date("2024-01-01"))
        .unwrap();
    assert_eq!(made.len(), 2);
    let templates = scheduler.list_for("bob");
    assert_eq!(templates[0].next_due_date, date("2024-01-02"));
    assert_eq!(templates[1].next_due_date, date("2024-01-08"));
}

#[test]
fn repeated_processing_catches_up_one_period_per_call() {
    let store = MemStore::new();
    let mut ledger = Ledger::load(&store).unwrap();
    let mut scheduler = RecurrenceScheduler::load(&store).unwrap();
    scheduler
        .add("alice", dec("10"), "Music", "", TxKind::Expense, Frequency::Monthly, date("2024-01-01"))
        .unwrap();

    let today = date("2024-03-15");
    assert_eq!(scheduler.process(&mut ledger, "alice", today).unwrap().len(), 1);
    // Still behind today, so a second call fires again: one period per call.
    assert_eq!(scheduler.process(&mut ledger, "alice", today).unwrap().len(), 1);
    assert_eq!(
        scheduler.list_for("alice")[0].next_due_date,
        date("2024-03-01")
    );
    assert_eq!(ledger.list_for("alice").len(), 2);
}

#[test]
fn process_for_owner_without_templates_is_a_no_op() {
    let store = MemStore::new();
    let mut ledger = Ledger::load(&store).unwrap();
    let mut scheduler = RecurrenceScheduler::load(&store).unwrap();
    let made = scheduler
        .process(&mut ledger, "ghost", date("2024-01-01"))
        .unwrap();
    assert!(made.is_empty());
}

#[test]
fn template_rejects_negative_amount() {
    let store = MemStore::new();
    let mut scheduler = RecurrenceScheduler::load(&store).unwrap();
    let err = scheduler
        .add("alice", dec("-5"), "Rent", "", TxKind::Expense, Frequency::Monthly, date("2024-01-01"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));
    assert!(scheduler.list_for("alice").is_empty());
}

#[test]
fn frequency_parse_and_offsets() {
    assert_eq!("daily".parse::<Frequency>().unwrap().offset_days(), 1);
    assert_eq!("Weekly".parse::<Frequency>().unwrap().offset_days(), 7);
    assert_eq!("MONTHLY".parse::<Frequency>().unwrap().offset_days(), 30);
    assert!("yearly".parse::<Frequency>().is_err());
}
