// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use pocketledger::ledger::Ledger;
use pocketledger::models::{Frequency, RecurringTemplate, SavingsGoal, Transaction, TxKind, UserRecord};
use pocketledger::store::{FileStore, Store};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn txn(id: i64, amount: &str) -> Transaction {
    Transaction {
        id,
        owner: "alice".into(),
        kind: TxKind::Expense,
        amount: dec(amount),
        category: "Food".into(),
        description: "weekly groceries".into(),
        occurred_on: date("2024-01-10"),
        payment_method: Some("Credit Card".into()),
    }
}

#[test]
fn transactions_round_trip_through_csv() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());

    let txns = vec![txn(1, "200.00"), txn(2, "49.99")];
    store.save_transactions(&txns).unwrap();
    let loaded = store.load_transactions().unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, 1);
    assert_eq!(loaded[0].amount, dec("200.00"));
    assert_eq!(loaded[0].kind, TxKind::Expense);
    assert_eq!(loaded[0].occurred_on, date("2024-01-10"));
    assert_eq!(loaded[0].payment_method.as_deref(), Some("Credit Card"));
    assert_eq!(loaded[1].amount, dec("49.99"));
}

#[test]
fn ledger_round_trips_through_file_store() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    {
        let mut ledger = Ledger::load(&store).unwrap();
        ledger
            .add_on("alice", dec("1000"), "Salary", "pay", TxKind::Income, None, date("2024-01-05"))
            .unwrap();
        ledger
            .add_on("alice", dec("200"), "Food", "", TxKind::Expense, None, date("2024-01-10"))
            .unwrap();
    }
    let reloaded = Ledger::load(&store).unwrap();
    let txns = reloaded.list_for("alice");
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].id, 1);
    assert_eq!(txns[0].amount, dec("1000.00"));
    assert_eq!(txns[1].category, "Food");
}

#[test]
fn missing_files_load_as_empty_collections() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    assert!(store.load_transactions().unwrap().is_empty());
    assert!(store.load_users().unwrap().is_empty());
    assert!(store.load_budgets().unwrap().is_empty());
    assert!(store.load_goals().unwrap().is_empty());
    assert!(store.load_recurring().unwrap().is_empty());
}

#[test]
fn corrupt_csv_degrades_to_empty_collection() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("transactions.csv"),
        "id,owner,kind,amount,category,description,occurred_on,payment_method\nnot-a-number,alice,expense,abc,Food,,2024-01-10,\n",
    )
    .unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    assert!(store.load_transactions().unwrap().is_empty());
}

#[test]
fn corrupt_json_degrades_to_empty_collection() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("users.json"), "{ not json").unwrap();
    std::fs::write(dir.path().join("budgets.json"), "[1,2,3,").unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    assert!(store.load_users().unwrap().is_empty());
    assert!(store.load_budgets().unwrap().is_empty());
}

#[test]
fn users_budgets_goals_and_templates_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());

    let mut users = pocketledger::store::UserMap::new();
    users.insert(
        "alice".into(),
        UserRecord {
            credential_hash: "$argon2id$stub".into(),
            balance: dec("750.00"),
        },
    );
    store.save_users(&users).unwrap();

    let mut budgets = pocketledger::store::BudgetMap::new();
    budgets
        .entry("alice".into())
        .or_default()
        .insert("2024-01".into(), dec("500.00"));
    store.save_budgets(&budgets).unwrap();

    let mut goals = pocketledger::store::GoalMap::new();
    goals.entry("alice".into()).or_default().insert(
        "Car".into(),
        SavingsGoal {
            target: dec("5000"),
            saved: dec("750"),
            created_at: "2024-01-01 09:00:00".into(),
        },
    );
    store.save_goals(&goals).unwrap();

    let mut recurring = pocketledger::store::RecurringMap::new();
    recurring.entry("alice".into()).or_default().push(RecurringTemplate {
        amount: dec("1200"),
        category: "Rent".into(),
        description: "monthly rent".into(),
        kind: TxKind::Expense,
        frequency: Frequency::Monthly,
        next_due_date: date("2024-02-01"),
    });
    store.save_recurring(&recurring).unwrap();

    assert_eq!(store.load_users().unwrap()["alice"].balance, dec("750.00"));
    assert_eq!(
        store.load_budgets().unwrap()["alice"]["2024-01"],
        dec("500.00")
    );
    assert_eq!(store.load_goals().unwrap()["alice"]["Car"].target, dec("5000"));
    let tpl = &store.load_recurring().unwrap()["alice"][0];
    assert_eq!(tpl.frequency, Frequency::Monthly);
    assert_eq!(tpl.next_due_date, date("2024-02-01"));
}

#[test]
fn every_save_rewrites_the_whole_collection() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    store.save_transactions(&[txn(1, "10"), txn(2, "20")]).unwrap();
    store.save_transactions(&[txn(7, "70")]).unwrap();
    let loaded = store.load_transactions().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, 7);
}
