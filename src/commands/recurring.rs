// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;

use crate::auth::UserManager;
use crate::ledger::Ledger;
use crate::models::{Frequency, TxKind};
use crate::recurring::RecurrenceScheduler;
use crate::store::FileStore;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};

pub fn handle(store: &FileStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("process", sub)) => process(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let kind: TxKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let frequency: Frequency = sub.get_one::<String>("frequency").unwrap().parse()?;
    let description = sub.get_one::<String>("description").unwrap();

    let mut scheduler = RecurrenceScheduler::load(store)?;
    let today = Utc::now().date_naive();
    scheduler.add(owner, amount, category, description, kind, frequency, today)?;
    println!(
        "Recurring {} of {} added ({})",
        kind,
        fmt_money(&amount),
        frequency
    );
    Ok(())
}

fn list(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let scheduler = RecurrenceScheduler::load(store)?;
    let templates = scheduler.list_for(owner);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &templates)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = templates
        .iter()
        .map(|t| {
            vec![
                t.kind.to_string(),
                fmt_money(&t.amount),
                t.category.clone(),
                t.frequency.to_string(),
                t.next_due_date.to_string(),
                t.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Kind", "Amount", "Category", "Frequency", "Next Due", "Description"],
            rows,
        )
    );
    Ok(())
}

fn process(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let mut ledger = Ledger::load(store)?;
    let mut scheduler = RecurrenceScheduler::load(store)?;
    let today = Utc::now().date_naive();
    let materialized = scheduler.process(&mut ledger, owner, today)?;
    if materialized.is_empty() {
        println!("No recurring transactions due");
        return Ok(());
    }
    let mut users = UserManager::load(store)?;
    for txn in &materialized {
        let delta = match txn.kind {
            TxKind::Income => txn.amount,
            TxKind::Expense => -txn.amount,
        };
        users.update_balance(owner, delta)?;
        println!(
            "Processed {} {} of {} (id {})",
            txn.kind,
            txn.category,
            fmt_money(&txn.amount),
            txn.id
        );
    }
    println!("{} recurring transaction(s) materialized", materialized.len());
    Ok(())
}
