// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::auth::UserManager;
use crate::error::LedgerError;
use crate::ledger::{Ledger, TransactionPatch};
use crate::models::{Transaction, TxKind};
use crate::store::FileStore;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};

pub fn handle(store: &FileStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("search", sub)) => search(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn balance_delta(kind: TxKind, amount: Decimal) -> Decimal {
    match kind {
        TxKind::Income => amount,
        TxKind::Expense => -amount,
    }
}

fn add(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let kind: TxKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let description = sub.get_one::<String>("description").unwrap();
    let method = sub.get_one::<String>("method").map(String::as_str);

    let mut ledger = Ledger::load(store)?;
    let txn = match sub.get_one::<String>("date") {
        Some(date) => {
            let date = parse_date(date)?;
            ledger.add_on(owner, amount, category, description, kind, method, date)?
        }
        None => ledger.add(owner, amount, category, description, kind, method)?,
    };
    let (id, date) = (txn.id, txn.occurred_on);

    let mut users = UserManager::load(store)?;
    users.update_balance(owner, balance_delta(kind, amount))?;

    println!(
        "Recorded {} {} of {} on {} (id {})",
        kind,
        category,
        fmt_money(&amount),
        date,
        id
    );
    Ok(())
}

fn print_rows(txns: &[&Transaction], json: bool, jsonl: bool) -> Result<()> {
    if maybe_print_json(json, jsonl, &txns)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = txns
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.occurred_on.to_string(),
                t.kind.to_string(),
                fmt_money(&t.amount),
                t.category.clone(),
                t.payment_method.clone().unwrap_or_default(),
                t.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Kind", "Amount", "Category", "Method", "Description"],
            rows,
        )
    );
    Ok(())
}

fn list(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let ledger = Ledger::load(store)?;
    let txns = ledger.list_for(owner);
    print_rows(&txns, sub.get_flag("json"), sub.get_flag("jsonl"))
}

fn edit(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
    let patch = TransactionPatch {
        kind: sub
            .get_one::<String>("kind")
            .map(|s| s.parse())
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_amount(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        description: sub.get_one::<String>("description").cloned(),
        occurred_on: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        payment_method: sub.get_one::<String>("method").cloned(),
    };
    let mut ledger = Ledger::load(store)?;
    match ledger.edit(id, patch) {
        Ok(txn) => println!("Updated transaction {}", txn.id),
        Err(LedgerError::NotFound) => println!("Transaction {} not found", id),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn rm(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
    let mut ledger = Ledger::load(store)?;
    if ledger.delete(id)? {
        println!("Deleted transaction {}", id);
    } else {
        println!("Transaction {} not found", id);
    }
    Ok(())
}

fn search(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let ledger = Ledger::load(store)?;
    let txns = match sub.get_one::<String>("pattern") {
        Some(pattern) => ledger.find(owner, pattern)?,
        None => {
            let from = sub
                .get_one::<String>("from")
                .map(|s| parse_date(s))
                .transpose()?;
            let to = sub
                .get_one::<String>("to")
                .map(|s| parse_date(s))
                .transpose()?;
            ledger.search(
                owner,
                sub.get_one::<String>("category").map(String::as_str),
                from,
                to,
            )
        }
    };
    print_rows(&txns, sub.get_flag("json"), sub.get_flag("jsonl"))
}
