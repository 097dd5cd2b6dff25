// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::budgets::BudgetBook;
use crate::store::FileStore;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, parse_month, pretty_table};

pub fn handle(store: &FileStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    let mut book = BudgetBook::load(store)?;
    book.set(owner, &month, limit)?;
    println!("Budget set for {} / {} = {}", owner, month, fmt_money(&limit));
    Ok(())
}

fn list(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let book = BudgetBook::load(store)?;
    let budgets = book.list_for(owner);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budgets)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = budgets
        .into_iter()
        .map(|(month, limit)| vec![month.to_string(), fmt_money(&limit)])
        .collect();
    println!("{}", pretty_table(&["Month", "Limit"], rows));
    Ok(())
}
