// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::budgets::BudgetBook;
use crate::ledger::Ledger;
use crate::reports;
use crate::store::FileStore;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};

pub fn handle(store: &FileStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("dashboard", sub)) => dashboard(store, sub)?,
        Some(("monthly", sub)) => monthly(store, sub)?,
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("budget", sub)) => budget(store, sub)?,
        Some(("health", sub)) => health(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn dashboard(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let ledger = Ledger::load(store)?;
    let report = reports::dashboard(ledger.snapshot(), owner);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Total Income", "Total Expense", "Net Balance"],
            vec![vec![
                fmt_money(&report.total_income),
                fmt_money(&report.total_expense),
                fmt_money(&report.net_balance),
            ]],
        )
    );
    Ok(())
}

fn monthly(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let ledger = Ledger::load(store)?;
    let report = reports::monthly(ledger.snapshot(), owner, &month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Month", "Income", "Expense", "Net Balance", "Count"],
            vec![vec![
                report.month.clone(),
                fmt_money(&report.income),
                fmt_money(&report.expense),
                fmt_money(&report.net_balance),
                report.count.to_string(),
            ]],
        )
    );
    Ok(())
}

fn categories(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let ledger = Ledger::load(store)?;
    let breakdown = reports::category_breakdown(ledger.snapshot(), owner);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &breakdown)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = breakdown
        .into_iter()
        .map(|(cat, total)| vec![cat, fmt_money(&total)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));
    Ok(())
}

fn budget(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let book = BudgetBook::load(store)?;
    let Some(limit) = book.limit_for(owner, &month) else {
        println!("No budget set for '{}' in {}", owner, month);
        return Ok(());
    };
    let ledger = Ledger::load(store)?;
    let status = reports::budget_status(ledger.snapshot(), owner, &month, limit);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &status)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Month", "Limit", "Spent", "Remaining", "Used %", "Status"],
            vec![vec![
                status.month.clone(),
                fmt_money(&status.limit),
                fmt_money(&status.spent),
                fmt_money(&status.remaining),
                status.percent_used.to_string(),
                status.flag.to_string(),
            ]],
        )
    );
    Ok(())
}

fn health(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let ledger = Ledger::load(store)?;
    let report = reports::health_score(ledger.snapshot(), owner);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    match report.note {
        Some(note) => println!("Health score: {:.2} ({}) - {}", report.score, report.band, note),
        None => println!("Health score: {:.2} ({})", report.score, report.band),
    }
    Ok(())
}
