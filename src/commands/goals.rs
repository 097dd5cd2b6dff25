// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::goals::GoalTracker;
use crate::ledger::Ledger;
use crate::store::FileStore;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

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
    let name = sub.get_one::<String>("name").unwrap();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let mut tracker = GoalTracker::load(store)?;
    tracker.set_goal(owner, name, target)?;
    println!("Goal '{}' created with target {}", name, fmt_money(&target));
    Ok(())
}

fn list(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let ledger = Ledger::load(store)?;
    let mut tracker = GoalTracker::load(store)?;
    let progress = tracker.progress(owner, ledger.snapshot())?;
    if progress.is_empty() {
        println!("No savings goals found for '{}'", owner);
        return Ok(());
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &progress)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = progress
        .into_iter()
        .map(|g| {
            vec![
                g.name,
                fmt_money(&g.target),
                fmt_money(&g.saved),
                format!("{}%", g.percent),
                g.created_at,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Goal", "Target", "Saved", "Progress", "Created"], rows)
    );
    Ok(())
}
