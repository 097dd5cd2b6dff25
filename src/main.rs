// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pocketledger::{cli, commands, store::FileStore};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    let store = FileStore::open_default()?;

    match matches.subcommand() {
        Some(("user", sub)) => commands::users::handle(&store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&store, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&store, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
