// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::auth::UserManager;
use crate::store::FileStore;
use crate::utils::fmt_money;

pub fn handle(store: &FileStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => register(store, sub)?,
        Some(("login", sub)) => login(store, sub)?,
        Some(("balance", sub)) => balance(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn register(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let secret = sub.get_one::<String>("secret").unwrap();
    let mut users = UserManager::load(store)?;
    users.register(name, secret)?;
    println!("Registered user '{}'", name);
    Ok(())
}

fn login(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let secret = sub.get_one::<String>("secret").unwrap();
    let users = UserManager::load(store)?;
    let session = users.authenticate(name, secret)?;
    println!("Login successful for '{}'", session.username);
    Ok(())
}

fn balance(store: &FileStore, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("user").unwrap();
    let users = UserManager::load(store)?;
    println!("{}", fmt_money(&users.balance(owner)));
    Ok(())
}
