// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod budgets;
pub mod cli;
pub mod commands;
pub mod error;
pub mod goals;
pub mod ledger;
pub mod models;
pub mod recurring;
pub mod reports;
pub mod store;
pub mod utils;
