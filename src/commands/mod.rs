// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod goals;
pub mod recurring;
pub mod reports;
pub mod transactions;
pub mod users;
