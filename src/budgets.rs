// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::store::{BudgetMap, Store};

/// Monthly spending limits, one per (owner, YYYY-MM). Setting a month again
/// overwrites it.
pub struct BudgetBook<S: Store> {
    store: S,
    budgets: BudgetMap,
}

impl<S: Store> BudgetBook<S> {
    pub fn load(store: S) -> Result<Self, LedgerError> {
        let budgets = store.load_budgets()?;
        Ok(BudgetBook { store, budgets })
    }

    pub fn set(&mut self, owner: &str, month: &str, limit: Decimal) -> Result<(), LedgerError> {
        if limit <= Decimal::ZERO {
            return Err(LedgerError::InvalidInput(format!(
                "budget limit must be positive, got {}",
                limit
            )));
        }
        self.budgets
            .entry(owner.to_string())
            .or_default()
            .insert(month.to_string(), limit.round_dp(2));
        self.store.save_budgets(&self.budgets)?;
        Ok(())
    }

    /// None when no budget is set for the month — distinct from a budget of
    /// zero expenses.
    pub fn limit_for(&self, owner: &str, month: &str) -> Option<Decimal> {
        self.budgets.get(owner).and_then(|m| m.get(month)).copied()
    }

    /// Month/limit pairs for an owner, in month order.
    pub fn list_for(&self, owner: &str) -> Vec<(&str, Decimal)> {
        self.budgets
            .get(owner)
            .map(|m| m.iter().map(|(k, v)| (k.as_str(), *v)).collect())
            .unwrap_or_default()
    }
}
