// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Savings goals. Goals do not partition funds: every goal of an owner
//! reports progress against the same global net-savings figure (total income
//! minus total expense, floored at zero).

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerError;
use crate::models::{SavingsGoal, Transaction};
use crate::reports;
use crate::store::{GoalMap, Store};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub name: String,
    pub target: Decimal,
    pub saved: Decimal,
    pub percent: Decimal,
    pub created_at: String,
}

pub struct GoalTracker<S: Store> {
    store: S,
    goals: GoalMap,
}

impl<S: Store> GoalTracker<S> {
    pub fn load(store: S) -> Result<Self, LedgerError> {
        let goals = store.load_goals()?;
        Ok(GoalTracker { store, goals })
    }

    /// Create or overwrite a goal. Saved progress starts at zero and is
    /// recomputed on every read.
    pub fn set_goal(&mut self, owner: &str, name: &str, target: Decimal) -> Result<(), LedgerError> {
        if target <= Decimal::ZERO {
            return Err(LedgerError::InvalidInput(format!(
                "goal target must be positive, got {}",
                target
            )));
        }
        self.goals.entry(owner.to_string()).or_default().insert(
            name.trim().to_string(),
            SavingsGoal {
                target: target.round_dp(2),
                saved: Decimal::ZERO,
                created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            },
        );
        self.store.save_goals(&self.goals)?;
        Ok(())
    }

    /// Recompute every goal of the owner against the ledger snapshot,
    /// persist the updated `saved` figures, and report progress percentages
    /// clamped to [0, 100].
    pub fn progress(
        &mut self,
        owner: &str,
        txns: &[Transaction],
    ) -> Result<Vec<GoalProgress>, LedgerError> {
        let Some(owner_goals) = self.goals.get_mut(owner) else {
            return Ok(Vec::new());
        };
        if owner_goals.is_empty() {
            return Ok(Vec::new());
        }
        let net_savings = reports::dashboard(txns, owner)
            .net_balance
            .max(Decimal::ZERO);
        let hundred = Decimal::from(100);
        let mut out = Vec::with_capacity(owner_goals.len());
        for (name, goal) in owner_goals.iter_mut() {
            goal.saved = net_savings.min(goal.target);
            let percent = if goal.target > Decimal::ZERO {
                (goal.saved / goal.target * hundred)
                    .round_dp(1)
                    .clamp(Decimal::ZERO, hundred)
            } else {
                Decimal::ZERO
            };
            out.push(GoalProgress {
                name: name.clone(),
                target: goal.target,
                saved: goal.saved,
                percent,
                created_at: goal.created_at.clone(),
            });
        }
        self.store.save_goals(&self.goals)?;
        Ok(out)
    }
}
