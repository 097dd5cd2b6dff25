// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over a ledger snapshot. Everything here is a pure function
//! of the transaction slice; nothing mutates or persists.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::models::{Transaction, TxKind};
use crate::utils::month_of;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net_balance: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetFlag {
    Ok,
    Caution,
    Exceeded,
}

impl fmt::Display for BudgetFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetFlag::Ok => write!(f, "ok"),
            BudgetFlag::Caution => write!(f, "caution"),
            BudgetFlag::Exceeded => write!(f, "exceeded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub month: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: Decimal,
    pub flag: BudgetFlag,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub score: f64,
    pub band: &'static str,
    pub note: Option<&'static str>,
}

fn totals(txns: &[Transaction], owner: &str) -> (Decimal, Decimal) {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in txns.iter().filter(|t| t.owner == owner) {
        match t.kind {
            TxKind::Income => income += t.amount,
            TxKind::Expense => expense += t.amount,
        }
    }
    (income, expense)
}

/// Total income, total expense, and their difference. All zeros for an
/// owner with no transactions; the net may be negative.
pub fn dashboard(txns: &[Transaction], owner: &str) -> Dashboard {
    let (income, expense) = totals(txns, owner);
    Dashboard {
        total_income: income.round_dp(2),
        total_expense: expense.round_dp(2),
        net_balance: (income - expense).round_dp(2),
    }
}

/// Summary of the transactions whose occurrence date falls in `month`
/// (YYYY-MM).
pub fn monthly(txns: &[Transaction], owner: &str, month: &str) -> MonthlyReport {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut count = 0usize;
    for t in txns
        .iter()
        .filter(|t| t.owner == owner && month_of(t.occurred_on) == month)
    {
        count += 1;
        match t.kind {
            TxKind::Income => income += t.amount,
            TxKind::Expense => expense += t.amount,
        }
    }
    MonthlyReport {
        month: month.to_string(),
        income: income.round_dp(2),
        expense: expense.round_dp(2),
        net_balance: (income - expense).round_dp(2),
        count,
    }
}

/// Expense totals grouped by category, sorted by descending total. Ties keep
/// alphabetical order (the grouping map is ordered and the sort is stable).
pub fn category_breakdown(txns: &[Transaction], owner: &str) -> Vec<(String, Decimal)> {
    let mut by_cat: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in txns
        .iter()
        .filter(|t| t.owner == owner && t.kind == TxKind::Expense)
    {
        *by_cat.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount;
    }
    let mut items: Vec<(String, Decimal)> = by_cat
        .into_iter()
        .map(|(c, v)| (c, v.round_dp(2)))
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
}

/// Budget position for (owner, month) against a known limit. Callers resolve
/// the "no budget set" case before calling; a zero limit reports 0% used.
pub fn budget_status(
    txns: &[Transaction],
    owner: &str,
    month: &str,
    limit: Decimal,
) -> BudgetStatus {
    let spent: Decimal = txns
        .iter()
        .filter(|t| {
            t.owner == owner && t.kind == TxKind::Expense && month_of(t.occurred_on) == month
        })
        .map(|t| t.amount)
        .sum();
    let spent = spent.round_dp(2);
    let hundred = Decimal::from(100);
    let percent_used = if limit > Decimal::ZERO {
        (spent / limit * hundred).round_dp(2).min(hundred)
    } else {
        Decimal::ZERO
    };
    let flag = if spent > limit {
        BudgetFlag::Exceeded
    } else if percent_used >= Decimal::from(90) {
        BudgetFlag::Caution
    } else {
        BudgetFlag::Ok
    };
    BudgetStatus {
        month: month.to_string(),
        limit,
        spent,
        remaining: (limit - spent).round_dp(2),
        percent_used,
        flag,
    }
}

fn band(score: f64) -> &'static str {
    if score >= 80.0 {
        "excellent"
    } else if score >= 60.0 {
        "good"
    } else if score >= 40.0 {
        "caution"
    } else {
        "poor"
    }
}

/// Heuristic 0-100 score weighting savings ratio (60), average expense size
/// (20), and expense transaction count (20).
pub fn health_score(txns: &[Transaction], owner: &str) -> HealthReport {
    let user_txns: Vec<&Transaction> = txns.iter().filter(|t| t.owner == owner).collect();
    if user_txns.is_empty() {
        return HealthReport {
            score: 0.0,
            band: band(0.0),
            note: Some("no transactions recorded"),
        };
    }
    let mut income = 0.0f64;
    let mut expense = 0.0f64;
    let mut expense_count = 0usize;
    for t in &user_txns {
        let amount = t.amount.to_f64().unwrap_or(0.0);
        match t.kind {
            TxKind::Income => income += amount,
            TxKind::Expense => {
                expense += amount;
                expense_count += 1;
            }
        }
    }
    if income == 0.0 {
        return HealthReport {
            score: 30.0,
            band: band(30.0),
            note: Some("no income recorded"),
        };
    }
    let savings_ratio = ((income - expense) / income).max(0.0);
    let avg_expense = if expense_count > 0 {
        expense / expense_count as f64
    } else {
        0.0
    };
    let raw = savings_ratio * 60.0
        + (5000.0 / (avg_expense + 1.0)).min(1.0) * 20.0
        + (20.0 / (expense_count as f64 + 1.0)).min(1.0) * 20.0;
    let score = (raw.clamp(0.0, 100.0) * 100.0).round() / 100.0;
    HealthReport {
        score,
        band: band(score),
        note: None,
    }
}
