// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::error::LedgerError;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Amount parser for ledger input: non-negative, currency precision.
pub fn parse_amount(s: &str) -> Result<Decimal, LedgerError> {
    let d = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| LedgerError::InvalidInput(format!("invalid amount '{}'", s)))?;
    if d.is_sign_negative() {
        return Err(LedgerError::InvalidInput(format!(
            "amount must be non-negative, got '{}'",
            s
        )));
    }
    Ok(d.round_dp(2))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

/// "YYYY-MM" bucket of a date; monthly filters compare against this.
pub fn month_of(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Normalize free-text labels ("food", "cREDIT card") to title case the way
/// the ledger stores them.
pub fn title_case(s: &str) -> String {
    s.trim()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_normalizes_words() {
        assert_eq!(title_case("food"), "Food");
        assert_eq!(title_case("  cREDIT   card "), "Credit Card");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn parse_amount_rejects_negative_and_garbage() {
        assert!(parse_amount("12.345").is_ok());
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("twelve").is_err());
    }

    #[test]
    fn month_of_formats_prefix() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(month_of(d), "2024-01");
    }
}
