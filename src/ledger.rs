//! Positional extraction of the monthly ledger from a parsed sheet.
//!
//! The extractor reads fixed coordinates (see [`LedgerLayout`]) and never
//! fails: missing rows, short rows and non-numeric cells all read as zero,
//! and blank member names get a `Member N` placeholder.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use crate::layout::LedgerLayout;
use crate::sheet::ParsedSheet;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_meals: Decimal,
    pub member_count: usize,
    pub total_bazar: Decimal,
    pub meal_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRecord {
    pub name: String,
    pub total_meals: Decimal,
    /// Share of the bazar pool: `total_meals * meal_rate`.
    pub bazar_cost: Decimal,
    pub maid_bill: Decimal,
    pub extra_expenses: Decimal,
    pub total_cost: Decimal,
    pub deposit: Decimal,
    pub due: Decimal,
}

/// Summarizes a sheet using the standard layout.
pub fn summarize(sheet: &ParsedSheet) -> (LedgerSummary, Vec<MemberRecord>) {
    summarize_with(sheet, &LedgerLayout::STANDARD)
}

pub fn summarize_with(
    sheet: &ParsedSheet,
    layout: &LedgerLayout,
) -> (LedgerSummary, Vec<MemberRecord>) {
    let summary = LedgerSummary {
        total_meals: number_at(sheet, layout.total_meals_row, layout.meals_col),
        member_count: count_members(sheet, layout),
        total_bazar: number_at(sheet, layout.total_bazar_row, layout.meals_col),
        meal_rate: number_at(sheet, layout.meal_rate_row, layout.meals_col),
    };

    let members = (0..layout.member_slots())
        .map(|i| member_record(sheet, layout, i, summary.meal_rate))
        .collect();

    (summary, members)
}

fn count_members(sheet: &ParsedSheet, layout: &LedgerLayout) -> usize {
    layout
        .member_rows
        .clone()
        .filter(|&row| {
            cell(sheet, row, layout.name_col).is_some_and(|name| !name.trim().is_empty())
        })
        .count()
}

fn member_record(
    sheet: &ParsedSheet,
    layout: &LedgerLayout,
    index: usize,
    meal_rate: Decimal,
) -> MemberRecord {
    let row = layout.member_rows.start + index;
    let name = match cell(sheet, row, layout.name_col) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Member {}", index + 1),
    };

    let total_meals = number_at(sheet, row, layout.meals_col);
    let maid_bill = number_at(sheet, row, layout.maid_bill_col);
    let extra_expenses = number_at(sheet, row, layout.extra_col);

    let balance_row = layout.balance_row(index);
    let deposit = number_at(sheet, balance_row, layout.deposit_col);
    let due = number_at(sheet, balance_row, layout.due_col);

    let bazar_cost = total_meals.saturating_mul(meal_rate);
    MemberRecord {
        name,
        total_meals,
        bazar_cost,
        maid_bill,
        extra_expenses,
        total_cost: bazar_cost
            .saturating_add(maid_bill)
            .saturating_add(extra_expenses),
        deposit,
        due,
    }
}

fn cell(sheet: &ParsedSheet, row: usize, col: usize) -> Option<&str> {
    sheet.rows.get(row)?.get(col).map(String::as_str)
}

fn number_at(sheet: &ParsedSheet, row: usize, col: usize) -> Decimal {
    coerce(cell(sheet, row, col))
}

/// Reads a cell as a number, or zero when it is missing or not numeric.
///
/// Like a lenient float parse, only the leading numeric part is used:
/// `"12kg"` reads as 12 while `"abc"` and `""` read as 0. Magnitudes past
/// the decimal range saturate at [`Decimal::MAX`] / [`Decimal::MIN`].
pub fn coerce(cell: Option<&str>) -> Decimal {
    let Some(number) = cell.and_then(numeric_prefix) else {
        return Decimal::ZERO;
    };
    let parsed = if number.contains('e') {
        Decimal::from_scientific(&number)
    } else {
        Decimal::from_str(&number)
    };
    parsed.unwrap_or_else(|_| beyond_decimal(&number))
}

/// Fallback for numbers the exact parse rejects, going through `f64`.
fn beyond_decimal(number: &str) -> Decimal {
    let Ok(value) = number.parse::<f64>() else {
        return Decimal::ZERO;
    };
    if let Some(decimal) = Decimal::from_f64(value) {
        return decimal;
    }
    if value >= 1.0 {
        Decimal::MAX
    } else if value <= -1.0 {
        Decimal::MIN
    } else {
        Decimal::ZERO
    }
}

/// Extracts `[-]digits[.digits][e[-]digits]` from the start of `text`,
/// normalized so the decimal parser accepts it (`.5` becomes `0.5`).
fn numeric_prefix(text: &str) -> Option<String> {
    let bytes = text.trim_start().as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_len = digits_from(pos);
    let int_part = &bytes[pos..pos + int_len];
    pos += int_len;

    let mut frac_part: &[u8] = &[];
    if bytes.get(pos) == Some(&b'.') {
        let frac_len = digits_from(pos + 1);
        frac_part = &bytes[pos + 1..pos + 1 + frac_len];
        pos += 1 + frac_len;
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if int_part.is_empty() {
        out.push('0');
    }
    out.extend(int_part.iter().map(|&b| b as char));
    if !frac_part.is_empty() {
        out.push('.');
        out.extend(frac_part.iter().map(|&b| b as char));
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        let exp_negative = match bytes.get(exp_pos) {
            Some(b'-') => {
                exp_pos += 1;
                true
            }
            Some(b'+') => {
                exp_pos += 1;
                false
            }
            _ => false,
        };
        let exp_len = digits_from(exp_pos);
        if exp_len > 0 {
            out.push('e');
            if exp_negative {
                out.push('-');
            }
            out.extend(bytes[exp_pos..exp_pos + exp_len].iter().map(|&b| b as char));
        }
    }

    Some(out)
}
