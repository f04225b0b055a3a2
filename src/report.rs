//! CSV output of a summarized month.
//!
//! Rows are formatted the way the dashboard cards show them: costs derived
//! from the meal rate are rounded to whole units, the meal rate keeps two
//! decimals, and everything else is printed as read.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;

use crate::ledger::{LedgerSummary, MemberRecord};

#[derive(Debug, Serialize, PartialEq)]
pub struct SummaryRow {
    pub total_meals: Decimal,
    pub members: usize,
    pub total_bazar: Decimal,
    pub meal_rate: String,
}

impl From<&LedgerSummary> for SummaryRow {
    fn from(summary: &LedgerSummary) -> Self {
        let mut meal_rate = summary
            .meal_rate
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        meal_rate.rescale(2);

        Self {
            total_meals: summary.total_meals.normalize(),
            members: summary.member_count,
            total_bazar: summary.total_bazar.normalize(),
            meal_rate: meal_rate.to_string(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MemberRow {
    pub name: String,
    pub total_meals: Decimal,
    pub bazar_cost: Decimal,
    pub maid_bill: Decimal,
    pub extra_expenses: Decimal,
    pub total_cost: Decimal,
    pub deposit: Decimal,
    pub due: Decimal,
}

impl From<&MemberRecord> for MemberRow {
    fn from(member: &MemberRecord) -> Self {
        Self {
            name: member.name.clone(),
            total_meals: member.total_meals.normalize(),
            bazar_cost: round_half_up(member.bazar_cost),
            maid_bill: member.maid_bill.normalize(),
            extra_expenses: member.extra_expenses.normalize(),
            total_cost: round_half_up(member.total_cost),
            deposit: member.deposit.normalize(),
            due: member.due.normalize(),
        }
    }
}

/// Rounds to a whole number, halves toward positive infinity.
fn round_half_up(value: Decimal) -> Decimal {
    value.saturating_add(Decimal::new(5, 1)).floor().normalize()
}

pub fn write_summary<W: Write>(writer: W, summary: &LedgerSummary) -> csv::Result<()> {
    write_csv(writer, std::iter::once(SummaryRow::from(summary)))
}

pub fn write_members<W: Write>(writer: W, members: &[MemberRecord]) -> csv::Result<()> {
    write_csv(writer, members.iter().map(MemberRow::from))
}

/// Writes an iterator of records to a CSV writer, header first.
pub fn write_csv<T, W>(writer: W, records: impl Iterator<Item = T>) -> csv::Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
