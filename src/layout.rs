//! Fixed coordinates of the monthly ledger spreadsheet.
//!
//! The sheet is laid out by hand and the extractor reads it positionally:
//!
//! | cells            | meaning                          |
//! |------------------|----------------------------------|
//! | A2:A7            | member names (six slots)         |
//! | AG2:AI7          | per-member meals, maid bill, extras |
//! | AG8 / AG9 / AG10 | total meals / total bazar / meal rate |
//! | AG20:AI25        | per-member deposit (AG) and due (AI) |
//!
//! Row indices here are 0-based into the data rows, so spreadsheet row
//! `n` is index `n - 2` (row 1 is the header).

use std::ops::Range;

/// Converts a spreadsheet column name (`A`, `Z`, `AG`) to a 0-based index.
pub const fn column(letters: &str) -> usize {
    let bytes = letters.as_bytes();
    let mut index = 0;
    let mut i = 0;
    while i < bytes.len() {
        index = index * 26 + (bytes[i] - b'A' + 1) as usize;
        i += 1;
    }
    index - 1
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerLayout {
    pub member_rows: Range<usize>,
    pub name_col: usize,
    pub meals_col: usize,
    pub maid_bill_col: usize,
    pub extra_col: usize,
    pub total_meals_row: usize,
    pub total_bazar_row: usize,
    pub meal_rate_row: usize,
    /// First row of the deposit/due block; member `i` lives at `+ i`.
    pub balance_block_start: usize,
    pub deposit_col: usize,
    pub due_col: usize,
}

impl LedgerLayout {
    pub const STANDARD: LedgerLayout = LedgerLayout {
        member_rows: 0..6,
        name_col: column("A"),
        meals_col: column("AG"),
        maid_bill_col: column("AH"),
        extra_col: column("AI"),
        total_meals_row: 6,
        total_bazar_row: 7,
        meal_rate_row: 8,
        balance_block_start: 18,
        deposit_col: column("AG"),
        due_col: column("AI"),
    };

    pub fn member_slots(&self) -> usize {
        self.member_rows.len()
    }

    pub fn balance_row(&self, member: usize) -> usize {
        self.balance_block_start + member
    }
}

impl Default for LedgerLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names() {
        assert_eq!(column("A"), 0);
        assert_eq!(column("Z"), 25);
        assert_eq!(column("AA"), 26);
        assert_eq!(column("AG"), 32);
        assert_eq!(column("AH"), 33);
        assert_eq!(column("AI"), 34);
    }

    #[test]
    fn test_standard_offsets() {
        let layout = LedgerLayout::STANDARD;
        assert_eq!(layout.member_slots(), 6);
        assert_eq!(layout.meals_col, 32);
        assert_eq!(layout.balance_row(0), 18);
        assert_eq!(layout.balance_row(5), 23);
    }
}
