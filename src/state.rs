//! Dashboard state and the pure functions that move it forward.
//!
//! Every transition takes the state by value and returns the next one, so
//! the refresh loop is the only owner and nothing else mutates it.

use chrono::{DateTime, Local};

use crate::catalog::SheetSource;
use crate::ledger::{self, LedgerSummary, MemberRecord};
use crate::sheet::{self, ParsedSheet};

pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to load data. Please check your internet connection.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub current: Option<SheetSource>,
    pub sheet: ParsedSheet,
    pub summary: LedgerSummary,
    pub members: Vec<MemberRecord>,
    pub search: String,
    /// Busy flag: set while a fetch is in flight.
    pub is_loading: bool,
    pub last_updated: Option<DateTime<Local>>,
    pub error: Option<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to another month. Data of the previous month stays until
    /// the new one arrives.
    pub fn select(self, source: SheetSource) -> Self {
        Self {
            current: Some(source),
            ..self
        }
    }

    /// Claims the busy flag. Returns the source to fetch, or `None` when a
    /// fetch is already running or nothing is selected.
    pub fn begin_fetch(self) -> (Self, Option<SheetSource>) {
        if self.is_loading {
            return (self, None);
        }
        match self.current.clone() {
            Some(source) => (
                Self {
                    is_loading: true,
                    ..self
                },
                Some(source),
            ),
            None => (self, None),
        }
    }

    pub fn fetch_succeeded(self, text: &str, at: DateTime<Local>) -> Self {
        let sheet = sheet::parse(text);
        let (summary, members) = ledger::summarize(&sheet);
        Self {
            sheet,
            summary,
            members,
            is_loading: false,
            last_updated: Some(at),
            error: None,
            ..self
        }
    }

    /// Records a failure and keeps whatever was loaded before.
    pub fn fetch_failed(self, message: impl Into<String>) -> Self {
        Self {
            is_loading: false,
            error: Some(message.into()),
            ..self
        }
    }

    pub fn search(self, term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..self
        }
    }

    /// Rows matching the search term, case-insensitively, in any cell.
    pub fn visible_rows(&self) -> Vec<&Vec<String>> {
        let term = self.search.trim().to_lowercase();
        self.sheet
            .rows
            .iter()
            .filter(|row| {
                term.is_empty() || row.iter().any(|cell| cell.to_lowercase().contains(&term))
            })
            .collect()
    }
}
