//! The runner keeps a dashboard fresh: it refetches the selected month on a
//! timer, applies debounced search input, and hands every new state to a
//! [`View`].
//!
//! Three tasks feed one event loop over a channel:
//! * Ticker - emits a refresh every `refresh_interval`.
//! * Input - forwards month selections and debounced search terms.
//! * Fetch - one per refresh, at most one in flight, reports the result.
//!
//! The event loop is the only owner of the [`Dashboard`].
//!
mod async_runner;
mod debounce;

use crate::error::Result;
use crate::state::Dashboard;

pub use async_runner::run;

/// Presentation of the dashboard. Called after every state change.
pub trait View {
    fn render(&mut self, dashboard: &Dashboard);
}

/// Input from the user side of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Free-text row filter; debounced.
    Search(String),
    /// Switch to the sheet with this catalog label or remote id.
    Select(String),
}

#[derive(Debug)]
enum Event {
    Refresh,
    Select(String),
    Search(String),
    Fetched(Result<String>),
    /// The input side has closed.
    Shutdown,
}
