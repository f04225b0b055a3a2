pub mod catalog;
pub mod config;
mod error;
pub mod fetch;
pub mod layout;
pub mod ledger;
pub mod report;
mod runner;
pub mod sheet;
pub mod state;

pub use catalog::{Catalog, SheetSource};
pub use config::Config;
pub use error::{Error, Result};
pub use fetch::{HttpFetcher, SheetFetcher};
pub use ledger::{summarize, LedgerSummary, MemberRecord};
pub use runner::{run, Input, View};
pub use sheet::{parse, ParsedSheet};
pub use state::Dashboard;
