use std::env;
use std::error::Error;
use std::fs;
use std::io;
use std::process;
use std::sync::Arc;

use mess_ledger::{report, Config, Dashboard, HttpFetcher, Input, View};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "Usage:
  mess-ledger report <month.csv>
  mess-ledger watch [config.json]";

type Result<T, E = Box<dyn Error + Send + Sync>> = std::result::Result<T, E>;

#[tokio::main]
async fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env).with_writer(io::stderr).init();

    if let Err(err) = run_app().await {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

async fn run_app() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    match (args.get(1).map(String::as_str), args.len()) {
        (Some("report"), 3) => report_file(&args[2]),
        (Some("watch"), 2) => watch(Config::default()).await,
        (Some("watch"), 3) => watch(Config::load(&args[2])?).await,
        _ => Err(USAGE.into()),
    }
}

/// Summarizes a downloaded month and prints it as CSV.
fn report_file(path: &str) -> Result<()> {
    let text = fs::read_to_string(path)?;
    let (summary, members) = mess_ledger::summarize(&mess_ledger::parse(&text));

    let stdout = io::stdout();
    report::write_summary(stdout.lock(), &summary)?;
    println!();
    report::write_members(stdout.lock(), &members)?;
    Ok(())
}

/// Keeps the current month on screen. Each stdin line is either
/// `select <label or gid>` or a search term; end of input stops the dashboard.
async fn watch(config: Config) -> Result<()> {
    let fetcher = Arc::new(HttpFetcher::new(config.catalog.clone()));
    let (input_tx, input_rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
        while let Some(Ok(line)) = lines.next().await {
            let input = match line.strip_prefix("select ") {
                Some(label) => Input::Select(label.trim().to_string()),
                None => Input::Search(line),
            };
            if input_tx.send(input).await.is_err() {
                break;
            }
        }
    });

    mess_ledger::run(config, fetcher, ConsoleView::default(), input_rx).await?;
    Ok(())
}

/// Prints the dashboard to stdout whenever its data or filter changes.
#[derive(Default)]
struct ConsoleView {
    shown: Option<Dashboard>,
}

impl ConsoleView {
    fn print(dashboard: &Dashboard) -> csv::Result<()> {
        if let Some(source) = &dashboard.current {
            println!("== {} ==", source.label);
        }
        if let Some(error) = &dashboard.error {
            println!("{}", error);
        }

        let stdout = io::stdout();
        report::write_summary(stdout.lock(), &dashboard.summary)?;
        report::write_members(stdout.lock(), &dashboard.members)?;

        let visible = dashboard.visible_rows();
        if dashboard.sheet.is_empty() {
            println!("No data available for this month");
        } else if visible.is_empty() && !dashboard.search.trim().is_empty() {
            println!("No rows match \"{}\"", dashboard.search.trim());
        } else {
            // Rows can be ragged, so the table writer must not insist on a width.
            let mut table = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(stdout.lock());
            let width = dashboard.sheet.headers.len();
            table.write_record((0..width).map(|i| dashboard.sheet.header_label(i)))?;
            for row in visible {
                table.write_record(row)?;
            }
            table.flush()?;
        }
        if let Some(at) = dashboard.last_updated {
            println!("Last updated: {}", at.format("%H:%M:%S"));
        }
        Ok(())
    }
}

impl View for ConsoleView {
    fn render(&mut self, dashboard: &Dashboard) {
        let changed = self.shown.as_ref().map_or(true, |shown| {
            shown.last_updated != dashboard.last_updated
                || shown.search != dashboard.search
                || shown.error != dashboard.error
        });
        if changed && !dashboard.is_loading {
            if let Err(err) = Self::print(dashboard) {
                tracing::warn!(error = %err, "failed to print dashboard");
            }
            self.shown = Some(dashboard.clone());
        }
    }
}
