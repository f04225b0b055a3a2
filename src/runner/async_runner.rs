use chrono::Local;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::{debounce, Event, Input, View};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::SheetFetcher;
use crate::state::{Dashboard, FETCH_FAILED_MESSAGE};

const BUFFER_SIZE: usize = 64;
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Runs the dashboard until `input` is closed, then returns the view.
///
/// Selects the current month from the catalog and fetches it right away,
/// then keeps it fresh on the configured interval. A fetch that is still in
/// flight when the input closes is waited for.
///
/// # Errors
/// Returns [`Error::EmptyCatalog`] when there is no sheet to select. Fetch
/// failures are not errors here: they are logged and shown on the
/// dashboard while the previous data stays in place.
pub async fn run<F, V>(
    config: Config,
    fetcher: Arc<F>,
    mut view: V,
    input: mpsc::Receiver<Input>,
) -> Result<V>
where
    F: SheetFetcher + Send + Sync + 'static,
    V: View,
{
    let catalog = config.catalog.clone();
    let initial = catalog
        .pick_current(Local::now().date_naive())
        .cloned()
        .ok_or(Error::EmptyCatalog)?;
    info!(sheet = %initial.label, "starting dashboard");

    let (tx, mut rx) = mpsc::channel(BUFFER_SIZE);
    let ticker = tokio::spawn(tick(config.refresh_interval(), tx.clone()));
    let forwarder = tokio::spawn(debounce::forward_input(
        input,
        config.search_debounce(),
        tx.clone(),
    ));

    let mut state = dispatch_fetch(Dashboard::new().select(initial), &fetcher, &tx);
    view.render(&state);

    let mut shutting_down = false;
    while let Some(event) = rx.recv().await {
        state = match event {
            Event::Refresh if shutting_down => state,
            Event::Refresh => dispatch_fetch(state, &fetcher, &tx),
            Event::Select(key) => select(state, &catalog, &key, &fetcher, &tx),
            Event::Search(term) => state.search(term),
            Event::Fetched(Ok(text)) => state.fetch_succeeded(&text, Local::now()),
            Event::Fetched(Err(err)) => {
                error!(error = %err, "error fetching data");
                state.fetch_failed(FETCH_FAILED_MESSAGE)
            }
            Event::Shutdown => {
                ticker.abort();
                shutting_down = true;
                state
            }
        };
        view.render(&state);

        if shutting_down && !state.is_loading {
            break;
        }
    }

    if let Err(err) = forwarder.await {
        warn!(error = %err, "input task ended abnormally");
    }
    Ok(view)
}

/// Switches to the sheet named by `key`, a catalog label or remote id.
fn select<F>(
    state: Dashboard,
    catalog: &Catalog,
    key: &str,
    fetcher: &Arc<F>,
    tx: &mpsc::Sender<Event>,
) -> Dashboard
where
    F: SheetFetcher + Send + Sync + 'static,
{
    let source = catalog
        .find_by_label(key)
        .or_else(|| catalog.find_by_remote_id(key));
    match source {
        Some(source) => dispatch_fetch(state.select(source.clone()), fetcher, tx),
        None => {
            warn!(%key, "no sheet with this label or id");
            state
        }
    }
}

/// Starts a fetch of the selected sheet unless one is already running.
fn dispatch_fetch<F>(state: Dashboard, fetcher: &Arc<F>, tx: &mpsc::Sender<Event>) -> Dashboard
where
    F: SheetFetcher + Send + Sync + 'static,
{
    let (state, source) = state.begin_fetch();
    let Some(source) = source else {
        debug!("refresh skipped, fetch already in flight");
        return state;
    };

    info!(sheet = %source.label, "fetching sheet");
    let fetcher = Arc::clone(fetcher);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = fetcher.fetch(&source).await;
        // Receiver dropped, nothing left to report to
        let _ = tx.send(Event::Fetched(result)).await;
    });
    state
}

async fn tick(period: Duration, tx: mpsc::Sender<Event>) {
    let period = period.max(MIN_REFRESH_INTERVAL);
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        if tx.send(Event::Refresh).await.is_err() {
            break;
        }
    }
}
