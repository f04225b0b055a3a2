use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};

use super::{Event, Input};

/// Forwards user input to the event loop. Search terms are held back until
/// no newer term has arrived for `wait`; selections pass straight through.
/// When the input closes, a held term is flushed and shutdown is signalled.
pub(super) async fn forward_input(
    mut input: mpsc::Receiver<Input>,
    wait: Duration,
    events: mpsc::Sender<Event>,
) {
    let mut pending: Option<(String, Instant)> = None;

    loop {
        let deadline = pending
            .as_ref()
            .map(|(_, at)| *at)
            .unwrap_or_else(Instant::now);

        tokio::select! {
            next = input.recv() => match next {
                Some(Input::Search(term)) => pending = Some((term, Instant::now() + wait)),
                Some(Input::Select(label)) => {
                    if events.send(Event::Select(label)).await.is_err() {
                        return;
                    }
                }
                None => break,
            },
            _ = sleep_until(deadline), if pending.is_some() => {
                if let Some((term, _)) = pending.take() {
                    if events.send(Event::Search(term)).await.is_err() {
                        return;
                    }
                }
            }
        }
    }

    if let Some((term, _)) = pending.take() {
        let _ = events.send(Event::Search(term)).await;
    }
    let _ = events.send(Event::Shutdown).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(mut events: mpsc::Receiver<Event>) -> Vec<String> {
        let mut seen = Vec::new();
        while let Some(event) = events.recv().await {
            match event {
                Event::Search(term) => seen.push(format!("search:{term}")),
                Event::Select(label) => seen.push(format!("select:{label}")),
                Event::Shutdown => seen.push("shutdown".to_string()),
                other => panic!("unexpected event {other:?}"),
            }
        }
        seen
    }

    #[tokio::test]
    async fn test_burst_collapses_to_last_term() {
        let (input_tx, input_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        let handle = tokio::spawn(forward_input(
            input_rx,
            Duration::from_secs(60),
            event_tx,
        ));

        for term in ["a", "al", "ali"] {
            input_tx.send(Input::Search(term.to_string())).await.unwrap();
        }
        drop(input_tx);
        handle.await.unwrap();

        assert_eq!(collect(event_rx).await, ["search:ali", "shutdown"]);
    }

    #[tokio::test]
    async fn test_quiet_period_emits_term() {
        let (input_tx, input_rx) = mpsc::channel(8);
        let (event_tx, mut event_rx) = mpsc::channel(8);
        tokio::spawn(forward_input(
            input_rx,
            Duration::from_millis(10),
            event_tx,
        ));

        input_tx.send(Input::Search("bob".to_string())).await.unwrap();
        match event_rx.recv().await {
            Some(Event::Search(term)) => assert_eq!(term, "bob"),
            other => panic!("unexpected event {other:?}"),
        }

        drop(input_tx);
        assert!(matches!(event_rx.recv().await, Some(Event::Shutdown)));
    }

    #[tokio::test]
    async fn test_select_is_not_debounced() {
        let (input_tx, input_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        let handle = tokio::spawn(forward_input(
            input_rx,
            Duration::from_secs(60),
            event_tx,
        ));

        input_tx.send(Input::Search("x".to_string())).await.unwrap();
        input_tx.send(Input::Select("May 25".to_string())).await.unwrap();
        drop(input_tx);
        handle.await.unwrap();

        assert_eq!(
            collect(event_rx).await,
            ["select:May 25", "search:x", "shutdown"]
        );
    }
}
