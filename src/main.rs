use pumpwatch::config::{AppConfig, fetch_config};
use pumpwatch::feed::{FeedListener, FeedSession};
use pumpwatch::tui::event::{spawn_event_reader, spawn_tick_timer};
use pumpwatch::tui::{Action, App, Tui, render, restore_terminal, setup_terminal, update};
use pumpwatch::{PumpwatchError, Result, logging, tls};
use tokio::sync::mpsc;
use tracing::info;

/// Redraw cadence when no feed traffic arrives.
const TICK_INTERVAL_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<()> {
    let config = fetch_config()?;
    logging::init(&config.logging)?;
    info!(url = %config.feed.websocket_url, tls = config.feed.tls.label(), "Starting pumpwatch");

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, config).await;
    restore_terminal(&mut terminal)?;

    result
}

/// Runs the UI loop until the user quits.
///
/// Feed and input messages are drained in batches; state is only mutated
/// here, then the frame is redrawn.
async fn run(terminal: &mut Tui, config: AppConfig) -> Result<()> {
    let tls_config = tls::build_tls_config(&config.feed.tls)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_INTERVAL_MS);

    let mut app = App::new();
    app.tls_mode = config.feed.tls.clone();
    let mut session: Option<FeedSession> = None;

    while !app.should_quit {
        terminal
            .draw(|frame| render(frame, &app))
            .map_err(|e| PumpwatchError::Io(format!("failed to draw frame: {e}")))?;

        let Some(first) = rx.recv().await else {
            break;
        };
        let mut pending = vec![first];
        while let Ok(message) = rx.try_recv() {
            pending.push(message);
        }

        for message in pending {
            if let Some(Action::StartTracking(request)) = update(&mut app, message) {
                if let Some(mut previous) = session.take() {
                    info!(
                        previous = previous.id(),
                        next = request.session,
                        "Replacing tracking session"
                    );
                    previous.cancel();
                }
                let listener = FeedListener::new(
                    config.feed.websocket_url.clone(),
                    tls_config.clone(),
                    request,
                    tx.clone(),
                );
                session = Some(FeedSession::spawn(listener));
            }
        }
    }

    if let Some(session) = session.take() {
        session.shutdown().await;
    }
    info!("Exiting");

    Ok(())
}
