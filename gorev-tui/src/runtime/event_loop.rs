use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use gorev_api::TodoClient;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{calendar, App};
use crate::ui;

use super::action_queue::{channel, result_channel};
use super::actions::{handle_background_result, run_action};
use super::keys::handle_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &mut TodoClient,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let (result_tx, mut result_rx) = result_channel();

    loop {
        app.today = calendar::local_today();
        app.tick_status(Instant::now());

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(key, app, &action_tx);
            }
        }

        // Network calls are the only suspension points; each queued
        // action is an atomic snapshot-to-snapshot transition.
        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, client, &result_tx).await;
        }

        while let Ok(result) = result_rx.try_recv() {
            handle_background_result(result, app, client);
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
