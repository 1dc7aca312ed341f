//! Scholar TUI entry point.

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use scholar_tui::api_client::RestClient;
use scholar_tui::config::TuiConfig;
use scholar_tui::dispatch;
use scholar_tui::error::TuiError;
use scholar_tui::events::{InputSubscription, TuiEvent};
use scholar_tui::logging;
use scholar_tui::state::App;
use scholar_tui::views::render_view;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    logging::init(&config)?;
    tracing::info!(api = %config.api_base_url, "starting scholar-tui");

    let client = Arc::new(RestClient::new(&config)?);
    let mut app = App::new(config);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    let _input = InputSubscription::subscribe(event_tx.clone());
    dispatch::spawn_service_info(client.as_ref().clone(), event_tx.clone());

    let tick_rate = Duration::from_millis(app.config.tick_rate_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {}
            Some(event) = event_rx.recv() => {
                if let Some(effect) = app.handle_event(event) {
                    dispatch::execute(&client, effect, event_tx.clone());
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!("shutting down");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}
