//! Terminal UI for Strictly Concentration.

mod app;
mod confetti;
mod input;
mod mode;
mod ui;

pub use mode::PlayMode;

use crate::orchestrator::{Command, GameEvent, Orchestrator};
use crate::players::{HumanPlayer, Player, RecallBot};
use crate::settings::Settings;
use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use strictly_memory::Session;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

const FRAME: Duration = Duration::from_millis(50);
const BOT_THINK: Duration = Duration::from_millis(400);
const BOT_RESTART: Duration = Duration::from_secs(5);

/// Runs the terminal game until the player presses `q`.
pub async fn run_tui(settings: Settings, mode: PlayMode) -> Result<()> {
    run_tui_with_think(settings, mode, BOT_THINK).await
}

/// Like [`run_tui`], with a custom delay before each bot move.
pub async fn run_tui_with_think(settings: Settings, mode: PlayMode, think: Duration) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create("strictly_concentration.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(%mode, "Starting Strictly Concentration TUI");

    let session = Session::new(&settings.game_config()?);
    let timing = settings.timing();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (input_tx, input_rx) = mpsc::unbounded_channel();

    let player: Box<dyn Player> = match mode {
        PlayMode::Human => Box::new(HumanPlayer::new(mode.name(), input_rx)),
        PlayMode::Watch => {
            Box::new(RecallBot::new(mode.name(), think).with_restart_after(BOT_RESTART))
        }
    };

    let mut orchestrator = Orchestrator::new(session, player, event_tx, timing);
    let handle = tokio::spawn(async move {
        if let Err(e) = orchestrator.run().await {
            error!(error = %e, "Orchestrator stopped");
        }
    });

    let app = App::new(mode, timing, *settings.columns(), Instant::now());
    let res = run_loop(&mut terminal, app, event_rx, input_tx).await;

    handle.abort();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = res {
        error!(error = ?err, "Game loop error");
    }
    info!("TUI closed");
    res
}

#[instrument(skip_all)]
async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut event_rx: mpsc::UnboundedReceiver<GameEvent>,
    input_tx: mpsc::UnboundedSender<Command>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }
        app.on_frame(Instant::now());
        terminal.draw(|f| ui::draw(f, &app))?;

        // Keep polling off the runtime threads the orchestrator needs.
        let key = tokio::task::block_in_place(|| -> Result<Option<KeyCode>> {
            if event::poll(FRAME)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        return Ok(Some(key.code));
                    }
                }
            }
            Ok(None)
        })?;

        let Some(code) = key else {
            continue;
        };

        match (code, app.mode()) {
            (KeyCode::Char('q') | KeyCode::Esc, _) => {
                info!("User quit");
                let _ = input_tx.send(Command::Quit);
                return Ok(());
            }
            (KeyCode::Enter | KeyCode::Char(' '), PlayMode::Human) => {
                debug!(cursor = %app.cursor(), "Flip requested");
                input_tx.send(Command::Activate(app.cursor()))?;
            }
            (KeyCode::Char('r'), PlayMode::Human) => {
                info!("Restart requested");
                input_tx.send(Command::Restart)?;
            }
            (code, PlayMode::Human) => app.navigate(code),
            _ => {}
        }
    }
}
