//! toughness_tui - Interactive bench for toughness and damage bypass resolution

mod app;
mod simulation;
mod ui;

use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "toughness_tui.log";

/// Log to a file; the terminal belongs to the UI
fn setup_logging() -> io::Result<()> {
    let file = File::create(LOG_FILE)?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: {}", LOG_FILE);
    Ok(())
}

fn main() -> io::Result<()> {
    setup_logging()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new();

    // Main loop
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Tab, _) => app.next_tab(),
                    (KeyCode::BackTab, _) => app.prev_tab(),
                    (KeyCode::Char('1'), _) => app.set_tab(0),
                    (KeyCode::Char('2'), _) => app.set_tab(1),
                    (KeyCode::Char('3'), _) => app.set_tab(2),
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
                    (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_target(),
                    (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_target(),
                    (KeyCode::Char('a'), _) | (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => app.attack(),
                    (KeyCode::Char('w'), _) => app.next_weapon(),
                    (KeyCode::Char('f'), _) => app.toggle_falling(),
                    (KeyCode::Char('s'), _) => app.cycle_strength(),
                    (KeyCode::Char('v'), _) => app.environmental_hit(),
                    (KeyCode::Char('b'), _) => app.simulate(),
                    (KeyCode::Char('c'), _) => app.recolor_target(),
                    (KeyCode::Char('r'), _) => app.reset(),
                    (KeyCode::Char('R'), _) => app.reload(),
                    (KeyCode::Char('?'), _) => app.toggle_help(),
                    _ => {}
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
