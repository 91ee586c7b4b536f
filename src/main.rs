//! codesnap - snippet manager for the terminal.
//!
//! Save, search and organize code snippets with syntax highlighting,
//! favorites, an external prettifier and image export.

use std::io;
use std::time::Duration;

use color_eyre::Result;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use tracing::info;

use codesnap::app::App;
use codesnap::config::{Config, data_dir};
use codesnap::handlers;
use codesnap::logging::init_logging;
use codesnap::ui;

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load();
    init_logging(&data_dir()).map_err(|e| color_eyre::eyre::eyre!(e))?;
    info!("starting codesnap");

    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("codesnap exited");
    result
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if handlers::keys::handle_key_events(key, app) {
                    return Ok(());
                }
            }
        }
    }
}
