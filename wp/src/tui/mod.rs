//! Terminal user interface for the weekend planner
//!
//! A single-screen form-and-result layout:
//! - form panel for the location and kids' ages
//! - result panel that follows the request phase (idle help, loading,
//!   activity cards or verbatim text, error with expandable details)
//! - collapsible raw-response viewer over the last success

mod app;
mod events;
mod runner;
pub mod state;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use runner::TuiRunner;
pub use state::{AppState, Field, Phase};

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use planclient::PlanBackend;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI against a planner backend
pub async fn run_with_backend(backend: Arc<dyn PlanBackend>) -> Result<()> {
    let terminal = init()?;

    // Guard restores the terminal even on early return or error
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = restore();
        }
    }
    let _guard = TerminalGuard;

    let mut runner = TuiRunner::new(terminal, backend);
    runner.run().await
}
