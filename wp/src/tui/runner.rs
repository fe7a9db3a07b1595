//! TUI runner - owns the terminal, the backend, and the request lifecycle
//!
//! The runner's loop is: draw, wait for an event, update. Plan requests run
//! in a spawned task and come back over an mpsc channel; only the runner
//! applies outcomes to the state, so the state is never written from two
//! places.

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use planclient::{ClientError, GeneratedPlan, PlanBackend, PlanInput};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// A finished request, tagged with the generation it was started under so
/// outcomes that were reset away are dropped instead of applied.
struct RequestOutcome {
    generation: u64,
    result: Result<GeneratedPlan, ClientError>,
}

/// TUI runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state and key handling
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Planner backend
    backend: Arc<dyn PlanBackend>,
    /// Event handler
    event_handler: EventHandler,
    outcome_tx: mpsc::UnboundedSender<RequestOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<RequestOutcome>,
}

impl TuiRunner {
    /// Create a new TuiRunner over a backend
    pub fn new(terminal: Tui, backend: Arc<dyn PlanBackend>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            app: App::new(),
            terminal,
            backend,
            event_handler: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            outcome_tx,
            outcome_rx,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        loop {
            // Draw the UI
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            // Handle events
            match self.event_handler.next().await? {
                Event::Tick => self.handle_tick(),
                Event::Key(key_event) => {
                    if self.app.handle_key(key_event) {
                        break;
                    }
                    // A key press may have queued a submit; don't wait a tick
                    self.handle_tick();
                }
                Event::Resize(_, _) => {
                    debug!("run: terminal resized");
                }
            }

            if self.app.state().should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Periodic work: start queued requests, apply finished ones
    fn handle_tick(&mut self) {
        if !self.app.state().phase.is_loading()
            && let Some(input) = self.app.state_mut().pending_submit.take()
        {
            self.spawn_request(input);
        }

        while let Ok(outcome) = self.outcome_rx.try_recv() {
            if outcome.generation == self.app.state().generation {
                self.app.state_mut().finish(outcome.result);
            } else {
                debug!(
                    outcome_generation = outcome.generation,
                    current_generation = self.app.state().generation,
                    "handle_tick: dropping outcome from a reset-away request"
                );
            }
        }
    }

    /// Start one plan request in the background
    fn spawn_request(&mut self, input: PlanInput) {
        self.app.state_mut().begin_loading();
        let generation = self.app.state().generation;

        let backend = Arc::clone(&self.backend);
        let tx = self.outcome_tx.clone();

        debug!(location = %input.location, generation, "spawn_request: starting plan request");
        tokio::spawn(async move {
            let result = backend.generate_plan(&input).await;
            if tx.send(RequestOutcome { generation, result }).is_err() {
                warn!("spawn_request: runner gone before request finished");
            }
        });
    }
}
