//! weekendplan - terminal client for the weekend-planner agent backend
//!
//! Collects a location (and optionally kids' ages), asks the planner agent
//! for a weekend plan over the two-step session protocol, and renders the
//! answer either as activity cards in a TUI or as one-shot CLI output.
//!
//! # Modules
//!
//! - [`validation`] - form input validation
//! - [`plan`] - heuristic splitting of the plan text into activity cards
//! - [`tui`] - interactive front end (form, loading, plan, error panels)
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface
//!
//! The backend protocol itself lives in the `planclient` crate.

pub mod cli;
pub mod config;
pub mod plan;
pub mod tui;
pub mod validation;

// Re-export commonly used types
pub use config::{BackendConfig, Config};
pub use plan::{Activity, MIN_ACTIVITIES, ParsedPlan, parse_plan};
pub use validation::{ValidationErrors, validate};
