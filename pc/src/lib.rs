//! planclient - session-protocol client for the weekend-planner backend
//!
//! The backend exposes agent sessions over plain HTTP: create a session with
//! an empty POST, then POST the user's message to the same URL and read back
//! an array of loosely structured response events. This crate owns that
//! exchange end to end.
//!
//! # Modules
//!
//! - [`client`] - the two-step exchange with its shared deadline
//! - [`error`] - failure taxonomy with the user-facing messages
//! - [`events`] - tolerant response-event types and author classification
//! - [`extract`] - picking the assistant's answer out of the event array
//! - [`types`] - validated input and the request outcome

pub mod client;
pub mod error;
pub mod events;
pub mod extract;
pub mod types;

pub use client::{AgentClient, BackendSettings, PlanBackend};
pub use error::ClientError;
pub use events::{EventAuthor, EventContent, EventPart, ResponseEvent};
pub use extract::extract_plan_text;
pub use types::{GeneratedPlan, PlanInput};
