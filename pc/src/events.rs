//! Backend response events
//!
//! A message send returns a JSON array of events produced by the remote agent
//! runtime. The shape is not under our control, so every field tolerates
//! absence: missing `content`, missing `parts`, and missing `text` all
//! deserialize cleanly.

use serde::{Deserialize, Serialize};

/// One event from the backend's response array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseEvent {
    pub id: Option<String>,
    pub timestamp: Option<f64>,
    /// Free-text agent tag, e.g. "SummarizerAgent" or "model"
    pub author: Option<String>,
    pub content: Option<EventContent>,
}

/// Message payload of an event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventContent {
    pub role: Option<String>,
    pub parts: Vec<EventPart>,
}

/// One fragment of an event's content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPart {
    pub text: Option<String>,
}

/// Coarse classification of the free-text author tag
///
/// The string matching lives here and nowhere else; everything downstream
/// works with the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAuthor {
    /// The summarizer agent that produces the final answer
    Summarizer,
    /// A raw model turn
    Model,
    /// Any other agent in the pipeline
    Other,
}

impl ResponseEvent {
    /// Classify this event's author tag
    pub fn author_kind(&self) -> EventAuthor {
        match self.author.as_deref() {
            Some("SummarizerAgent") => EventAuthor::Summarizer,
            Some(author) if author.contains("Summarizer") => EventAuthor::Summarizer,
            Some("model") => EventAuthor::Model,
            _ => EventAuthor::Other,
        }
    }

    /// All non-empty text fragments carried by this event, in order
    pub fn text_parts(&self) -> impl Iterator<Item = &str> {
        self.content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .filter(|text| !text.is_empty())
    }
}
