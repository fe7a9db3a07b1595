//! Picks the assistant's final answer out of a response-event array
//!
//! Strict priority order, each level consulted only when the previous one
//! yields nothing:
//!
//! 1. every text part of every summarizer event
//! 2. the text parts of the *last* model event only
//! 3. every text part of every event, regardless of author
//! 4. nothing - the caller renders an empty-plan state

use tracing::debug;

use crate::events::{EventAuthor, ResponseEvent};

/// Multi-part answers are joined line by line
const PART_SEPARATOR: &str = "\n";

/// Extract the plan text from the event array, if any event carries one
pub fn extract_plan_text(events: &[ResponseEvent]) -> Option<String> {
    // Anything from a summarizer wins outright.
    let summarizer: Vec<&str> = events
        .iter()
        .filter(|event| event.author_kind() == EventAuthor::Summarizer)
        .flat_map(|event| event.text_parts())
        .collect();
    if !summarizer.is_empty() {
        debug!(parts = summarizer.len(), "extract_plan_text: using summarizer text");
        return Some(summarizer.join(PART_SEPARATOR));
    }

    // Otherwise the last model turn, alone - earlier model turns are
    // intermediate reasoning, not the answer.
    if let Some(last_model) = events
        .iter()
        .rev()
        .find(|event| event.author_kind() == EventAuthor::Model)
    {
        let parts: Vec<&str> = last_model.text_parts().collect();
        if !parts.is_empty() {
            debug!(parts = parts.len(), "extract_plan_text: using last model event");
            return Some(parts.join(PART_SEPARATOR));
        }
    }

    // Last resort: every fragment in arrival order.
    let all: Vec<&str> = events.iter().flat_map(|event| event.text_parts()).collect();
    if all.is_empty() {
        debug!(events = events.len(), "extract_plan_text: no usable text");
        None
    } else {
        debug!(parts = all.len(), "extract_plan_text: falling back to all text parts");
        Some(all.join(PART_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventContent, EventPart};

    fn event(author: &str, texts: &[&str]) -> ResponseEvent {
        ResponseEvent {
            author: Some(author.to_string()),
            content: Some(EventContent {
                role: None,
                parts: texts
                    .iter()
                    .map(|t| EventPart {
                        text: Some(t.to_string()),
                    })
                    .collect(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_model_event_round_trips() {
        let events = vec![event("model", &["Here is your plan."])];
        assert_eq!(extract_plan_text(&events).as_deref(), Some("Here is your plan."));
    }

    #[test]
    fn test_summarizer_beats_later_model_event() {
        let events = vec![event("SummarizerAgent", &["summary A"]), event("model", &["raw B"])];
        assert_eq!(extract_plan_text(&events).as_deref(), Some("summary A"));
    }

    #[test]
    fn test_partial_summarizer_name_matches() {
        let events = vec![event("TripSummarizerAgent", &["summary"]), event("model", &["raw"])];
        assert_eq!(extract_plan_text(&events).as_deref(), Some("summary"));
    }

    #[test]
    fn test_only_last_model_event_is_used() {
        let events = vec![
            event("model", &["thinking out loud"]),
            event("model", &["final answer"]),
        ];
        assert_eq!(extract_plan_text(&events).as_deref(), Some("final answer"));
    }

    #[test]
    fn test_multiple_parts_join_with_newline() {
        let events = vec![event("SummarizerAgent", &["line one", "line two"])];
        assert_eq!(extract_plan_text(&events).as_deref(), Some("line one\nline two"));
    }

    #[test]
    fn test_fallback_collects_all_authors() {
        let events = vec![
            event("ResearchAgent", &["research notes"]),
            event("WeatherAgent", &["forecast"]),
        ];
        assert_eq!(
            extract_plan_text(&events).as_deref(),
            Some("research notes\nforecast")
        );
    }

    #[test]
    fn test_empty_last_model_event_falls_through() {
        // The last model turn has no text, so extraction falls back to the
        // all-authors pass, which picks up the earlier model text again.
        let events = vec![event("model", &["earlier text"]), event("model", &[])];
        assert_eq!(extract_plan_text(&events).as_deref(), Some("earlier text"));
    }

    #[test]
    fn test_no_usable_text_returns_none() {
        let events = vec![
            ResponseEvent::default(),
            event("model", &[]),
            ResponseEvent {
                author: Some("model".to_string()),
                content: Some(EventContent {
                    role: None,
                    parts: vec![EventPart { text: None }],
                }),
                ..Default::default()
            },
        ];
        assert_eq!(extract_plan_text(&events), None);
    }

    #[test]
    fn test_empty_array_returns_none() {
        assert_eq!(extract_plan_text(&[]), None);
    }
}
