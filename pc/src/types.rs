//! Request input and outcome types
//!
//! `PlanInput` is produced by form validation and is immutable from then on;
//! the front ends hold on to the last one only to support a manual retry.

use serde::{Deserialize, Serialize};

use crate::events::ResponseEvent;

/// Validated input for one plan request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanInput {
    /// Trimmed, non-empty location or zip string
    pub location: String,

    /// Ages of accompanying kids, each strictly between 0 and 120.
    /// Empty means no ages were given.
    pub kids_ages: Vec<u8>,
}

impl PlanInput {
    /// Input with a location only
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            kids_ages: Vec::new(),
        }
    }

    /// Input with a location and kids' ages
    pub fn with_ages(location: impl Into<String>, kids_ages: Vec<u8>) -> Self {
        Self {
            location: location.into(),
            kids_ages,
        }
    }

    /// Render the natural-language prompt sent to the agent
    pub fn prompt(&self) -> String {
        let mut prompt = format!("Plan a weekend trip to {}.", self.location);
        if !self.kids_ages.is_empty() {
            let ages = self
                .kids_ages
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            prompt.push_str(&format!(" We have kids ages {}.", ages));
        }
        prompt
    }
}

/// Outcome of a successful two-step exchange
///
/// Constructed once per request and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    /// The assistant's answer, if any event carried usable text.
    /// `None` renders as an empty-plan state, not an error.
    pub plan_text: Option<String>,

    /// Typed view of the response events
    pub events: Vec<ResponseEvent>,

    /// The response body exactly as received, for the raw-response viewer
    pub raw: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_location_only() {
        let input = PlanInput::new("94105");
        assert_eq!(input.prompt(), "Plan a weekend trip to 94105.");
    }

    #[test]
    fn test_prompt_with_ages() {
        let input = PlanInput::with_ages("Lisbon", vec![4, 7]);
        assert_eq!(
            input.prompt(),
            "Plan a weekend trip to Lisbon. We have kids ages 4, 7."
        );
    }

    #[test]
    fn test_prompt_single_age() {
        let input = PlanInput::with_ages("Tahoe", vec![12]);
        assert_eq!(input.prompt(), "Plan a weekend trip to Tahoe. We have kids ages 12.");
    }
}
