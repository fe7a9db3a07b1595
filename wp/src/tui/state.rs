//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.
//!
//! The request lifecycle is a four-phase machine: idle -> loading ->
//! success | error. A terminal phase is left only via reset, retry, or a
//! fresh submit; submitting while loading is a no-op, so at most one request
//! is ever in flight on behalf of the current state.

use std::time::Instant;

use planclient::{ClientError, GeneratedPlan, PlanInput};

use crate::validation::{ValidationErrors, validate};

/// Request lifecycle phase
#[derive(Debug, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success(GeneratedPlan),
    Error(FailureDetail),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    /// Display name for the header
    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Loading => "Loading",
            Phase::Success(_) => "Plan",
            Phase::Error(_) => "Error",
        }
    }
}

/// Everything the error panel needs, flattened out of a [`ClientError`]
#[derive(Debug, Clone)]
pub struct FailureDetail {
    /// User-facing message, shown inline
    pub message: String,
    /// HTTP status for the technical-details section, when one was received
    pub status_code: Option<u16>,
    /// Raw response body for the technical-details section
    pub body: Option<String>,
}

impl From<ClientError> for FailureDetail {
    fn from(err: ClientError) -> Self {
        Self {
            message: err.to_string(),
            status_code: err.status_code(),
            body: err.body().map(str::to_string),
        }
    }
}

/// Which form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Location,
    Ages,
}

impl Field {
    /// Cycle focus between the two fields
    pub fn next(self) -> Self {
        match self {
            Field::Location => Field::Ages,
            Field::Ages => Field::Location,
        }
    }
}

/// Main TUI application state
#[derive(Debug)]
pub struct AppState {
    /// Current request phase
    pub phase: Phase,
    /// Focused form field
    pub focus: Field,
    /// Location input buffer
    pub location_input: String,
    /// Ages input buffer
    pub ages_input: String,
    /// Per-field messages from the last failed submit
    pub field_errors: ValidationErrors,
    /// Last successfully validated input, kept only to support retry
    pub last_input: Option<PlanInput>,
    /// Input queued for the runner to start
    pub pending_submit: Option<PlanInput>,
    /// Tags the current request; outcomes from older generations were reset
    /// away and are dropped by the runner
    pub generation: u64,
    /// When the in-flight request started
    pub loading_since: Option<Instant>,
    /// Raw-response viewer open
    pub show_raw: bool,
    /// Error technical details expanded
    pub show_details: bool,
    /// Scroll offset for the result panel
    pub result_scroll: u16,
    /// Should the app quit
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            phase: Phase::default(),
            focus: Field::default(),
            location_input: String::new(),
            ages_input: String::new(),
            field_errors: ValidationErrors::default(),
            last_input: None,
            pending_submit: None,
            generation: 0,
            loading_since: None,
            show_raw: false,
            show_details: false,
            result_scroll: 0,
            should_quit: false,
        }
    }
}

impl AppState {
    /// Create new AppState
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the form and queue a request. Ignored while loading, so a
    /// second request can never start behind an active one.
    pub fn submit(&mut self) {
        if self.phase.is_loading() {
            return;
        }

        match validate(&self.location_input, &self.ages_input) {
            Ok(input) => {
                self.field_errors = ValidationErrors::default();
                self.last_input = Some(input.clone());
                self.pending_submit = Some(input);
            }
            Err(errors) => {
                self.field_errors = errors;
            }
        }
    }

    /// Re-issue the last validated input unchanged
    pub fn retry(&mut self) {
        if self.phase.is_loading() {
            return;
        }
        if let Some(input) = self.last_input.clone() {
            self.pending_submit = Some(input);
        }
    }

    /// Whether a retry is currently possible
    pub fn can_retry(&self) -> bool {
        self.last_input.is_some() && !self.phase.is_loading()
    }

    /// Called by the runner when it actually starts the request
    pub fn begin_loading(&mut self) {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.loading_since = Some(Instant::now());
        self.show_raw = false;
        self.show_details = false;
        self.result_scroll = 0;
    }

    /// Called by the runner when the request resolves
    pub fn finish(&mut self, result: Result<GeneratedPlan, ClientError>) {
        self.loading_since = None;
        self.result_scroll = 0;
        self.phase = match result {
            Ok(plan) => Phase::Success(plan),
            Err(err) => Phase::Error(FailureDetail::from(err)),
        };
    }

    /// Clear everything back to the initial state, from any phase. The
    /// generation bump orphans an in-flight request, if there is one.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    /// Toggle the raw-response viewer (meaningful in the success phase)
    pub fn toggle_raw(&mut self) {
        self.show_raw = !self.show_raw;
        self.result_scroll = 0;
    }

    /// Toggle the error technical-details section
    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    pub fn scroll_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(5);
    }

    pub fn scroll_down(&mut self) {
        self.result_scroll = self.result_scroll.saturating_add(5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(text: &str) -> GeneratedPlan {
        GeneratedPlan {
            plan_text: Some(text.to_string()),
            events: Vec::new(),
            raw: serde_json::json!([]),
        }
    }

    #[test]
    fn test_submit_valid_input_queues_request() {
        let mut state = AppState::new();
        state.location_input = " 94105 ".to_string();
        state.ages_input = "4,7".to_string();

        state.submit();

        let pending = state.pending_submit.as_ref().expect("submit should queue");
        assert_eq!(pending.location, "94105");
        assert_eq!(pending.kids_ages, vec![4, 7]);
        assert_eq!(state.last_input, state.pending_submit);
        assert!(state.field_errors.is_empty());
    }

    #[test]
    fn test_submit_invalid_input_sets_errors_only() {
        let mut state = AppState::new();
        state.ages_input = "abc".to_string();

        state.submit();

        assert!(state.pending_submit.is_none());
        assert!(state.last_input.is_none());
        assert!(state.field_errors.get("location").is_some());
        assert!(state.field_errors.get("ages").is_some());
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let mut state = AppState::new();
        state.location_input = "Tahoe".to_string();
        state.submit();
        state.pending_submit.take();
        state.begin_loading();

        state.location_input = "Elsewhere".to_string();
        state.submit();

        assert!(state.pending_submit.is_none());
    }

    #[test]
    fn test_full_success_transition() {
        let mut state = AppState::new();
        state.location_input = "Tahoe".to_string();
        state.submit();

        let input = state.pending_submit.take().expect("queued");
        state.begin_loading();
        assert!(state.phase.is_loading());
        assert!(state.loading_since.is_some());

        state.finish(Ok(plan("have fun")));
        assert!(matches!(state.phase, Phase::Success(_)));
        assert!(state.loading_since.is_none());
        // Input survives for retry
        assert_eq!(state.last_input.as_ref(), Some(&input));
    }

    #[test]
    fn test_error_transition_keeps_detail() {
        let mut state = AppState::new();
        state.begin_loading();
        state.finish(Err(ClientError::from_status(500, "boom".to_string())));

        match &state.phase {
            Phase::Error(detail) => {
                assert_eq!(detail.message, "Something went wrong on the server. Please try again.");
                assert_eq!(detail.status_code, Some(500));
                assert_eq!(detail.body.as_deref(), Some("boom"));
            }
            other => panic!("expected error phase, got {:?}", other),
        }
    }

    #[test]
    fn test_retry_reuses_last_input() {
        let mut state = AppState::new();
        state.location_input = "Tahoe".to_string();
        state.ages_input = "9".to_string();
        state.submit();
        let first = state.pending_submit.take().expect("queued");
        state.begin_loading();
        state.finish(Err(ClientError::Timeout));

        state.retry();
        assert_eq!(state.pending_submit.as_ref(), Some(&first));
    }

    #[test]
    fn test_retry_without_prior_input_is_noop() {
        let mut state = AppState::new();
        state.retry();
        assert!(state.pending_submit.is_none());
    }

    #[test]
    fn test_reset_clears_everything_from_any_phase() {
        let mut state = AppState::new();
        state.location_input = "Tahoe".to_string();
        state.submit();
        state.pending_submit.take();
        state.begin_loading();
        state.finish(Ok(plan("x")));
        state.show_raw = true;

        state.reset();

        assert!(matches!(state.phase, Phase::Idle));
        assert!(state.location_input.is_empty());
        assert!(state.ages_input.is_empty());
        assert!(state.last_input.is_none());
        assert!(state.pending_submit.is_none());
        assert!(!state.show_raw);

        // Reset is idempotent
        state.reset();
        assert!(matches!(state.phase, Phase::Idle));
    }

    #[test]
    fn test_generation_advances_on_load_and_reset() {
        let mut state = AppState::new();
        assert_eq!(state.generation, 0);

        state.begin_loading();
        assert_eq!(state.generation, 1);

        // A reset during loading orphans the in-flight request: an outcome
        // tagged with generation 1 no longer matches.
        state.reset();
        assert_eq!(state.generation, 2);
        assert!(matches!(state.phase, Phase::Idle));
    }
}
