//! Heuristic plan-text formatting
//!
//! Best-effort splitting of the assistant's prose into a header block,
//! activity bullets, and a trailing disclaimer. These are presentation
//! heuristics over one backend's prose style, not a grammar; callers fall
//! back to the verbatim text whenever the split does not fire.

use std::sync::LazyLock;

use regex::Regex;

/// Bullet lines needed before the structured rendering is used. Below this,
/// a stray dash would masquerade as a one-item list.
pub const MIN_ACTIVITIES: usize = 2;

/// Recognized header keys, each followed by a `:` or `-` separator
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:area|weather|ages|location|forecast)\s*[:-]").expect("header pattern compiles")
});

/// `-`/`•`/`*` plus whitespace, or a numeral plus `.`/`)`
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-•*]\s+|\d+[.)]\s*)").expect("bullet pattern compiles"));

/// Case-insensitive needles that mark a disclaimer line
const DISCLAIMER_MARKERS: [&str; 5] = ["disclaimer", "note:", "based on ai", "verify", "accuracy"];

/// One activity card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub title: String,
    pub description: Option<String>,
}

/// Structured projection of the plan text
///
/// Recomputed from the text on demand; never cached or stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPlan {
    /// Lines like "Area: ..." or "Weather: ..." appearing before any bullet
    pub header: Vec<String>,
    pub activities: Vec<Activity>,
    pub disclaimer: Option<String>,
}

/// Split the plan text into cards, or `None` when it does not look like a
/// list (fewer than [`MIN_ACTIVITIES`] bullets) and should be shown verbatim.
pub fn parse_plan(text: &str) -> Option<ParsedPlan> {
    let mut plan = ParsedPlan::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(marker) = BULLET_RE.find(line) {
            plan.activities.push(split_activity(&line[marker.end()..]));
        } else if HEADER_RE.is_match(line) && plan.activities.is_empty() {
            plan.header.push(line.to_string());
        } else if is_disclaimer(line) {
            plan.disclaimer = Some(line.to_string());
        }
    }

    if plan.activities.len() >= MIN_ACTIVITIES {
        Some(plan)
    } else {
        None
    }
}

/// Title runs to the first `" - "` or `":"`; the remainder, if any, is the
/// description.
fn split_activity(body: &str) -> Activity {
    let body = body.trim();

    let dash = body.find(" - ").map(|idx| (idx, 3));
    let colon = body.find(':').map(|idx| (idx, 1));
    let separator = match (dash, colon) {
        (Some(d), Some(c)) => Some(if d.0 < c.0 { d } else { c }),
        (Some(d), None) => Some(d),
        (None, Some(c)) => Some(c),
        (None, None) => None,
    };

    match separator {
        Some((idx, len)) => {
            let description = body[idx + len..].trim();
            Activity {
                title: body[..idx].trim().to_string(),
                description: (!description.is_empty()).then(|| description.to_string()),
            }
        }
        None => Activity {
            title: body.to_string(),
            description: None,
        },
    }
}

fn is_disclaimer(line: &str) -> bool {
    let lower = line.to_lowercase();
    DISCLAIMER_MARKERS.iter().any(|marker| lower.contains(marker))
}
