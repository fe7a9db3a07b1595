//! Form input validation
//!
//! Turns the raw location and ages strings into a [`PlanInput`], or a map of
//! field name to human-readable message. Pure functions; no I/O.

use std::collections::BTreeMap;
use std::fmt;

use planclient::PlanInput;

/// Ages must fall strictly inside this range
const AGE_MIN: u32 = 1;
const AGE_MAX: u32 = 119;

/// Field-keyed validation messages
///
/// Field names are `"location"` and `"ages"`; each carries one message. A
/// failed ages field never produces a partial list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for one field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate the two form fields
///
/// The location is required and kept trimmed; the ages field is optional and
/// all-or-nothing: one bad token rejects the whole field.
pub fn validate(location: &str, ages: &str) -> Result<PlanInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let location = location.trim();
    if location.is_empty() {
        errors.insert("location", "Please enter a location or zip code.");
    }

    let kids_ages = match parse_ages(ages) {
        Ok(ages) => ages,
        Err(message) => {
            errors.insert("ages", message);
            Vec::new()
        }
    };

    if errors.is_empty() {
        Ok(PlanInput::with_ages(location, kids_ages))
    } else {
        Err(errors)
    }
}

/// Parse the comma-separated ages field; empty means no ages given
fn parse_ages(raw: &str) -> Result<Vec<u8>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let mut ages = Vec::with_capacity(4);
    for token in raw.split(',') {
        let token = token.trim();
        match parse_age_token(token) {
            Some(age) => ages.push(age),
            None => {
                return Err(format!(
                    "\"{}\" is not a valid age. Use whole numbers between {} and {}, separated by commas.",
                    token, AGE_MIN, AGE_MAX
                ));
            }
        }
    }
    Ok(ages)
}

/// Exact base-10 integer in range; no sign, no decimals, no stray characters
fn parse_age_token(token: &str) -> Option<u8> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = token.parse().ok()?;
    if (AGE_MIN..=AGE_MAX).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_location_is_trimmed() {
        let input = validate("  San Rafael  ", "").expect("trimmed location should validate");
        assert_eq!(input.location, "San Rafael");
        assert!(input.kids_ages.is_empty());
    }

    #[test]
    fn test_blank_location_is_rejected() {
        let errors = validate("   ", "").expect_err("blank location should fail");
        assert!(errors.get("location").is_some());
        assert!(errors.get("ages").is_none());
    }

    #[test]
    fn test_zip_code_location_is_accepted() {
        let input = validate("94105", "").expect("zip should validate");
        assert_eq!(input.location, "94105");
    }

    #[test]
    fn test_ages_parse_in_order() {
        let input = validate("Tahoe", "4, 7,11").expect("valid ages should parse");
        assert_eq!(input.kids_ages, vec![4, 7, 11]);
    }

    #[test]
    fn test_age_boundaries() {
        assert!(validate("x", "1").is_ok());
        assert!(validate("x", "119").is_ok());
        assert!(validate("x", "0").is_err());
        assert!(validate("x", "120").is_err());
    }

    #[test]
    fn test_one_bad_token_rejects_the_whole_field() {
        let errors = validate("Tahoe", "4, seven, 11").expect_err("bad token should fail");
        let message = errors.get("ages").expect("ages field should carry the message");
        assert!(message.contains("seven"));
    }

    #[test]
    fn test_non_integer_tokens_are_rejected() {
        for bad in ["4.5", "-3", "+3", " ", "3 years", "0x10", "1e2"] {
            assert!(validate("x", bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_empty_token_between_commas_is_rejected() {
        assert!(validate("x", "3,,5").is_err());
        assert!(validate("x", "3,5,").is_err());
    }

    #[test]
    fn test_leading_zeros_are_still_base_10() {
        let input = validate("x", "007").expect("leading zeros parse as base 10");
        assert_eq!(input.kids_ages, vec![7]);
    }

    #[test]
    fn test_huge_token_is_rejected_not_wrapped() {
        assert!(validate("x", "99999999999999999999").is_err());
    }

    #[test]
    fn test_both_fields_can_fail_at_once() {
        let errors = validate("", "abc").expect_err("both fields invalid");
        assert!(errors.get("location").is_some());
        assert!(errors.get("ages").is_some());
        assert_eq!(errors.iter().count(), 2);
    }

    proptest! {
        // Any all-valid comma list round-trips to the same ages in order.
        #[test]
        fn prop_valid_age_lists_round_trip(ages in proptest::collection::vec(1u8..=119, 1..8)) {
            let field = ages.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(",");
            let input = validate("Somewhere", &field).expect("all-valid list should parse");
            prop_assert_eq!(input.kids_ages, ages);
        }

        // Location content never affects the ages field.
        #[test]
        fn prop_nonblank_location_always_accepted(loc in "[a-zA-Z0-9 ]*[a-zA-Z0-9][a-zA-Z0-9 ]*") {
            let input = validate(&loc, "").expect("non-blank location should validate");
            prop_assert_eq!(input.location, loc.trim().to_string());
        }
    }
}
