//! Two-phase bounded numeric editing.
//!
//! A [`NumericFieldState`] holds the value a user is typing (the provisional
//! value) separately from anything the surrounding application has accepted.
//! Keystrokes land in the provisional value only when they parse to a number
//! inside the configured range; everything else is dropped without touching
//! the held value. A commit finalizes the provisional value and is the only
//! point at which a value leaves the field.
//!
//! The holder is deliberately independent of any rendering framework so the
//! reset-vs-edit interplay can be tested in isolation.

/// Result of feeding raw text into the provisional value.
///
/// External behavior is "silently keep the prior value" for both rejection
/// variants; the distinction exists so callers and tests can observe why a
/// keystroke was dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseOutcome {
    /// The text parsed to a number inside `[min, max]` and was accepted.
    Accepted(f64),
    /// The text was empty; the provisional value is now the empty sentinel.
    Cleared,
    /// The text did not parse as a number. Held value unchanged.
    RejectedUnparseable,
    /// The text parsed but fell outside `[min, max]`. Held value unchanged.
    RejectedOutOfRange,
}

/// Editable numeric value constrained to a closed range.
///
/// Owns the raw text buffer as well, so rejected characters may remain
/// visible while editing; a commit snaps the buffer back to the committed
/// value's representation.
#[derive(Debug, Clone)]
pub struct NumericFieldState {
    text: String,
    value: f64,
    default: f64,
    min: f64,
    max: f64,
}

impl NumericFieldState {
    /// Create a field initialized to `default`.
    ///
    /// The caller guarantees `min <= max`; see
    /// [`sanitize_parameters`](crate::settings::sanitize_parameters) for the
    /// boundary that enforces it.
    pub fn new(default: f64, min: f64, max: f64) -> Self {
        Self {
            text: format_value(default),
            value: default,
            default,
            min,
            max,
        }
    }

    /// The default this field was last initialized or reset to.
    pub fn default_value(&self) -> f64 {
        self.default
    }

    /// The in-progress, not-yet-committed value.
    pub fn provisional(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable access to the raw text buffer for text-edit widgets.
    ///
    /// After the widget mutates the buffer, call [`refresh_provisional`]
    /// to re-evaluate it.
    ///
    /// [`refresh_provisional`]: NumericFieldState::refresh_provisional
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Replace the text buffer and evaluate it as the provisional value.
    pub fn set_provisional(&mut self, raw: &str) -> ParseOutcome {
        self.text.clear();
        self.text.push_str(raw);
        self.evaluate()
    }

    /// Re-evaluate the current text buffer after it was edited in place.
    pub fn refresh_provisional(&mut self) -> ParseOutcome {
        self.evaluate()
    }

    fn evaluate(&mut self) -> ParseOutcome {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            // Empty sentinel, deliberately not clamped to min until commit.
            self.value = 0.0;
            return ParseOutcome::Cleared;
        }
        match trimmed.parse::<f64>() {
            Ok(parsed) if (self.min..=self.max).contains(&parsed) => {
                self.value = parsed;
                ParseOutcome::Accepted(parsed)
            }
            Ok(_) => ParseOutcome::RejectedOutOfRange,
            Err(_) => ParseOutcome::RejectedUnparseable,
        }
    }

    /// Finalize the edit and return the committed value.
    ///
    /// A provisional `0` is indistinguishable from a cleared field and maps
    /// to `min`, even when the range legitimately contains zero. The text
    /// buffer is renormalized to the committed value.
    pub fn commit(&mut self) -> f64 {
        let committed = if self.value == 0.0 { self.min } else { self.value };
        self.value = committed;
        self.text = format_value(committed);
        committed
    }

    /// External reset: adopt a new default, discarding any in-progress edit.
    pub fn reset(&mut self, new_default: f64) {
        self.default = new_default;
        self.value = new_default;
        self.text = format_value(new_default);
    }
}

fn format_value(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_edit_commits_typed_value() {
        let mut field = NumericFieldState::new(1.0, 1.0, 10.0);

        assert_eq!(field.set_provisional("7"), ParseOutcome::Accepted(7.0));
        assert_eq!(field.commit(), 7.0);
        assert_eq!(field.text(), "7");
    }

    #[test]
    fn test_fractional_edit_commits_unchanged() {
        let mut field = NumericFieldState::new(1.0, 0.0, 2.0);

        assert_eq!(field.set_provisional("1.25"), ParseOutcome::Accepted(1.25));
        assert_eq!(field.commit(), 1.25);
    }

    #[test]
    fn test_unparseable_text_keeps_prior_value() {
        let mut field = NumericFieldState::new(5.0, 1.0, 10.0);

        assert_eq!(
            field.set_provisional("abc"),
            ParseOutcome::RejectedUnparseable
        );
        assert_eq!(field.provisional(), 5.0, "held value must be unchanged");
        // The rejected characters stay visible in the buffer while editing.
        assert_eq!(field.text(), "abc");
        // The eventual commit reproduces the prior value and fixes the text.
        assert_eq!(field.commit(), 5.0);
        assert_eq!(field.text(), "5");
    }

    #[test]
    fn test_out_of_range_text_keeps_prior_value() {
        let mut field = NumericFieldState::new(5.0, 1.0, 10.0);

        assert_eq!(
            field.set_provisional("11"),
            ParseOutcome::RejectedOutOfRange
        );
        assert_eq!(field.provisional(), 5.0);
        assert_eq!(field.commit(), 5.0);

        assert_eq!(
            field.set_provisional("0.5"),
            ParseOutcome::RejectedOutOfRange
        );
        assert_eq!(field.commit(), 5.0);
    }

    #[test]
    fn test_nan_text_is_rejected_as_out_of_range() {
        let mut field = NumericFieldState::new(5.0, 1.0, 10.0);

        // "NaN" parses as a float but can never satisfy the closed range.
        assert_eq!(
            field.set_provisional("NaN"),
            ParseOutcome::RejectedOutOfRange
        );
        assert_eq!(field.provisional(), 5.0);
    }

    #[test]
    fn test_empty_then_commit_substitutes_min() {
        let mut field = NumericFieldState::new(5.0, 2.0, 10.0);

        assert_eq!(field.set_provisional(""), ParseOutcome::Cleared);
        assert_eq!(field.provisional(), 0.0, "sentinel is not clamped to min");
        assert_eq!(field.commit(), 2.0, "cleared field commits min, not 0");
    }

    #[test]
    fn test_empty_commit_yields_zero_only_when_min_is_zero() {
        let mut field = NumericFieldState::new(1.0, 0.0, 2.0);

        field.set_provisional("");
        assert_eq!(field.commit(), 0.0);
    }

    #[test]
    fn test_committed_zero_maps_to_min_in_zero_spanning_range() {
        // Literal falsy-commit behavior: an explicitly typed 0 is
        // indistinguishable from a cleared field.
        let mut field = NumericFieldState::new(1.0, -5.0, 5.0);

        assert_eq!(field.set_provisional("0"), ParseOutcome::Accepted(0.0));
        assert_eq!(field.commit(), -5.0);
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut field = NumericFieldState::new(5.0, 2.0, 10.0);

        assert_eq!(field.set_provisional("   "), ParseOutcome::Cleared);
        assert_eq!(field.commit(), 2.0);
    }

    #[test]
    fn test_reset_discards_uncommitted_edit() {
        let mut field = NumericFieldState::new(1.0, 1.0, 10.0);

        assert_eq!(field.set_provisional("7"), ParseOutcome::Accepted(7.0));
        field.reset(3.0);

        assert_eq!(field.default_value(), 3.0);
        assert_eq!(field.provisional(), 3.0);
        assert_eq!(field.text(), "3");
        assert_eq!(field.commit(), 3.0);
    }

    #[test]
    fn test_reset_overrides_rejected_text() {
        let mut field = NumericFieldState::new(5.0, 1.0, 10.0);

        field.set_provisional("garbage");
        field.reset(2.0);

        assert_eq!(field.text(), "2");
        assert_eq!(field.commit(), 2.0);
    }

    #[test]
    fn test_refresh_provisional_matches_set_provisional() {
        let mut field = NumericFieldState::new(1.0, 1.0, 10.0);

        field.text_mut().clear();
        field.text_mut().push_str("9");
        assert_eq!(field.refresh_provisional(), ParseOutcome::Accepted(9.0));
        assert_eq!(field.commit(), 9.0);
    }

    #[test]
    fn test_boundary_values_are_accepted() {
        let mut field = NumericFieldState::new(5.0, 1.0, 10.0);

        assert_eq!(field.set_provisional("1"), ParseOutcome::Accepted(1.0));
        assert_eq!(field.set_provisional("10"), ParseOutcome::Accepted(10.0));
        assert_eq!(field.commit(), 10.0);
    }

    #[test]
    fn test_every_commit_lies_within_range() {
        let inputs = ["", "abc", "-3", "0", "4.5", "10", "10.0001", "1e3"];
        for raw in inputs {
            let mut field = NumericFieldState::new(5.0, 1.0, 10.0);
            field.set_provisional(raw);
            let committed = field.commit();
            assert!(
                (1.0..=10.0).contains(&committed),
                "input {:?} committed out-of-range value {}",
                raw,
                committed
            );
        }
    }
}
