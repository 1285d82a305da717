//! Record model and input validation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::score::productivity_score;

/// Timestamp format used in forms and in the database (minute precision,
/// fixed width, lexicographically sortable).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One persisted observation of distracted/studied minutes at a point in
/// time, plus its derived productivity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityRecord {
    /// Store-assigned identifier, immutable after creation.
    pub id: i64,
    /// User-supplied point in time, the sole sort key. Need not be unique.
    pub timestamp: NaiveDateTime,
    pub distracted_minutes: f64,
    pub studied_minutes: f64,
    /// Derived field, always `exp(-distracted_minutes / studied_minutes)`.
    pub productivity: f64,
}

/// Validated input for creating or overwriting a record.
///
/// Construction is the validation gate: a `RecordDraft` that exists is safe
/// to feed to the score calculator, so division by zero and NaN/infinity
/// never reach stored data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordDraft {
    timestamp: NaiveDateTime,
    distracted_minutes: f64,
    studied_minutes: f64,
}

impl RecordDraft {
    /// Validate raw inputs into a draft.
    ///
    /// # Errors
    /// Returns `ValidationError` when `distracted_minutes` is negative or
    /// non-finite, or `studied_minutes` is non-positive or non-finite.
    pub fn new(
        timestamp: NaiveDateTime,
        distracted_minutes: f64,
        studied_minutes: f64,
    ) -> Result<Self, ValidationError> {
        if !distracted_minutes.is_finite() || distracted_minutes < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "distracted_minutes".to_string(),
                message: format!("must be a finite number >= 0, got {distracted_minutes}"),
            });
        }
        if !studied_minutes.is_finite() || studied_minutes <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "studied_minutes".to_string(),
                message: format!("must be a finite number > 0, got {studied_minutes}"),
            });
        }
        Ok(Self {
            timestamp,
            distracted_minutes,
            studied_minutes,
        })
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn distracted_minutes(&self) -> f64 {
        self.distracted_minutes
    }

    pub fn studied_minutes(&self) -> f64 {
        self.studied_minutes
    }

    /// Productivity score for this draft.
    pub fn score(&self) -> f64 {
        productivity_score(self.distracted_minutes, self.studied_minutes)
    }
}

/// Parse a user-supplied timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM` and the HTML `datetime-local` variant
/// `YYYY-MM-DDTHH:MM`.
///
/// # Errors
/// Returns `ValidationError::InvalidTimestamp` for anything else.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| ValidationError::InvalidTimestamp {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn parses_space_and_t_separated_timestamps() {
        assert_eq!(ts("2024-01-01 09:00"), ts("2024-01-01T09:00"));
        assert_eq!(
            ts(" 2024-06-15 23:59 ").format(TIMESTAMP_FORMAT).to_string(),
            "2024-06-15 23:59"
        );
    }

    #[test]
    fn rejects_malformed_timestamps() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2024-13-01 09:00").is_err());
        assert!(parse_timestamp("2024-01-01").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn draft_rejects_zero_or_negative_studied_minutes() {
        let when = ts("2024-01-01 09:00");
        assert!(RecordDraft::new(when, 10.0, 0.0).is_err());
        assert!(RecordDraft::new(when, 10.0, -5.0).is_err());
    }

    #[test]
    fn draft_rejects_negative_or_non_finite_inputs() {
        let when = ts("2024-01-01 09:00");
        assert!(RecordDraft::new(when, -1.0, 50.0).is_err());
        assert!(RecordDraft::new(when, f64::NAN, 50.0).is_err());
        assert!(RecordDraft::new(when, 10.0, f64::INFINITY).is_err());
    }

    #[test]
    fn draft_accepts_zero_distraction_and_scores_it() {
        let when = ts("2024-01-01 09:00");
        let draft = RecordDraft::new(when, 0.0, 50.0).unwrap();
        assert_eq!(draft.score(), 1.0);

        let draft = RecordDraft::new(when, 10.0, 50.0).unwrap();
        assert!((draft.score() - (-0.2f64).exp()).abs() < 1e-9);
    }
}
