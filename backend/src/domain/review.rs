//! Patient reviews, moderated before they appear publicly.

use chrono::{DateTime, Utc};

use super::auth::present;
use super::ReviewId;

/// Highest rating a review can carry.
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("Name and message are required.")]
    MissingFields,
    #[error("Rating must be between 0 and {max}.", max = MAX_RATING)]
    RatingOutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub patient_name: String,
    pub message: String,
    pub rating: u8,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    pub patient_name: Option<String>,
    pub message: Option<String>,
    pub rating: Option<i64>,
}

impl Review {
    /// Accept a public submission. Reviews start unapproved with rating 0
    /// unless one is given.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use clinic_backend::domain::{Review, ReviewDraft, ReviewId};
    ///
    /// let review = Review::submit(
    ///     ReviewDraft {
    ///         patient_name: Some("Sam".into()),
    ///         message: Some("Great care".into()),
    ///         rating: Some(5),
    ///     },
    ///     ReviewId::random(),
    ///     Utc::now(),
    /// )
    /// .unwrap();
    /// assert!(!review.is_approved);
    /// assert_eq!(review.rating, 5);
    /// ```
    pub fn submit(
        draft: ReviewDraft,
        id: ReviewId,
        now: DateTime<Utc>,
    ) -> Result<Self, ReviewValidationError> {
        let (Some(patient_name), Some(message)) = (present(draft.patient_name), present(draft.message))
        else {
            return Err(ReviewValidationError::MissingFields);
        };
        let rating = match draft.rating {
            None => 0,
            Some(value) => u8::try_from(value)
                .ok()
                .filter(|rating| *rating <= MAX_RATING)
                .ok_or(ReviewValidationError::RatingOutOfRange)?,
        };
        Ok(Self {
            id,
            patient_name,
            message,
            rating,
            is_approved: false,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(rating: Option<i64>) -> ReviewDraft {
        ReviewDraft {
            patient_name: Some("Sam".into()),
            message: Some("Kind staff".into()),
            rating,
        }
    }

    #[rstest]
    #[case(None, 0)]
    #[case(Some(0), 0)]
    #[case(Some(5), 5)]
    fn accepts_ratings_in_range(#[case] rating: Option<i64>, #[case] expected: u8) {
        let review = Review::submit(draft(rating), ReviewId::random(), Utc::now()).expect("valid");
        assert_eq!(review.rating, expected);
    }

    #[rstest]
    #[case(-1)]
    #[case(6)]
    fn rejects_ratings_out_of_range(#[case] rating: i64) {
        let err = Review::submit(draft(Some(rating)), ReviewId::random(), Utc::now())
            .expect_err("out of range");
        assert_eq!(err.to_string(), "Rating must be between 0 and 5.");
    }

    #[rstest]
    fn requires_name_and_message() {
        let err = Review::submit(
            ReviewDraft {
                message: Some("hi".into()),
                ..ReviewDraft::default()
            },
            ReviewId::random(),
            Utc::now(),
        )
        .expect_err("missing name");
        assert_eq!(err, ReviewValidationError::MissingFields);
    }
}
