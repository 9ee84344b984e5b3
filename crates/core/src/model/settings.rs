use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonSettingsError {
    #[error("review id prefix cannot be empty")]
    EmptyReviewPrefix,

    #[error("review label cannot be empty")]
    EmptyReviewLabel,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

pub const DEFAULT_REVIEW_PREFIX: &str = "review-";
pub const DEFAULT_REVIEW_LABEL: &str = "Review";

/// Per-session knobs for review synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSettings {
    review_id_prefix: String,
    review_label: String,
    review_missed_steps: bool,
}

impl Default for LessonSettings {
    fn default() -> Self {
        Self {
            review_id_prefix: DEFAULT_REVIEW_PREFIX.to_string(),
            review_label: DEFAULT_REVIEW_LABEL.to_string(),
            review_missed_steps: true,
        }
    }
}

impl LessonSettings {
    /// Creates custom lesson settings.
    ///
    /// # Errors
    ///
    /// Returns error if the prefix or label is blank.
    pub fn new(
        review_id_prefix: impl Into<String>,
        review_label: impl Into<String>,
        review_missed_steps: bool,
    ) -> Result<Self, LessonSettingsError> {
        let review_id_prefix = review_id_prefix.into();
        let review_label = review_label.into();
        if review_id_prefix.trim().is_empty() {
            return Err(LessonSettingsError::EmptyReviewPrefix);
        }
        if review_label.trim().is_empty() {
            return Err(LessonSettingsError::EmptyReviewLabel);
        }

        Ok(Self {
            review_id_prefix,
            review_label,
            review_missed_steps,
        })
    }

    /// Same settings with review synthesis switched on or off.
    #[must_use]
    pub fn with_review_missed_steps(mut self, enabled: bool) -> Self {
        self.review_missed_steps = enabled;
        self
    }

    #[must_use]
    pub fn review_id_prefix(&self) -> &str {
        &self.review_id_prefix
    }

    #[must_use]
    pub fn review_label(&self) -> &str {
        &self.review_label
    }

    /// When false, a lesson with mistakes goes straight to its summary.
    #[must_use]
    pub fn review_missed_steps(&self) -> bool {
        self.review_missed_steps
    }
}
