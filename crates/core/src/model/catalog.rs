use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::StepId;
use crate::model::step::LessonStep;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("lesson has no steps")]
    Empty,

    #[error("step at position {index} has an empty id")]
    EmptyStepId { index: usize },

    #[error("duplicate step id: {0}")]
    DuplicateStepId(StepId),

    #[error("lesson has no summary step")]
    MissingSummary,

    #[error("lesson has more than one summary step")]
    MultipleSummaries,

    #[error("summary step must be the last step")]
    SummaryNotLast,

    #[error("summary step cannot be an assessment")]
    AssessedSummary,

    #[error("step {0} already names a review source")]
    PresetReviewSource(StepId),

    #[error("step id {id} uses the reserved review prefix {prefix:?}")]
    ReservedPrefix { id: StepId, prefix: String },

    #[error("catalog is not valid JSON: {0}")]
    Parse(String),
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Immutable, validated sequence of lesson steps.
///
/// A catalog always ends with exactly one summary step, so the engine can
/// always reach a terminal step once every review is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct StepCatalog {
    steps: Vec<LessonStep>,
}

impl StepCatalog {
    /// Validates the step list and wraps it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the list is empty, ids are blank or repeated,
    /// the summary step is missing, repeated, misplaced, or assessed, or a step
    /// already claims to be a review clone.
    pub fn new(steps: Vec<LessonStep>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            if step.id().is_empty() {
                return Err(CatalogError::EmptyStepId { index });
            }
            if !seen.insert(step.id()) {
                return Err(CatalogError::DuplicateStepId(step.id().clone()));
            }
            if step.is_review() {
                return Err(CatalogError::PresetReviewSource(step.id().clone()));
            }
        }

        let summaries = steps.iter().filter(|step| step.is_summary()).count();
        match summaries {
            0 => return Err(CatalogError::MissingSummary),
            1 => {}
            _ => return Err(CatalogError::MultipleSummaries),
        }

        let last = &steps[steps.len() - 1];
        if !last.is_summary() {
            return Err(CatalogError::SummaryNotLast);
        }
        if last.is_assessment() {
            return Err(CatalogError::AssessedSummary);
        }

        Ok(Self { steps })
    }

    /// Parses a JSON array of steps and validates it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, otherwise any error
    /// from [`StepCatalog::new`].
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let steps: Vec<LessonStep> =
            serde_json::from_str(raw).map_err(|err| CatalogError::Parse(err.to_string()))?;
        Self::new(steps)
    }

    /// Rejects ids that would collide with synthesized review ids.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ReservedPrefix` for the first offending id.
    pub fn ensure_prefix_free(&self, prefix: &str) -> Result<(), CatalogError> {
        match self
            .steps
            .iter()
            .find(|step| step.id().as_str().starts_with(prefix))
        {
            Some(step) => Err(CatalogError::ReservedPrefix {
                id: step.id().clone(),
                prefix: prefix.to_string(),
            }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn steps(&self) -> &[LessonStep] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of assessment steps in the lesson.
    #[must_use]
    pub fn assessment_count(&self) -> usize {
        self.steps.iter().filter(|step| step.is_assessment()).count()
    }

    #[must_use]
    pub fn into_steps(self) -> Vec<LessonStep> {
        self.steps
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::step::StepKind;

    fn mcq(id: &str) -> LessonStep {
        LessonStep::assessment(id, StepKind::Mcq)
    }

    #[test]
    fn accepts_well_formed_lesson() {
        let catalog = StepCatalog::new(vec![
            LessonStep::info("intro"),
            mcq("q1"),
            LessonStep::summary("done"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.assessment_count(), 1);
    }

    #[test]
    fn empty_lesson_is_rejected() {
        assert_eq!(StepCatalog::new(Vec::new()), Err(CatalogError::Empty));
    }

    #[test]
    fn missing_summary_is_rejected() {
        let err = StepCatalog::new(vec![mcq("q1"), mcq("q2")]).unwrap_err();
        assert_eq!(err, CatalogError::MissingSummary);
    }

    #[test]
    fn summary_must_be_last_and_unique() {
        let err = StepCatalog::new(vec![LessonStep::summary("s"), mcq("q1")]).unwrap_err();
        assert_eq!(err, CatalogError::SummaryNotLast);

        let err = StepCatalog::new(vec![LessonStep::summary("s1"), LessonStep::summary("s2")])
            .unwrap_err();
        assert_eq!(err, CatalogError::MultipleSummaries);
    }

    #[test]
    fn assessed_summary_is_rejected() {
        let err = StepCatalog::new(vec![LessonStep::summary("s").with_assessment(true)])
            .unwrap_err();
        assert_eq!(err, CatalogError::AssessedSummary);
    }

    #[test]
    fn duplicate_and_blank_ids_are_rejected() {
        let err = StepCatalog::new(vec![mcq("q1"), mcq("q1"), LessonStep::summary("s")])
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateStepId(StepId::new("q1")));

        let err = StepCatalog::new(vec![mcq(" "), LessonStep::summary("s")]).unwrap_err();
        assert_eq!(err, CatalogError::EmptyStepId { index: 0 });
    }

    #[test]
    fn preset_review_source_is_rejected() {
        let review = mcq("q1").to_review("review-", "Review");
        let err = StepCatalog::new(vec![review, LessonStep::summary("s")]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::PresetReviewSource(StepId::new("review-q1"))
        );
    }

    #[test]
    fn reserved_prefix_is_detected() {
        let catalog =
            StepCatalog::new(vec![mcq("review-basics"), LessonStep::summary("s")]).unwrap();

        assert!(matches!(
            catalog.ensure_prefix_free("review-"),
            Err(CatalogError::ReservedPrefix { .. })
        ));
        assert!(catalog.ensure_prefix_free("again-").is_ok());
    }

    #[test]
    fn parses_json_catalog() {
        let raw = r#"[
            { "id": "intro", "type": "info", "fullScreen": true },
            { "id": "q1", "type": "true_false", "isAssessment": true },
            { "id": "end", "type": "summary" }
        ]"#;
        let catalog = StepCatalog::from_json(raw).unwrap();

        assert_eq!(catalog.steps()[0].kind(), StepKind::Info);
        assert!(catalog.steps()[0].full_screen());
        assert_eq!(catalog.steps()[2].kind(), StepKind::Summary);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = StepCatalog::from_json("[{ \"id\": 1 }").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
