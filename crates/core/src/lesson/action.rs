use crate::model::{LessonSettings, StepCatalog, StepId};

/// Every transition the lesson reducer understands.
///
/// Actions that do not apply to the current state are no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum LessonAction {
    /// Start a fresh attempt over the given catalog.
    Init {
        catalog: StepCatalog,
        settings: LessonSettings,
    },
    /// Record the learner's result for a step.
    AnswerStep {
        step_id: StepId,
        is_correct: bool,
        answer_data: Option<serde_json::Value>,
    },
    EnableContinue,
    DisableContinue,
    NextStep,
    PrevStep,
    /// Append one review step per unresolved mistake and jump to the first.
    BuildReviewSteps,
    /// Jump straight to the summary when nothing needs review.
    GoToSummary,
    /// Append the withheld summary once every review is resolved.
    GoToSummaryAfterReview,
    SetActionEnabled(bool),
    /// Ask the renderer to run its reveal/check side effect once.
    TriggerAction,
}

impl LessonAction {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LessonAction::Init { .. } => "init",
            LessonAction::AnswerStep { .. } => "answer_step",
            LessonAction::EnableContinue => "enable_continue",
            LessonAction::DisableContinue => "disable_continue",
            LessonAction::NextStep => "next_step",
            LessonAction::PrevStep => "prev_step",
            LessonAction::BuildReviewSteps => "build_review_steps",
            LessonAction::GoToSummary => "go_to_summary",
            LessonAction::GoToSummaryAfterReview => "go_to_summary_after_review",
            LessonAction::SetActionEnabled(_) => "set_action_enabled",
            LessonAction::TriggerAction => "trigger_action",
        }
    }
}
