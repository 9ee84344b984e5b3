use crate::lesson::action::LessonAction;
use crate::lesson::state::LessonState;

/// The single decision taken when the learner leaves the original steps.
///
/// Returns `BuildReviewSteps` when there are unresolved mistakes to review,
/// `GoToSummary` otherwise, and `None` once reviews have been built.
#[must_use]
pub fn boundary_action(state: &LessonState) -> Option<LessonAction> {
    if state.has_built_review_steps() {
        return None;
    }
    if state.settings().review_missed_steps() && !state.incorrect_step_ids().is_empty() {
        Some(LessonAction::BuildReviewSteps)
    } else {
        Some(LessonAction::GoToSummary)
    }
}

/// Cursor sits one past the original steps and nothing has been decided yet.
#[must_use]
pub fn is_at_originals_boundary(state: &LessonState) -> bool {
    !state.has_built_review_steps() && state.current_index() == state.original_steps().len()
}

/// Advancing would put the cursor on the summary before any review exists.
#[must_use]
pub fn next_lands_on_summary(state: &LessonState) -> bool {
    !state.has_built_review_steps() && state.summary_index() == Some(state.current_index() + 1)
}
