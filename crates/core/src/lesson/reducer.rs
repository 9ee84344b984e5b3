use crate::lesson::action::LessonAction;
use crate::lesson::state::LessonState;
use crate::model::{AnswerResult, LessonStep, StepId};

/// Pure transition function of the lesson engine.
///
/// Returns the state that follows `action`. Actions that make no sense in
/// `state` return an equal copy of it instead of failing.
#[must_use]
pub fn reduce(state: &LessonState, action: LessonAction) -> LessonState {
    let mut next = state.clone();
    match action {
        LessonAction::Init { catalog, settings } => return LessonState::new(catalog, settings),
        LessonAction::AnswerStep {
            step_id,
            is_correct,
            answer_data,
        } => answer_step(&mut next, step_id, is_correct, answer_data),
        LessonAction::EnableContinue => next.is_continue_enabled = true,
        LessonAction::DisableContinue => next.is_continue_enabled = false,
        LessonAction::NextStep => next_step(&mut next),
        LessonAction::PrevStep => prev_step(&mut next),
        LessonAction::BuildReviewSteps => build_review_steps(&mut next),
        LessonAction::GoToSummary => go_to_summary(&mut next),
        LessonAction::GoToSummaryAfterReview => go_to_summary_after_review(&mut next),
        LessonAction::SetActionEnabled(enabled) => next.is_action_enabled = enabled,
        LessonAction::TriggerAction => next.action_trigger = next.action_trigger.wrapping_add(1),
    }
    next
}

fn enter_step(state: &mut LessonState, index: usize) {
    let Some(step) = state.live_steps.get(index) else {
        return;
    };
    let entry = step.entry_affordances();
    state.current_index = index;
    state.is_continue_enabled = entry.continue_enabled;
    state.is_action_enabled = entry.action_enabled;
}

fn answer_step(
    state: &mut LessonState,
    step_id: StepId,
    is_correct: bool,
    answer_data: Option<serde_json::Value>,
) {
    let Some(step) = state
        .live_steps
        .iter()
        .find(|step| step.id() == &step_id)
        .cloned()
    else {
        return;
    };

    state.answers.insert(
        step_id.clone(),
        AnswerResult::new(step_id.clone(), is_correct, answer_data.clone()),
    );

    if let Some(source) = step.review_source_step_id() {
        if is_correct {
            state.incorrect_step_ids.retain(|id| id != source);
            state.answers.insert(
                source.clone(),
                AnswerResult::new(source.clone(), true, answer_data),
            );
        }
        return;
    }

    if is_correct || !step.is_assessment() || !step.record_incorrect() {
        return;
    }

    // Once reviews exist only ids with a review step can be tracked,
    // otherwise the lesson could never be finished.
    let reviewable = !state.has_built_review_steps
        || state
            .live_steps
            .iter()
            .any(|live| live.review_source_step_id() == Some(&step_id));

    if state.missed_step_ids.insert(step_id.clone()) {
        state.total_mistakes = state.total_mistakes.saturating_add(1);
    }
    if reviewable && !state.incorrect_step_ids.contains(&step_id) {
        state.incorrect_step_ids.push(step_id);
    }
}

fn next_step(state: &mut LessonState) {
    let next = state.current_index + 1;
    if !state.has_built_review_steps && next == state.original_steps.len() {
        // Parked on the boundary; the controller decides what comes next.
        state.current_index = next;
        state.is_continue_enabled = false;
        state.is_action_enabled = false;
        state.action_trigger = 0;
        return;
    }
    enter_step(state, next);
}

fn prev_step(state: &mut LessonState) {
    if state.current_index == 0 {
        return;
    }
    state.current_index -= 1;
    state.is_continue_enabled = true;
    state.is_action_enabled = false;
}

fn build_review_steps(state: &mut LessonState) {
    if state.has_built_review_steps || state.incorrect_step_ids.is_empty() {
        return;
    }

    let prefix = state.settings.review_id_prefix();
    let label = state.settings.review_label();
    let reviews: Vec<LessonStep> = state
        .incorrect_step_ids
        .iter()
        .filter_map(|id| state.original_steps.iter().find(|step| step.id() == id))
        .map(|step| step.to_review(prefix, label))
        .collect();
    if reviews.is_empty() {
        return;
    }

    let mut live: Vec<LessonStep> = state
        .original_steps
        .iter()
        .filter(|step| !step.is_summary())
        .cloned()
        .collect();
    let first_review = live.len();
    live.extend(reviews);

    state.live_steps = live;
    state.has_built_review_steps = true;
    enter_step(state, first_review);
    state.is_continue_enabled = false;
}

fn go_to_summary(state: &mut LessonState) {
    if state.has_built_review_steps {
        return;
    }
    let Some(index) = state.summary_index() else {
        return;
    };
    state.current_index = index;
    state.is_continue_enabled = true;
    state.is_action_enabled = false;
}

fn go_to_summary_after_review(state: &mut LessonState) {
    if !state.reviews_resolved() || state.live_steps.iter().any(LessonStep::is_summary) {
        return;
    }
    let Some(summary) = state.summary_step().cloned() else {
        return;
    };
    state.live_steps.push(summary);
    state.current_index = state.live_steps.len() - 1;
    state.is_continue_enabled = true;
    state.is_action_enabled = false;
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
