//! Derived lesson scores. Both are recomputed from committed state on demand.

use std::collections::HashMap;

use crate::model::{AnswerResult, LessonStep, StepId};

pub const MAX_STARS: u8 = 3;

/// Mastery stars for a number of distinct first-time mistakes.
///
/// 0 mistakes earn 3 stars, 1 earns 2, 2 earns 1, anything more earns none.
#[must_use]
pub fn stars_for_mistakes(total_mistakes: u32) -> u8 {
    match total_mistakes {
        0 => MAX_STARS,
        1 => 2,
        2 => 1,
        _ => 0,
    }
}

/// Consecutive correct multiple-choice assessments from the start of the lesson.
///
/// Counting stops at the first step that was missed or not answered yet.
#[must_use]
pub fn streak(original_steps: &[LessonStep], answers: &HashMap<StepId, AnswerResult>) -> u32 {
    let mut streak = 0_u32;
    for step in original_steps
        .iter()
        .filter(|step| step.is_assessment() && step.kind().is_multiple_choice())
    {
        match answers.get(step.id()) {
            Some(result) if result.is_correct => streak = streak.saturating_add(1),
            _ => break,
        }
    }
    streak
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
