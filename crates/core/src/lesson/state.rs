use std::collections::{HashMap, HashSet};

use crate::model::{AnswerResult, LessonSettings, LessonStep, StepCatalog, StepId};
use crate::scoring;

/// Everything the engine knows about one attempt at a lesson.
///
/// Built once per attempt by [`LessonState::new`] and only changed through
/// [`crate::lesson::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub struct LessonState {
    pub(crate) settings: LessonSettings,
    pub(crate) original_steps: Vec<LessonStep>,
    pub(crate) live_steps: Vec<LessonStep>,
    pub(crate) current_index: usize,
    pub(crate) answers: HashMap<StepId, AnswerResult>,
    /// Unresolved original ids, in the order they were first missed.
    pub(crate) incorrect_step_ids: Vec<StepId>,
    /// Every original id that has ever counted as a mistake.
    pub(crate) missed_step_ids: HashSet<StepId>,
    pub(crate) total_mistakes: u32,
    pub(crate) has_built_review_steps: bool,
    pub(crate) is_continue_enabled: bool,
    pub(crate) is_action_enabled: bool,
    pub(crate) action_trigger: u64,
}

impl LessonState {
    /// Fresh state positioned on the first step of the catalog.
    #[must_use]
    pub fn new(catalog: StepCatalog, settings: LessonSettings) -> Self {
        let original_steps = catalog.into_steps();
        let entry = original_steps
            .first()
            .map(LessonStep::entry_affordances)
            .unwrap_or_default();

        Self {
            settings,
            live_steps: original_steps.clone(),
            original_steps,
            current_index: 0,
            answers: HashMap::new(),
            incorrect_step_ids: Vec::new(),
            missed_step_ids: HashSet::new(),
            total_mistakes: 0,
            has_built_review_steps: false,
            is_continue_enabled: entry.continue_enabled,
            is_action_enabled: entry.action_enabled,
            action_trigger: 0,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &LessonSettings {
        &self.settings
    }

    #[must_use]
    pub fn original_steps(&self) -> &[LessonStep] {
        &self.original_steps
    }

    #[must_use]
    pub fn live_steps(&self) -> &[LessonStep] {
        &self.live_steps
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Step under the cursor, or `None` while parked on the originals boundary.
    #[must_use]
    pub fn current_step(&self) -> Option<&LessonStep> {
        self.live_steps.get(self.current_index)
    }

    #[must_use]
    pub fn answer(&self, step_id: &StepId) -> Option<&AnswerResult> {
        self.answers.get(step_id)
    }

    #[must_use]
    pub fn answers(&self) -> &HashMap<StepId, AnswerResult> {
        &self.answers
    }

    #[must_use]
    pub fn incorrect_step_ids(&self) -> &[StepId] {
        &self.incorrect_step_ids
    }

    #[must_use]
    pub fn total_mistakes(&self) -> u32 {
        self.total_mistakes
    }

    #[must_use]
    pub fn has_built_review_steps(&self) -> bool {
        self.has_built_review_steps
    }

    #[must_use]
    pub fn is_continue_enabled(&self) -> bool {
        self.is_continue_enabled
    }

    #[must_use]
    pub fn is_action_enabled(&self) -> bool {
        self.is_action_enabled
    }

    #[must_use]
    pub fn action_trigger(&self) -> u64 {
        self.action_trigger
    }

    /// Position of the summary among the original steps.
    #[must_use]
    pub fn summary_index(&self) -> Option<usize> {
        self.original_steps.iter().position(LessonStep::is_summary)
    }

    #[must_use]
    pub fn summary_step(&self) -> Option<&LessonStep> {
        self.original_steps.iter().find(|step| step.is_summary())
    }

    #[must_use]
    pub fn original_step(&self, step_id: &StepId) -> Option<&LessonStep> {
        self.original_steps.iter().find(|step| step.id() == step_id)
    }

    #[must_use]
    pub fn review_steps(&self) -> impl Iterator<Item = &LessonStep> {
        self.live_steps.iter().filter(|step| step.is_review())
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.current_index + 1 == self.live_steps.len()
    }

    #[must_use]
    pub fn is_on_summary(&self) -> bool {
        self.current_step().is_some_and(LessonStep::is_summary)
    }

    /// True while every synthesized review has been answered correctly.
    #[must_use]
    pub fn reviews_resolved(&self) -> bool {
        self.has_built_review_steps && self.incorrect_step_ids.is_empty()
    }

    #[must_use]
    pub fn stars(&self) -> u8 {
        scoring::stars_for_mistakes(self.total_mistakes)
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        scoring::streak(&self.original_steps, &self.answers)
    }
}
