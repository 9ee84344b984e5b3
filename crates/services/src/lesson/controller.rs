use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info, warn};

use learn_core::Clock;
use learn_core::lesson::{
    LessonAction, LessonState, boundary_action, is_at_originals_boundary, next_lands_on_summary,
    reduce,
};
use learn_core::model::{AttemptId, LessonSettings, StepCatalog};

use super::footer::{FooterButton, footer_button};
use super::host::{LessonCompletion, LessonHost, LessonProgress};
use super::report::StepReport;
use crate::error::LessonError;

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives one learner through one lesson.
///
/// Owns the lesson state for the whole attempt, turns renderer reports and
/// button presses into reducer actions, and decides what happens when the
/// learner runs past the original steps.
pub struct LessonController<H: LessonHost> {
    host: H,
    clock: Clock,
    catalog: StepCatalog,
    settings: LessonSettings,
    state: LessonState,
    attempt_id: AttemptId,
    started_at: DateTime<Utc>,
    completed: bool,
}

impl<H: LessonHost> LessonController<H> {
    /// Start a new attempt over `catalog` and publish the initial progress.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Catalog` if a step id starts with the review prefix.
    pub fn new(
        catalog: StepCatalog,
        settings: LessonSettings,
        clock: Clock,
        host: H,
    ) -> Result<Self, LessonError> {
        catalog.ensure_prefix_free(settings.review_id_prefix())?;

        let state = LessonState::new(catalog.clone(), settings.clone());
        let mut controller = Self {
            host,
            clock,
            catalog,
            settings,
            state,
            attempt_id: AttemptId::generate(),
            started_at: clock.now(),
            completed: false,
        };
        info!(
            attempt_id = %controller.attempt_id,
            steps = controller.catalog.len(),
            assessments = controller.catalog.assessment_count(),
            "lesson started"
        );
        controller.publish_progress();
        Ok(controller)
    }

    /// Throw away the current attempt and start over from the first step.
    pub fn restart(&mut self) {
        self.attempt_id = AttemptId::generate();
        self.started_at = self.clock.now();
        self.completed = false;
        self.state = reduce(
            &self.state,
            LessonAction::Init {
                catalog: self.catalog.clone(),
                settings: self.settings.clone(),
            },
        );
        info!(attempt_id = %self.attempt_id, "lesson restarted");
        self.publish_progress();
    }

    #[must_use]
    pub fn state(&self) -> &LessonState {
        &self.state
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.completed && self.state.current_index() > 0
    }

    #[must_use]
    pub fn progress(&self) -> LessonProgress {
        let total_steps = self.state.live_steps().len();
        LessonProgress {
            current_step: (self.state.current_index() + 1).min(total_steps),
            total_steps,
            streak: self.state.streak(),
            stars: self.state.stars(),
            total_mistakes: self.state.total_mistakes(),
            is_review: self
                .state
                .current_step()
                .is_some_and(|step| step.is_review()),
        }
    }

    /// Footer button for the current step, if the cursor is on one.
    #[must_use]
    pub fn footer(&self) -> Option<FooterButton> {
        self.state.current_step().map(|step| {
            footer_button(
                step,
                self.state.is_last_step(),
                self.state.is_continue_enabled(),
                self.state.is_action_enabled(),
            )
        })
    }

    /// Apply a renderer report for the current step.
    pub fn report(&mut self, report: StepReport) {
        if self.completed {
            debug!("report after completion ignored");
            return;
        }
        let Some(step) = self.state.current_step().cloned() else {
            return;
        };

        let mut actions = Vec::with_capacity(3);
        if let Some(can_action) = report.can_action {
            actions.push(LessonAction::SetActionEnabled(can_action));
        }

        if report.is_completed {
            if let Some(is_correct) = report.is_correct {
                actions.push(LessonAction::AnswerStep {
                    step_id: step.id().clone(),
                    is_correct,
                    answer_data: report.answer_data,
                });
            }
            // A review only clears once it is answered correctly.
            let resolved = !step.is_review() || report.is_correct == Some(true);
            actions.push(if resolved {
                LessonAction::EnableContinue
            } else {
                LessonAction::DisableContinue
            });
        } else {
            if report.is_correct.is_some() {
                debug!(step_id = %step.id(), "correctness without completion ignored");
            }
            actions.push(LessonAction::DisableContinue);
        }

        self.dispatch(actions);
    }

    /// Primary footer button.
    pub fn press_continue(&mut self) {
        if self.completed {
            return;
        }
        let Some((is_summary, is_review)) = self
            .state
            .current_step()
            .map(|step| (step.is_summary(), step.is_review()))
        else {
            return;
        };

        if is_summary {
            self.complete();
            return;
        }

        if !self.state.is_continue_enabled() {
            if self.state.is_action_enabled() {
                // One press, one side effect; the renderer re-arms via `can_action`.
                self.dispatch([
                    LessonAction::TriggerAction,
                    LessonAction::SetActionEnabled(false),
                ]);
            }
            return;
        }

        if is_review && self.state.is_last_step() {
            if self.state.reviews_resolved() {
                info!(attempt_id = %self.attempt_id, "reviews resolved");
                self.dispatch([LessonAction::GoToSummaryAfterReview]);
            } else {
                warn!(
                    attempt_id = %self.attempt_id,
                    unresolved = self.state.incorrect_step_ids().len(),
                    "last review reached with unresolved mistakes"
                );
            }
            return;
        }

        if next_lands_on_summary(&self.state) {
            if self.decide_boundary() {
                self.publish_progress();
            }
            return;
        }

        self.dispatch([LessonAction::NextStep]);
    }

    /// Back button; a no-op on the first step.
    pub fn press_back(&mut self) {
        if !self.can_go_back() {
            return;
        }
        self.dispatch([LessonAction::PrevStep]);
    }

    /// Pass the exit request on to the host.
    pub fn exit(&mut self) {
        info!(
            attempt_id = %self.attempt_id,
            step = self.state.current_index(),
            "lesson exited"
        );
        self.host.on_exit();
    }

    fn dispatch(&mut self, actions: impl IntoIterator<Item = LessonAction>) {
        let mut changed = false;
        for action in actions {
            changed |= self.apply(action);
        }
        if is_at_originals_boundary(&self.state) {
            changed |= self.decide_boundary();
        }
        if changed {
            self.publish_progress();
        }
    }

    fn apply(&mut self, action: LessonAction) -> bool {
        debug!(action = action.name(), index = self.state.current_index(), "dispatch");
        let next = reduce(&self.state, action);
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }

    /// Review or summary, taken in exactly one place.
    fn decide_boundary(&mut self) -> bool {
        let Some(action) = boundary_action(&self.state) else {
            return false;
        };
        info!(
            attempt_id = %self.attempt_id,
            decision = action.name(),
            mistakes = self.state.total_mistakes(),
            unresolved = self.state.incorrect_step_ids().len(),
            "original steps finished"
        );
        self.apply(action)
    }

    fn complete(&mut self) {
        self.completed = true;
        let completion = LessonCompletion {
            attempt_id: self.attempt_id,
            stars: self.state.stars(),
            total_mistakes: self.state.total_mistakes(),
            started_at: self.started_at,
            completed_at: self.clock.now(),
        };
        info!(
            attempt_id = %completion.attempt_id,
            stars = completion.stars,
            mistakes = completion.total_mistakes,
            "lesson completed"
        );
        self.host.on_complete(&completion);
    }

    fn publish_progress(&mut self) {
        let progress = self.progress();
        self.host.on_progress(&progress);
    }
}

impl<H: LessonHost> fmt::Debug for LessonController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LessonController")
            .field("attempt_id", &self.attempt_id)
            .field("steps_len", &self.state.live_steps().len())
            .field("current", &self.state.current_index())
            .field("total_mistakes", &self.state.total_mistakes())
            .field("started_at", &self.started_at)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::model::{LessonStep, StepId, StepKind};
    use learn_core::time::fixed_clock;

    #[derive(Default)]
    struct Recorder {
        progress: Vec<LessonProgress>,
        completions: Vec<LessonCompletion>,
        exits: usize,
    }

    impl LessonHost for Recorder {
        fn on_progress(&mut self, progress: &LessonProgress) {
            self.progress.push(*progress);
        }

        fn on_complete(&mut self, completion: &LessonCompletion) {
            self.completions.push(completion.clone());
        }

        fn on_exit(&mut self) {
            self.exits += 1;
        }
    }

    fn controller(steps: Vec<LessonStep>) -> LessonController<Recorder> {
        LessonController::new(
            StepCatalog::new(steps).unwrap(),
            LessonSettings::default(),
            fixed_clock(),
            Recorder::default(),
        )
        .unwrap()
    }

    #[test]
    fn construction_publishes_initial_progress() {
        let c = controller(vec![LessonStep::info("intro"), LessonStep::summary("end")]);
        let first = c.host().progress[0];
        assert_eq!(first.current_step, 1);
        assert_eq!(first.total_steps, 2);
        assert_eq!(first.stars, 3);
    }

    #[test]
    fn reserved_prefix_is_rejected() {
        let catalog = StepCatalog::new(vec![
            LessonStep::assessment("review-q1", StepKind::Mcq),
            LessonStep::summary("end"),
        ])
        .unwrap();
        let err = LessonController::new(
            catalog,
            LessonSettings::default(),
            fixed_clock(),
            Recorder::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LessonError::Catalog(_)));
    }

    #[test]
    fn correctness_without_completion_is_ignored() {
        let mut c = controller(vec![
            LessonStep::assessment("q1", StepKind::Mcq),
            LessonStep::summary("end"),
        ]);
        c.report(StepReport {
            is_completed: false,
            is_correct: Some(false),
            ..StepReport::default()
        });
        assert_eq!(c.state().total_mistakes(), 0);
        assert!(c.state().answer(&StepId::new("q1")).is_none());
        assert!(!c.state().is_continue_enabled());
    }

    #[test]
    fn wrong_original_answer_still_allows_continue() {
        let mut c = controller(vec![
            LessonStep::assessment("q1", StepKind::Mcq),
            LessonStep::info("tip"),
            LessonStep::summary("end"),
        ]);
        c.report(StepReport::answered(false));
        assert!(c.state().is_continue_enabled());
        c.press_continue();
        assert_eq!(c.state().current_index(), 1);
    }

    #[test]
    fn back_is_disabled_on_first_step() {
        let mut c = controller(vec![LessonStep::info("intro"), LessonStep::summary("end")]);
        assert!(!c.can_go_back());
        let before = c.state().clone();
        c.press_back();
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn exit_is_passed_through() {
        let mut c = controller(vec![LessonStep::info("intro"), LessonStep::summary("end")]);
        c.exit();
        assert_eq!(c.host().exits, 1);
        assert!(c.host().completions.is_empty());
    }

    #[test]
    fn completion_fires_once() {
        let mut c = controller(vec![LessonStep::info("intro"), LessonStep::summary("end")]);
        c.press_continue();
        c.press_continue();
        c.press_continue();
        assert_eq!(c.host().completions.len(), 1);
        assert!(c.is_complete());
    }

    #[test]
    fn restart_begins_a_new_attempt() {
        let mut c = controller(vec![
            LessonStep::assessment("q1", StepKind::Mcq),
            LessonStep::summary("end"),
        ]);
        let first_attempt = c.attempt_id();
        c.report(StepReport::answered(false));
        c.restart();

        assert_ne!(c.attempt_id(), first_attempt);
        assert_eq!(c.state().total_mistakes(), 0);
        assert_eq!(c.state().current_index(), 0);
        assert!(!c.is_complete());
    }

    #[test]
    fn review_switched_off_goes_straight_to_summary() {
        let catalog = StepCatalog::new(vec![
            LessonStep::assessment("q1", StepKind::Mcq),
            LessonStep::summary("end"),
        ])
        .unwrap();
        let settings = LessonSettings::default().with_review_missed_steps(false);
        let mut c =
            LessonController::new(catalog, settings, fixed_clock(), Recorder::default()).unwrap();

        c.report(StepReport::answered(false));
        c.press_continue();
        assert!(c.state().is_on_summary());
        assert!(!c.state().has_built_review_steps());

        c.press_continue();
        assert_eq!(c.host().completions[0].stars, 2);
    }
}
