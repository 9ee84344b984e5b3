use chrono::{DateTime, Utc};
use serde::Serialize;

use learn_core::model::AttemptId;

/// Snapshot published to the host after every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LessonProgress {
    /// 1-based position of the current step.
    pub current_step: usize,
    pub total_steps: usize,
    pub streak: u32,
    pub stars: u8,
    pub total_mistakes: u32,
    pub is_review: bool,
}

/// Final result handed to the host exactly once per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonCompletion {
    pub attempt_id: AttemptId,
    pub stars: u8,
    pub total_mistakes: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Callbacks the surrounding shell receives from a lesson session.
///
/// Persisting the completion is the host's job; the controller never
/// touches storage.
pub trait LessonHost {
    fn on_progress(&mut self, progress: &LessonProgress);

    fn on_complete(&mut self, completion: &LessonCompletion);

    fn on_exit(&mut self) {}
}
