use serde::{Deserialize, Serialize};

/// What a step renderer tells the controller after the learner interacts.
///
/// Correctness is only committed when `is_completed` is true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_action: Option<bool>,
}

impl StepReport {
    /// Step finished without a graded answer (e.g. a revealed info card).
    #[must_use]
    pub fn completed() -> Self {
        Self {
            is_completed: true,
            ..Self::default()
        }
    }

    /// Step finished with a graded answer.
    #[must_use]
    pub fn answered(is_correct: bool) -> Self {
        Self {
            is_completed: true,
            is_correct: Some(is_correct),
            ..Self::default()
        }
    }

    /// The learner can (or can no longer) press the step's action.
    #[must_use]
    pub fn can_action(can_action: bool) -> Self {
        Self {
            can_action: Some(can_action),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_answer_data(mut self, answer_data: serde_json::Value) -> Self {
        self.answer_data = Some(answer_data);
        self
    }
}
