use serde::{Deserialize, Serialize};

use crate::model::ids::StepId;

/// Latest result reported for a step.
///
/// One result is kept per step id; answering again overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    pub step_id: StepId,
    pub is_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_data: Option<serde_json::Value>,
}

impl AnswerResult {
    #[must_use]
    pub fn new(step_id: StepId, is_correct: bool, answer_data: Option<serde_json::Value>) -> Self {
        Self {
            step_id,
            is_correct,
            answer_data,
        }
    }
}
