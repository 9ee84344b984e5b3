use serde::{Deserialize, Serialize};

use crate::model::ids::StepId;

//
// ─── STEP KIND ─────────────────────────────────────────────────────────────────
//

/// Tag of a lesson step.
///
/// The engine only looks at the tag to pick the initial affordances of a step
/// and to count the streak; everything else about a step's content lives in
/// its opaque payload and belongs to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Info,
    Mcq,
    MultiSelect,
    TrueFalse,
    Order,
    Match,
    FillBlanks,
    ImageChoice,
    Summary,
}

impl StepKind {
    #[must_use]
    pub fn is_summary(self) -> bool {
        matches!(self, StepKind::Summary)
    }

    #[must_use]
    pub fn is_info(self) -> bool {
        matches!(self, StepKind::Info)
    }

    /// Multiple-choice steps are the ones that feed the streak.
    #[must_use]
    pub fn is_multiple_choice(self) -> bool {
        matches!(self, StepKind::Mcq)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Info => "info",
            StepKind::Mcq => "mcq",
            StepKind::MultiSelect => "multi_select",
            StepKind::TrueFalse => "true_false",
            StepKind::Order => "order",
            StepKind::Match => "match",
            StepKind::FillBlanks => "fill_blanks",
            StepKind::ImageChoice => "image_choice",
            StepKind::Summary => "summary",
        }
    }
}

//
// ─── AFFORDANCES ───────────────────────────────────────────────────────────────
//

/// Initial state of the Continue and Action controls when a step is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Affordances {
    pub continue_enabled: bool,
    pub action_enabled: bool,
}

//
// ─── LESSON STEP ───────────────────────────────────────────────────────────────
//

fn default_record_incorrect() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Common envelope of a lesson step plus its renderer-owned payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonStep {
    id: StepId,
    #[serde(rename = "type")]
    kind: StepKind,
    #[serde(default)]
    is_assessment: bool,
    #[serde(
        default = "default_record_incorrect",
        skip_serializing_if = "is_true"
    )]
    record_incorrect: bool,
    #[serde(default)]
    full_screen: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    review_source_step_id: Option<StepId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    payload: serde_json::Value,
}

impl LessonStep {
    /// Creates a non-assessment step with no payload.
    #[must_use]
    pub fn new(id: impl Into<StepId>, kind: StepKind) -> Self {
        Self {
            id: id.into(),
            kind,
            is_assessment: false,
            record_incorrect: true,
            full_screen: false,
            review_source_step_id: None,
            label: None,
            payload: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn info(id: impl Into<StepId>) -> Self {
        Self::new(id, StepKind::Info)
    }

    #[must_use]
    pub fn summary(id: impl Into<StepId>) -> Self {
        Self::new(id, StepKind::Summary)
    }

    /// Creates an assessment step of the given kind.
    #[must_use]
    pub fn assessment(id: impl Into<StepId>, kind: StepKind) -> Self {
        Self::new(id, kind).with_assessment(true)
    }

    #[must_use]
    pub fn with_assessment(mut self, is_assessment: bool) -> Self {
        self.is_assessment = is_assessment;
        self
    }

    #[must_use]
    pub fn with_record_incorrect(mut self, record_incorrect: bool) -> Self {
        self.record_incorrect = record_incorrect;
        self
    }

    #[must_use]
    pub fn with_full_screen(mut self, full_screen: bool) -> Self {
        self.full_screen = full_screen;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Shallow clone of this step re-presented as a review item.
    #[must_use]
    pub fn to_review(&self, prefix: &str, label: &str) -> Self {
        Self {
            id: self.id.review_id(prefix),
            review_source_step_id: Some(self.id.clone()),
            label: Some(label.to_string()),
            ..self.clone()
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &StepId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    #[must_use]
    pub fn is_assessment(&self) -> bool {
        self.is_assessment
    }

    #[must_use]
    pub fn record_incorrect(&self) -> bool {
        self.record_incorrect
    }

    #[must_use]
    pub fn full_screen(&self) -> bool {
        self.full_screen
    }

    #[must_use]
    pub fn review_source_step_id(&self) -> Option<&StepId> {
        self.review_source_step_id.as_ref()
    }

    #[must_use]
    pub fn is_review(&self) -> bool {
        self.review_source_step_id.is_some()
    }

    #[must_use]
    pub fn is_summary(&self) -> bool {
        self.kind.is_summary()
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Affordances a step starts with when the cursor lands on it.
    ///
    /// Non-full-screen info and summary steps resolve on sight; a full-screen
    /// info step needs an explicit reveal before Continue.
    #[must_use]
    pub fn entry_affordances(&self) -> Affordances {
        match self.kind {
            StepKind::Info if self.full_screen => Affordances {
                continue_enabled: false,
                action_enabled: true,
            },
            StepKind::Info | StepKind::Summary => Affordances {
                continue_enabled: true,
                action_enabled: false,
            },
            _ => Affordances::default(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
