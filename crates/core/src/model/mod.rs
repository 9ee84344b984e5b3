mod answer;
mod catalog;
mod ids;
mod settings;
mod step;

pub use answer::AnswerResult;
pub use catalog::{CatalogError, StepCatalog};
pub use ids::{AttemptId, StepId};
pub use settings::{
    DEFAULT_REVIEW_LABEL, DEFAULT_REVIEW_PREFIX, LessonSettings, LessonSettingsError,
};
pub use step::{Affordances, LessonStep, StepKind};
