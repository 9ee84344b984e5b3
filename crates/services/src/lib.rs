#![forbid(unsafe_code)]

pub mod error;
pub mod lesson;

pub use learn_core::Clock;

pub use error::LessonError;
pub use lesson::{
    FooterButton, FooterLabel, LessonCompletion, LessonController, LessonHost, LessonProgress,
    StepReport, footer_button,
};
