mod controller;
mod footer;
mod host;
mod report;

// Public API of the lesson subsystem.
pub use crate::error::LessonError;
pub use controller::LessonController;
pub use footer::{FooterButton, FooterLabel, footer_button};
pub use host::{LessonCompletion, LessonHost, LessonProgress};
pub use report::StepReport;
