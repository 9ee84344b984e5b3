//! Shared error types for the services crate.

use thiserror::Error;

use learn_core::model::{CatalogError, LessonSettingsError};

/// Errors emitted while starting a lesson session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Settings(#[from] LessonSettingsError),
}
