//! Lesson sequencing: state, actions, and the pure reducer that moves
//! between them.

mod action;
mod boundary;
mod reducer;
mod state;

pub use action::LessonAction;
pub use boundary::{boundary_action, is_at_originals_boundary, next_lands_on_summary};
pub use reducer::reduce;
pub use state::LessonState;
