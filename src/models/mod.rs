//! Triage domain models.
//!
//! Input records come in loosely typed ([`TaskInput`]), are normalized into
//! [`Task`], and leave as [`ScoredTask`] inside an [`AnalysisResult`] or,
//! reduced, as [`Suggestion`]s inside a [`SuggestionResult`].

mod result;
mod task;

pub use result::{AnalysisResult, ScoredTask, Suggestion, SuggestionResult};
pub use task::{Task, TaskInput, DEFAULT_ESTIMATED_HOURS, DEFAULT_IMPORTANCE, UNTITLED};
