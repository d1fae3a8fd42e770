//! Priority scoring: factors, strategies and the scoring engine.
//!
//! Each task is rated by four factors, each producing a sub-score in [0, 1]
//! and a short reason. A [`Strategy`] supplies the weight of every factor;
//! the engine combines the weighted sub-scores, penalizes tasks on circular
//! dependency chains, and ranks the batch.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use u_triage::models::TaskInput;
//! use u_triage::scoring::{analyze, AnalysisOptions, Strategy};
//!
//! let tasks = vec![
//!     TaskInput::new("Fix login bug").with_id("t1").with_importance(8),
//!     TaskInput::new("Write README").with_id("t2").with_estimated_hours(0.5),
//! ];
//! let options = AnalysisOptions::new(Strategy::HighImpact)
//!     .with_today(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
//!
//! let result = analyze(&tasks, &options);
//! assert_eq!(result.results[0].id, "t1");
//! ```
//!
//! # Score Convention
//! **Higher score = higher priority.** Scores are clamped to [0, 1].

mod context;
mod engine;
pub mod factors;
mod strategy;

pub use context::ScoringContext;
pub use engine::{
    analyze, example_batch, suggest, AnalysisOptions, ScoringEngine, CYCLE_PENALTY,
    SUGGESTION_COUNT,
};
pub use strategy::{Strategy, UnknownStrategy, WeightKey, Weights};

use crate::models::Task;
use std::fmt::Debug;

/// Output of a single factor: a sub-score and, if the factor contributed,
/// a human-readable reason.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorScore {
    /// Sub-score in [0, 1].
    pub value: f64,
    /// Explanation fragment. `None` = nothing worth reporting.
    pub reason: Option<String>,
}

impl FactorScore {
    /// A sub-score with an explanation fragment.
    pub fn explained(value: f64, reason: impl Into<String>) -> Self {
        Self {
            value,
            reason: Some(reason.into()),
        }
    }

    /// A sub-score without explanation.
    pub fn silent(value: f64) -> Self {
        Self {
            value,
            reason: None,
        }
    }
}

/// A scoring factor that rates one aspect of a task.
///
/// Implementations must be pure: the same task and context always produce
/// the same score.
pub trait ScoringFactor: Send + Sync + Debug {
    /// Weight slot this factor is weighted by.
    fn key(&self) -> WeightKey;

    /// Rates the task in the given context.
    fn evaluate(&self, task: &Task, context: &ScoringContext) -> FactorScore;

    /// Factor description.
    fn description(&self) -> &'static str {
        self.key().name()
    }
}
