//! Scoring output models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scoring::Weights;

/// A task with its computed priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    pub id: String,
    pub title: String,
    /// Final score in [0, 1], rounded to 4 decimals.
    pub score: f64,
    /// Weighted sum plus cycle penalty, before clamping and rounding.
    pub raw_score: f64,
    /// Reason fragments joined with `"; "`.
    pub explanation: String,
    pub due_date: Option<NaiveDate>,
    pub estimated_hours: f64,
    pub importance: i64,
    pub dependencies: Vec<String>,
    /// Whether the task was flagged by cycle detection.
    pub in_cycle: bool,
    /// Number of dependency entries in the batch naming this task.
    pub blocks: usize,
}

/// Ranked output of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Scored tasks, highest priority first.
    pub results: Vec<ScoredTask>,
    /// Ids of cycle-participating tasks, in input order.
    pub cycles: Vec<String>,
    /// Effective weights after overrides.
    pub weights_used: Weights,
    /// Reference date used for urgency.
    pub today: NaiveDate,
}

impl AnalysisResult {
    /// The `n` highest-ranked tasks.
    pub fn top(&self, n: usize) -> &[ScoredTask] {
        &self.results[..n.min(self.results.len())]
    }

    /// Looks up a scored task by id.
    pub fn get(&self, id: &str) -> Option<&ScoredTask> {
        self.results.iter().find(|t| t.id == id)
    }
}

/// A recommended task with a one-line justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub score: f64,
    pub explanation: String,
    /// `"Score {score}: {explanation}"`; the score always carries a decimal
    /// point (`1.0`, not `1`).
    pub why: String,
}

impl From<&ScoredTask> for Suggestion {
    fn from(task: &ScoredTask) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            score: task.score,
            explanation: task.explanation.clone(),
            why: format!("Score {:?}: {}", task.score, task.explanation),
        }
    }
}

/// Reduced view of an analysis: the top picks only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub today: NaiveDate,
    /// Strategy name as requested (before any fallback).
    pub strategy: String,
    pub suggestions: Vec<Suggestion>,
    pub cycles: Vec<String>,
}
