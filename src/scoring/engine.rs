//! Scoring engine: weighted factor combination and ranking.
//!
//! # Algorithm
//! 1. Normalize the submitted records (defaults, id assignment, date parsing).
//! 2. Build the dependency graph; flag cycle members and count blockers.
//! 3. Per task: `raw = Σ weight_k × factor_k + penalty`, where the penalty is
//!    [`CYCLE_PENALTY`] for flagged tasks.
//! 4. `score = round(clamp(raw, 0, 1), 4)`; a NaN raw score counts as 0.
//! 5. Sort by score descending; ties by days until due ascending, undated
//!    tasks last.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::factors::{Dependency, Effort, Importance, Urgency};
use super::{ScoringContext, ScoringFactor, Strategy, WeightKey, Weights};
use crate::dependency::DependencyGraph;
use crate::models::{AnalysisResult, ScoredTask, Suggestion, SuggestionResult, Task, TaskInput};

/// Flat score adjustment for tasks on a circular dependency chain.
pub const CYCLE_PENALTY: f64 = -0.2;

/// Number of tasks returned by [`suggest`].
pub const SUGGESTION_COUNT: usize = 3;

/// Caller-facing knobs for one analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Weighting preset.
    pub strategy: Strategy,
    /// Partial weight override (`urgency`, `importance`, `effort`,
    /// `dependency`); other keys are ignored.
    pub weights: HashMap<String, f64>,
    /// Reference date. `None` = current local date.
    pub today: Option<NaiveDate>,
}

impl AnalysisOptions {
    /// Options for the given preset, no overrides, today's date.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Overrides one weight.
    pub fn with_weight(mut self, key: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(key.into(), weight);
        self
    }

    /// Replaces the override map.
    pub fn with_weights(mut self, weights: HashMap<String, f64>) -> Self {
        self.weights = weights;
        self
    }

    /// Pins the reference date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Effective weights for these options.
    pub fn effective_weights(&self) -> Weights {
        self.strategy.weights(&self.weights)
    }

    /// The pinned date, or the current local date.
    pub fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Clone)]
struct WeightedFactor {
    factor: Arc<dyn ScoringFactor>,
    weight: f64,
}

/// Combines weighted factors into a ranked, explained priority list.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_triage::models::TaskInput;
/// use u_triage::scoring::{ScoringEngine, Strategy};
///
/// let engine = ScoringEngine::new(Strategy::DeadlineDriven.base_weights());
/// let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
/// let result = engine.rank(
///     &[
///         TaskInput::new("later").with_due_date("2025-05-20"),
///         TaskInput::new("sooner").with_due_date("2025-05-02"),
///     ],
///     today,
/// );
/// assert_eq!(result.results[0].title, "sooner");
/// ```
#[derive(Clone)]
pub struct ScoringEngine {
    factors: Vec<WeightedFactor>,
    weights: Weights,
    cycle_penalty: f64,
}

impl ScoringEngine {
    /// Creates an engine with the four built-in factors at the given weights.
    pub fn new(weights: Weights) -> Self {
        let engine = Self {
            factors: Vec::new(),
            weights,
            cycle_penalty: CYCLE_PENALTY,
        };
        engine
            .with_factor(Urgency)
            .with_factor(Importance)
            .with_factor(Effort)
            .with_factor(Dependency)
    }

    /// Creates an engine for a preset with a partial weight override.
    pub fn for_strategy(strategy: Strategy, overrides: &HashMap<String, f64>) -> Self {
        Self::new(strategy.weights(overrides))
    }

    /// Adds a factor, weighted by the engine's weight for its key.
    ///
    /// Factors are evaluated, and their reasons reported, in insertion order.
    pub fn with_factor<F: ScoringFactor + 'static>(mut self, factor: F) -> Self {
        let weight = self.weights.get(factor.key());
        self.factors.push(WeightedFactor {
            factor: Arc::new(factor),
            weight,
        });
        self
    }

    /// Sets the cycle penalty (default [`CYCLE_PENALTY`]).
    pub fn with_cycle_penalty(mut self, penalty: f64) -> Self {
        self.cycle_penalty = penalty;
        self
    }

    /// Effective weights.
    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Weighted sub-scores of a single task, one per factor.
    pub fn evaluate(&self, task: &Task, context: &ScoringContext) -> Vec<(WeightKey, f64)> {
        self.factors
            .iter()
            .map(|wf| {
                let score = wf.factor.evaluate(task, context);
                (wf.factor.key(), score.value * wf.weight)
            })
            .collect()
    }

    /// Scores one task within a prepared batch context.
    pub fn score_task(&self, task: &Task, context: &ScoringContext) -> ScoredTask {
        let mut reasons = Vec::with_capacity(self.factors.len() + 1);
        let mut raw_score = 0.0;

        for wf in &self.factors {
            let score = wf.factor.evaluate(task, context);
            raw_score += score.value * wf.weight;
            reasons.extend(score.reason);
        }

        let in_cycle = context.in_cycle(&task.id);
        if in_cycle {
            raw_score += self.cycle_penalty;
            reasons.push("circular dependency detected → penalized".to_string());
        }

        let score = if raw_score.is_nan() {
            0.0
        } else {
            round4(raw_score.clamp(0.0, 1.0))
        };

        ScoredTask {
            id: task.id.clone(),
            title: task.title.clone(),
            score,
            raw_score,
            explanation: reasons.join("; "),
            due_date: task.due_date,
            estimated_hours: task.estimated_hours,
            importance: task.importance,
            dependencies: task.dependencies.clone(),
            in_cycle,
            blocks: context.blocks(&task.id),
        }
    }

    /// Normalizes, scores and ranks a batch.
    pub fn rank(&self, inputs: &[TaskInput], today: NaiveDate) -> AnalysisResult {
        let tasks = normalize(inputs);
        let graph = DependencyGraph::new(&tasks);
        let cycles: Vec<String> = graph
            .cycle_members()
            .into_iter()
            .map(String::from)
            .collect();

        let context = ScoringContext {
            today,
            task_count: inputs.len(),
            blocked_counts: graph.blocked_counts(),
            cycle_members: cycles.iter().cloned().collect(),
        };

        let mut results: Vec<ScoredTask> = tasks
            .iter()
            .map(|t| self.score_task(t, &context))
            .collect();
        results.sort_by(|a, b| compare_ranked(a, b, today));

        debug!(
            submitted = inputs.len(),
            scored = results.len(),
            cycles = cycles.len(),
            %today,
            "ranked task batch"
        );

        AnalysisResult {
            results,
            cycles,
            weights_used: self.weights,
            today,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(Weights::default())
    }
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field(
                "factors",
                &self
                    .factors
                    .iter()
                    .map(|wf| format!("{}(w={})", wf.factor.key().name(), wf.weight))
                    .collect::<Vec<_>>(),
            )
            .field("cycle_penalty", &self.cycle_penalty)
            .finish()
    }
}

/// Scores and ranks a batch of tasks.
///
/// Pure apart from reading the clock when `options.today` is unset.
pub fn analyze(inputs: &[TaskInput], options: &AnalysisOptions) -> AnalysisResult {
    debug!(strategy = %options.strategy, "analyzing tasks");
    ScoringEngine::new(options.effective_weights()).rank(inputs, options.reference_date())
}

/// Returns the top picks of a batch.
///
/// An empty batch is replaced by [`example_batch`]. `strategy` is resolved
/// leniently (unknown names use `smart_balance`) and echoed back as given.
pub fn suggest(
    inputs: &[TaskInput],
    strategy: &str,
    weights: &HashMap<String, f64>,
    today: Option<NaiveDate>,
) -> SuggestionResult {
    let example;
    let inputs = if inputs.is_empty() {
        example = example_batch();
        &example[..]
    } else {
        inputs
    };

    let options = AnalysisOptions {
        strategy: Strategy::from_name_or_default(strategy),
        weights: weights.clone(),
        today,
    };
    let analysis = analyze(inputs, &options);

    SuggestionResult {
        today: analysis.today,
        strategy: strategy.to_string(),
        suggestions: analysis
            .top(SUGGESTION_COUNT)
            .iter()
            .map(Suggestion::from)
            .collect(),
        cycles: analysis.cycles,
    }
}

/// Sample batch used when a suggestion request carries no tasks.
pub fn example_batch() -> Vec<TaskInput> {
    vec![
        TaskInput::new("Fix login bug")
            .with_id("t1")
            .with_estimated_hours(2.0)
            .with_importance(8),
        TaskInput::new("Write README")
            .with_id("t2")
            .with_estimated_hours(1.0)
            .with_importance(6),
        TaskInput::new("Deploy to staging")
            .with_id("t3")
            .with_estimated_hours(3.0)
            .with_importance(9)
            .with_dependency("t1"),
    ]
}

/// Normalizes records; a repeated id replaces the earlier record in place.
fn normalize(inputs: &[TaskInput]) -> Vec<Task> {
    let mut tasks: Vec<Task> = Vec::with_capacity(inputs.len());
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(inputs.len());

    for (index, input) in inputs.iter().enumerate() {
        let task = Task::from_input(input, index);
        match slots.get(&task.id) {
            Some(&slot) => tasks[slot] = task,
            None => {
                slots.insert(task.id.clone(), tasks.len());
                tasks.push(task);
            }
        }
    }

    tasks
}

fn compare_ranked(a: &ScoredTask, b: &ScoredTask, today: NaiveDate) -> Ordering {
    let days = |t: &ScoredTask| {
        t.due_date
            .map(|d| (d - today).num_days())
            .unwrap_or(i64::MAX)
    };
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| days(a).cmp(&days(b)))
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
