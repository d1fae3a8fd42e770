//! Batch-level state passed to scoring factors.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

/// Per-batch facts that factors need beyond the task itself.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    /// Reference date for urgency.
    pub today: NaiveDate,
    /// Number of tasks submitted in the batch.
    pub task_count: usize,
    /// Dependency entries naming each task (task_id → count).
    pub blocked_counts: HashMap<String, usize>,
    /// Tasks flagged by cycle detection.
    pub cycle_members: HashSet<String>,
}

impl ScoringContext {
    /// Creates an empty context at the given date.
    pub fn at_date(today: NaiveDate) -> Self {
        Self {
            today,
            task_count: 0,
            blocked_counts: HashMap::new(),
            cycle_members: HashSet::new(),
        }
    }

    /// Sets the batch size.
    pub fn with_task_count(mut self, count: usize) -> Self {
        self.task_count = count;
        self
    }

    /// Sets how many tasks list `task_id` as a dependency.
    pub fn with_blocked_count(mut self, task_id: impl Into<String>, count: usize) -> Self {
        self.blocked_counts.insert(task_id.into(), count);
        self
    }

    /// Marks a task as cycle-participating.
    pub fn with_cycle_member(mut self, task_id: impl Into<String>) -> Self {
        self.cycle_members.insert(task_id.into());
        self
    }

    /// Dependency entries naming this task.
    pub fn blocks(&self, task_id: &str) -> usize {
        self.blocked_counts.get(task_id).copied().unwrap_or(0)
    }

    /// Whether the task was flagged by cycle detection.
    pub fn in_cycle(&self, task_id: &str) -> bool {
        self.cycle_members.contains(task_id)
    }
}
