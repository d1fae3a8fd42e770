//! Dependency graph analysis.
//!
//! Builds an index-based adjacency list over one batch of tasks and answers
//! the two questions the scoring engine needs:
//! - which tasks sit on a circular dependency chain
//! - how many dependency entries name each task ("blocks")
//!
//! Dependency ids that do not resolve to a task in the batch are dropped
//! from the graph. Duplicate task ids resolve to the last record that used
//! them.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (DFS edge classification)

use std::collections::HashMap;

use crate::models::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    Visiting,
    Done,
}

/// Directed graph with an edge `task → dependency` per resolvable dependency.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    tasks: &'a [Task],
    index: HashMap<&'a str, usize>,
    edges: Vec<Vec<usize>>,
}

impl<'a> DependencyGraph<'a> {
    /// Builds the graph. `tasks` is expected to hold unique ids.
    pub fn new(tasks: &'a [Task]) -> Self {
        let index: HashMap<&str, usize> = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        let edges = tasks
            .iter()
            .map(|t| {
                t.dependencies
                    .iter()
                    .filter_map(|dep| index.get(dep.as_str()).copied())
                    .collect()
            })
            .collect();

        Self {
            tasks,
            index,
            edges,
        }
    }

    /// Number of tasks (nodes).
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Resolved dependency edges of a task.
    pub fn dependencies_of(&self, id: &str) -> Vec<&'a str> {
        self.index
            .get(id)
            .map(|&i| {
                self.edges[i]
                    .iter()
                    .map(|&j| self.tasks[j].id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Counts, per task id, how many dependency entries in the batch name it.
    ///
    /// Every entry counts, including repeats and self-references. Entries
    /// naming unknown ids are not reported.
    pub fn blocked_counts(&self) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for task in self.tasks {
            for dep in &task.dependencies {
                if self.index.contains_key(dep.as_str()) {
                    *counts.entry(dep.clone()).or_default() += 1;
                }
            }
        }
        counts
    }

    /// Flags tasks involved in circular dependencies.
    ///
    /// Returns one flag per task, aligned with the input slice.
    ///
    /// # Algorithm
    /// Depth-first traversal with an explicit stack, rooted at every node in
    /// input order. Nodes move `Unvisited → Visiting → Done`. When an edge
    /// reaches a `Visiting` node, every node on the current stack is flagged
    /// and the traversal from this root ends; the flagged nodes stay
    /// `Visiting`, so any later traversal that reaches them flags its own
    /// stack as well. `Done` nodes are never re-entered.
    ///
    /// This over-reports membership: a task that merely leads into a cycle
    /// is flagged along with the cycle itself.
    pub fn cycle_flags(&self) -> Vec<bool> {
        let n = self.tasks.len();
        let mut state = vec![VisitState::Unvisited; n];
        let mut flagged = vec![false; n];
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..n {
            if state[root] != VisitState::Unvisited {
                continue;
            }
            state[root] = VisitState::Visiting;
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, cursor) = *frame;
                let Some(&next) = self.edges[node].get(cursor) else {
                    state[node] = VisitState::Done;
                    stack.pop();
                    continue;
                };
                frame.1 += 1;

                match state[next] {
                    VisitState::Visiting => {
                        // Back edge: flag the whole path, leave it Visiting.
                        for (on_path, _) in stack.drain(..) {
                            flagged[on_path] = true;
                        }
                    }
                    VisitState::Done => {}
                    VisitState::Unvisited => {
                        state[next] = VisitState::Visiting;
                        stack.push((next, 0));
                    }
                }
            }
        }

        flagged
    }

    /// Ids of tasks flagged by [`cycle_flags`](Self::cycle_flags), in input order.
    pub fn cycle_members(&self) -> Vec<&'a str> {
        self.cycle_flags()
            .into_iter()
            .zip(self.tasks)
            .filter_map(|(flag, t)| flag.then_some(t.id.as_str()))
            .collect()
    }
}
