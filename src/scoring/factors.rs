//! Built-in scoring factors.
//!
//! | Factor | Sub-score |
//! |--------|-----------|
//! | Urgency | Bucketed by days until due |
//! | Importance | `clamp(importance, 1, 10) / 10` |
//! | Effort | `clamp(1 / (0.15 * max(hours, 0.1) + 0.1), 0.05, 1)` |
//! | Dependency | `min(1, blocks / max(1, task_count))` |
//!
//! # Score Convention
//! All factors return higher sub-scores for tasks that should come first.

use super::{FactorScore, ScoringContext, ScoringFactor, WeightKey};
use crate::models::Task;

/// Urgency used when a task has no due date.
pub const NO_DUE_DATE_URGENCY: f64 = 0.4;

/// Deadline proximity.
///
/// | days until due | urgency |
/// |---|---|
/// | none | 0.40 |
/// | < 0 | 1.00 |
/// | 0 | 0.95 |
/// | 1-3 | 0.85 |
/// | 4-7 | 0.60 |
/// | > 7 | 0.20 |
#[derive(Debug, Clone, Copy)]
pub struct Urgency;

impl Urgency {
    /// Urgency sub-score for a day delta (`None` = no due date).
    pub fn bucket(days_until_due: Option<i64>) -> f64 {
        match days_until_due {
            None => NO_DUE_DATE_URGENCY,
            Some(d) if d < 0 => 1.0,
            Some(0) => 0.95,
            Some(1..=3) => 0.85,
            Some(4..=7) => 0.6,
            Some(_) => 0.2,
        }
    }
}

impl ScoringFactor for Urgency {
    fn key(&self) -> WeightKey {
        WeightKey::Urgency
    }

    fn evaluate(&self, task: &Task, context: &ScoringContext) -> FactorScore {
        let days = task.days_until_due(context.today);
        let value = Self::bucket(days);
        let reason = match days {
            None => "no due date → medium urgency".to_string(),
            Some(d) if d < 0 => format!("past due by {} day(s) → very urgent", -d),
            Some(0) => "due today → very urgent".to_string(),
            Some(d @ 1..=3) => format!("due in {d} day(s) → high urgency"),
            Some(d @ 4..=7) => format!("due in {d} day(s) → medium-high urgency"),
            Some(d) => format!("due in {d} day(s) → low urgency"),
        };
        FactorScore::explained(value, reason)
    }

    fn description(&self) -> &'static str {
        "Deadline proximity"
    }
}

/// Caller-assigned importance, normalized from the 1-10 scale.
#[derive(Debug, Clone, Copy)]
pub struct Importance;

impl ScoringFactor for Importance {
    fn key(&self) -> WeightKey {
        WeightKey::Importance
    }

    fn evaluate(&self, task: &Task, _context: &ScoringContext) -> FactorScore {
        let value = task.importance.clamp(1, 10) as f64 / 10.0;
        FactorScore::explained(value, format!("importance {}/10", task.importance))
    }

    fn description(&self) -> &'static str {
        "Task importance"
    }
}

/// Quick-win preference: shorter estimates score higher.
///
/// Estimates below 0.1h are treated as 0.1h. Anything up to 6h scores the
/// full 1.0; longer tasks decay toward the 0.05 floor.
#[derive(Debug, Clone, Copy)]
pub struct Effort;

impl Effort {
    /// Effort sub-score for an estimate in hours.
    pub fn curve(estimated_hours: f64) -> f64 {
        let hours = estimated_hours.max(0.1);
        (1.0 / (0.15 * hours + 0.1)).clamp(0.05, 1.0)
    }
}

impl ScoringFactor for Effort {
    fn key(&self) -> WeightKey {
        WeightKey::Effort
    }

    fn evaluate(&self, task: &Task, _context: &ScoringContext) -> FactorScore {
        let hours = task.estimated_hours.max(0.1);
        let value = Self::curve(hours);
        FactorScore::explained(value, format!("estimated {hours}h → effort score {value:.2}"))
    }

    fn description(&self) -> &'static str {
        "Estimated effort"
    }
}

/// Blocking weight: tasks that others depend on score higher.
#[derive(Debug, Clone, Copy)]
pub struct Dependency;

impl ScoringFactor for Dependency {
    fn key(&self) -> WeightKey {
        WeightKey::Dependency
    }

    fn evaluate(&self, task: &Task, context: &ScoringContext) -> FactorScore {
        let blocks = context.blocks(&task.id);
        let value = (blocks as f64 / context.task_count.max(1) as f64).min(1.0);
        if value > 0.0 {
            FactorScore::explained(
                value,
                format!("blocks {blocks} other task(s) → dependency boost"),
            )
        } else {
            FactorScore::silent(value)
        }
    }

    fn description(&self) -> &'static str {
        "Tasks blocked by this one"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn due_in(days: i64) -> Task {
        let date = if days >= 0 {
            today() + Days::new(days as u64)
        } else {
            today() - Days::new((-days) as u64)
        };
        Task::new("t").with_due_date(date)
    }

    #[test]
    fn test_urgency_buckets() {
        let ctx = ScoringContext::at_date(today());
        let cases = [
            (-30, 1.0),
            (-1, 1.0),
            (0, 0.95),
            (1, 0.85),
            (3, 0.85),
            (4, 0.6),
            (7, 0.6),
            (8, 0.2),
            (365, 0.2),
        ];
        for (days, expected) in cases {
            assert_eq!(Urgency.evaluate(&due_in(days), &ctx).value, expected, "days={days}");
        }
        assert_eq!(Urgency.evaluate(&Task::new("t"), &ctx).value, 0.4);
    }

    #[test]
    fn test_overdue_beats_every_future_bucket() {
        let overdue = Urgency::bucket(Some(-1));
        for days in [None, Some(0), Some(2), Some(5), Some(30)] {
            assert!(overdue > Urgency::bucket(days));
        }
    }

    #[test]
    fn test_urgency_reasons() {
        let ctx = ScoringContext::at_date(today());
        let reason = |t: &Task| Urgency.evaluate(t, &ctx).reason.unwrap();
        assert_eq!(reason(&due_in(-2)), "past due by 2 day(s) → very urgent");
        assert_eq!(reason(&due_in(0)), "due today → very urgent");
        assert_eq!(reason(&due_in(5)), "due in 5 day(s) → medium-high urgency");
        assert_eq!(reason(&Task::new("t")), "no due date → medium urgency");
    }

    #[test]
    fn test_importance_clamped() {
        let ctx = ScoringContext::at_date(today());
        let score = |i| Importance.evaluate(&Task::new("t").with_importance(i), &ctx);
        assert_eq!(score(7).value, 0.7);
        assert_eq!(score(0).value, 0.1);
        assert_eq!(score(-5).value, 0.1);
        assert_eq!(score(42).value, 1.0);
        assert_eq!(score(42).reason.as_deref(), Some("importance 42/10"));
    }

    #[test]
    fn test_effort_curve() {
        assert_eq!(Effort::curve(0.5), 1.0);
        assert_eq!(Effort::curve(0.0), 1.0);
        assert_eq!(Effort::curve(5.0), 1.0);
        assert!((Effort::curve(10.0) - 0.625).abs() < 1e-12);
        assert_eq!(Effort::curve(1000.0), 0.05);
    }

    #[test]
    fn test_effort_monotonic() {
        let mut prev = f64::INFINITY;
        for tenth in 1..500 {
            let v = Effort::curve(tenth as f64 / 10.0);
            assert!(v <= prev);
            assert!((0.05..=1.0).contains(&v));
            prev = v;
        }
    }

    #[test]
    fn test_effort_reason() {
        let ctx = ScoringContext::at_date(today());
        let score = Effort.evaluate(&Task::new("t").with_estimated_hours(20.0), &ctx);
        assert_eq!(score.reason.as_deref(), Some("estimated 20h → effort score 0.32"));
    }

    #[test]
    fn test_dependency_ratio() {
        let ctx = ScoringContext::at_date(today())
            .with_task_count(4)
            .with_blocked_count("hub", 2);
        let hub = Dependency.evaluate(&Task::new("hub"), &ctx);
        assert_eq!(hub.value, 0.5);
        assert_eq!(
            hub.reason.as_deref(),
            Some("blocks 2 other task(s) → dependency boost")
        );

        let leaf = Dependency.evaluate(&Task::new("leaf"), &ctx);
        assert_eq!(leaf.value, 0.0);
        assert!(leaf.reason.is_none());
    }

    #[test]
    fn test_factor_keys_and_descriptions() {
        let factors: [&dyn ScoringFactor; 4] = [&Urgency, &Importance, &Effort, &Dependency];
        let keys: Vec<WeightKey> = factors.iter().map(|f| f.key()).collect();
        assert_eq!(keys, WeightKey::ALL.to_vec());
        assert_eq!(Urgency.description(), "Deadline proximity");
        assert_eq!(Dependency.description(), "Tasks blocked by this one");
        assert!(factors.iter().all(|f| !f.description().is_empty()));
    }

    #[test]
    fn test_dependency_capped() {
        let ctx = ScoringContext::at_date(today())
            .with_task_count(2)
            .with_blocked_count("hub", 5);
        assert_eq!(Dependency.evaluate(&Task::new("hub"), &ctx).value, 1.0);
    }
}
