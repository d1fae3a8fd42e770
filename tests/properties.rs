use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use u_triage::models::TaskInput;
use u_triage::scoring::{analyze, AnalysisOptions, Strategy as Preset};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn strategy() -> impl Strategy<Value = Preset> {
    prop::sample::select(Preset::ALL.to_vec())
}

fn task_batch() -> impl Strategy<Value = Vec<TaskInput>> {
    prop::collection::vec(
        (
            prop::option::of(-20i64..40),
            prop::option::of(0.05f64..200.0),
            -3i64..15,
            prop::collection::vec(0usize..12, 0..4),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (due, hours, importance, deps))| {
                let mut input = TaskInput::new(format!("task {i}"))
                    .with_id(format!("t{i}"))
                    .with_importance(importance);
                if let Some(offset) = due {
                    let date = if offset >= 0 {
                        today() + Days::new(offset as u64)
                    } else {
                        today() - Days::new((-offset) as u64)
                    };
                    input = input.with_due_date(date.format("%Y-%m-%d").to_string());
                }
                if let Some(h) = hours {
                    input = input.with_estimated_hours(h);
                }
                deps.into_iter()
                    .fold(input, |acc, d| acc.with_dependency(format!("t{d}")))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn scores_stay_in_unit_interval(tasks in task_batch(), st in strategy()) {
        let result = analyze(&tasks, &AnalysisOptions::new(st).with_today(today()));
        prop_assert_eq!(result.results.len(), tasks.len());
        for scored in &result.results {
            prop_assert!((0.0..=1.0).contains(&scored.score), "score {}", scored.score);
        }
    }

    #[test]
    fn results_sorted_by_score(tasks in task_batch(), st in strategy()) {
        let result = analyze(&tasks, &AnalysisOptions::new(st).with_today(today()));
        for pair in result.results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn analysis_is_idempotent(tasks in task_batch(), st in strategy()) {
        let options = AnalysisOptions::new(st).with_today(today());
        let first = serde_json::to_string(&analyze(&tasks, &options)).unwrap();
        let second = serde_json::to_string(&analyze(&tasks, &options)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn cycle_flags_match_cycle_list(tasks in task_batch()) {
        let result = analyze(&tasks, &AnalysisOptions::default().with_today(today()));
        let cycles: HashSet<&str> = result.cycles.iter().map(String::as_str).collect();
        prop_assert_eq!(cycles.len(), result.cycles.len());
        for scored in &result.results {
            prop_assert_eq!(scored.in_cycle, cycles.contains(scored.id.as_str()));
        }
    }

    #[test]
    fn unreferenced_tasks_get_no_dependency_boost(tasks in task_batch()) {
        let result = analyze(&tasks, &AnalysisOptions::default().with_today(today()));
        for scored in &result.results {
            let referenced = tasks.iter().any(|t| {
                t.dependencies.iter().flatten().any(|d| *d == scored.id)
            });
            if !referenced {
                prop_assert_eq!(scored.blocks, 0);
                prop_assert!(!scored.explanation.contains("dependency boost"));
            }
        }
    }

    #[test]
    fn overriding_importance_keeps_other_weights(st in strategy(), w in 0.0f64..2.0) {
        let options = AnalysisOptions::new(st).with_today(today()).with_weight("importance", w);
        let used = analyze(&[], &options).weights_used;
        let base = st.base_weights();
        prop_assert_eq!(used.importance, w);
        prop_assert_eq!(used.urgency, base.urgency);
        prop_assert_eq!(used.effort, base.effort);
        prop_assert_eq!(used.dependency, base.dependency);
    }
}
