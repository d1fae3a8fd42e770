//! Task triage for the U-Engine ecosystem.
//!
//! Ranks a batch of tasks by a computed priority score and explains every
//! score. The scoring path is a pure, synchronous function of its input:
//! no state survives between calls.
//!
//! # Modules
//!
//! - **`models`**: `TaskInput`, `Task`, `ScoredTask`, `AnalysisResult`, `Suggestion`
//! - **`dates`**: Flexible due-date parsing
//! - **`dependency`**: Dependency graph, cycle detection, blocker counts
//! - **`scoring`**: Factors, strategy presets, the scoring engine
//! - **`validation`**: Structural checks on raw request JSON
//! - **`api`**: HTTP endpoints (axum)
//! - **`config`**: Server configuration (clap)
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use u_triage::models::TaskInput;
//! use u_triage::scoring::{analyze, AnalysisOptions};
//!
//! let tasks = vec![
//!     TaskInput::new("Ship release").with_id("ship").with_due_date("2025-04-01"),
//!     TaskInput::new("Tidy backlog").with_id("tidy"),
//! ];
//! let options = AnalysisOptions::default()
//!     .with_today(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
//!
//! let result = analyze(&tasks, &options);
//! assert_eq!(result.results[0].id, "ship");
//! ```

pub mod api;
pub mod config;
pub mod dates;
pub mod dependency;
pub mod models;
pub mod scoring;
pub mod validation;
