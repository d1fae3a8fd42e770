//! Task model.
//!
//! Two representations of the same unit of work:
//!
//! - [`TaskInput`]: the loosely typed record as it arrives on the wire.
//!   Every field is optional; ids and dependency entries may be strings or
//!   numbers.
//! - [`Task`]: the normalized record the scoring engine works on, with
//!   defaults applied and the due date parsed.

use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::parse_due_date;

/// Title used when a task arrives without one.
pub const UNTITLED: &str = "(no title)";

/// Default effort estimate (hours).
pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;

/// Default importance on the 1-10 scale.
pub const DEFAULT_IMPORTANCE: i64 = 5;

/// A task record as submitted by a caller.
///
/// Fields are parsed defensively: nothing here is required, and
/// [`Task::from_input`] fills in defaults for whatever is missing.
/// Deserialization never fails on a field's type:
///
/// | Field | Accepted | Otherwise |
/// |-------|----------|-----------|
/// | `id`, `title`, `due_date` | string, number (stringified) | `None` |
/// | `estimated_hours` | number, numeric string | `None` |
/// | `importance` | number (truncated), numeric string | `None` |
/// | `dependencies` | list; string and number entries kept | `None` |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    /// Caller-assigned identifier (string or number on the wire).
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,
    /// Human-readable title.
    #[serde(default, deserialize_with = "loose_string")]
    pub title: Option<String>,
    /// Due date in any format understood by [`parse_due_date`].
    #[serde(default, deserialize_with = "loose_string")]
    pub due_date: Option<String>,
    /// Estimated effort in hours.
    #[serde(default, deserialize_with = "loose_number")]
    pub estimated_hours: Option<f64>,
    /// Importance, nominally 1-10.
    #[serde(default, deserialize_with = "loose_integer")]
    pub importance: Option<i64>,
    /// Ids of tasks this task depends on.
    #[serde(default, deserialize_with = "loose_string_list")]
    pub dependencies: Option<Vec<String>>,
}

impl TaskInput {
    /// Creates an input record with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Sets the task id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the raw due date string.
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the effort estimate.
    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the importance.
    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Adds a dependency id.
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.get_or_insert_with(Vec::new).push(id.into());
        self
    }
}

/// A normalized task, ready for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier, unique within one scoring call.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Calendar due date. `None` = no deadline.
    pub due_date: Option<NaiveDate>,
    /// Estimated effort in hours.
    pub estimated_hours: f64,
    /// Importance as submitted (not clamped).
    pub importance: i64,
    /// Ids of tasks this task depends on, as submitted.
    pub dependencies: Vec<String>,
}

impl Task {
    /// Creates a task with the given id and default attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: UNTITLED.to_string(),
            due_date: None,
            estimated_hours: DEFAULT_ESTIMATED_HOURS,
            importance: DEFAULT_IMPORTANCE,
            dependencies: Vec::new(),
        }
    }

    /// Normalizes a submitted record.
    ///
    /// `index` is the record's position in the submitted list; it is used to
    /// derive an id (`"{title}_{index}"`) when none was given. A zero or
    /// non-finite effort estimate falls back to the default.
    pub fn from_input(input: &TaskInput, index: usize) -> Self {
        let title = input.title.clone().unwrap_or_else(|| UNTITLED.to_string());
        let id = input
            .id
            .clone()
            .unwrap_or_else(|| format!("{title}_{index}"));
        let estimated_hours = input
            .estimated_hours
            .filter(|h| h.is_finite() && *h != 0.0)
            .unwrap_or(DEFAULT_ESTIMATED_HOURS);

        Self {
            id,
            title,
            due_date: input.due_date.as_deref().and_then(parse_due_date),
            estimated_hours,
            importance: input.importance.unwrap_or(DEFAULT_IMPORTANCE),
            dependencies: input.dependencies.clone().unwrap_or_default(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the effort estimate.
    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    /// Sets the importance.
    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = importance;
        self
    }

    /// Adds a dependency id.
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// Whole days from `today` until the due date (negative = overdue).
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (due - today).num_days())
    }
}

/// A scalar as it may appear on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Number(serde_json::Number),
    Other(IgnoredAny),
}

impl Loose {
    fn into_string(self) -> Option<String> {
        match self {
            Loose::Text(s) => Some(s),
            Loose::Number(n) => Some(n.to_string()),
            Loose::Other(_) => None,
        }
    }

    fn into_f64(self) -> Option<f64> {
        match self {
            Loose::Text(s) => s.trim().parse().ok(),
            Loose::Number(n) => n.as_f64(),
            Loose::Other(_) => None,
        }
    }

    fn into_i64(self) -> Option<i64> {
        match self {
            Loose::Number(n) => n.as_i64().or_else(|| truncate(n.as_f64()?)),
            Loose::Text(s) => {
                let s = s.trim();
                s.parse().ok().or_else(|| truncate(s.parse().ok()?))
            }
            Loose::Other(_) => None,
        }
    }
}

fn truncate(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.trunc() as i64)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseList {
    Items(Vec<Loose>),
    Other(IgnoredAny),
}

fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?.and_then(Loose::into_string))
}

fn loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?.and_then(Loose::into_f64))
}

fn loose_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?.and_then(Loose::into_i64))
}

fn loose_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseList>::deserialize(deserializer)? {
        Some(LooseList::Items(items)) => {
            Some(items.into_iter().filter_map(Loose::into_string).collect())
        }
        Some(LooseList::Other(_)) | None => None,
    })
}
