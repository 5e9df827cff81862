//! Tasks (the persisted unit of work of the tracker)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// The priority of a task, used for visual classification and statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// A task of the tracker.
///
/// Tasks are serialized with camelCase keys, so that collections written by earlier
/// versions of the tracker keep loading unchanged.
///
/// Two invariants hold on every instance, enforced at creation and on every mutation:
/// * the title is never empty
/// * `start_date <= end_date`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// An opaque unique identifier, assigned at creation, immutable afterwards
    id: String,

    title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// The day the task is scheduled to start
    #[serde(with = "flexible_date")]
    start_date: NaiveDate,
    /// The day the task is due
    #[serde(with = "flexible_date")]
    end_date: NaiveDate,

    /// An optional formatted clock time (e.g. "09:30"). Opaque to this crate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<String>,

    priority: Priority,

    /// Free-form text describing sub-steps of this task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtasks: Option<String>,

    completed: bool,
}

impl Task {
    /// Create a brand new task, with a fresh (random) id and `completed` set to false.
    pub fn new(
        title: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        priority: Priority,
    ) -> Result<Self, ValidationError> {
        let id = Uuid::new_v4().to_hyphenated().to_string();
        Self::new_with_id(id, title, start_date, end_date, priority)
    }

    /// Create a task with a caller-supplied id.
    ///
    /// This is meant for callers that already hold an identifier (e.g. when importing a
    /// collection); regular creation should use [`Task::new`] instead.
    pub fn new_with_id(
        id: String,
        title: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        priority: Priority,
    ) -> Result<Self, ValidationError> {
        validate_title(&title)?;
        validate_schedule(start_date, end_date)?;

        Ok(Self {
            id,
            title,
            description: None,
            start_date,
            end_date,
            time: None,
            priority,
            subtasks: None,
            completed: false,
        })
    }

    pub fn id(&self) -> &str                    { &self.id }
    pub fn title(&self) -> &str                 { &self.title }
    pub fn description(&self) -> Option<&str>   { self.description.as_deref() }
    pub fn start_date(&self) -> NaiveDate       { self.start_date }
    pub fn end_date(&self) -> NaiveDate         { self.end_date }
    pub fn time(&self) -> Option<&str>          { self.time.as_deref() }
    pub fn priority(&self) -> Priority          { self.priority }
    pub fn subtasks(&self) -> Option<&str>      { self.subtasks.as_deref() }
    pub fn completed(&self) -> bool             { self.completed }

    /// Rename this task
    pub fn set_title(&mut self, new_title: String) -> Result<(), ValidationError> {
        validate_title(&new_title)?;
        self.title = new_title;
        Ok(())
    }

    /// Move this task to new start/end days.
    ///
    /// Both bounds are set at once, since the invariant spans both of them.
    pub fn set_schedule(&mut self, start_date: NaiveDate, end_date: NaiveDate) -> Result<(), ValidationError> {
        validate_schedule(start_date, end_date)?;
        self.start_date = start_date;
        self.end_date = end_date;
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_time(&mut self, time: Option<String>) {
        self.time = time;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_subtasks(&mut self, subtasks: Option<String>) {
        self.subtasks = subtasks;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Apply `patch` to this task.
    ///
    /// The patched result is validated *before* any field is written, so a failed patch
    /// leaves the task exactly as it was.
    pub fn apply_patch(&mut self, patch: &TaskPatch) -> Result<(), ValidationError> {
        let title = patch.title.as_ref().unwrap_or(&self.title);
        validate_title(title)?;

        let start_date = patch.start_date.unwrap_or(self.start_date);
        let end_date = patch.end_date.unwrap_or(self.end_date);
        validate_schedule(start_date, end_date)?;

        if let Some(new_title) = &patch.title {
            self.title = new_title.clone();
        }
        self.start_date = start_date;
        self.end_date = end_date;
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(time) = &patch.time {
            self.time = time.clone();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(subtasks) = &patch.subtasks {
            self.subtasks = subtasks.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }

        Ok(())
    }
}

/// A partial update to a task, applied by [`TaskStore::update_task`](crate::TaskStore::update_task).
///
/// `None` leaves the corresponding field unchanged. For the optional text fields,
/// `Some(None)` clears the field and `Some(Some(text))` replaces it.
#[derive(Clone, Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub time: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub subtasks: Option<Option<String>>,
    pub completed: Option<bool>,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

fn validate_schedule(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if start > end {
        return Err(ValidationError::StartAfterEnd { start, end });
    }
    Ok(())
}

/// Day-precision dates, as stored in the collection blob.
///
/// Serialization always emits ISO `YYYY-MM-DD`. Deserialization also accepts the legacy
/// `DD-MM-YYYY` form some code paths of earlier tracker versions stored, so that existing
/// collections keep loading; they get rewritten in the ISO form on the next save.
pub(crate) mod flexible_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const ISO_FORMAT: &str = "%Y-%m-%d";
    const LEGACY_FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(ISO_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("unrecognized date {:?}", raw)))
    }

    pub(crate) fn parse(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, ISO_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_FORMAT))
            .ok()
    }
}
