//! Derived statistics over a task snapshot
//!
//! Everything in this module is a pure function of its inputs: no storage access, no
//! hidden state. The presentation layer fetches a snapshot from
//! [`TaskStore::get_tasks`](crate::TaskStore::get_tasks) and passes it through these.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::task::{Priority, Task};

/// Splits a snapshot into (active, completed) tasks.
///
/// The partition is stable: relative order is preserved within each half.
pub fn partition_by_completion(tasks: Vec<Task>) -> (Vec<Task>, Vec<Task>) {
    tasks.into_iter().partition(|task| !task.completed())
}

/// How many tasks there are in this snapshot
pub fn total_count(tasks: &[Task]) -> usize {
    tasks.len()
}

/// How many tasks of this snapshot are completed
pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| task.completed()).count()
}

/// A per-priority histogram, as displayed by the progress screen.
///
/// Every bucket is always present (possibly at zero), so the display layer does not have
/// to special-case missing entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PriorityBreakdown {
    low: usize,
    medium: usize,
    high: usize,
}

impl PriorityBreakdown {
    pub fn count(&self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }

    /// The sum over all buckets
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// Counts the completed tasks of this snapshot per priority.
///
/// Active tasks are not counted, so this can be handed either the completed half of a
/// partition or a whole snapshot.
pub fn count_by_priority(tasks: &[Task]) -> PriorityBreakdown {
    let mut breakdown = PriorityBreakdown::default();
    for task in tasks.iter().filter(|task| task.completed()) {
        match task.priority() {
            Priority::Low => breakdown.low += 1,
            Priority::Medium => breakdown.medium += 1,
            Priority::High => breakdown.high += 1,
        }
    }
    breakdown
}

/// A calendar month of a given year (the "This Month" badge reference).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthRef {
    year: i32,
    /// 1-based, in `1..=12`
    month: u32,
}

impl MonthRef {
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The current month, in local time
    pub fn current() -> Self {
        Self::from(chrono::Local::now().date_naive())
    }

    pub fn month(&self) -> u32 { self.month }
    pub fn year(&self) -> i32  { self.year }

    /// Whether this day falls within this month (the day of month is ignored)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }
}

impl From<NaiveDate> for MonthRef {
    fn from(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

impl std::fmt::Display for MonthRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{:02}-{}", self.month, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month reference {0:?} (expected MM-YYYY)")]
pub struct InvalidMonthRef(String);

impl std::str::FromStr for MonthRef {
    type Err = InvalidMonthRef;

    /// Parses the `MM-YYYY` form (e.g. `03-2024`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonthRef(s.to_string());

        let mut parts = s.split('-');
        let month = parts.next().and_then(|raw| raw.parse::<u32>().ok()).ok_or_else(invalid)?;
        let year = parts.next().and_then(|raw| raw.parse::<i32>().ok()).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Self::new(month, year).ok_or_else(invalid)
    }
}

/// Counts the completed tasks whose end date falls in `reference`.
///
/// Active tasks never count, whichever month they end in.
pub fn monthly_completed_count(tasks: &[Task], reference: MonthRef) -> usize {
    tasks.iter()
        .filter(|task| task.completed() && reference.contains(task.end_date()))
        .count()
}

/// Counts the completed tasks whose end date falls in the current month (local time)
pub fn current_month_completed_count(tasks: &[Task]) -> usize {
    monthly_completed_count(tasks, MonthRef::current())
}
