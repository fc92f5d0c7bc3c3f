use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::slot::Slot;

/// A unit of work. `estimate` and `actual` count half-hour units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub estimate: i64,
    pub actual: i64,
    /// Local wall-clock time the task was added.
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub done: bool,
}

impl Task {
    pub fn progress(&self) -> TaskProgress {
        if self.done {
            TaskProgress::Done
        } else if self.actual > 0 {
            TaskProgress::InProgress
        } else {
            TaskProgress::Todo
        }
    }

    #[inline]
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date()
    }
}

/// Where a task stands, derived from its counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskProgress {
    Todo,
    InProgress,
    Done,
}

impl fmt::Display for TaskProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskProgress::Todo => write!(f, "To Do"),
            TaskProgress::InProgress => write!(f, "In Progress"),
            TaskProgress::Done => write!(f, "Done"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub name: String,
    pub estimate: i64,
    /// Overrides the creation time; imports and tests use it to place a task
    /// on a given day. Defaults to now.
    pub created_at: Option<NaiveDateTime>,
}

/// Lifecycle of a tracked slot. `Absent` is represented by no record at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum TrackingStatus {
    Active,
    Done,
}

impl TrackingStatus {
    /// Transition applied by one activation signal.
    ///
    /// `None -> Active -> Done -> Done`; `Done` is terminal.
    pub fn after_signal(current: Option<TrackingStatus>) -> TrackingStatus {
        match current {
            None => TrackingStatus::Active,
            Some(TrackingStatus::Active) | Some(TrackingStatus::Done) => TrackingStatus::Done,
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingStatus::Active => write!(f, "active"),
            TrackingStatus::Done => write!(f, "done"),
        }
    }
}

/// One half-hour activation record, keyed by `(task_id, date, slot)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TrackingRecord {
    pub task_id: i64,
    pub date: NaiveDate,
    pub slot: Slot,
    pub status: TrackingStatus,
}

/// Per-day totals over the tasks created that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub total_estimate: i64,
    pub total_actual: i64,
    pub total_done: i64,
}

impl DayAggregate {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_estimate: 0,
            total_actual: 0,
            total_done: 0,
        }
    }
}

/// Number of tracking records on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRow)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Filter for the task listing.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Only tasks created on or after this date.
    pub since: Option<NaiveDate>,
    pub status: StatusFilter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    /// Started but not finished: `actual > 0` and not done.
    Wip,
    /// Not started: `actual = 0` and not done.
    Todo,
    Done,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid status filter: {0} (expected all, wip, todo or done)")]
pub struct ParseStatusFilterError(String);

impl FromStr for StatusFilter {
    type Err = ParseStatusFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "wip" | "inprogress" => Ok(StatusFilter::Wip),
            "todo" => Ok(StatusFilter::Todo),
            "done" => Ok(StatusFilter::Done),
            _ => Err(ParseStatusFilterError(s.to_string())),
        }
    }
}
