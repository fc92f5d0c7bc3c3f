//! Per-day aggregation over a materialized calendar range.
//!
//! Every function here returns exactly one entry per date of the requested
//! range, in ascending order, whether or not anything happened that day. The
//! grid renderer relies on that shape.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::instrument;

use crate::calendar::{self, CalendarRange};
use crate::error::CoreError;
use crate::models::{DayAggregate, DayCount, Task, TrackingRecord, TrackingStatus};
use crate::repository::{TaskRepository, TrackingRepository};
use crate::slot::Slot;

/// Groups tasks by creation date into zero-filled daily totals.
///
/// Tasks created outside `range` are ignored.
pub fn daily_totals(range: &CalendarRange, tasks: &[Task]) -> Vec<DayAggregate> {
    let mut by_day: HashMap<NaiveDate, DayAggregate> = HashMap::new();
    for task in tasks {
        let day = task.created_on();
        if !range.contains(day) {
            continue;
        }
        let entry = by_day.entry(day).or_insert_with(|| DayAggregate::empty(day));
        entry.total_estimate += task.estimate;
        entry.total_actual += task.actual;
        if task.done {
            entry.total_done += 1;
        }
    }

    range
        .iter()
        .map(|day| by_day.remove(day).unwrap_or_else(|| DayAggregate::empty(*day)))
        .collect()
}

/// Left-joins sparse per-day counts onto `range`; missing days count zero.
pub fn join_counts<I>(range: &CalendarRange, sparse: I) -> Vec<DayCount>
where
    I: IntoIterator<Item = DayCount>,
{
    let mut by_day: HashMap<NaiveDate, i64> = HashMap::new();
    for row in sparse {
        *by_day.entry(row.date).or_insert(0) += row.count;
    }

    range
        .iter()
        .map(|day| DayCount {
            date: *day,
            count: by_day.get(day).copied().unwrap_or(0),
        })
        .collect()
}

/// Collapses a day's records to one status per slot.
///
/// When several tasks share a slot, `Done` wins over `Active`.
pub fn slot_map<'a, I>(records: I) -> BTreeMap<Slot, TrackingStatus>
where
    I: IntoIterator<Item = &'a TrackingRecord>,
{
    let mut slots = BTreeMap::new();
    for record in records {
        slots
            .entry(record.slot)
            .and_modify(|status| {
                if record.status == TrackingStatus::Done {
                    *status = TrackingStatus::Done;
                }
            })
            .or_insert(record.status);
    }
    slots
}

/// Slot maps for every date of `range`, empty maps for untracked days.
pub fn records_by_date(
    range: &CalendarRange,
    records: &[TrackingRecord],
) -> BTreeMap<NaiveDate, BTreeMap<Slot, TrackingStatus>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&TrackingRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| range.contains(r.date)) {
        grouped.entry(record.date).or_default().push(record);
    }

    range
        .iter()
        .map(|day| {
            let slots = grouped
                .get(day)
                .map(|records| slot_map(records.iter().copied()))
                .unwrap_or_default();
            (*day, slots)
        })
        .collect()
}

/// Daily estimate/actual/done totals for the tasks created in `range`.
#[instrument(skip(store, range), fields(days = range.len()))]
pub async fn totals_for_range<R>(store: &R, range: &CalendarRange) -> Result<Vec<DayAggregate>, CoreError>
where
    R: TaskRepository + Sync + ?Sized,
{
    let tasks = store.find_tasks_created_in(range).await?;
    Ok(daily_totals(range, &tasks))
}

pub async fn monthly_totals<R>(store: &R, reference: NaiveDate) -> Result<Vec<DayAggregate>, CoreError>
where
    R: TaskRepository + Sync + ?Sized,
{
    totals_for_range(store, &calendar::days_of_month(reference)).await
}

pub async fn weekly_totals<R>(store: &R, reference: NaiveDate) -> Result<Vec<DayAggregate>, CoreError>
where
    R: TaskRepository + Sync + ?Sized,
{
    totals_for_range(store, &calendar::days_of_week(reference)).await
}

/// Tracking record counts for every date of `range`.
#[instrument(skip(store, range), fields(days = range.len()))]
pub async fn tracking_counts<R>(store: &R, range: &CalendarRange) -> Result<Vec<DayCount>, CoreError>
where
    R: TrackingRepository + Sync + ?Sized,
{
    let rows = store.count_tracking_in(range).await?;
    Ok(join_counts(range, rows))
}

pub async fn yearly_counts<R>(store: &R, year: i32) -> Result<Vec<DayCount>, CoreError>
where
    R: TrackingRepository + Sync + ?Sized,
{
    tracking_counts(store, &calendar::days_of_year(year)?).await
}

/// Slot maps for a week or month block report.
#[instrument(skip(store, range), fields(days = range.len()))]
pub async fn block_data<R>(
    store: &R,
    range: &CalendarRange,
) -> Result<BTreeMap<NaiveDate, BTreeMap<Slot, TrackingStatus>>, CoreError>
where
    R: TrackingRepository + Sync + ?Sized,
{
    let records = store.find_tracking_in(range).await?;
    Ok(records_by_date(range, &records))
}
