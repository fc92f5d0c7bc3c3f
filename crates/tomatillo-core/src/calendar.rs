//! Calendar materialization.
//!
//! Produces complete, gap-free date sequences for a week, month or year. These
//! are pure functions of their reference date; nothing here reads the clock.

use std::ops::RangeInclusive;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::CoreError;

/// An ordered, gap-free run of calendar dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRange {
    days: Vec<NaiveDate>,
}

impl CalendarRange {
    #[inline]
    pub fn start(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    #[inline]
    pub fn end(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NaiveDate> {
        self.days.iter()
    }

    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.days
    }
}

impl IntoIterator for CalendarRange {
    type Item = NaiveDate;
    type IntoIter = std::vec::IntoIter<NaiveDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.into_iter()
    }
}

impl<'a> IntoIterator for &'a CalendarRange {
    type Item = &'a NaiveDate;
    type IntoIter = std::slice::Iter<'a, NaiveDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Every date from `start` to `end`, inclusive. Empty when `end < start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> CalendarRange {
    let days = start.iter_days().take_while(|day| *day <= end).collect();
    CalendarRange { days }
}

/// Sunday-based weekday index: Sunday = 0 .. Saturday = 6.
#[inline]
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// The Sunday-to-Saturday week containing `reference`.
pub fn days_of_week(reference: NaiveDate) -> CalendarRange {
    let sunday = reference - Days::new(u64::from(weekday_index(reference)));
    let days = sunday.iter_days().take(7).collect();
    CalendarRange { days }
}

/// Every date of the calendar month containing `reference`.
pub fn days_of_month(reference: NaiveDate) -> CalendarRange {
    let first = first_of_month(reference);
    let days = first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .collect();
    CalendarRange { days }
}

/// Years the store's `YYYY-MM-DD` date columns can hold.
pub const YEARS: RangeInclusive<i32> = 1..=9999;

/// January 1 through December 31 of `year`.
pub fn days_of_year(year: i32) -> Result<CalendarRange, CoreError> {
    let out_of_range = || CoreError::InvalidInput(format!("Year {} is out of range", year));
    if !YEARS.contains(&year) {
        return Err(out_of_range());
    }
    let (start, end) = NaiveDate::from_ymd_opt(year, 1, 1)
        .zip(NaiveDate::from_ymd_opt(year, 12, 31))
        .ok_or_else(out_of_range)?;
    Ok(days_between(start, end))
}

#[inline]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Number of days in the month containing `date` (28-31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // Only December of chrono's last representable year lands here.
        None => 31,
    }
}

pub fn current_week(today: NaiveDate) -> CalendarRange {
    days_of_week(today)
}

pub fn current_month(today: NaiveDate) -> CalendarRange {
    days_of_month(today)
}

pub fn current_year(today: NaiveDate) -> Result<CalendarRange, CoreError> {
    days_of_year(today.year())
}
