//! Half-hour slot codec.
//!
//! A calendar day is divided into 48 slots of thirty minutes. Slot `2h` covers
//! `h:00..h:29` and slot `2h + 1` covers `h:30..h:59`.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Number of half-hour slots in a day.
pub const SLOTS_PER_DAY: u8 = 48;

/// A validated half-hour slot index in `0..=47`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct Slot(u8);

impl Slot {
    pub const FIRST: Slot = Slot(0);
    pub const LAST: Slot = Slot(SLOTS_PER_DAY - 1);

    /// Builds a slot from a raw index, rejecting anything past 47.
    pub fn new(index: u32) -> Result<Self, CoreError> {
        if index < u32::from(SLOTS_PER_DAY) {
            Ok(Slot(index as u8))
        } else {
            Err(CoreError::InvalidInput(format!(
                "Slot {} is out of range (expected 0-{})",
                index,
                SLOTS_PER_DAY - 1
            )))
        }
    }

    /// Encodes a wall-clock time as `hour * 2 + (minute >= 30)`.
    ///
    /// Out-of-range hours or minutes are rejected, never clamped.
    pub fn of(hour: u32, minute: u32) -> Result<Self, CoreError> {
        if hour > 23 {
            return Err(CoreError::InvalidInput(format!(
                "Hour {} is out of range (expected 0-23)",
                hour
            )));
        }
        if minute > 59 {
            return Err(CoreError::InvalidInput(format!(
                "Minute {} is out of range (expected 0-59)",
                minute
            )));
        }
        let half = if minute >= 30 { 1 } else { 0 };
        Ok(Slot((hour * 2 + half) as u8))
    }

    /// The slot containing `time`. Leap seconds fall into the same slot.
    pub fn from_time(time: NaiveTime) -> Self {
        let half = if time.minute() >= 30 { 1 } else { 0 };
        Slot((time.hour() * 2 + half) as u8)
    }

    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    /// The hour of day this slot belongs to.
    #[inline]
    pub fn hour(self) -> u32 {
        u32::from(self.0 / 2)
    }

    /// Wall-clock start of the slot.
    pub fn start_time(self) -> NaiveTime {
        let minute = if self.0 % 2 == 1 { 30 } else { 0 };
        NaiveTime::from_hms_opt(self.hour(), minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Every slot of a day, in order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..SLOTS_PER_DAY).map(Slot)
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
