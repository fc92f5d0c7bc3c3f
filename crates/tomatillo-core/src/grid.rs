//! Fixed-width text grids.
//!
//! All renderers are pure: they format data the aggregator already produced
//! and never touch the store. Output lines within one grid share a display
//! width so the box borders line up; colour escapes (when enabled) wrap
//! glyphs without changing that width.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, CalendarRange};
use crate::error::CoreError;
use crate::models::{DayCount, TrackingStatus};
use crate::slot::Slot;

/// Glyph for a tracked half hour.
pub const FILLED: &str = "▓";
/// Glyph for an untracked half hour (a middle dot, not a period).
pub const EMPTY: &str = "·";
/// Yearly calendar cell for a day with no tracked slots.
pub const ZERO_COUNT: &str = "··";

/// Width of a daily block row, borders included.
const BLOCK_WIDTH: usize = 86;
/// Width of one day cell in the yearly calendar.
const CELL_WIDTH: usize = 3;

/// How the yearly calendar arranges a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearLayout {
    /// Sunday-first week rows, three months side by side.
    #[default]
    Weeks,
    /// One row per month, days 1-31 across.
    Strip,
}

impl FromStr for YearLayout {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weeks" => Ok(YearLayout::Weeks),
            "strip" => Ok(YearLayout::Strip),
            _ => Err(CoreError::InvalidInput(format!(
                "Unknown calendar layout '{}' (expected weeks or strip)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GridOptions {
    pub color: bool,
    pub layout: YearLayout,
}

fn slot_glyph(slots: &BTreeMap<Slot, TrackingStatus>, slot: Slot, options: &GridOptions) -> String {
    match slots.get(&slot) {
        Some(TrackingStatus::Active) | Some(TrackingStatus::Done) if options.color => {
            FILLED.green().to_string()
        }
        Some(_) => FILLED.to_string(),
        None => EMPTY.to_string(),
    }
}

fn count_cell(count: i64, options: &GridOptions) -> String {
    if count <= 0 {
        return format!(" {}", ZERO_COUNT);
    }
    let digits = format!("{:>2}", count.min(99));
    if options.color {
        format!(" {}", digits.yellow())
    } else {
        format!(" {}", digits)
    }
}

fn border(left: char, right: char, width: usize) -> String {
    let mut line = String::with_capacity(width * 3);
    line.push(left);
    line.extend(std::iter::repeat('═').take(width - 2));
    line.push(right);
    line
}

fn boxed_text(text: &str, width: usize) -> String {
    format!("║ {:<inner$} ║", text, inner = width - 4)
}

/// One day as 24 two-glyph hour cells: `║ 2024-09-20 ▓▓ ·· ... ║`.
///
/// Slots missing from `slots` render as the placeholder glyph.
pub fn render_daily_block(
    date: NaiveDate,
    slots: &BTreeMap<Slot, TrackingStatus>,
    options: &GridOptions,
) -> String {
    let mut line = format!("║ {} ", date.format("%Y-%m-%d"));
    let mut all = Slot::all();
    while let (Some(first), Some(second)) = (all.next(), all.next()) {
        line.push_str(&slot_glyph(slots, first, options));
        line.push_str(&slot_glyph(slots, second, options));
        line.push(' ');
    }
    line.push('║');
    line
}

fn hour_header() -> String {
    let labels: Vec<String> = (0..24).map(|hour| format!("{:02}", hour)).collect();
    format!("║{}{} ║", " ".repeat(12), labels.join("|"))
}

/// Boxed table of daily blocks, one row per date of `range`.
pub fn render_block_report(
    title: &str,
    range: &CalendarRange,
    days: &BTreeMap<NaiveDate, BTreeMap<Slot, TrackingStatus>>,
    options: &GridOptions,
) -> String {
    let empty = BTreeMap::new();
    let heading = match (range.start(), range.end()) {
        (Some(start), Some(end)) => format!("{} ({} to {})", title, start, end),
        _ => title.to_string(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", border('╔', '╗', BLOCK_WIDTH));
    let _ = writeln!(out, "{}", boxed_text(&heading, BLOCK_WIDTH));
    let _ = writeln!(out, "{}", border('╠', '╣', BLOCK_WIDTH));
    let _ = writeln!(out, "{}", hour_header());
    let _ = writeln!(out, "{}", border('╠', '╣', BLOCK_WIDTH));
    for date in range {
        let slots = days.get(date).unwrap_or(&empty);
        let _ = writeln!(out, "{}", render_daily_block(*date, slots, options));
    }
    let _ = writeln!(out, "{}", border('╚', '╝', BLOCK_WIDTH));
    out
}

/// Month-major density calendar for `year`.
///
/// Counts are looked up by date, so missing or out-of-year entries cannot
/// shift the grid.
pub fn render_year_calendar(
    year: i32,
    counts: &[DayCount],
    options: &GridOptions,
) -> Result<String, CoreError> {
    let days = calendar::days_of_year(year)?;
    let by_day: HashMap<NaiveDate, i64> = counts
        .iter()
        .filter(|c| days.contains(c.date))
        .map(|c| (c.date, c.count))
        .collect();

    let firsts: Vec<NaiveDate> = (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .collect();

    let heading = match (days.start(), days.end()) {
        (Some(start), Some(end)) => format!("Yearly Report ({} to {})", start, end),
        _ => "Yearly Report".to_string(),
    };

    Ok(match options.layout {
        YearLayout::Weeks => render_weeks(&heading, &firsts, &by_day, options),
        YearLayout::Strip => render_strip(&heading, &firsts, &by_day, options),
    })
}

const WEEK_ROWS: usize = 6;
const MONTH_INNER: usize = 7 * CELL_WIDTH;
const MONTH_WIDTH: usize = MONTH_INNER + 3;
const MONTHS_PER_BAND: usize = 3;

/// A single month as Sunday-first week rows, always `WEEK_ROWS` rows tall.
fn month_block(first: NaiveDate, by_day: &HashMap<NaiveDate, i64>, options: &GridOptions) -> Vec<String> {
    let offset = calendar::weekday_index(first) as usize;
    let length = calendar::days_in_month(first) as usize;
    let blank = " ".repeat(CELL_WIDTH);

    let mut cells: Vec<String> = Vec::with_capacity(WEEK_ROWS * 7);
    cells.extend(std::iter::repeat(blank.clone()).take(offset));
    for day in calendar::days_of_month(first) {
        cells.push(count_cell(by_day.get(&day).copied().unwrap_or(0), options));
    }
    // Close the month's last week, then fill out the fixed block height.
    let trailing = (7 - (offset + length) % 7) % 7;
    cells.extend(std::iter::repeat(blank.clone()).take(trailing));
    while cells.len() < WEEK_ROWS * 7 {
        cells.push(blank.clone());
    }

    let mut lines = Vec::with_capacity(WEEK_ROWS + 4);
    lines.push(border('╔', '╗', MONTH_WIDTH));
    lines.push(format!("║ {:<width$}║", first.format("%b").to_string(), width = MONTH_INNER));
    lines.push(format!("║{} ║", [" Su", " Mo", " Tu", " We", " Th", " Fr", " Sa"].concat()));
    for week in cells.chunks(7) {
        lines.push(format!("║{} ║", week.concat()));
    }
    lines.push(border('╚', '╝', MONTH_WIDTH));
    lines
}

fn render_weeks(
    heading: &str,
    firsts: &[NaiveDate],
    by_day: &HashMap<NaiveDate, i64>,
    options: &GridOptions,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading);
    for band in firsts.chunks(MONTHS_PER_BAND) {
        let blocks: Vec<Vec<String>> = band
            .iter()
            .map(|first| month_block(*first, by_day, options))
            .collect();
        let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..height {
            let line: Vec<&str> = blocks
                .iter()
                .map(|block| block.get(row).map(String::as_str).unwrap_or(""))
                .collect();
            let _ = writeln!(out, "{}", line.join(" "));
        }
    }
    out
}

/// Width of a strip row: `║ Jan  ` + 31 cells + `║`.
const STRIP_WIDTH: usize = 7 + 31 * CELL_WIDTH + 1;

fn render_strip(
    heading: &str,
    firsts: &[NaiveDate],
    by_day: &HashMap<NaiveDate, i64>,
    options: &GridOptions,
) -> String {
    let blank = " ".repeat(CELL_WIDTH);
    let day_numbers: String = (1..=31).map(|day| format!(" {:02}", day)).collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}", border('╔', '╗', STRIP_WIDTH));
    let _ = writeln!(out, "{}", boxed_text(heading, STRIP_WIDTH));
    let _ = writeln!(out, "{}", border('╠', '╣', STRIP_WIDTH));
    let _ = writeln!(out, "║{}{}║", " ".repeat(6), day_numbers);
    for first in firsts {
        let mut line = format!("║ {}  ", first.format("%b"));
        for day in calendar::days_of_month(*first) {
            line.push_str(&count_cell(by_day.get(&day).copied().unwrap_or(0), options));
        }
        // Short months pad out to the 31st column before the border.
        let missing = 31 - calendar::days_in_month(*first) as usize;
        line.push_str(&blank.repeat(missing));
        line.push('║');
        let _ = writeln!(out, "{}", line);
    }
    let _ = writeln!(out, "{}", border('╚', '╝', STRIP_WIDTH));
    out
}
