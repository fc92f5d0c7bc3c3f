use chrono::{Datelike, NaiveDateTime, Weekday};
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Row, Table};
use tomatillo_core::models::{DayAggregate, Task, TaskProgress};

use crate::util::{repeat_glyph, ACTUAL_GLYPH, ESTIMATE_GLYPH};

fn humanize(at: NaiveDateTime, now: NaiveDateTime) -> String {
    HumanTime::from(at - now).to_string()
}

fn progress_cell(task: &Task, color: bool) -> Cell {
    let progress = task.progress();
    let cell = Cell::new(progress.to_string());
    if !color {
        return cell;
    }
    match progress {
        TaskProgress::Done => cell.fg(Color::Green),
        TaskProgress::InProgress => cell.fg(Color::Yellow),
        TaskProgress::Todo => cell,
    }
}

fn name_cell(task: &Task, color: bool) -> Cell {
    let cell = Cell::new(&task.name);
    if color && task.done {
        cell.add_attribute(Attribute::CrossedOut).fg(Color::DarkGrey)
    } else {
        cell
    }
}

/// Task list: progress, humanized timestamps and effort bars.
pub fn tasks_table(tasks: &[Task], now: NaiveDateTime, color: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Progress", "Created", "Updated", "Estimate", "Actual"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id).set_alignment(CellAlignment::Right));
        row.add_cell(name_cell(task, color));
        row.add_cell(progress_cell(task, color));
        row.add_cell(Cell::new(humanize(task.created_at, now)));
        row.add_cell(Cell::new(humanize(task.updated_at, now)));
        row.add_cell(Cell::new(repeat_glyph(ESTIMATE_GLYPH, task.estimate)));
        row.add_cell(Cell::new(repeat_glyph(ACTUAL_GLYPH, task.actual)));
        table.add_row(row);
    }

    table
}

pub fn display_tasks(tasks: &[Task], now: NaiveDateTime, color: bool) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    println!("{}", tasks_table(tasks, now, color));
}

/// Today's tasks with their numeric estimate and actual.
pub fn today_table(tasks: &[Task], color: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Done?", "Task", "Est.", "Act."]);

    for task in tasks {
        let done = if task.done { "Yes" } else { "No" };
        let mut done_cell = Cell::new(done);
        if color && task.done {
            done_cell = done_cell.fg(Color::Green);
        }

        let mut row = Row::new();
        row.add_cell(Cell::new(task.id).set_alignment(CellAlignment::Right));
        row.add_cell(done_cell);
        row.add_cell(name_cell(task, color));
        row.add_cell(Cell::new(task.estimate).set_alignment(CellAlignment::Right));
        row.add_cell(Cell::new(task.actual).set_alignment(CellAlignment::Right));
        table.add_row(row);
    }

    table
}

pub fn display_today(tasks: &[Task], color: bool) {
    println!("Today's Report");
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    println!("{}", today_table(tasks, color));

    let done = tasks.iter().filter(|t| t.done).count();
    let estimate: i64 = tasks.iter().map(|t| t.estimate).sum();
    let actual: i64 = tasks.iter().map(|t| t.actual).sum();
    println!(
        "{} of {} tasks done, {} of {} estimated units spent",
        done,
        tasks.len(),
        actual,
        estimate
    );
}

/// One row per day: tasks done and actual effort as a tomato bar.
pub fn daily_totals_table(totals: &[DayAggregate], color: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Day", "Done", "Est.", "Actual"]);

    for day in totals {
        let mut day_cell = Cell::new(day.date.format("%Y-%m-%d %a"));
        if color && matches!(day.date.weekday(), Weekday::Sat | Weekday::Sun) {
            day_cell = day_cell.fg(Color::DarkGrey);
        }

        let mut row = Row::new();
        row.add_cell(day_cell);
        row.add_cell(Cell::new(day.total_done).set_alignment(CellAlignment::Right));
        row.add_cell(Cell::new(day.total_estimate).set_alignment(CellAlignment::Right));
        row.add_cell(Cell::new(repeat_glyph(ACTUAL_GLYPH, day.total_actual)));
        table.add_row(row);
    }

    table
}

pub fn display_daily_totals(title: &str, totals: &[DayAggregate], color: bool) {
    if let (Some(first), Some(last)) = (totals.first(), totals.last()) {
        println!("{} ({} to {})", title, first.date, last.date);
    } else {
        println!("{}", title);
    }
    println!("{}", daily_totals_table(totals, color));
}
