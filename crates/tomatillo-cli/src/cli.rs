use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tomatillo_core::grid::YearLayout;
use tomatillo_core::models::StatusFilter;

/// Half-hour time tracking from the command line
#[derive(Parser, Debug)]
#[command(name = "tomatillo", author, version, about, long_about = None)]
pub struct Cli {
    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks
    List(ListCommand),
    /// Record one more unit of actual effort on a task
    Update(UpdateCommand),
    /// Mark a task as done
    Done(DoneCommand),
    /// Change a task's estimate
    Edit(EditCommand),
    /// Delete a task and its tracking history
    Delete(DeleteCommand),
    /// Track the current half hour against a task
    Activate(ActivateCommand),
    /// Track an explicit date and half hour against a task
    Backfill(BackfillCommand),
    /// Show today's tasks
    Today,
    /// Show a report
    Report(ReportCommand),
    /// Import tasks from a file of `name, estimate` lines
    Load(LoadCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The name of the task
    pub name: String,
    /// Estimated effort in half-hour units
    #[arg(short, long, default_value_t = 1)]
    pub estimate: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Only tasks created in the last N days (0 lists everything)
    #[arg(short, long)]
    pub days: Option<u32>,
    /// Filter by progress: all, wip, todo or done
    #[arg(short, long, default_value = "all")]
    pub status: StatusFilter,
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateCommand {
    /// The ID of the task
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task to mark as done
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: i64,
    /// The new estimate in half-hour units
    #[arg(short, long)]
    pub estimate: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Force deletion without confirmation
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ActivateCommand {
    /// The ID of the task
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct BackfillCommand {
    /// The ID of the task
    pub id: i64,
    /// The day to track, e.g. "2024-09-20" or "yesterday"
    #[arg(long)]
    pub date: String,
    /// Half-hour slot index, 0-47
    #[arg(long, conflicts_with = "at", required_unless_present = "at")]
    pub slot: Option<u32>,
    /// Wall-clock time inside the slot, e.g. "09:45"
    #[arg(long)]
    pub at: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    /// Today's tasks
    Today,
    /// Per-day totals for the month
    Monthly,
    /// Per-day totals for the week
    Weekly,
    /// Half-hour grid for the week
    Blockweek,
    /// Half-hour grid for the month
    Blockmonth,
    /// Tracked slot counts for every day of the year
    Yearly,
}

#[derive(Parser, Debug, Clone)]
pub struct ReportCommand {
    /// Which report to show
    #[arg(short = 't', long = "type", value_enum, default_value_t = ReportType::Today)]
    pub report_type: ReportType,
    /// Reference day instead of today, e.g. "2024-09-20" or "last friday"
    #[arg(long)]
    pub date: Option<String>,
    /// Year for the yearly report
    #[arg(long)]
    pub year: Option<i32>,
    /// Yearly calendar layout: weeks or strip
    #[arg(long)]
    pub layout: Option<YearLayout>,
}

#[derive(Parser, Debug, Clone)]
pub struct LoadCommand {
    /// File with one `name, estimate` pair per line
    #[arg(short, long)]
    pub file: PathBuf,
}
