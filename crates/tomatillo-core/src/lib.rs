//! # Tomatillo Core Library
//!
//! Half-hour time tracking: tasks, per-slot activation records, and the
//! aggregation and rendering that turn sparse records into dense reports.
//!
//! ## Core Modules
//!
//! - [`slot`]: wall-clock time to half-hour slot index (0-47)
//! - [`models`]: tasks, tracking records and per-day aggregates
//! - [`db`]: SQLite connection and migrations
//! - [`repository`]: store traits and the SQLite implementation
//! - [`reconciler`]: the `Absent -> Active -> Done` rule for repeated signals
//! - [`calendar`]: gap-free week, month and year date ranges
//! - [`aggregate`]: per-day totals and counts joined against a calendar range
//! - [`grid`]: daily/weekly/monthly block grids and the yearly calendar
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tomatillo_core::{
//!     aggregate, calendar, db, grid,
//!     models::NewTaskData,
//!     reconciler::{self, TrackingKey},
//!     repository::{SqliteRepository, TaskRepository},
//!     slot::Slot,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tomatillo_core::error::CoreError> {
//!     let pool = db::establish_connection("tomatillo.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let task = repo
//!         .add_task(NewTaskData { name: "Write report".to_string(), estimate: 3, ..Default::default() })
//!         .await?;
//!     let today = chrono::Local::now().date_naive();
//!     let key = TrackingKey { task_id: task.id, date: today, slot: Slot::of(9, 45)? };
//!     reconciler::reconcile(&repo, key).await?;
//!
//!     let week = calendar::days_of_week(today);
//!     let days = aggregate::block_data(&repo, &week).await?;
//!     print!("{}", grid::render_block_report("Weekly Report", &week, &days, &Default::default()));
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod calendar;
pub mod db;
pub mod error;
pub mod grid;
pub mod models;
pub mod reconciler;
pub mod repository;
pub mod slot;
