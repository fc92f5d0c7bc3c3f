use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use tomatillo_core::grid::{self, GridOptions};
use tomatillo_core::repository::Repository;
use tomatillo_core::{aggregate, calendar};

use crate::cli::{ReportCommand, ReportType};
use crate::config::Config;
use crate::parser::parse_date;
use crate::util;
use crate::views::table::{display_daily_totals, display_today};

pub async fn show_report(repo: &impl Repository, command: ReportCommand, config: &Config) -> Result<()> {
    let today = util::today();
    let reference = command
        .date
        .as_deref()
        .map(|input| parse_date(input, today))
        .transpose()?;
    let day = reference.unwrap_or(today);
    let options = GridOptions {
        color: config.color,
        layout: command.layout.unwrap_or(config.year_layout),
    };

    match command.report_type {
        ReportType::Today => today_report(repo, day, config).await?,
        ReportType::Monthly => {
            let totals = aggregate::monthly_totals(repo, day).await?;
            display_daily_totals("Monthly Report", &totals, config.color);
        }
        ReportType::Weekly => {
            let totals = aggregate::weekly_totals(repo, day).await?;
            display_daily_totals("Weekly Report", &totals, config.color);
        }
        ReportType::Blockweek => {
            let week = match reference {
                Some(day) => calendar::days_of_week(day),
                None => calendar::current_week(today),
            };
            let days = aggregate::block_data(repo, &week).await?;
            print!("{}", grid::render_block_report("Weekly Report", &week, &days, &options));
        }
        ReportType::Blockmonth => {
            let month = match reference {
                Some(day) => calendar::days_of_month(day),
                None => calendar::current_month(today),
            };
            let days = aggregate::block_data(repo, &month).await?;
            print!("{}", grid::render_block_report("Monthly Report", &month, &days, &options));
        }
        ReportType::Yearly => {
            let (year, days) = match command.year.or(reference.map(|day| day.year())) {
                Some(year) => (year, calendar::days_of_year(year)?),
                None => (today.year(), calendar::current_year(today)?),
            };
            let counts = aggregate::tracking_counts(repo, &days).await?;
            print!("{}", grid::render_year_calendar(year, &counts, &options)?);
        }
    }

    Ok(())
}

/// Tasks created on `day`.
pub async fn today_report(repo: &impl Repository, day: NaiveDate, config: &Config) -> Result<()> {
    let tasks = repo.find_tasks_created_in(&calendar::days_between(day, day)).await?;
    display_today(&tasks, config.color);
    Ok(())
}
