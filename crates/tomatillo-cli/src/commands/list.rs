use anyhow::Result;
use tomatillo_core::models::TaskFilter;
use tomatillo_core::repository::Repository;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::util;
use crate::views::table::display_tasks;

pub async fn list_tasks(repo: &impl Repository, command: ListCommand, config: &Config) -> Result<()> {
    let days = command.days.unwrap_or(config.default_list_days);
    let filter = TaskFilter {
        since: util::list_since(days, util::today()),
        status: command.status,
    };

    let tasks = repo.find_tasks(&filter).await?;
    display_tasks(&tasks, util::local_now(), config.color);

    Ok(())
}
