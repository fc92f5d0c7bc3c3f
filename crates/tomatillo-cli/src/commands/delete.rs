use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use tomatillo_core::error::CoreError;
use tomatillo_core::repository::Repository;

use crate::cli::DeleteCommand;
use crate::util::{self, Palette};

pub async fn delete_task(repo: &impl Repository, command: DeleteCommand, palette: &Palette) -> Result<()> {
    let task = repo
        .find_task_by_id(command.id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("No task found with ID {}", command.id)))?;

    if !command.force && util::is_interactive() {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete task '{}' and its tracking history?",
                task.name
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_task(task.id).await?;
    println!("{} Deleted task: '{}'", "✓".style(palette.success), task.name);
    Ok(())
}
