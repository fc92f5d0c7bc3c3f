use anyhow::Result;
use owo_colors::OwoColorize;
use tomatillo_core::repository::Repository;

use crate::cli::DoneCommand;
use crate::util::Palette;

pub async fn done_task(repo: &impl Repository, command: DoneCommand, palette: &Palette) -> Result<()> {
    let task = repo.set_done(command.id).await?;
    println!("{} Completed task: '{}'", "✓".style(palette.success), task.name);
    Ok(())
}
