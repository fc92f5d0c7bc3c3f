use anyhow::Result;
use owo_colors::OwoColorize;
use tomatillo_core::repository::Repository;

use crate::cli::UpdateCommand;
use crate::util::{repeat_glyph, Palette, ACTUAL_GLYPH};

pub async fn update_task(repo: &impl Repository, command: UpdateCommand, palette: &Palette) -> Result<()> {
    let task = repo.increment_actual(command.id).await?;
    println!(
        "{} Updated task '{}': {} of {} {}",
        "✓".style(palette.success),
        task.name,
        task.actual,
        task.estimate,
        repeat_glyph(ACTUAL_GLYPH, task.actual)
    );
    Ok(())
}
