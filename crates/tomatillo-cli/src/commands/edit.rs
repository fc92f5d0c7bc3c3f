use anyhow::Result;
use owo_colors::OwoColorize;
use tomatillo_core::repository::Repository;

use crate::cli::EditCommand;
use crate::util::{repeat_glyph, Palette, ESTIMATE_GLYPH};

pub async fn edit_task(repo: &impl Repository, command: EditCommand, palette: &Palette) -> Result<()> {
    let task = repo.set_estimate(command.id, command.estimate).await?;
    println!(
        "{} Updated estimate for '{}': {} {}",
        "✓".style(palette.success),
        task.name,
        task.estimate,
        repeat_glyph(ESTIMATE_GLYPH, task.estimate)
    );
    Ok(())
}
