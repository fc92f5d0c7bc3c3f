use anyhow::Result;
use owo_colors::OwoColorize;
use tomatillo_core::models::NewTaskData;
use tomatillo_core::repository::Repository;

use crate::cli::AddCommand;
use crate::util::{repeat_glyph, Palette, ESTIMATE_GLYPH};

pub async fn add_task(repo: &impl Repository, command: AddCommand, palette: &Palette) -> Result<()> {
    let new_task_data = NewTaskData {
        name: command.name,
        estimate: command.estimate,
        created_at: None,
    };

    let added_task = repo.add_task(new_task_data).await?;

    println!("{} Created task: {}", "✓".style(palette.success), added_task.name);
    println!(
        "  {} Task ID: {}",
        "→".style(palette.info),
        added_task.id.style(palette.highlight)
    );
    println!(
        "  {} Estimate: {} {}",
        "→".style(palette.info),
        added_task.estimate,
        repeat_glyph(ESTIMATE_GLYPH, added_task.estimate)
    );
    println!(
        "\n{} Start tracking: tomatillo activate {}",
        "💡".style(palette.subtle),
        added_task.id
    );

    Ok(())
}
