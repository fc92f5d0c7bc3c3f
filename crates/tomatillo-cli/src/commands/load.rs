use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use thiserror::Error;
use tomatillo_core::models::NewTaskData;
use tomatillo_core::repository::Repository;

use crate::cli::LoadCommand;
use crate::util::Palette;

#[derive(Error, Debug, PartialEq)]
pub enum LoadError {
    #[error("line {line}: expected `name, estimate`, got '{content}'")]
    Format { line: usize, content: String },
    #[error("line {line}: task name is empty")]
    EmptyName { line: usize },
    #[error("line {line}: invalid estimate '{value}'")]
    Estimate { line: usize, value: String },
}

/// Parses every task line up front so a bad line aborts the import before
/// anything is written. Blank lines and `#` comments are skipped.
pub fn parse_tasks(contents: &str) -> Result<Vec<NewTaskData>, LoadError> {
    contents
        .lines()
        .enumerate()
        .map(|(index, raw)| (index + 1, raw.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, content)| parse_line(line, content))
        .collect()
}

fn parse_line(line: usize, content: &str) -> Result<NewTaskData, LoadError> {
    // Names may contain commas; the estimate is always the last field.
    let (name, estimate) = content.rsplit_once(',').ok_or_else(|| LoadError::Format {
        line,
        content: content.to_string(),
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(LoadError::EmptyName { line });
    }

    let estimate = estimate.trim();
    let estimate = estimate
        .parse::<i64>()
        .ok()
        .filter(|value| *value >= 0)
        .ok_or_else(|| LoadError::Estimate {
            line,
            value: estimate.to_string(),
        })?;

    Ok(NewTaskData {
        name: name.to_string(),
        estimate,
        created_at: None,
    })
}

pub async fn load_tasks(repo: &impl Repository, command: LoadCommand, palette: &Palette) -> Result<()> {
    let contents = tokio::fs::read_to_string(&command.file)
        .await
        .with_context(|| format!("Failed to read {}", command.file.display()))?;

    let tasks = parse_tasks(&contents)?;
    let count = tasks.len();
    for task in tasks {
        repo.add_task(task).await?;
    }

    tracing::debug!(count, file = %command.file.display(), "tasks imported");
    println!("{} Loaded {} tasks from {}", "✓".style(palette.success), count, command.file.display());
    Ok(())
}
