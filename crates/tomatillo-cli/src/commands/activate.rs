use anyhow::Result;
use chrono::Duration;
use owo_colors::OwoColorize;
use tomatillo_core::models::TrackingStatus;
use tomatillo_core::reconciler::{self, TrackingKey};
use tomatillo_core::repository::Repository;

use crate::cli::{ActivateCommand, BackfillCommand};
use crate::parser::{parse_date, resolve_slot};
use crate::util::{self, Palette};

/// `09:30-10:00 on 2024-09-20`
fn describe(key: &TrackingKey) -> String {
    let start = key.slot.start_time();
    let end = start + Duration::minutes(30);
    format!("{}-{} on {}", start.format("%H:%M"), end.format("%H:%M"), key.date)
}

fn report(key: &TrackingKey, status: TrackingStatus, palette: &Palette) {
    println!(
        "{} Task {} tracked {} (slot {}): {}",
        "✓".style(palette.success),
        key.task_id,
        describe(key),
        key.slot,
        status.style(palette.highlight)
    );
}

pub async fn activate_task(repo: &impl Repository, command: ActivateCommand, palette: &Palette) -> Result<()> {
    let (key, status) = reconciler::activate_now(repo, command.id, util::local_now()).await?;
    report(&key, status, palette);
    Ok(())
}

pub async fn backfill_task(repo: &impl Repository, command: BackfillCommand, palette: &Palette) -> Result<()> {
    let date = parse_date(&command.date, util::today())?;
    let slot = resolve_slot(command.slot, command.at.as_deref())?;
    let key = TrackingKey {
        task_id: command.id,
        date,
        slot,
    };

    let status = reconciler::reconcile(repo, key).await?;
    report(&key, status, palette);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tomatillo_core::slot::Slot;

    #[test]
    fn test_describe_last_slot_wraps_to_midnight() {
        let key = TrackingKey {
            task_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 9, 20).unwrap(),
            slot: Slot::LAST,
        };
        assert_eq!(describe(&key), "23:30-00:00 on 2024-09-20");
    }

    #[test]
    fn test_describe() {
        let key = TrackingKey {
            task_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 9, 20).unwrap(),
            slot: Slot::of(9, 45).unwrap(),
        };
        assert_eq!(describe(&key), "09:30-10:00 on 2024-09-20");
    }
}
