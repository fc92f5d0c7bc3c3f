//! Tracking reconciliation.
//!
//! Each `(task, date, slot)` key moves through `Absent -> Active -> Done` as
//! activation signals arrive; `Done` absorbs further signals. The transition is
//! executed by the store as one conflict-resolving upsert, so this module never
//! reads a record before writing it.
//!
//! Reconciling a slot does not touch the task's `actual` counter. Callers that
//! want both invoke [`TaskRepository::increment_actual`] separately.
//!
//! [`TaskRepository::increment_actual`]: crate::repository::TaskRepository::increment_actual

use chrono::NaiveDateTime;

use crate::error::CoreError;
use crate::models::TrackingStatus;
use crate::repository::TrackingRepository;
use crate::slot::Slot;

/// The key a signal applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackingKey {
    pub task_id: i64,
    pub date: chrono::NaiveDate,
    pub slot: Slot,
}

impl TrackingKey {
    /// The key for the slot containing the local wall-clock instant `at`.
    pub fn at(task_id: i64, at: NaiveDateTime) -> Self {
        Self {
            task_id,
            date: at.date(),
            slot: Slot::from_time(at.time()),
        }
    }
}

/// Applies one activation signal and returns the resulting status.
pub async fn reconcile<R>(store: &R, key: TrackingKey) -> Result<TrackingStatus, CoreError>
where
    R: TrackingRepository + Sync + ?Sized,
{
    let status = store.upsert_tracking(key.task_id, key.date, key.slot).await?;
    tracing::debug!(
        task_id = key.task_id,
        date = %key.date,
        slot = key.slot.index(),
        %status,
        "slot reconciled"
    );
    Ok(status)
}

/// Signals the slot that contains `now`.
pub async fn activate_now<R>(
    store: &R,
    task_id: i64,
    now: NaiveDateTime,
) -> Result<(TrackingKey, TrackingStatus), CoreError>
where
    R: TrackingRepository + Sync + ?Sized,
{
    let key = TrackingKey::at(task_id, now);
    let status = reconcile(store, key).await?;
    Ok((key, status))
}
