//! Day rollover — resets the daily flow on a cron schedule (local midnight
//! by default).

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::tracker::DailyProgressTracker;
use crate::config::validate_schedule;
use crate::error::ConfigError;

/// Next fire time of `schedule` strictly after `after`.
pub fn next_rollover<Tz: TimeZone>(
    schedule: &cron::Schedule,
    after: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    schedule.after(after).next()
}

/// Spawn the rollover task.
///
/// The schedule is validated up front; an invalid expression never reaches
/// the background task. Abort the returned handle to stop rolling over.
pub fn spawn_rollover_task(
    tracker: Arc<DailyProgressTracker>,
    schedule: &str,
) -> Result<JoinHandle<()>, ConfigError> {
    let schedule = validate_schedule(schedule)?;

    Ok(tokio::spawn(async move {
        loop {
            let now = Local::now();
            let Some(next) = next_rollover(&schedule, &now) else {
                warn!("Rollover schedule has no upcoming fire time, stopping");
                return;
            };

            let wait = (next - now).to_std().unwrap_or_default();
            info!(next_rollover = %next, "Waiting for day rollover");
            tokio::time::sleep(wait).await;

            tracker.reset_daily_flow();
        }
    }))
}
