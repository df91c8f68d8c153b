//! Background task driving the countdown and the day rollover.

use crate::state::AppState;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

/// Seconds between rollover checks. Rollover only compares calendar
/// dates, so the cadence merely bounds how long after midnight the reset
/// can land.
const ROLLOVER_CHECK_SECS: u64 = 60;

pub async fn run(state: AppState) {
    info!("starting countdown ticker");
    let mut interval = time::interval(Duration::from_secs(1));
    // A host that slept must not burst-tick the countdown on wake.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately; consume it
    // so the countdown starts a full second after boot.
    interval.tick().await;

    let mut seconds: u64 = 0;
    loop {
        interval.tick().await;
        seconds += 1;
        state.apply_tick().await;
        if seconds % ROLLOVER_CHECK_SECS == 0 {
            state.check_rollover().await;
        }
    }
}
