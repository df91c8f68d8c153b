use crate::calendar::{MonthCursor, month_grid};
use crate::models::{
    CalendarResponse, CompletionHistory, DailyTimerRecord, TimerResponse, date_key,
};
use crate::storage::{COMPLETION_HISTORY_KEY, Store, TODAY_TIMER_KEY};
use crate::timer::{ChallengeTimer, Tick, time_parts};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Everything the aggregate owns. Handlers and the ticker only reach it
/// through `AppState` methods, so every mutation happens under one lock.
#[derive(Debug)]
struct ChallengeData {
    record: DailyTimerRecord,
    history: CompletionHistory,
    timer: ChallengeTimer,
    visible: bool,
}

#[derive(Clone)]
pub struct AppState {
    store: Store,
    data: Arc<Mutex<ChallengeData>>,
}

impl AppState {
    /// Load both records, roll a stale day over, and boot the machine
    /// paused: a freshly started server has no viewer yet.
    pub async fn load(store: Store) -> Self {
        let record = store
            .load::<DailyTimerRecord>(TODAY_TIMER_KEY)
            .await
            .unwrap_or_default();
        let history = store
            .load::<CompletionHistory>(COMPLETION_HISTORY_KEY)
            .await
            .unwrap_or_default();

        let state = Self {
            store,
            data: Arc::new(Mutex::new(ChallengeData {
                timer: ChallengeTimer::new(record.elapsed_time, record.is_completed, false),
                record,
                history,
                visible: false,
            })),
        };
        state.check_rollover().await;
        state
    }

    /// One second of countdown. Advances only while the page is visible;
    /// persists the working record on every advance and the history map
    /// when the day completes.
    pub async fn apply_tick(&self) {
        let mut data = self.data.lock().await;
        match data.timer.tick() {
            Tick::Advanced { elapsed_seconds } => {
                data.record.elapsed_time = i64::from(elapsed_seconds);
                if data.record.start_time.is_none() {
                    data.record.start_time = Some(Local::now());
                }
                self.persist_timer(&data).await;
            }
            Tick::Completed { elapsed_seconds } => {
                data.record.elapsed_time = i64::from(elapsed_seconds);
                data.record.is_completed = true;
                let today = Local::now().date_naive();
                data.history.mark_completed(today);
                info!("six-hour challenge completed for {}", date_key(today));
                self.persist_timer(&data).await;
                self.persist_history(&data).await;
            }
            Tick::Idle => {}
        }
    }

    pub async fn set_visibility(&self, visible: bool) -> TimerResponse {
        let mut data = self.data.lock().await;
        data.visible = visible;
        data.timer.set_visible(visible);
        Self::snapshot_of(&data)
    }

    /// Replace the working record when the persisted day is not today.
    /// History entries from earlier days are left untouched.
    pub async fn check_rollover(&self) {
        let now = Local::now();
        let mut data = self.data.lock().await;
        if data.record.needs_rollover(now.date_naive()) {
            info!("new day detected, resetting working timer");
            let visible = data.visible;
            data.record = DailyTimerRecord::fresh(now);
            data.timer = ChallengeTimer::new(0, false, visible);
            self.persist_timer(&data).await;
        }
    }

    pub async fn timer_snapshot(&self) -> TimerResponse {
        let data = self.data.lock().await;
        Self::snapshot_of(&data)
    }

    pub async fn calendar(&self, cursor: MonthCursor) -> CalendarResponse {
        let today = Local::now().date_naive();
        let data = self.data.lock().await;
        CalendarResponse {
            year: cursor.year,
            month: cursor.month,
            label: cursor.label(),
            today: date_key(today),
            cells: month_grid(cursor, today, &data.history),
            prev: cursor.prev(),
            next: cursor.next(),
        }
    }

    fn snapshot_of(data: &ChallengeData) -> TimerResponse {
        let parts = time_parts(data.timer.remaining_seconds());
        TimerResponse {
            date: date_key(Local::now().date_naive()),
            phase: data.timer.phase().as_str(),
            remaining_seconds: data.timer.remaining_seconds(),
            elapsed_seconds: data.timer.elapsed_seconds(),
            hours: format!("{:02}", parts.hours),
            minutes: format!("{:02}", parts.minutes),
            seconds: format!("{:02}", parts.seconds),
            progress: data.timer.progress(),
        }
    }

    async fn persist_timer(&self, data: &ChallengeData) {
        if let Err(err) = self.store.save(TODAY_TIMER_KEY, &data.record).await {
            error!("failed to persist timer record: {err}");
        }
    }

    async fn persist_history(&self, data: &ChallengeData) {
        if let Err(err) = self.store.save(COMPLETION_HISTORY_KEY, &data.history).await {
            error!("failed to persist completion history: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TOTAL_DURATION_SECS;
    use chrono::Duration;

    fn scratch_store() -> Store {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut dir = std::env::temp_dir();
        dir.push(format!("study_state_{}_{nanos}", std::process::id()));
        Store::new(dir)
    }

    #[tokio::test]
    async fn final_tick_completes_and_records_history() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();
        let record = DailyTimerRecord {
            start_time: Some(Local::now()),
            elapsed_time: i64::from(TOTAL_DURATION_SECS) - 2,
            is_completed: false,
        };
        store.save(TODAY_TIMER_KEY, &record).await.unwrap();

        let state = AppState::load(store.clone()).await;
        let today = Local::now().date_naive();

        let snapshot = state.set_visibility(true).await;
        assert_eq!(snapshot.phase, "running");

        state.apply_tick().await;
        state.apply_tick().await;

        let snapshot = state.timer_snapshot().await;
        assert_eq!(snapshot.phase, "completed");
        assert_eq!(snapshot.remaining_seconds, 0);
        assert_eq!(snapshot.elapsed_seconds, TOTAL_DURATION_SECS);

        let history: CompletionHistory = store.load(COMPLETION_HISTORY_KEY).await.expect("history");
        assert!(history.is_completed_on(today));

        // Further ticks and rollover checks leave the completed day alone.
        state.apply_tick().await;
        state.check_rollover().await;
        let snapshot = state.timer_snapshot().await;
        assert_eq!(snapshot.phase, "completed");
        assert_eq!(snapshot.elapsed_seconds, TOTAL_DURATION_SECS);
        let history: CompletionHistory = store.load(COMPLETION_HISTORY_KEY).await.expect("history");
        assert!(history.is_completed_on(today));
    }

    #[tokio::test]
    async fn stale_record_resets_but_history_survives() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();

        let yesterday_start = Local::now() - Duration::days(1);
        let record = DailyTimerRecord {
            start_time: Some(yesterday_start),
            elapsed_time: i64::from(TOTAL_DURATION_SECS),
            is_completed: true,
        };
        store.save(TODAY_TIMER_KEY, &record).await.unwrap();

        let mut history = CompletionHistory::default();
        history.mark_completed(yesterday_start.date_naive());
        store.save(COMPLETION_HISTORY_KEY, &history).await.unwrap();

        let state = AppState::load(store.clone()).await;

        let snapshot = state.timer_snapshot().await;
        assert_eq!(snapshot.phase, "paused");
        assert_eq!(snapshot.elapsed_seconds, 0);
        assert_eq!(snapshot.remaining_seconds, TOTAL_DURATION_SECS);

        let persisted: DailyTimerRecord = store.load(TODAY_TIMER_KEY).await.expect("record");
        assert!(!persisted.is_completed);
        assert_eq!(persisted.elapsed_time, 0);

        let history: CompletionHistory = store.load(COMPLETION_HISTORY_KEY).await.expect("history");
        assert!(history.is_completed_on(yesterday_start.date_naive()));
    }

    #[tokio::test]
    async fn boot_with_no_records_starts_fresh_and_paused() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();

        let state = AppState::load(store.clone()).await;
        let snapshot = state.timer_snapshot().await;
        assert_eq!(snapshot.phase, "paused");
        assert_eq!(snapshot.remaining_seconds, TOTAL_DURATION_SECS);
        assert_eq!(snapshot.hours, "06");
        assert_eq!(snapshot.minutes, "00");
        assert_eq!(snapshot.seconds, "00");
        assert_eq!(snapshot.progress, 0.0);

        // Startup rollover persisted a fresh record for today.
        let persisted: DailyTimerRecord = store.load(TODAY_TIMER_KEY).await.expect("record");
        assert!(persisted.start_time.is_some());
        assert!(!persisted.needs_rollover(Local::now().date_naive()));
    }

    #[tokio::test]
    async fn ticks_while_hidden_do_not_advance() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();

        let state = AppState::load(store).await;
        state.apply_tick().await;
        state.apply_tick().await;

        let snapshot = state.timer_snapshot().await;
        assert_eq!(snapshot.elapsed_seconds, 0);

        state.set_visibility(true).await;
        state.apply_tick().await;
        let snapshot = state.timer_snapshot().await;
        assert_eq!(snapshot.elapsed_seconds, 1);
        assert_eq!(snapshot.seconds, "59");
    }
}
