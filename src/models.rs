use crate::calendar::{DayCell, MonthCursor};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Working record for the current day's countdown. Exactly one record is
/// authoritative at a time; rollover replaces it wholesale and never
/// touches the completion history.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DailyTimerRecord {
    pub start_time: Option<DateTime<Local>>,
    pub elapsed_time: i64,
    pub is_completed: bool,
}

impl DailyTimerRecord {
    pub fn fresh(now: DateTime<Local>) -> Self {
        Self {
            start_time: Some(now),
            elapsed_time: 0,
            is_completed: false,
        }
    }

    /// True when the record belongs to an earlier calendar day, or to no
    /// day at all. Dates are compared in the device-local timezone; a
    /// clock moved backwards across midnight therefore looks like a new
    /// day and resets the working record.
    pub fn needs_rollover(&self, today: NaiveDate) -> bool {
        match self.start_time {
            Some(started) => started.date_naive() != today,
            None => true,
        }
    }
}

/// Map of `YYYY-MM-DD` date keys to `true`. Presence implies the six-hour
/// goal was met that day; entries are only ever added.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompletionHistory {
    #[serde(flatten)]
    days: BTreeMap<String, bool>,
}

impl CompletionHistory {
    pub fn mark_completed(&mut self, date: NaiveDate) {
        self.days.insert(date_key(date), true);
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.days.get(&date_key(date)).copied().unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TimerResponse {
    pub date: String,
    pub phase: &'static str,
    pub remaining_seconds: u32,
    pub elapsed_seconds: u32,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub progress: f64,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub today: String,
    pub cells: Vec<DayCell>,
    pub prev: MonthCursor,
    pub next: MonthCursor,
}
