//! Month grid derivation for the completion calendar.

use crate::models::CompletionHistory;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// The month the calendar is currently showing, independent of the real
/// current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn label(self) -> String {
        match self.first_day() {
            Some(first) => first.format("%B %Y").to_string(),
            None => format!("{}-{:02}", self.year, self.month),
        }
    }
}

/// One slot in the month grid. Placeholder slots carry no date and are
/// never classified as today/completed/failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub outside_month: bool,
    pub is_today: bool,
    pub is_completed: bool,
    pub is_failed: bool,
}

impl DayCell {
    fn placeholder() -> Self {
        Self {
            date: None,
            outside_month: true,
            is_today: false,
            is_completed: false,
            is_failed: false,
        }
    }

    fn classify(date: NaiveDate, today: NaiveDate, history: &CompletionHistory) -> Self {
        let completed = history.is_completed_on(date);
        Self {
            date: Some(date),
            outside_month: false,
            is_today: date == today,
            is_completed: completed,
            is_failed: date < today && !completed,
        }
    }
}

/// Derive the weekday-aligned grid for a cursor month. Leading slots pad
/// up to the weekday of day 1 (Sunday = 0), trailing slots pad the last
/// week out, so the result length is always a multiple of 7.
pub fn month_grid(
    cursor: MonthCursor,
    today: NaiveDate,
    history: &CompletionHistory,
) -> Vec<DayCell> {
    let Some(first) = cursor.first_day() else {
        return Vec::new();
    };

    let leading = first.weekday().num_days_from_sunday();
    let mut cells = Vec::with_capacity(42);
    for _ in 0..leading {
        cells.push(DayCell::placeholder());
    }

    let mut date = first;
    loop {
        cells.push(DayCell::classify(date, today, history));
        match date.succ_opt() {
            Some(next) if next.month() == cursor.month => date = next,
            _ => break,
        }
    }

    let trailing = 6 - date.weekday().num_days_from_sunday();
    for _ in 0..trailing {
        cells.push(DayCell::placeholder());
    }

    cells
}
