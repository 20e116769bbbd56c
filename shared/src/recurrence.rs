//! Reminder recurrence evaluation
//!
//! Resolves a reminder's recurrence pattern over a half-open query window
//! `[from, to)` into the concrete timestamps it would fire at. This is a
//! pure calculation: no I/O, no shared state, and identical inputs always
//! produce the identical sequence, so it is safe to call from any number
//! of tasks at once.
//!
//! All timestamps are UTC. Conversion from client-local time happens at
//! the API boundary, never in here.

use crate::models::{Recurrence, Reminder};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use thiserror::Error;

/// Errors surfaced by recurrence evaluation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    /// Query window is malformed (`from` after `to`)
    #[error("Invalid query range: {from} is after {to}")]
    InvalidRange {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    /// A structural invariant of the reminder makes recurrence undefined
    #[error("Invalid reminder: {0}")]
    InvalidReminder(String),
}

/// Resolve every occurrence of `reminder` inside `[from, to)`, ordered
/// and duplicate-free
///
/// Occurrences exactly at `from` are included, occurrences exactly at
/// `to` are excluded. Inactive reminders yield an empty sequence. A
/// monthly recurrence anchored on a day the month does not have (e.g.
/// day 31 in February) skips that month rather than clamping; yearly
/// recurrences anchored on Feb 29 skip non-leap years the same way.
pub fn occurrences(
    reminder: &Reminder,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DateTime<Utc>>, RecurrenceError> {
    if from > to {
        return Err(RecurrenceError::InvalidRange { from, to });
    }
    reminder
        .recurrence
        .check()
        .map_err(RecurrenceError::InvalidReminder)?;

    if !reminder.is_active {
        return Ok(Vec::new());
    }

    // Date-level bounds shared by every mode: the first candidate day is
    // the later of the reminder's start date and the window start, the
    // last is the earlier of the end date and the window end.
    let first_day = reminder.start_date.max(from.date_naive());
    let last_day = match reminder.end_date {
        Some(end) => end.min(to.date_naive()),
        None => to.date_naive(),
    };

    let mut out = Vec::new();
    match &reminder.recurrence {
        Recurrence::Daily => {
            for date in days(first_day, last_day) {
                push_if_in_window(&mut out, fire_at(reminder, date), from, to);
            }
        }
        Recurrence::Weekly { days_of_week } => {
            for date in days(first_day, last_day) {
                if days_of_week
                    .iter()
                    .any(|day| day.weekday() == date.weekday())
                {
                    push_if_in_window(&mut out, fire_at(reminder, date), from, to);
                }
            }
        }
        Recurrence::Monthly { day_of_month } => {
            let mut ym = month_index(first_day);
            let last_ym = month_index(last_day);
            while ym <= last_ym {
                let (year, month) = (ym.div_euclid(12), ym.rem_euclid(12) as u32 + 1);
                // Months without the anchor day are skipped, not clamped
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, *day_of_month) {
                    if date >= reminder.start_date && date <= last_day {
                        push_if_in_window(&mut out, fire_at(reminder, date), from, to);
                    }
                }
                ym += 1;
            }
        }
        Recurrence::Yearly { month, day } => {
            for year in first_day.year()..=last_day.year() {
                // Feb 29 anchors resolve to None in non-leap years
                if let Some(date) = NaiveDate::from_ymd_opt(year, *month, *day) {
                    if date >= reminder.start_date && date <= last_day {
                        push_if_in_window(&mut out, fire_at(reminder, date), from, to);
                    }
                }
            }
        }
        Recurrence::Custom { interval } => {
            let step_secs = interval.total_seconds();
            let start_ts = fire_at(reminder, reminder.start_date);
            let mut index = if from <= start_ts {
                0
            } else {
                // First multiple of the step at or after the window start
                div_ceil((from - start_ts).num_seconds(), step_secs)
            };
            loop {
                let ts = start_ts + Duration::seconds(index * step_secs);
                if ts >= to {
                    break;
                }
                if let Some(end) = reminder.end_date {
                    if ts.date_naive() > end {
                        break;
                    }
                }
                out.push(ts);
                index += 1;
            }
        }
    }

    Ok(out)
}

/// First occurrence of `reminder` at or after `after`, or `None` if the
/// recurrence has ended (or the reminder is inactive)
pub fn next_occurrence(
    reminder: &Reminder,
    after: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, RecurrenceError> {
    reminder
        .recurrence
        .check()
        .map_err(RecurrenceError::InvalidReminder)?;

    if !reminder.is_active {
        return Ok(None);
    }

    let start_ts = fire_at(reminder, reminder.start_date);
    let from = after.max(start_ts);

    if let Some(end) = reminder.end_date {
        if from.date_naive() > end {
            return Ok(None);
        }
    }

    // Custom recurrences are plain interval arithmetic, no scanning needed
    if let Recurrence::Custom { interval } = &reminder.recurrence {
        let step_secs = interval.total_seconds();
        let index = if from <= start_ts {
            0
        } else {
            div_ceil((from - start_ts).num_seconds(), step_secs)
        };
        let ts = start_ts + Duration::seconds(index * step_secs);
        if let Some(end) = reminder.end_date {
            if ts.date_naive() > end {
                return Ok(None);
            }
        }
        return Ok(Some(ts));
    }

    // Calendar modes: scan widening windows. The widest legal gap between
    // consecutive occurrences is just under 8 years (a yearly reminder
    // anchored on Feb 29), so an empty 9-year scan means the recurrence
    // produces nothing after `from`.
    for horizon_days in [62, 800, 3300] {
        let to = from + Duration::days(horizon_days);
        if let Some(ts) = occurrences(reminder, from, to)?.into_iter().next() {
            return Ok(Some(ts));
        }
        if let Some(end) = reminder.end_date {
            if to.date_naive() > end {
                break;
            }
        }
    }
    Ok(None)
}

/// Combine a reminder's fire time with a calendar day, in UTC
fn fire_at(reminder: &Reminder, date: NaiveDate) -> DateTime<Utc> {
    date.and_time(reminder.time).and_utc()
}

fn push_if_in_window(
    out: &mut Vec<DateTime<Utc>>,
    ts: DateTime<Utc>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) {
    // Half-open window: `from` inclusive, `to` exclusive
    if ts >= from && ts < to {
        out.push(ts);
    }
}

/// Inclusive day iterator
fn days(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(
        if first <= last { Some(first) } else { None },
        move |date| date.succ_opt().filter(|next| *next <= last),
    )
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn div_ceil(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator - 1) / denominator
}
