//! Upcoming executions for a validated schedule, rendered in its timezone.

use super::describe::describe;
use super::expression::parse_schedule;
use super::types::SchedulePreview;
use crate::error::ScheduleError;
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use cron::Schedule;
use std::collections::HashSet;

pub const MIN_PREVIEW_COUNT: usize = 1;
pub const MAX_PREVIEW_COUNT: usize = 10;
pub const DEFAULT_PREVIEW_COUNT: usize = 5;

/// `Saturday, March 1, 2025 at 9:00 AM EST`
const EXECUTION_FORMAT: &str = "%A, %B %-d, %Y at %-I:%M %p %Z";

/// Describe `cron` and list its next `count` executions after now.
///
/// Inputs are expected to be validated already: empty fields and a `count`
/// outside `1..=10` are caller bugs and come back as errors, not as
/// validation messages.
pub fn preview(cron: &str, timezone: &str, count: usize) -> Result<SchedulePreview, ScheduleError> {
    preview_at(cron, timezone, count, Utc::now())
}

/// Same as [`preview`] with an explicit "now".
pub fn preview_at(
    cron: &str,
    timezone: &str,
    count: usize,
    now: DateTime<Utc>,
) -> Result<SchedulePreview, ScheduleError> {
    if !(MIN_PREVIEW_COUNT..=MAX_PREVIEW_COUNT).contains(&count) {
        return Err(ScheduleError::InvalidCount(count));
    }
    let cron = cron.trim();
    if cron.is_empty() {
        return Err(ScheduleError::MissingCron);
    }
    let timezone = timezone.trim();
    if timezone.is_empty() {
        return Err(ScheduleError::MissingTimezone);
    }

    let tz: Tz = timezone
        .parse()
        .map_err(|e| ScheduleError::PreviewFailed(format!("{}", e)))?;
    let schedules = occurrence_schedules(cron)?;

    let local_now = now.with_timezone(&tz);
    let dates = next_occurrences(&schedules, &local_now, count);

    // Abbreviation for "now"; individual executions carry their own.
    let description = format!("{} ({})", describe(cron), local_now.format("%Z"));

    tracing::debug!(cron, timezone, count = dates.len(), "generated schedule preview");

    Ok(SchedulePreview {
        description,
        next_executions: dates
            .iter()
            .map(|dt| dt.format(EXECUTION_FORMAT).to_string())
            .collect(),
        execution_dates: dates.iter().map(|dt| dt.with_timezone(&Utc)).collect(),
    })
}

/// Schedules whose merged occurrences make up the expression.
///
/// Standard cron fires when either a restricted day of month or a
/// restricted day of week matches, while the `cron` crate requires both, so
/// that case is split into two schedules.
fn occurrence_schedules(cron: &str) -> Result<Vec<Schedule>, ScheduleError> {
    let fields: Vec<&str> = cron.split_whitespace().collect();
    let parse = |expr: &str| {
        parse_schedule(expr).map_err(|e| ScheduleError::PreviewFailed(e.to_string()))
    };

    let len = fields.len();
    if len < 5 {
        return Ok(vec![parse(cron)?]);
    }
    let (dom, dow) = (len - 3, len - 1);
    if is_unrestricted(fields[dom]) || is_unrestricted(fields[dow]) {
        return Ok(vec![parse(cron)?]);
    }

    let with_field = |index: usize| {
        let mut copy = fields.clone();
        copy[index] = "*";
        copy.join(" ")
    };
    Ok(vec![parse(&with_field(dow))?, parse(&with_field(dom))?])
}

fn is_unrestricted(field: &str) -> bool {
    field == "*" || field == "?"
}

/// Merge the schedules' iterators in time order, dropping duplicates.
///
/// When clocks fall back the `cron` crate yields a repeated wall-clock time
/// twice; only the first instance is kept.
fn next_occurrences(schedules: &[Schedule], after: &DateTime<Tz>, count: usize) -> Vec<DateTime<Tz>> {
    let mut iters: Vec<_> = schedules.iter().map(|s| s.after(after).peekable()).collect();
    let mut seen_local: HashSet<NaiveDateTime> = HashSet::new();
    let mut out = Vec::with_capacity(count);

    while out.len() < count {
        let Some(next) = iters.iter_mut().filter_map(|it| it.peek().cloned()).min() else {
            break;
        };
        for it in iters.iter_mut() {
            if it.peek() == Some(&next) {
                it.next();
            }
        }
        if seen_local.insert(next.naive_local()) {
            out.push(next);
        }
    }
    out
}
