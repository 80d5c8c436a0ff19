//! Advisory warnings for days of the month that some months do not have.

use super::field::{CronField, parse_number};
use std::collections::BTreeSet;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const THIRTY_DAY_MONTHS: [u32; 4] = [4, 6, 9, 11];

/// Every day above this exists in every month.
const SAFE_DAY_LIMIT: u32 = 28;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarAnalysis {
    pub warnings: Vec<String>,
}

/// Look for scheduled days that will be skipped in some months.
///
/// Only 5-field expressions with a restricted day of month and an
/// unrestricted day of week are inspected; when both are restricted cron
/// matches either one, so a missing day does not mean a missed run.
pub fn analyze(expr: &str) -> CalendarAnalysis {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    let [_, _, day_of_month, month, day_of_week] = fields[..] else {
        return CalendarAnalysis::default();
    };
    if day_of_month == "*" || day_of_week != "*" {
        return CalendarAnalysis::default();
    }

    let problematic: BTreeSet<u32> = decompose(day_of_month, CronField::DayOfMonth.range())
        .into_iter()
        .filter(|day| *day > SAFE_DAY_LIMIT)
        .collect();
    if problematic.is_empty() {
        return CalendarAnalysis::default();
    }

    let warnings = if month == "*" {
        problematic.iter().filter_map(|day| every_month_warning(*day)).collect()
    } else {
        decompose(month, CronField::Month.range())
            .into_iter()
            .flat_map(|m| specific_month_warnings(m, &problematic))
            .collect()
    };

    CalendarAnalysis { warnings }
}

fn every_month_warning(day: u32) -> Option<String> {
    let text = match day {
        29 => "Day 29 will be skipped in February during non-leap years",
        30 => "Day 30 will be skipped in February",
        31 => {
            "Day 31 will be skipped in February, April, June, September and November \
             (months with fewer than 31 days)"
        }
        _ => return None,
    };
    Some(text.to_string())
}

fn specific_month_warnings(month: u32, days: &BTreeSet<u32>) -> Vec<String> {
    let Some(name) = month_name(month) else {
        return Vec::new();
    };

    let mut warnings = Vec::new();
    for &day in days {
        if month == 2 && day > 29 {
            warnings.push(format!("Day {} does not exist in {}", day, name));
        } else if month == 2 && day == 29 {
            warnings.push(format!(
                "Day 29 of {} only exists in leap years; the schedule will be skipped in other years",
                name
            ));
        } else if THIRTY_DAY_MONTHS.contains(&month) && day == 31 {
            warnings.push(format!(
                "Day 31 does not exist in {} (this month only has 30 days)",
                name
            ));
        }
    }
    warnings
}

fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Single values, comma lists and simple ranges, limited to `range`. Steps
/// and wildcards contribute nothing.
fn decompose(field: &str, range: (u32, u32)) -> BTreeSet<u32> {
    let (min, max) = range;
    let mut values = BTreeSet::new();
    for part in field.split(',') {
        let part = part.trim();
        if part.contains('/') || part == "*" || part == "?" {
            continue;
        }
        if let Some((start, end)) = part.split_once('-') {
            if let (Some(start), Some(end)) = (parse_number(start), parse_number(end)) {
                values.extend(start.max(min)..=end.min(max));
            }
        } else if let Some(value) = parse_number(part).filter(|v| (min..=max).contains(v)) {
            values.insert(value);
        }
    }
    values
}
