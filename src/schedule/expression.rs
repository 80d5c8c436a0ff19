//! Whole-expression validation and the hand-off to the `cron` crate.
//!
//! Users write standard 5-field cron (`min hour day month weekday`) or the
//! 6-field form with a leading seconds field. The `cron` crate wants 6 fields
//! and numbers weekdays 1-7 starting on Sunday, so validated expressions are
//! rewritten before being parsed there.

use super::field::{CronField, fields_for, parse_number};
use super::types::{ValidationField, ValidationResult};
use cron::Schedule;
use regex::Regex;
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::LazyLock;

pub const REQUIRED_MESSAGE: &str = "Cron expression is required";
pub const INVALID_CHARACTERS_MESSAGE: &str = "Cron expression contains invalid characters";
pub const OUT_OF_RANGE_MESSAGE: &str = "Cron expression contains a value that is out of range";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid cron expression format";

/// The `cron` crate reports bounds as "... must be between 1 and 59 ...".
static LIBRARY_BOUNDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bbetween\s+\d+\s+and\s+\d+|out of range|bound").expect("static regex")
});

/// Validate a full cron expression: field count, then each field, then a
/// semantic parse by the `cron` crate.
pub fn validate_cron(expr: &str) -> ValidationResult {
    let expr = expr.trim();
    if expr.is_empty() {
        return ValidationResult::invalid(ValidationField::Cron, REQUIRED_MESSAGE);
    }

    let fields: Vec<&str> = expr.split_whitespace().collect();
    if fields.len() != 5 && fields.len() != 6 {
        return ValidationResult::invalid(
            ValidationField::Cron,
            format!(
                "Cron expression must have 5 or 6 fields (got {}). \
                 Example: \"0 9 * * 1-5\" runs at 9:00 AM on weekdays",
                fields.len()
            ),
        );
    }

    for (value, field) in fields.iter().zip(fields_for(fields.len())) {
        let result = field.validate(value);
        if !result.is_valid {
            tracing::debug!(field = field.name(), value, "cron field rejected");
            return result;
        }
    }

    match parse_schedule(expr) {
        Ok(_) => ValidationResult::valid(),
        Err(e) => {
            tracing::debug!(expr, error = %e, "cron crate rejected expression");
            ValidationResult::invalid(ValidationField::Cron, canonical_parse_error(&e))
        }
    }
}

/// Parse an expression with the `cron` crate after rewriting it into the
/// crate's dialect.
pub fn parse_schedule(expr: &str) -> Result<Schedule, cron::error::Error> {
    Schedule::from_str(&to_library_expression(expr))
}

/// Rewrite a 5- or 6-field expression for the `cron` crate: prepend a zero
/// seconds field, turn `?` into `*` and renumber weekdays.
///
/// Anything that is not 5 or 6 fields is returned unchanged so the crate
/// reports the problem itself.
pub fn to_library_expression(expr: &str) -> String {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    let mut six: Vec<String> = match fields.len() {
        5 => std::iter::once("0")
            .chain(fields.iter().copied())
            .map(str::to_string)
            .collect(),
        6 => fields.iter().map(|f| f.to_string()).collect(),
        _ => return expr.to_string(),
    };

    if six[3] == "?" {
        six[3] = "*".to_string();
    }
    six[5] = library_weekdays(&six[5]);
    six.join(" ")
}

/// Standard weekdays (0-7, Sunday = 0 or 7) to the crate's 1-7 (Sunday = 1).
/// Tokens that cannot be expanded pass through untouched.
fn library_weekdays(field: &str) -> String {
    if field == "*" || field == "?" {
        return "*".to_string();
    }
    let Some(days) = expand_values(field, CronField::DayOfWeek.range()) else {
        return field.to_string();
    };

    let days: BTreeSet<u32> = days.into_iter().map(|d| d % 7).collect();
    if days.len() == 7 {
        return "*".to_string();
    }
    days.iter()
        .map(|d| (d + 1).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Expand a field into the concrete values it matches.
pub(crate) fn expand_values(field: &str, range: (u32, u32)) -> Option<BTreeSet<u32>> {
    let (min, max) = range;
    let mut values = BTreeSet::new();

    for part in field.split(',') {
        let part = part.trim();
        let (base, step) = match part.split_once('/') {
            Some((base, step)) => (base, parse_number(step).filter(|s| *s > 0)?),
            None => (part, 1),
        };

        let (start, end) = if base == "*" || base == "?" {
            (min, max)
        } else if let Some((a, b)) = base.split_once('-') {
            (parse_number(a)?, parse_number(b)?)
        } else {
            let value = parse_number(base)?;
            if part.contains('/') {
                (value, max)
            } else {
                (value, value)
            }
        };

        if start < min || end > max || start > end {
            return None;
        }
        values.extend((start..=end).step_by(step as usize));
    }

    Some(values)
}

/// Map a `cron` crate failure onto one of the fixed user-facing messages.
/// The library's own text is never shown.
fn canonical_parse_error(error: &cron::error::Error) -> &'static str {
    classify_parse_detail(&error.to_string())
}

fn classify_parse_detail(detail: &str) -> &'static str {
    if LIBRARY_BOUNDS.is_match(detail) {
        OUT_OF_RANGE_MESSAGE
    } else if detail.contains("character") || detail.contains("unexpected") {
        INVALID_CHARACTERS_MESSAGE
    } else {
        INVALID_FORMAT_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Utc, Weekday};

    #[test]
    fn test_empty_and_whitespace_are_required() {
        for input in ["", "   ", "\t\n"] {
            let result = validate_cron(input);
            assert_eq!(result.error(ValidationField::Cron), Some(REQUIRED_MESSAGE));
        }
    }

    #[test]
    fn test_wrong_field_count_names_count() {
        let result = validate_cron("invalid");
        let msg = result.error(ValidationField::Cron).unwrap();
        assert!(msg.contains("got 1"));
        assert!(msg.contains("0 9 * * 1-5"));

        assert!(!validate_cron("* * * * * * *").is_valid);
    }

    #[test]
    fn test_valid_five_and_six_field() {
        assert!(validate_cron("0 9 * * *").is_valid);
        assert!(validate_cron("0 9 * * 1-5").is_valid);
        assert!(validate_cron("*/5 * * * *").is_valid);
        assert!(validate_cron("0 0 9 * * *").is_valid);
        assert!(validate_cron("30 */10 * * * 0,6").is_valid);
    }

    #[test]
    fn test_field_error_is_first_failure() {
        let result = validate_cron("0 24 32 * *");
        let msg = result.error(ValidationField::Cron).unwrap();
        assert!(msg.contains("hour"));
    }

    #[test]
    fn test_six_field_uses_seconds_range() {
        let result = validate_cron("60 0 9 * * *");
        assert!(result.error(ValidationField::Cron).unwrap().contains("second"));
    }

    #[test]
    fn test_sunday_as_zero_and_seven() {
        assert!(validate_cron("0 9 * * 0").is_valid);
        assert!(validate_cron("0 9 * * 7").is_valid);
        assert!(validate_cron("0 9 * * 5-7").is_valid);
    }

    #[test]
    fn test_library_expression_rewrites() {
        assert_eq!(to_library_expression("0 9 * * *"), "0 0 9 * * *");
        assert_eq!(to_library_expression("0 9 ? * 1-5"), "0 0 9 * * 2,3,4,5,6");
        assert_eq!(to_library_expression("0 9 * * 0,7"), "0 0 9 * * 1");
        assert_eq!(to_library_expression("0 9 * * 0-7"), "0 0 9 * * *");
        assert_eq!(to_library_expression("bad"), "bad");
    }

    #[test]
    fn test_weekday_one_is_monday_after_rewrite() {
        let schedule = parse_schedule("0 9 * * 1").unwrap();
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        for next in schedule.after(&start).take(3) {
            assert_eq!(next.weekday(), Weekday::Mon);
        }
    }

    #[test]
    fn test_expand_values_shapes() {
        let hours = expand_values("*/6", (0, 23)).unwrap();
        assert_eq!(hours.into_iter().collect::<Vec<_>>(), vec![0, 6, 12, 18]);

        let list = expand_values("1-3,10", (1, 31)).unwrap();
        assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 10]);

        assert!(expand_values("5-1", (0, 7)).is_none());
        assert!(expand_values("x", (0, 7)).is_none());
    }

    #[test]
    fn test_oversized_steps_are_out_of_range() {
        for expr in ["*/60 * * * *", "*/100 * * * *", "0 */24 * * *", "0 0 1 */13 *"] {
            let result = validate_cron(expr);
            assert!(!result.is_valid, "{expr}");
            assert_eq!(
                result.error(ValidationField::Cron),
                Some(OUT_OF_RANGE_MESSAGE),
                "{expr}"
            );
        }
    }

    #[test]
    fn test_library_detail_is_bucketed() {
        assert_eq!(
            classify_parse_detail("Minutes must be between 1 and 59. ('60' specified.)"),
            OUT_OF_RANGE_MESSAGE
        );
        assert_eq!(
            classify_parse_detail("Months must be between 1 and 12. ('13' specified.)"),
            OUT_OF_RANGE_MESSAGE
        );
        assert_eq!(
            classify_parse_detail("Invalid pattern: unexpected character 'x'"),
            INVALID_CHARACTERS_MESSAGE
        );
        assert_eq!(
            classify_parse_detail("Invalid expression: nom error"),
            INVALID_FORMAT_MESSAGE
        );
    }

    #[test]
    fn test_accepted_expressions_parse_in_library() {
        for expr in [
            "0 9 * * *",
            "*/15 * * * *",
            "0 0 1 1 *",
            "0 8 * * 1-5",
            "0 0 29 2 *",
            "15 10 * * 6,0",
            "0 0 0 * * 7",
        ] {
            assert!(validate_cron(expr).is_valid, "{expr}");
            assert!(parse_schedule(expr).is_ok(), "{expr}");
        }
    }
}
