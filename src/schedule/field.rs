//! Positional cron fields and single-field syntax validation.

use super::types::{ValidationField, ValidationResult};

/// One positional field of a cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronField {
    Second,
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

/// Fields of the 6-field form. A 5-field expression starts at offset 1.
pub const FIELDS: [CronField; 6] = [
    CronField::Second,
    CronField::Minute,
    CronField::Hour,
    CronField::DayOfMonth,
    CronField::Month,
    CronField::DayOfWeek,
];

impl CronField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day of month",
            Self::Month => "month",
            Self::DayOfWeek => "day of week",
        }
    }

    /// Inclusive numeric range. Day of week accepts both 0 and 7 for Sunday.
    pub fn range(self) -> (u32, u32) {
        match self {
            Self::Second | Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 7),
        }
    }

    pub fn validate(self, value: &str) -> ValidationResult {
        validate_field(value, self.name(), self.range())
    }
}

/// Fields present in an expression of `count` fields, in order.
pub fn fields_for(count: usize) -> &'static [CronField] {
    match count {
        6 => &FIELDS,
        _ => &FIELDS[1..],
    }
}

/// Validate one field against `range`.
///
/// Syntax classes are tried in a fixed order and the first match decides:
/// wildcard, range (`-`), step (`/`), list (`,`), then a plain number.
///
/// # Panics
/// Panics when `range` is empty (`min > max`); that is a caller bug.
pub fn validate_field(value: &str, field_name: &str, range: (u32, u32)) -> ValidationResult {
    let (min, max) = range;
    assert!(
        min <= max,
        "invalid range {}-{} for {} field",
        min,
        max,
        field_name
    );

    match check_field(value, field_name, min, max) {
        Ok(()) => ValidationResult::valid(),
        Err(message) => ValidationResult::invalid(ValidationField::Cron, message),
    }
}

fn check_field(value: &str, field: &str, min: u32, max: u32) -> Result<(), String> {
    if value == "*" || value == "?" {
        return Ok(());
    }

    if value.contains('-') {
        return check_range(value, field, min, max);
    }

    if value.contains('/') {
        return check_step(value, field, min, max);
    }

    if value.contains(',') {
        for part in value.split(',') {
            check_field(part.trim(), field, min, max)?;
        }
        return Ok(());
    }

    let number = parse_number(value).ok_or_else(|| {
        format!(
            "Invalid {} value: \"{}\". Must be a number between {} and {}",
            field, value, min, max
        )
    })?;
    if number < min || number > max {
        return Err(format!(
            "Invalid {} value: {}. Must be between {} and {}",
            field, number, min, max
        ));
    }
    Ok(())
}

fn check_range(value: &str, field: &str, min: u32, max: u32) -> Result<(), String> {
    let parts: Vec<&str> = value.split('-').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid range in {} field: \"{}\". Use start-end, e.g. 1-5",
            field, value
        ));
    }

    let (Some(start), Some(end)) = (parse_number(parts[0]), parse_number(parts[1])) else {
        return Err(format!(
            "Invalid range in {} field: \"{}\" has a non-numeric bound",
            field, value
        ));
    };

    if start < min || start > max || end < min || end > max {
        return Err(format!(
            "Range {} in {} field is outside {}-{}",
            value, field, min, max
        ));
    }
    if start > end {
        return Err(format!(
            "Invalid range in {} field: start {} is greater than end {}",
            field, start, end
        ));
    }
    Ok(())
}

fn check_step(value: &str, field: &str, min: u32, max: u32) -> Result<(), String> {
    let Some((base, step)) = value.split_once('/') else {
        return Err(format!("Invalid step in {} field: \"{}\"", field, value));
    };

    match parse_number(step) {
        Some(n) if n >= 1 => {}
        _ => {
            return Err(format!(
                "Invalid step value in {} field: \"{}\". Step must be a positive integer",
                field, step
            ));
        }
    }

    if base != "*" {
        check_field(base, field, min, max)?;
    }
    Ok(())
}

/// Digits only: signs, spaces and empty strings are rejected.
pub(crate) fn parse_number(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(value: &str, field: CronField) -> String {
        field
            .validate(value)
            .error(ValidationField::Cron)
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_wildcards_are_valid() {
        assert!(CronField::Minute.validate("*").is_valid);
        assert!(CronField::DayOfMonth.validate("?").is_valid);
    }

    #[test]
    fn test_minute_out_of_range_cites_value_and_range() {
        let result = validate_field("60", "minute", (0, 59));
        assert!(!result.is_valid);

        let msg = result.error(ValidationField::Cron).unwrap();
        assert!(msg.contains("60"));
        assert!(msg.contains("0 and 59"));
    }

    #[test]
    fn test_plain_values_within_range() {
        assert!(CronField::Hour.validate("23").is_valid);
        assert!(CronField::DayOfWeek.validate("7").is_valid);
        assert!(CronField::DayOfWeek.validate("0").is_valid);
        assert!(!CronField::Month.validate("0").is_valid);
        assert!(!CronField::Month.validate("13").is_valid);
    }

    #[test]
    fn test_non_numeric_value() {
        let msg = message("abc", CronField::Hour);
        assert!(msg.contains("\"abc\""));
        assert!(msg.contains("hour"));
    }

    #[test]
    fn test_range_rules() {
        assert!(CronField::DayOfWeek.validate("1-5").is_valid);
        assert!(message("5-1", CronField::DayOfWeek).contains("greater than"));
        assert!(message("1-2-3", CronField::Hour).contains("start-end"));
        assert!(message("1-x", CronField::Hour).contains("non-numeric"));
        assert!(message("20-25", CronField::Hour).contains("outside 0-23"));
    }

    #[test]
    fn test_negative_number_is_rejected_as_range() {
        assert!(!CronField::Minute.validate("-1").is_valid);
    }

    #[test]
    fn test_step_rules() {
        assert!(CronField::Minute.validate("*/5").is_valid);
        assert!(CronField::Minute.validate("10/15").is_valid);
        assert!(message("*/0", CronField::Minute).contains("positive integer"));
        assert!(message("*/x", CronField::Minute).contains("positive integer"));
        assert!(message("70/5", CronField::Minute).contains("70"));
    }

    #[test]
    fn test_list_rules() {
        assert!(CronField::DayOfWeek.validate("1,3,5").is_valid);
        assert!(CronField::Minute.validate("0, 15, 30").is_valid);
        assert!(message("1,99", CronField::Hour).contains("99"));
        assert!(!CronField::Hour.validate("1,,2").is_valid);
    }

    #[test]
    fn test_range_takes_precedence_over_list() {
        // A token with both '-' and ',' is judged by the range rule.
        assert!(!CronField::Hour.validate("1-5,10-15").is_valid);
    }

    #[test]
    fn test_fields_for_offsets() {
        assert_eq!(fields_for(6)[0], CronField::Second);
        assert_eq!(fields_for(5)[0], CronField::Minute);
        assert_eq!(fields_for(5).len(), 5);
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn test_inverted_range_panics() {
        validate_field("1", "minute", (59, 0));
    }
}
