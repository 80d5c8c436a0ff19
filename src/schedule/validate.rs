//! Whole-config validation: cron and timezone checked independently, plus
//! calendar advisories for a valid cron.

use super::calendar;
use super::expression::validate_cron;
use super::timezone::validate_timezone;
use super::types::{ScheduleConfig, ValidationField, ValidationResult};
use serde_json::Value;

pub const NOT_AN_OBJECT_MESSAGE: &str = "Schedule configuration must be an object";

pub fn validate_config(config: &ScheduleConfig) -> ValidationResult {
    let mut result = ValidationResult::valid();

    let cron = validate_cron(&config.cron);
    for (field, message) in cron.errors {
        result.insert_error(field, message);
    }

    let timezone = validate_timezone(&config.timezone);
    for (field, message) in timezone.errors {
        result.insert_error(field, message);
    }

    if cron.is_valid {
        result
            .warnings
            .extend(calendar::analyze(&config.cron).warnings);
    }

    tracing::debug!(
        cron = %config.cron,
        timezone = %config.timezone,
        valid = result.is_valid,
        warnings = result.warnings.len(),
        "validated schedule config"
    );
    result
}

/// Validate untyped input, e.g. a JSON document from a file or stdin.
///
/// Anything other than an object is a `general` error. Non-string `cron` or
/// `timezone` members are treated as missing.
pub fn validate_config_value(value: &Value) -> ValidationResult {
    let Some(object) = value.as_object() else {
        return ValidationResult::invalid(ValidationField::General, NOT_AN_OBJECT_MESSAGE);
    };

    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    validate_config(&ScheduleConfig::new(text("cron"), text("timezone")))
}
