//! IANA timezone validation.

use super::types::{ValidationField, ValidationResult};
use chrono_tz::Tz;

pub const REQUIRED_MESSAGE: &str = "Timezone is required";

/// Validate an IANA zone name against the tz database compiled into
/// `chrono-tz`.
pub fn validate_timezone(tz: &str) -> ValidationResult {
    match parse_timezone(tz) {
        Ok(_) => ValidationResult::valid(),
        Err(message) => ValidationResult::invalid(ValidationField::Timezone, message),
    }
}

/// Resolve a zone name, returning the user-facing message on failure.
pub fn parse_timezone(tz: &str) -> Result<Tz, String> {
    let tz = tz.trim();
    if tz.is_empty() {
        return Err(REQUIRED_MESSAGE.to_string());
    }

    tz.parse::<Tz>().map_err(|_| {
        format!(
            "Invalid timezone identifier: \"{}\". Use an IANA name like UTC, America/New_York or Europe/London",
            tz
        )
    })
}
