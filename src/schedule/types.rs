//! Value types shared by the validators, the preview generator and the editor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Config
// ============================================================================

/// Canonical schedule value. Either field may be empty (unset).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub cron: String,
    #[serde(default)]
    pub timezone: String,
}

impl ScheduleConfig {
    pub fn new(cron: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            cron: cron.into(),
            timezone: timezone.into(),
        }
    }

    /// True when both fields hold something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.cron.trim().is_empty() && !self.timezone.trim().is_empty()
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Key of an entry in [`ValidationResult::errors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationField {
    Cron,
    Timezone,
    General,
}

impl fmt::Display for ValidationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cron => "cron",
            Self::Timezone => "timezone",
            Self::General => "general",
        };
        f.write_str(name)
    }
}

pub type ValidationErrors = BTreeMap<ValidationField, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: ValidationErrors,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn invalid(field: ValidationField, message: impl Into<String>) -> Self {
        let mut result = Self::valid();
        result.insert_error(field, message);
        result
    }

    /// Record an error, keeping the first one seen for the field.
    pub fn insert_error(&mut self, field: ValidationField, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
        self.is_valid = false;
    }

    pub fn error(&self, field: ValidationField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Overlay `external` errors on top of this result. External entries win
    /// for the same key.
    pub fn merged_with(&self, external: &ValidationErrors) -> Self {
        let mut errors = self.errors.clone();
        for (field, message) in external {
            errors.insert(*field, message.clone());
        }
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings: self.warnings.clone(),
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

// ============================================================================
// Preview
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePreview {
    pub description: String,
    pub next_executions: Vec<String>,
    #[serde(skip)]
    pub execution_dates: Vec<DateTime<Utc>>,
}

// ============================================================================
// Canned examples
// ============================================================================

/// Shortcuts a host can offer next to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleExample {
    DailyNineAm,
    WeekdaysEightAm,
    WeeklyMondayTenAm,
    MonthlyFirstNineAm,
}

impl ScheduleExample {
    pub const ALL: [ScheduleExample; 4] = [
        Self::DailyNineAm,
        Self::WeekdaysEightAm,
        Self::WeeklyMondayTenAm,
        Self::MonthlyFirstNineAm,
    ];

    pub fn cron(self) -> &'static str {
        match self {
            Self::DailyNineAm => "0 9 * * *",
            Self::WeekdaysEightAm => "0 8 * * 1-5",
            Self::WeeklyMondayTenAm => "0 10 * * 1",
            Self::MonthlyFirstNineAm => "0 9 1 * *",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DailyNineAm => "Daily at 9 AM",
            Self::WeekdaysEightAm => "Weekdays at 8 AM",
            Self::WeeklyMondayTenAm => "Every Monday at 10 AM",
            Self::MonthlyFirstNineAm => "1st of every month at 9 AM",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_error_keeps_first_message() {
        let mut result = ValidationResult::valid();
        result.insert_error(ValidationField::Cron, "first");
        result.insert_error(ValidationField::Cron, "second");

        assert!(!result.is_valid);
        assert_eq!(result.error(ValidationField::Cron), Some("first"));
    }

    #[test]
    fn test_merged_with_external_takes_precedence() {
        let local = ValidationResult::invalid(ValidationField::Cron, "local");
        let mut external = ValidationErrors::new();
        external.insert(ValidationField::Cron, "server says no".to_string());
        external.insert(ValidationField::Timezone, "unknown zone".to_string());

        let merged = local.merged_with(&external);

        assert!(!merged.is_valid);
        assert_eq!(merged.error(ValidationField::Cron), Some("server says no"));
        assert_eq!(merged.error(ValidationField::Timezone), Some("unknown zone"));
    }

    #[test]
    fn test_merged_with_empty_external_keeps_validity() {
        let merged = ValidationResult::valid().merged_with(&ValidationErrors::new());
        assert!(merged.is_valid);
    }

    #[test]
    fn test_validation_result_json_shape() {
        let result = ValidationResult::invalid(ValidationField::Timezone, "bad");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"]["timezone"], "bad");
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_examples_are_five_field() {
        for example in ScheduleExample::ALL {
            assert_eq!(example.cron().split_whitespace().count(), 5);
        }
    }
}
