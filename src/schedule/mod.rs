//! Recurring schedule core: cron validation, calendar advisories, previews
//! and the builder/raw-text boundary.

pub mod builder;
pub mod calendar;
pub mod complexity;
pub mod describe;
pub mod expression;
pub mod field;
pub mod preview;
pub mod timezone;
pub mod types;
pub mod validate;

pub use builder::{BuilderField, ScheduleBuilder};
pub use calendar::{CalendarAnalysis, analyze};
pub use complexity::is_complex;
pub use describe::describe;
pub use expression::validate_cron;
pub use field::{CronField, validate_field};
pub use preview::{DEFAULT_PREVIEW_COUNT, MAX_PREVIEW_COUNT, MIN_PREVIEW_COUNT, preview, preview_at};
pub use timezone::validate_timezone;
pub use types::{
    ScheduleConfig, ScheduleExample, SchedulePreview, ValidationErrors, ValidationField,
    ValidationResult,
};
pub use validate::{validate_config, validate_config_value};
