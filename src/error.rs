use thiserror::Error;

/// Host-side failures: files, config, output.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read config: {0}")]
    ConfigRead(std::io::Error),

    #[error("Invalid config format: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to read preferences: {0}")]
    PreferencesRead(std::io::Error),

    #[error("Failed to write preferences: {0}")]
    PreferencesWrite(std::io::Error),

    #[error("Could not acquire lock on the cronplan config directory")]
    LockFailed,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Precondition failures of the preview generator. These point at a caller
/// that skipped validation and are not meant for end users verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Preview count must be between 1 and 10, got {0}")]
    InvalidCount(usize),

    #[error("A cron expression is required to generate a preview")]
    MissingCron,

    #[error("A timezone is required to generate a preview")]
    MissingTimezone,

    #[error("Failed to generate preview: {0}")]
    PreviewFailed(String),
}

/// Editor calls that do not fit the current editing mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Raw cron text can only be edited in advanced mode")]
    NotInAdvancedMode,

    #[error("Builder edits are only accepted in builder mode")]
    NotInBuilderMode,

    #[error("This expression is too complex for the builder; keep editing it in advanced mode")]
    ComplexExpression,

    #[error("The editor has been closed")]
    Closed,
}
