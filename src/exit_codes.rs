//! Exit codes for CLI commands.
//!
//! Scripts can tell "your schedule has problems" apart from "you called the
//! tool wrong" and "the tool broke".

use crate::error::{CliError, EditorError};

/// Success - command completed and nothing was wrong.
pub const SUCCESS: i32 = 0;

/// Issues found - the schedule failed validation.
pub const ISSUES: i32 = 1;

/// Usage error - invalid arguments or missing required input.
pub const USAGE: i32 = 2;

/// Internal error - unexpected error occurred.
pub const INTERNAL: i32 = 7;

/// Convert an anyhow::Error to an appropriate exit code.
pub fn from_error(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<EditorError>().is_some() {
        return USAGE;
    }
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return match cli_err {
            CliError::ConfigParse(_) => USAGE,
            _ => INTERNAL,
        };
    }

    let msg = err.to_string().to_lowercase();
    if msg.contains("usage") || msg.contains("argument") || msg.contains("required") {
        USAGE
    } else {
        INTERNAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_from_error_usage() {
        let err = anyhow!("A cron expression argument is required");
        assert_eq!(from_error(&err), USAGE);
    }

    #[test]
    fn test_from_error_editor_error_is_usage() {
        let err = anyhow::Error::from(EditorError::ComplexExpression);
        assert_eq!(from_error(&err), USAGE);
    }

    #[test]
    fn test_from_error_io_is_internal() {
        let err = anyhow::Error::from(CliError::LockFailed);
        assert_eq!(from_error(&err), INTERNAL);
    }

    #[test]
    fn test_from_error_internal() {
        let err = anyhow!("Something went wrong");
        assert_eq!(from_error(&err), INTERNAL);
    }
}
