//! `cronplan preview`: validate, then list upcoming executions.

use crate::cli::PreviewArgs;
use crate::config::Context;
use crate::editor::{CONFIGURE_MESSAGE, FIX_ERRORS_MESSAGE, PREVIEW_UNAVAILABLE_MESSAGE};
use crate::exit_codes;
use crate::output::{OutputConfig, print_single};
use crate::schedule::{ScheduleConfig, SchedulePreview, ValidationResult, preview, validate_config};
use anyhow::Result;
use serde::Serialize;

use super::helpers::{print_preview, print_preview_message, print_validation};

#[derive(Debug, Serialize)]
struct PreviewReport<'a> {
    config: &'a ScheduleConfig,
    validation: &'a ValidationResult,
    preview: Option<&'a SchedulePreview>,
    message: Option<&'static str>,
}

pub fn execute(ctx: &Context, args: PreviewArgs) -> Result<i32> {
    let config = ScheduleConfig::new(args.cron, ctx.timezone(args.tz.as_deref()));
    let count = ctx.preview_count(args.count);
    let validation = validate_config(&config);

    let (generated, message, code) = if !config.is_complete() {
        (None, Some(CONFIGURE_MESSAGE), exit_codes::ISSUES)
    } else if !validation.is_valid {
        (None, Some(FIX_ERRORS_MESSAGE), exit_codes::ISSUES)
    } else {
        match preview(&config.cron, &config.timezone, count) {
            Ok(p) => (Some(p), None, exit_codes::SUCCESS),
            Err(e) => {
                tracing::warn!(error = %e, "schedule preview failed");
                (None, Some(PREVIEW_UNAVAILABLE_MESSAGE), exit_codes::INTERNAL)
            }
        }
    };

    let out = OutputConfig::from_context(ctx);
    if out.is_structured() {
        let report = PreviewReport {
            config: &config,
            validation: &validation,
            preview: generated.as_ref(),
            message,
        };
        print_single(&out, &report)?;
        return Ok(code);
    }

    print_validation(&validation, &out);
    if let Some(p) = &generated {
        print_preview(p, &out);
    }
    if let Some(message) = message {
        print_preview_message(message, &out);
    }
    Ok(code)
}
