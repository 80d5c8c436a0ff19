//! `cronplan validate`: typed arguments or an untyped JSON document.

use crate::cli::ValidateArgs;
use crate::config::Context;
use crate::exit_codes;
use crate::output::{OutputConfig, print_single, print_success_cfg};
use crate::schedule::{ScheduleConfig, ValidationResult, validate_config, validate_config_value};
use anyhow::{Context as _, Result};
use std::io::Read;

use super::helpers::print_validation;

pub fn execute(ctx: &Context, args: ValidateArgs) -> Result<i32> {
    let result = if args.stdin {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        validate_json(&input)?
    } else {
        let config = ScheduleConfig::new(
            args.cron.unwrap_or_default(),
            ctx.timezone(args.tz.as_deref()),
        );
        validate_config(&config)
    };

    let out = OutputConfig::from_context(ctx);
    if out.is_structured() {
        print_single(&out, &result)?;
    } else {
        print_validation(&result, &out);
        if result.is_valid {
            print_success_cfg("Schedule is valid", &out);
        }
    }

    Ok(if result.is_valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::ISSUES
    })
}

/// Parse `input` as JSON and validate whatever shape it has.
pub fn validate_json(input: &str) -> Result<ValidationResult> {
    let value: serde_json::Value =
        serde_json::from_str(input).context("Input is not valid JSON")?;
    Ok(validate_config_value(&value))
}
