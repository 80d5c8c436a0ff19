//! `cronplan classify`: can the visual builder show this expression?

use crate::config::Context;
use crate::editor::EditorMode;
use crate::exit_codes;
use crate::output::{OutputConfig, print_info_cfg, print_single, print_success_cfg, print_warning_cfg};
use crate::schedule::{ScheduleBuilder, describe, is_complex, validate_cron};
use anyhow::Result;
use serde::Serialize;

use super::helpers::print_validation;

#[derive(Debug, Serialize)]
pub struct Classification {
    pub cron: String,
    pub complex: bool,
    pub mode: EditorMode,
    pub description: Option<String>,
    pub builder: Option<ScheduleBuilder>,
}

pub fn classify(cron: &str) -> Classification {
    let complex = is_complex(cron);
    let valid = validate_cron(cron).is_valid;
    Classification {
        cron: cron.trim().to_string(),
        complex,
        mode: if complex {
            EditorMode::Advanced
        } else {
            EditorMode::Builder
        },
        description: valid.then(|| describe(cron)),
        builder: ScheduleBuilder::from_cron(cron),
    }
}

pub fn execute(ctx: &Context, cron: &str) -> Result<i32> {
    let validation = validate_cron(cron);
    let classification = classify(cron);
    let out = OutputConfig::from_context(ctx);

    if out.is_structured() {
        print_single(&out, &classification)?;
    } else {
        print_validation(&validation, &out);
        if let Some(description) = &classification.description {
            print_info_cfg(description, &out);
        }
        if classification.complex {
            print_warning_cfg("Too complex for the builder; edit it in advanced mode", &out);
        } else if classification.builder.is_some() {
            print_success_cfg("The builder can represent this schedule", &out);
        } else {
            print_warning_cfg("The builder cannot show this value as is", &out);
        }
    }

    Ok(if validation.is_valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::ISSUES
    })
}
