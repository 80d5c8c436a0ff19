use crate::config::Context;
use crate::exit_codes;
use crate::output::{OutputConfig, print_output};
use crate::schedule::{ScheduleExample, describe};
use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Tabled, Serialize)]
pub struct ExampleRow {
    #[tabled(rename = "EXAMPLE")]
    pub label: &'static str,
    #[tabled(rename = "CRON")]
    pub cron: &'static str,
    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

pub fn example_rows() -> Vec<ExampleRow> {
    ScheduleExample::ALL
        .iter()
        .map(|example| ExampleRow {
            label: example.label(),
            cron: example.cron(),
            description: describe(example.cron()),
        })
        .collect()
}

/// List the canned shortcuts
pub fn execute(ctx: &Context) -> Result<i32> {
    print_output(&OutputConfig::from_context(ctx), example_rows())?;
    Ok(exit_codes::SUCCESS)
}
