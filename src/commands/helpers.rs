//! Rendering shared by the schedule commands.

use crate::output::{
    OutputConfig, dim, print_error_cfg, print_heading, print_info_cfg, print_table,
    print_warning_cfg,
};
use crate::schedule::{SchedulePreview, ValidationResult};
use serde::Serialize;
use tabled::Tabled;

const WRAP_WIDTH: usize = 72;

#[derive(Debug, Tabled, Serialize)]
pub struct ExecutionRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "NEXT RUN")]
    pub when: String,
}

pub fn execution_rows(preview: &SchedulePreview) -> Vec<ExecutionRow> {
    preview
        .next_executions
        .iter()
        .enumerate()
        .map(|(i, when)| ExecutionRow {
            index: i + 1,
            when: when.clone(),
        })
        .collect()
}

/// Errors to stderr, warnings wrapped under a warning symbol.
pub fn print_validation(result: &ValidationResult, out: &OutputConfig) {
    for (field, message) in &result.errors {
        print_error_cfg(&format!("{}: {}", field, message), out);
    }
    for warning in &result.warnings {
        let mut lines = textwrap::wrap(warning, WRAP_WIDTH).into_iter();
        if let Some(first) = lines.next() {
            print_warning_cfg(&first, out);
        }
        for line in lines {
            println!("  {}", line);
        }
    }
}

pub fn print_preview(preview: &SchedulePreview, out: &OutputConfig) {
    print_heading(&preview.description, out);
    print_table(execution_rows(preview));
}

/// Stand-in text shown where a preview would go.
pub fn print_preview_message(message: &str, out: &OutputConfig) {
    print_info_cfg(&dim(message, out), out);
}
