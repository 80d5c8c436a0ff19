use crate::cli::OutputFormat;
use crate::config::Context;
use console::style;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub no_color: bool,
    pub plain: bool,
}

impl OutputConfig {
    /// Create from context settings.
    pub fn from_context(ctx: &Context) -> Self {
        Self {
            format: ctx.output_format(),
            no_color: ctx.no_color(),
            plain: ctx.plain(),
        }
    }

    pub fn is_structured(&self) -> bool {
        !matches!(self.format, OutputFormat::Table)
    }
}

/// Print data as a table
pub fn print_table<T: Tabled>(data: Vec<T>) {
    if data.is_empty() {
        println!("{}", style("No items found").dim());
        return;
    }
    let table = Table::new(data).to_string();
    println!("{}", table);
}

/// Print data as JSON
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

/// Print data as YAML
pub fn print_yaml<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    print!("{}", yaml);
    Ok(())
}

/// Print rows based on format preference
pub fn print_output<T: Tabled + Serialize>(config: &OutputConfig, data: Vec<T>) -> anyhow::Result<()> {
    match config.format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(&data)?,
        OutputFormat::Yaml => print_yaml(&data)?,
    }
    Ok(())
}

/// Print a single item in a structured format. Table mode falls back to
/// pretty JSON.
pub fn print_single<T: Serialize>(config: &OutputConfig, data: &T) -> anyhow::Result<()> {
    match config.format {
        OutputFormat::Table | OutputFormat::Json => print_json(data),
        OutputFormat::Yaml => print_yaml(data),
    }
}

// =============================================================================
// Symbols
// =============================================================================

/// Get success symbol (checkmark or ASCII equivalent).
pub fn symbol_success(plain: bool) -> &'static str {
    if plain { "[OK]" } else { "✓" }
}

/// Get error symbol (X or ASCII equivalent).
pub fn symbol_error(plain: bool) -> &'static str {
    if plain { "[ERROR]" } else { "✗" }
}

/// Get warning symbol (! or ASCII equivalent).
pub fn symbol_warning(plain: bool) -> &'static str {
    if plain { "[WARN]" } else { "!" }
}

/// Get info symbol (i or ASCII equivalent).
pub fn symbol_info(plain: bool) -> &'static str {
    if plain { "[INFO]" } else { "ℹ" }
}

// =============================================================================
// Printing with Config
// =============================================================================

/// Print a success message with config awareness.
pub fn print_success_cfg(msg: &str, config: &OutputConfig) {
    let symbol = symbol_success(config.plain);
    if config.no_color {
        println!("{} {}", symbol, msg);
    } else {
        println!("{} {}", style(symbol).green().bold(), msg);
    }
}

/// Print an error message with config awareness.
pub fn print_error_cfg(msg: &str, config: &OutputConfig) {
    let symbol = symbol_error(config.plain);
    if config.no_color {
        eprintln!("{} {}", symbol, msg);
    } else {
        eprintln!("{} {}", style(symbol).red().bold(), msg);
    }
}

/// Print a warning message with config awareness.
pub fn print_warning_cfg(msg: &str, config: &OutputConfig) {
    let symbol = symbol_warning(config.plain);
    if config.no_color {
        println!("{} {}", symbol, msg);
    } else {
        println!("{} {}", style(symbol).yellow().bold(), msg);
    }
}

/// Print an info message with config awareness.
pub fn print_info_cfg(msg: &str, config: &OutputConfig) {
    let symbol = symbol_info(config.plain);
    if config.no_color {
        println!("{} {}", symbol, msg);
    } else {
        println!("{} {}", style(symbol).blue().bold(), msg);
    }
}

/// Print a heading, bold unless color is off.
pub fn print_heading(text: &str, config: &OutputConfig) {
    if config.no_color {
        println!("{}", text);
    } else {
        println!("{}", style(text).bold());
    }
}

/// Dim secondary text, unless color is off.
pub fn dim(text: &str, config: &OutputConfig) -> String {
    if config.no_color {
        text.to_string()
    } else {
        style(text).dim().to_string()
    }
}
