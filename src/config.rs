use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::schedule::{DEFAULT_PREVIEW_COUNT, MAX_PREVIEW_COUNT, MIN_PREVIEW_COUNT};
use anyhow::Result;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// IANA zone used when `--tz` is not given.
    pub default_timezone: Option<String>,

    #[serde(default = "default_preview_count")]
    pub preview_count: usize,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_preview_count() -> usize {
    DEFAULT_PREVIEW_COUNT
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_format() -> String {
    "table".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load() -> Result<Self, CliError> {
        Self::load_from_path(&Self::path()?)
    }

    pub fn path() -> Result<PathBuf, CliError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn config_dir() -> Result<PathBuf, CliError> {
        let dirs = ProjectDirs::from("dev", "cronplan", "cronplan")
            .ok_or_else(|| CliError::Other("Could not determine config directory".to_string()))?;
        Ok(dirs.config_dir().to_path_buf())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(CliError::ConfigRead)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_timezone: None,
            preview_count: DEFAULT_PREVIEW_COUNT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            format: default_format(),
            color: true,
        }
    }
}

/// Runtime context that combines config and CLI overrides
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    format_override: Option<OutputFormat>,
    no_color: bool,
    plain: bool,
}

impl Context {
    pub fn load() -> Result<Self> {
        Ok(Self::with_config(Config::load()?))
    }

    /// Create context with a specific config (for testing)
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            format_override: None,
            no_color: false,
            plain: false,
        }
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format_override = Some(format);
    }

    pub fn set_no_color(&mut self, no_color: bool) {
        self.no_color = no_color;
    }

    pub fn set_plain(&mut self, plain: bool) {
        self.plain = plain;
    }

    /// Flag, then `format` from the config file, then table.
    pub fn output_format(&self) -> OutputFormat {
        self.format_override.unwrap_or_else(|| {
            match self.config.format.to_lowercase().as_str() {
                "json" => OutputFormat::Json,
                "yaml" => OutputFormat::Yaml,
                _ => OutputFormat::Table,
            }
        })
    }

    /// Explicit `--tz`/`CRONPLAN_TZ`, then the config default. Empty when
    /// neither is set.
    pub fn timezone(&self, explicit: Option<&str>) -> String {
        explicit
            .or(self.config.default_timezone.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    /// Configured count, clamped into what the preview generator accepts.
    pub fn preview_count(&self, explicit: Option<usize>) -> usize {
        explicit
            .unwrap_or(self.config.preview_count)
            .clamp(MIN_PREVIEW_COUNT, MAX_PREVIEW_COUNT)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.debounce_ms)
    }

    pub fn no_color(&self) -> bool {
        self.no_color || !self.config.color
    }

    pub fn plain(&self) -> bool {
        self.plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default_values() {
        let config = Config::default();

        assert!(config.default_timezone.is_none());
        assert_eq!(config.preview_count, 5);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.format, "table");
        assert!(config.color);
    }

    #[test]
    fn test_config_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from_path(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.preview_count, DEFAULT_PREVIEW_COUNT);
    }

    #[test]
    fn test_config_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, r#"default_timezone = "Europe/London""#).unwrap();

        let config = Config::load_from_path(&path).unwrap();

        assert_eq!(config.default_timezone.as_deref(), Some("Europe/London"));
        assert_eq!(config.debounce_ms, 300);
        assert!(config.color);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [[[").unwrap();

        let result = Config::load_from_path(&path);
        assert!(matches!(result, Err(CliError::ConfigParse(_))));
    }

    #[test]
    fn test_config_load_full_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_timezone = "Asia/Manila"
preview_count = 3
debounce_ms = 150
format = "json"
color = false
"#,
        )
        .unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.default_timezone.as_deref(), Some("Asia/Manila"));
        assert_eq!(loaded.preview_count, 3);
        assert_eq!(loaded.debounce_ms, 150);
        assert_eq!(loaded.format, "json");
        assert!(!loaded.color);
    }

    #[test]
    fn test_context_timezone_precedence() {
        let config = Config {
            default_timezone: Some("UTC".to_string()),
            ..Config::default()
        };
        let ctx = Context::with_config(config);

        assert_eq!(ctx.timezone(None), "UTC");
        assert_eq!(ctx.timezone(Some("Asia/Tokyo")), "Asia/Tokyo");
    }

    #[test]
    fn test_context_timezone_unset_is_empty() {
        let ctx = Context::with_config(Config::default());
        assert_eq!(ctx.timezone(None), "");
    }

    #[test]
    fn test_context_preview_count_clamped() {
        let ctx = Context::with_config(Config {
            preview_count: 50,
            ..Config::default()
        });
        assert_eq!(ctx.preview_count(None), MAX_PREVIEW_COUNT);
        assert_eq!(ctx.preview_count(Some(0)), MIN_PREVIEW_COUNT);
        assert_eq!(ctx.preview_count(Some(7)), 7);
    }

    #[test]
    fn test_context_format_from_config() {
        let mut ctx = Context::with_config(Config {
            format: "yaml".to_string(),
            ..Config::default()
        });
        assert!(matches!(ctx.output_format(), OutputFormat::Yaml));

        ctx.set_format(OutputFormat::Json);
        assert!(matches!(ctx.output_format(), OutputFormat::Json));
    }

    #[test]
    fn test_context_no_color_from_config() {
        let ctx = Context::with_config(Config {
            color: false,
            ..Config::default()
        });
        assert!(ctx.no_color());
    }
}
