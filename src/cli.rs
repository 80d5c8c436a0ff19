use crate::editor::EditorMode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "cronplan")]
#[command(author, version, about = "Validate, explain and preview cron schedules")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, env = "CRONPLAN_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols instead of unicode
    #[arg(long, global = true)]
    pub plain: bool,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a cron expression and timezone
    Validate(ValidateArgs),

    /// Show the next executions of a schedule
    Preview(PreviewArgs),

    /// Tell whether the visual builder can represent an expression
    Classify {
        /// Cron expression (5 or 6 fields)
        cron: String,
    },

    /// List the canned schedule shortcuts
    Examples,

    /// Edit a schedule interactively
    Edit(EditArgs),

    /// Show or set the remembered editor mode
    Mode {
        /// Mode to remember (omit to show the current one)
        #[arg(value_enum)]
        mode: Option<EditorMode>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Cron expression (e.g., "0 9 * * 1-5")
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    pub cron: Option<String>,

    /// Timezone (IANA format, e.g., "America/New_York")
    #[arg(long, value_name = "TZ", env = "CRONPLAN_TZ")]
    pub tz: Option<String>,

    /// Read a JSON object {"cron": ..., "timezone": ...} from stdin
    #[arg(long)]
    pub stdin: bool,
}

#[derive(Args, Clone)]
pub struct PreviewArgs {
    /// Cron expression (e.g., "0 9 * * 1-5")
    pub cron: String,

    /// Timezone (IANA format, e.g., "America/New_York")
    #[arg(long, value_name = "TZ", env = "CRONPLAN_TZ")]
    pub tz: Option<String>,

    /// Number of executions to show (1-10)
    #[arg(long, short = 'n')]
    pub count: Option<usize>,
}

#[derive(Args, Clone)]
pub struct EditArgs {
    /// Starting cron expression
    #[arg(long, value_name = "CRON")]
    pub cron: Option<String>,

    /// Starting timezone (IANA format)
    #[arg(long, value_name = "TZ", env = "CRONPLAN_TZ")]
    pub tz: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    #[default]
    Table,
    /// Display as JSON
    Json,
    /// Display as YAML
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Clears an env var for the duration of a test and restores it after
    struct EnvVarGuard {
        name: &'static str,
        original: Option<String>,
    }

    impl EnvVarGuard {
        fn set(name: &'static str, value: Option<&str>) -> Self {
            let original = std::env::var(name).ok();
            // SAFETY: Tests run serially via #[serial] attribute
            unsafe {
                match value {
                    Some(v) => std::env::set_var(name, v),
                    None => std::env::remove_var(name),
                }
            }
            Self { name, original }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            // SAFETY: Tests run serially via #[serial] attribute
            unsafe {
                match &self.original {
                    Some(v) => std::env::set_var(self.name, v),
                    None => std::env::remove_var(self.name),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn test_preview_args() {
        let _tz = EnvVarGuard::set("CRONPLAN_TZ", None);
        let cli = Cli::try_parse_from([
            "cronplan", "preview", "0 9 * * *", "--tz", "Asia/Manila", "-n", "3",
        ])
        .unwrap();

        let Commands::Preview(args) = cli.command else {
            panic!("expected preview");
        };
        assert_eq!(args.cron, "0 9 * * *");
        assert_eq!(args.tz.as_deref(), Some("Asia/Manila"));
        assert_eq!(args.count, Some(3));
    }

    #[test]
    #[serial]
    fn test_timezone_from_env() {
        let _tz = EnvVarGuard::set("CRONPLAN_TZ", Some("Europe/Berlin"));
        let cli = Cli::try_parse_from(["cronplan", "validate", "0 9 * * *"]).unwrap();

        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.tz.as_deref(), Some("Europe/Berlin"));
    }

    #[test]
    #[serial]
    fn test_format_from_env() {
        let _format = EnvVarGuard::set("CRONPLAN_FORMAT", Some("yaml"));
        let cli = Cli::try_parse_from(["cronplan", "examples"]).unwrap();
        assert!(matches!(cli.format, Some(OutputFormat::Yaml)));
    }

    #[test]
    #[serial]
    fn test_validate_needs_cron_or_stdin() {
        let _tz = EnvVarGuard::set("CRONPLAN_TZ", None);
        assert!(Cli::try_parse_from(["cronplan", "validate"]).is_err());
        assert!(Cli::try_parse_from(["cronplan", "validate", "--stdin"]).is_ok());
        assert!(Cli::try_parse_from(["cronplan", "validate", "* * * * *", "--stdin"]).is_err());
    }

    #[test]
    fn test_mode_value() {
        let cli = Cli::try_parse_from(["cronplan", "mode", "advanced"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Mode {
                mode: Some(EditorMode::Advanced)
            }
        ));
    }
}
