use anyhow::Result;
use clap::Parser;
use cronplan_cli::cli::{Cli, Commands};
use cronplan_cli::commands;
use cronplan_cli::config;
use cronplan_cli::exit_codes;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => exit_code(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(exit_codes::from_error(&e))
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` selects debug. Logs go to stderr so
/// structured stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

async fn run(cli: Cli) -> Result<i32> {
    // Load config with CLI overrides
    let mut ctx = config::Context::load()?;
    if let Some(format) = cli.format {
        ctx.set_format(format);
    }
    ctx.set_no_color(cli.no_color);
    ctx.set_plain(cli.plain);

    execute_command(cli.command, &ctx).await
}

/// Execute the CLI command
async fn execute_command(command: Commands, ctx: &config::Context) -> Result<i32> {
    match command {
        Commands::Validate(args) => commands::validate::execute(ctx, args),
        Commands::Preview(args) => commands::preview::execute(ctx, args),
        Commands::Classify { cron } => commands::classify::execute(ctx, &cron),
        Commands::Examples => commands::examples::execute(ctx),
        Commands::Edit(args) => commands::edit::execute(ctx, args).await,
        Commands::Mode { mode } => commands::mode::execute(ctx, mode),
        Commands::Completion { shell } => {
            commands::completion::generate_completions(shell)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}
