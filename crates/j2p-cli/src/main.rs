use clap::Parser;
use j2p_config::ConfigError;
use j2p_core::CoreError;
use j2p_plane::PlaneError;

mod bootstrap;
mod cli;
mod commands;
mod output;
mod source;

/// Exit code for runs that never started: missing settings or an unusable CSV header.
const EXIT_FATAL_CONFIG: i32 = 2;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("j2p error: {error:#}");
        std::process::exit(exit_code(&error));
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = bootstrap::load_config(&flags)?;

    commands::dispatch::dispatch(cli.command, &config, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("J2P_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn exit_code(error: &anyhow::Error) -> i32 {
    let fatal = error.chain().any(|cause| {
        cause.downcast_ref::<ConfigError>().is_some()
            || matches!(
                cause.downcast_ref::<PlaneError>(),
                Some(PlaneError::InvalidApiKey)
            )
            || cause
                .downcast_ref::<CoreError>()
                .is_some_and(CoreError::is_fatal_config)
    });
    if fatal { EXIT_FATAL_CONFIG } else { 1 }
}
