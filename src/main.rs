use prism_schedule::storage::config::Config;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{CliMode, parse_cli_mode, run, USAGE};

fn main() -> anyhow::Result<()> {
    setup_logging();

    let options = match parse_cli_mode() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{USAGE}");
            return Ok(());
        }
    };

    if let Err(e) = run(&options) {
        tracing::error!("prism failed: {:#}", e);
        return Err(e);
    }

    if options.mode != CliMode::Help {
        tracing::info!("prism finished");
    }
    Ok(())
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "prism.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("prism started");
}
