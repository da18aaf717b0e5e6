use std::sync::Arc;

use daily_ritual::cli::{CliSession, SessionEnd};
use daily_ritual::config::RitualConfig;
use daily_ritual::progress::spawn_rollover_task;
use daily_ritual::scope::AppScope;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log to a daily-rolling file when a log dir is configured, otherwise to
/// stderr at `warn` so logs stay out of the conversation.
fn init_tracing(config: &RitualConfig) -> Option<WorkerGuard> {
    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "daily-ritual.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RitualConfig::from_env()?;
    let _log_guard = init_tracing(&config);

    eprintln!("🌙 Daily Ritual v{}", env!("CARGO_PKG_VERSION"));
    if let Some(ref dir) = config.log_dir {
        eprintln!("   Logs: {}", dir.display());
    }

    let mut scope = AppScope::init();
    let profile = scope.profile()?;
    let progress = scope.progress()?;

    // ── Day rollover ─────────────────────────────────────────────────────
    let rollover = if config.rollover_enabled {
        eprintln!("   Rollover: {}", config.rollover_cron);
        Some(spawn_rollover_task(Arc::clone(&progress), &config.rollover_cron)?)
    } else {
        eprintln!("   Rollover: disabled");
        None
    };
    eprintln!("   Type /quit to leave.\n");

    // ── Session ──────────────────────────────────────────────────────────
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut session = CliSession::new(stdin, tokio::io::stdout(), profile, progress, config);
    let end = session.run().await?;
    tracing::info!(?end, "Session ended");

    if let Some(handle) = rollover {
        handle.abort();
    }
    scope.teardown();

    if end == SessionEnd::Quit {
        eprintln!("See you next episode.");
    }
    Ok(())
}
