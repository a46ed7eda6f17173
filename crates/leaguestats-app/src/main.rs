// League statistics entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, stdout is for the report)
// 2. Load config
// 3. Fetch every configured season
// 4. Analyze and combine
// 5. Export files and print the summary

use leaguestats_app::config;
use leaguestats_app::export;
use leaguestats_app::fetch::{self, SleeperClient};
use leaguestats_app::report;
use leaguestats_core::analysis;

use anyhow::Context;
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("leaguestats starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} seasons, weeks 1-{}",
        config.seasons.len(),
        config.fetch.max_week
    );

    // 3. Fetch
    let client = SleeperClient::new(&config.api.base_url);
    let (inputs, fetch_failures) =
        fetch::collect_seasons(&client, &config.seasons, config.fetch.max_week).await;
    for (season, e) in &fetch_failures {
        eprintln!("Season {season} could not be fetched: {e}");
    }
    if inputs.is_empty() {
        anyhow::bail!("no season could be fetched");
    }

    // 4. Analyze
    let league = analysis::analyze_league(&inputs);
    if !league.failures.is_empty() {
        warn!("{} season(s) failed analysis", league.failures.len());
    }

    // 5. Export and report
    let written = export::export_all(&league, Path::new(&config.export.output_dir))
        .context("failed to export results")?;

    print!("{}", report::render(&league));
    for path in &written {
        println!("Wrote {}", path.display());
    }

    info!("leaguestats finished");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which carries the report).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("leaguestats.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("leaguestats_app=info,leaguestats_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
