//! Sports Bet Tracker
//!
//! Entry point. Loads configuration, initialises structured logging, and
//! runs the interactive terminal session until the user quits.

use anyhow::Result;
use std::io;
use tracing::info;

use bet_tracker::app::App;
use bet_tracker::config::AppConfig;
use bet_tracker::shell::Shell;

const BANNER: &str = r#"
 ____       _     _____               _
| __ )  ___| |_  |_   _| __ __ _  ___| | _____ _ __
|  _ \ / _ \ __|   | || '__/ _` |/ __| |/ / _ \ '__|
| |_) |  __/ |_    | || | | (_| | (__|   <  __/ |
|____/ \___|\__|   |_||_|  \__,_|\___|_|\_\___|_|
"#;

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = AppConfig::resolve_path();
    let cfg = AppConfig::load_or_default(&config_path)?;

    init_logging(&cfg);

    println!("{BANNER}");
    info!(
        config = %config_path,
        group_by = %cfg.display.group_by,
        sports = cfg.form.sports.len(),
        "Bet tracker starting up"
    );

    let app = App::new(cfg.form.clone(), cfg.group_by()?);
    let today = chrono::Local::now().date_naive();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let app = Shell::new(app, stdin.lock(), stdout.lock(), &cfg.display.currency_symbol, today).run()?;

    info!(bets = app.store().len(), "Bet tracker shut down cleanly.");
    Ok(())
}

/// Initialise the `tracing` subscriber. Logs go to stderr so they never
/// interleave with the screens on stdout.
fn init_logging(cfg: &AppConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.filter));

    let json_logging = cfg.logging.json || std::env::var("BET_TRACKER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    }
}
