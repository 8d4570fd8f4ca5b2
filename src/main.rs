use clap::Parser;
use lcadash::core::config::{self, CliOverrides, DashConfig};
use lcadash::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "lcadash", about = "PMI-LCA dashboard with hash routing")]
struct Args {
    /// Initial location token, e.g. "#results/impact-overview"
    #[arg(short, long)]
    route: Option<String>,

    /// Location poll interval in milliseconds
    #[arg(long = "poll-ms")]
    poll_ms: Option<u64>,

    /// Render the home page once and ignore navigation
    #[arg(long = "static")]
    static_mode: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // The log level can come from the config file, so load and resolve it
    // first and report any problem once the logger is up.
    let (file_config, load_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (DashConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        route: args.route,
        poll_ms: args.poll_ms,
        static_mode: args.static_mode,
        log_level: args.log_level,
    };
    let resolved = config::resolve(&file_config, &cli);

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = load_error {
        log::warn!("Failed to load config, using defaults: {}", e);
    }
    for warning in &resolved.warnings {
        log::warn!("{}", warning);
    }
    log::info!(
        "lcadash starting (route: {:?}, poll: {}ms, static: {})",
        resolved.initial_token,
        resolved.poll_interval.as_millis(),
        resolved.static_mode
    );

    tui::run(resolved)
}
