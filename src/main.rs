use anyhow::Result;
use clap::{crate_version, App as Cli, Arg};
use taskmanager_tui::app::App;
use taskmanager_tui::config::Config;

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new("taskmanager-tui")
        .version(crate_version!())
        .about("Manage your tasks from the terminal")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml and session data")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Overrides the log level from the configuration file")
                .possible_values(LOG_LEVELS)
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(level) = matches.value_of("log-level") {
        config.log_level = level.to_string();
    }
    App::start(config).await?;
    Ok(())
}
