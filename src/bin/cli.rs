use classbook::classbook_config::AppConfig;
use classbook::cli::{Commands, run};
use classbook::logging::init_cli_tracing;
use classbook::state::init_app_state;
use clap::Parser;
use dotenvy::dotenv;
use tracing::warn;

#[derive(Parser)]
#[command(name = "classbook-cli")]
#[command(about = "Classbook CLI - manage school records from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_cli_tracing();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("CONFIG_ERROR: {e}");
            std::process::exit(1);
        }
    };
    if config.database.is_none() {
        warn!("STORAGE_BACKEND is memory; records will not outlive this command");
    }

    let state = match init_app_state(&config).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("STORAGE_ERROR: {e:#}");
            std::process::exit(1);
        }
    };

    match run(&state.services, cli.command).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("{}: {e}", e.code());
            std::process::exit(e.exit_code());
        }
    }
}
