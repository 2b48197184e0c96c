mod demo;

use clap::{Parser, Subcommand};
use demo::{run_catalog, run_demo, CatalogArgs, DemoArgs};
use lead_scoring::config::AppConfig;
use lead_scoring::error::AppError;
use lead_scoring::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "lead-scoring",
    about = "Drive the lead scoring configuration console from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted console session against the in-memory gateway (default command)
    Demo(DemoArgs),
    /// Print the sample lead-field catalog with derived field labels
    Catalog(CatalogArgs),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;
    info!(?config.environment, "lead scoring console starting");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, config.scoring.fan_out_policy()).await,
        Command::Catalog(args) => run_catalog(args),
    }
}
