use clap::Parser;
use co2_cli::config::{load_config, Co2Config};
use co2_cli::session::build_provider;
use co2_cli::{Cli, Commands};
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod commands;

use commands::{countries, head, map, population, trend};

fn run(cli: &Cli, config: &Co2Config) -> anyhow::Result<()> {
    let load = || build_provider(config, cli.file.as_deref()).load();

    match &cli.command {
        Commands::Config { command } => {
            commands::config::handle(command, cli.config.as_deref(), config)
        }
        Commands::Head { rows } => head::handle(
            &*load()?,
            rows.unwrap_or(config.display.head_rows),
            cli.format,
        ),
        Commands::Countries => countries::handle(&*load()?, cli.format),
        Commands::Trend { countries, metric } => {
            let countries = if countries.is_empty() {
                &config.display.default_countries
            } else {
                countries
            };
            trend::handle(&*load()?, countries, *metric, cli.format)
        }
        Commands::Map { year, metric } => map::handle(&*load()?, *year, *metric, cli.format),
        Commands::Population { country } => population::handle(&*load()?, country, cli.format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::from(2);
        }
    };

    let level = cli
        .log_level
        .or_else(|| config.log_level().ok())
        .unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("co2-cli {} (log level {level})", env!("CARGO_PKG_VERSION"));

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
