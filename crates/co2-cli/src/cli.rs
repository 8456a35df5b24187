use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use co2_core::Metric;
use std::path::PathBuf;

use crate::common::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Explore the OWID CO2 emissions dataset", long_about = None)]
pub struct Cli {
    /// Set the logging level (overrides the config file)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Path to a config file (defaults to ~/.co2/config/co2.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read the dataset from a local CSV file instead of downloading it
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the first rows of the dataset with every column
    Head {
        /// Number of rows (defaults to display.head_rows)
        #[arg(short = 'n', long)]
        rows: Option<usize>,
    },
    /// List the distinct countries and regions
    Countries,
    /// Emissions over time for a group of countries
    Trend {
        /// Country or region name, exact spelling (repeatable; defaults to display.default_countries)
        #[arg(short, long = "country")]
        countries: Vec<String>,
        /// Only this metric (both co2 and co2-per-capita when omitted)
        #[arg(long, value_enum)]
        metric: Option<MapMetric>,
    },
    /// Per-country values for one year
    Map {
        /// Year to show
        #[arg(long)]
        year: i32,
        /// Only this metric (both co2 and co2-per-capita when omitted)
        #[arg(long, value_enum)]
        metric: Option<MapMetric>,
    },
    /// Population and CO2 per capita over time for one country
    Population {
        /// Country or region name, exact spelling
        #[arg(short, long)]
        country: String,
    },
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

/// Metrics offered by the trend and map panels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MapMetric {
    Co2,
    Co2PerCapita,
}

impl MapMetric {
    pub fn all() -> [MapMetric; 2] {
        [MapMetric::Co2PerCapita, MapMetric::Co2]
    }

    pub fn selected(metric: Option<MapMetric>) -> Vec<MapMetric> {
        match metric {
            Some(metric) => vec![metric],
            None => Self::all().to_vec(),
        }
    }
}

impl From<MapMetric> for Metric {
    fn from(metric: MapMetric) -> Self {
        match metric {
            MapMetric::Co2 => Metric::Co2,
            MapMetric::Co2PerCapita => Metric::Co2PerCapita,
        }
    }
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
