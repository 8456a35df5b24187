use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Result};

use co2_cli::config::{co2_config_path, save_config, Co2Config};
use co2_cli::ConfigCommands;

pub fn handle(command: &ConfigCommands, path: Option<&Path>, config: &Co2Config) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => {
            let target = match path {
                Some(path) => path.to_path_buf(),
                None => co2_config_path()?,
            };
            init(&target, *force)?;
            println!("Config written to {}", target.display());
            Ok(())
        }
        ConfigCommands::Show => show(config, io::stdout().lock()),
    }
}

fn init(target: &Path, force: bool) -> Result<()> {
    if target.exists() && !force {
        bail!(
            "config {} already exists. Use --force to overwrite.",
            target.display()
        );
    }
    save_config(&Co2Config::default(), target)
}

fn show<W: Write>(config: &Co2Config, mut out: W) -> Result<()> {
    write!(out, "{}", toml::to_string_pretty(config)?)?;
    Ok(())
}
