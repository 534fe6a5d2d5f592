use std::fs;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config } = cmd {
        let path = Config::config_file();
        if !path.exists() {
            warning(format!(
                "No config file yet at {:?} - run 'init' to create one",
                path
            ));
            return Ok(());
        }

        info(format!("Config file: {:?}", path));
        if *print_config {
            println!("{}", fs::read_to_string(&path)?);
        }
    }
    Ok(())
}
