use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{fill_missing, missing_keys};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", cfg.to_yaml()?);
        }

        if (*check || *migrate) && !path.exists() {
            warning(format!(
                "No configuration file at {} (run `flightdesk init`)",
                path.display()
            ));
            return Ok(());
        }

        if *check {
            let missing = missing_keys(&path)?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!("Missing fields: {}", missing.join(", ")));
                info("Run `flightdesk config --migrate` to add them with defaults.");
            }
        }

        if *migrate {
            let added = fill_missing(&path)?;
            if added.is_empty() {
                info("Configuration already up to date.");
            } else {
                success(format!("Added fields: {}", added.join(", ")));
            }
        }
    }

    Ok(())
}
