use crate::api::SchoolApi;
use crate::cli::parser::{AircraftAction, Commands};
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::db::queries::insert_aircraft;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Aircraft { action } = cmd else {
        return Ok(());
    };
    let pool = DbPool::new(&cfg.database)?;

    match action {
        AircraftAction::Add {
            tail_number,
            make,
            model,
        } => {
            let id = insert_aircraft(&pool.conn, tail_number, make, model)?;
            if let Err(e) = log::audit(
                &pool.conn,
                "aircraft",
                tail_number,
                &format!("Added aircraft {} {}", make, model),
            ) {
                warning(format!("Failed to write internal log: {}", e));
            }
            success(format!("Aircraft {} added (id {})", tail_number.to_uppercase(), id));
        }
        AircraftAction::List => {
            let fleet = pool.api().list_aircraft()?;
            if fleet.is_empty() {
                info("No aircraft registered.");
                return Ok(());
            }
            let mut table = Table::new(vec!["ID", "Tail", "Make", "Model"]);
            for a in fleet {
                table.add_row(vec![a.id.to_string(), a.tail_number, a.make, a.model]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
