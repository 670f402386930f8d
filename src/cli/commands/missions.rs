use crate::api::{MissionFilter, SchoolApi};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::mission::MissionStatus;
use crate::models::mission_type::MissionType;
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::date::parse_range;
use crate::utils::table::Table;
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Missions {
        enrollment,
        student,
        statuses,
        mission_type,
        range,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let api = pool.api();

        let statuses = statuses
            .iter()
            .map(|s| {
                MissionStatus::from_db_str(s.trim())
                    .ok_or_else(|| AppError::Validation(format!("Unknown mission status: {s}")))
            })
            .collect::<AppResult<Vec<_>>>()?;

        let mission_type = match mission_type {
            Some(t) => Some(t.parse::<MissionType>()?),
            None => None,
        };

        let bounds = match range {
            Some(r) => Some(parse_range(r)?),
            None => None,
        };

        let filter = MissionFilter {
            statuses,
            mission_type,
            enrollment_id: *enrollment,
            student_id: *student,
            start_date: bounds.map(|b| b.0),
            end_date: bounds.map(|b| b.1),
            ..Default::default()
        };

        let missions = api.missions(&filter)?;
        if missions.is_empty() {
            info("No missions found.");
            return Ok(());
        }

        let tails: HashMap<i64, String> = api
            .list_aircraft()?
            .into_iter()
            .map(|a| (a.id, a.tail_number))
            .collect();

        let mut table = Table::new(vec![
            "ID", "Code", "Date", "Start", "Type", "Lesson", "Aircraft", "Status",
        ]);
        for m in &missions {
            table.add_row(vec![
                m.id.to_string(),
                m.mission_code.clone(),
                m.date_str(),
                m.scheduled_start_time
                    .clone()
                    .unwrap_or_else(|| "--:--".into()),
                m.mission_type.code().to_string(),
                m.lesson_code.clone().unwrap_or_else(|| "--".into()),
                m.aircraft_id
                    .and_then(|id| tails.get(&id).cloned())
                    .unwrap_or_else(|| "--".into()),
                m.status.to_db_str().to_string(),
            ]);
        }

        // Color after layout so widths stay right.
        for (line, m) in table.render().lines().zip(
            [None, None]
                .into_iter()
                .chain(missions.iter().map(Some)),
        ) {
            match m {
                Some(m) => {
                    let color = color_for_status(m.status);
                    let status = m.status.to_db_str();
                    match line.strip_suffix(status) {
                        Some(head) => println!("{head}{color}{status}{RESET}"),
                        None => println!("{line}"),
                    }
                }
                None => println!("{line}"),
            }
        }
    }
    Ok(())
}
