use crate::cli::parser::{Commands, MissionAction};
use crate::config::Config;
use crate::core::schedule::ScheduleLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::mission::InstructorAssessment;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Mission { action } = cmd else {
        return Ok(());
    };
    let pool = DbPool::new(&cfg.database)?;
    let api = pool.api();

    let mission = match action {
        MissionAction::Start { id } => ScheduleLogic::start(&api, *id)?,
        MissionAction::Complete {
            id,
            assessment,
            partial,
        } => {
            let assessment = InstructorAssessment::from_db_str(assessment).ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown assessment '{assessment}' (outstanding, satisfactory, needs_more_practice)"
                ))
            })?;
            ScheduleLogic::complete(&api, *id, assessment, *partial)?
        }
        MissionAction::Cancel { id, reason } => ScheduleLogic::cancel(&api, *id, reason)?,
    };

    success(format!(
        "Mission {} is now {}",
        mission.mission_code,
        mission.status.to_db_str()
    ));
    Ok(())
}
