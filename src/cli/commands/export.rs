use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::export::logic::ExportRequest;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        report,
        format,
        file,
        enrollment,
        range,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(
            &pool.api(),
            &ExportRequest {
                report: *report,
                format: *format,
                file: file.clone(),
                enrollment_id: *enrollment,
                range: range.clone(),
                force: *force,
            },
        )?;
    }
    Ok(())
}
