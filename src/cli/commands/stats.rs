use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::student_stats;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::header;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats {
        student,
        enrollment,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let stats = student_stats(&pool.api(), *student, *enrollment)?;

        header(format!("Student #{student}"));
        println!("Total missions     : {}", stats.total_missions);
        println!("Completed          : {}", stats.completed_missions);
        println!("Cancelled          : {}", stats.cancelled_missions);
        match stats.average_assessment_score {
            Some(avg) => println!("Average assessment : {:.2}", avg),
            None => println!("Average assessment : --"),
        }
    }
    Ok(())
}
