use crate::api::SchoolApi;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::db::queries::{NewEnrollment, ensure_syllabus, insert_enrollment};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::{require_date, today};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Enroll {
            student_id,
            student_name,
            instructor_id,
            instructor_name,
            syllabus,
            code,
            start,
        } => {
            let pool = DbPool::new(&cfg.database)?;
            let start_date = match start {
                Some(s) => require_date(s)?,
                None => today(),
            };

            let syllabus_id = ensure_syllabus(&pool.conn, syllabus, code.as_deref())?;
            let id = insert_enrollment(
                &pool.conn,
                &NewEnrollment {
                    student_id: *student_id,
                    student_name,
                    instructor_id: *instructor_id,
                    instructor_name,
                    syllabus_id,
                    start_date,
                },
            )?;

            if let Err(e) = log::audit(
                &pool.conn,
                "enroll",
                student_name,
                &format!("Enrolled in {} with {}", syllabus, instructor_name),
            ) {
                warning(format!("Failed to write internal log: {}", e));
            }
            success(format!("Enrollment {} created for {}", id, student_name));
        }
        Commands::Enrollments => {
            let pool = DbPool::new(&cfg.database)?;
            let list = pool.api().list_enrollments()?;
            if list.is_empty() {
                info("No enrollments.");
                return Ok(());
            }

            let mut table =
                Table::new(vec!["ID", "Student", "Syllabus", "Program", "Instructor", "Start", "Status"]);
            for e in list {
                table.add_row(vec![
                    e.id.to_string(),
                    format!("{} (#{})", e.student_name, e.student_id),
                    e.syllabus.title.clone(),
                    e.program_code(&cfg.default_program_code),
                    e.instructor_name.clone(),
                    e.start_date.format("%Y-%m-%d").to_string(),
                    e.status.to_db_str().to_string(),
                ]);
            }
            print!("{}", table.render());
        }
        _ => {}
    }
    Ok(())
}
