use crate::api::SchoolApi;
use crate::cli::parser::{Commands, LessonAction};
use crate::config::Config;
use crate::core::mission_code::format_lesson_code;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::db::queries::{NewLesson, ensure_syllabus, insert_lesson};
use crate::errors::{AppError, AppResult};
use crate::models::lesson::LessonType;
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;
use crate::utils::time::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Lesson { action } = cmd else {
        return Ok(());
    };
    let pool = DbPool::new(&cfg.database)?;

    match action {
        LessonAction::Add {
            syllabus,
            title,
            order,
            lesson_type,
            duration,
            description,
        } => {
            let lesson_type: LessonType = lesson_type.parse()?;
            if let Some(d) = duration
                && *d <= 0
            {
                return Err(AppError::InvalidDuration(*d));
            }

            let syllabus_id = ensure_syllabus(&pool.conn, syllabus, None)?;
            let id = insert_lesson(
                &pool.conn,
                &NewLesson {
                    syllabus_id,
                    title,
                    description,
                    order_index: *order,
                    lesson_type,
                    estimated_duration_minutes: *duration,
                },
            )?;

            if let Err(e) = log::audit(
                &pool.conn,
                "lesson",
                title,
                &format!("Added lesson {} to {}", order, syllabus),
            ) {
                warning(format!("Failed to write internal log: {}", e));
            }
            success(format!("Lesson '{}' added (id {})", title, id));
        }
        LessonAction::List { enrollment } => {
            let api = pool.api();
            let e = api.enrollment(*enrollment)?;
            let program = e.program_code(&cfg.default_program_code);
            let lessons = api.enrollment_lessons(*enrollment)?;

            if lessons.is_empty() {
                info(format!("No lessons in {}.", e.syllabus.title));
                return Ok(());
            }

            let mut table = Table::new(vec!["ID", "Code", "Title", "Type", "Duration"]);
            for l in lessons {
                table.add_row(vec![
                    l.id.to_string(),
                    format_lesson_code(&program, l.order_index),
                    l.title,
                    l.lesson_type.as_str().to_string(),
                    l.estimated_duration_minutes
                        .map(format_duration)
                        .unwrap_or_else(|| "--".into()),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
