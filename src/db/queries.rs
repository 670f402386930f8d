use crate::api::{MissionFilter, NewMission, StatusUpdate};
use crate::core::calculator::progress::LastCompletedMission;
use crate::errors::{AppError, AppResult};
use crate::models::aircraft::Aircraft;
use crate::models::enrollment::{Enrollment, EnrollmentStatus, Syllabus};
use crate::models::lesson::{Lesson, LessonType};
use crate::models::mission::{CustomMission, InstructorAssessment, Mission, MissionStatus};
use crate::models::mission_type::MissionType;
use chrono::{Local, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};
use std::collections::HashSet;

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

fn date_column(row: &Row, name: &str) -> Result<NaiveDate> {
    let raw: String = row.get(name)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(raw.clone())))
}

fn collect<T>(rows: impl Iterator<Item = Result<T>>) -> AppResult<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Aircraft
// ---------------------------

pub fn map_aircraft(row: &Row) -> Result<Aircraft> {
    Ok(Aircraft {
        id: row.get("id")?,
        tail_number: row.get("tail_number")?,
        make: row.get("make")?,
        model: row.get("model")?,
    })
}

pub fn insert_aircraft(conn: &Connection, tail: &str, make: &str, model: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO aircraft (tail_number, make, model) VALUES (?1, ?2, ?3)",
        params![tail.trim().to_uppercase(), make.trim(), model.trim()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_aircraft(conn: &Connection) -> AppResult<Vec<Aircraft>> {
    let mut stmt = conn.prepare("SELECT * FROM aircraft ORDER BY tail_number ASC")?;
    let rows = stmt.query_map([], map_aircraft)?;
    collect(rows)
}

// ---------------------------
// Syllabi and lessons
// ---------------------------

/// Id of the syllabus with this title, created on first use.
pub fn ensure_syllabus(conn: &Connection, title: &str, code: Option<&str>) -> AppResult<i64> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM syllabi WHERE title = ?1",
            [title.trim()],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(id) = existing {
        if let Some(c) = code {
            conn.execute("UPDATE syllabi SET code = ?1 WHERE id = ?2", params![c, id])?;
        }
        return Ok(id);
    }

    conn.execute(
        "INSERT INTO syllabi (title, code) VALUES (?1, ?2)",
        params![title.trim(), code],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn map_lesson(row: &Row) -> Result<Lesson> {
    let type_str: String = row.get("lesson_type")?;
    let lesson_type = LessonType::from_db_str(&type_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidLessonType(type_str.clone())))?;

    Ok(Lesson {
        id: row.get("id")?,
        syllabus_id: row.get("syllabus_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        order_index: row.get("order_index")?,
        lesson_type,
        estimated_duration_minutes: row.get("estimated_duration")?,
        is_active: row.get::<_, i32>("is_active")? == 1,
    })
}

pub struct NewLesson<'a> {
    pub syllabus_id: i64,
    pub title: &'a str,
    pub description: &'a str,
    pub order_index: i32,
    pub lesson_type: LessonType,
    pub estimated_duration_minutes: Option<i64>,
}

pub fn insert_lesson(conn: &Connection, l: &NewLesson) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO lessons (syllabus_id, title, description, order_index, lesson_type, estimated_duration)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            l.syllabus_id,
            l.title,
            l.description,
            l.order_index,
            l.lesson_type.to_db_str(),
            l.estimated_duration_minutes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_lesson(conn: &Connection, id: i64) -> AppResult<Lesson> {
    conn.query_row("SELECT * FROM lessons WHERE id = ?1", [id], map_lesson)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("lesson {id}")))
}

pub fn lessons_for_syllabus(conn: &Connection, syllabus_id: i64) -> AppResult<Vec<Lesson>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM lessons
         WHERE syllabus_id = ?1 AND is_active = 1
         ORDER BY order_index ASC, id ASC",
    )?;
    let rows = stmt.query_map([syllabus_id], map_lesson)?;
    collect(rows)
}

// ---------------------------
// Enrollments
// ---------------------------

const ENROLLMENT_SELECT: &str = "SELECT e.*, s.code AS syllabus_code, s.title AS syllabus_title
     FROM enrollments e
     JOIN syllabi s ON s.id = e.syllabus_id";

pub fn map_enrollment(row: &Row) -> Result<Enrollment> {
    let status_str: String = row.get("status")?;
    let status = EnrollmentStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(
            0,
            AppError::Other(format!("Invalid enrollment status: {status_str}")),
        )
    })?;

    Ok(Enrollment {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        student_name: row.get("student_name")?,
        instructor_id: row.get("instructor_id")?,
        instructor_name: row.get("instructor_name")?,
        syllabus: Syllabus {
            id: row.get("syllabus_id")?,
            code: row.get("syllabus_code")?,
            title: row.get("syllabus_title")?,
        },
        start_date: date_column(row, "start_date")?,
        status,
    })
}

pub struct NewEnrollment<'a> {
    pub student_id: i64,
    pub student_name: &'a str,
    pub instructor_id: i64,
    pub instructor_name: &'a str,
    pub syllabus_id: i64,
    pub start_date: NaiveDate,
}

pub fn insert_enrollment(conn: &Connection, e: &NewEnrollment) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO enrollments (student_id, student_name, instructor_id, instructor_name, syllabus_id, start_date, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'active')",
        params![
            e.student_id,
            e.student_name,
            e.instructor_id,
            e.instructor_name,
            e.syllabus_id,
            e.start_date.format("%Y-%m-%d").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_enrollments(conn: &Connection) -> AppResult<Vec<Enrollment>> {
    let sql = format!("{ENROLLMENT_SELECT} ORDER BY e.id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_enrollment)?;
    collect(rows)
}

pub fn load_enrollment(conn: &Connection, id: i64) -> AppResult<Enrollment> {
    let sql = format!("{ENROLLMENT_SELECT} WHERE e.id = ?1");
    conn.query_row(&sql, [id], map_enrollment)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("enrollment {id}")))
}

// ---------------------------
// Missions
// ---------------------------

pub fn map_mission(row: &Row) -> Result<Mission> {
    let type_str: String = row.get("mission_type")?;
    let mission_type = MissionType::from_db_str(&type_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidMissionType(type_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = MissionStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(0, AppError::Other(format!("Invalid mission status: {status_str}")))
    })?;

    let assessment = row
        .get::<_, Option<String>>("assessment")?
        .and_then(|s| InstructorAssessment::from_db_str(&s));

    let custom = match row.get::<_, Option<String>>("custom")? {
        Some(json) => Some(
            serde_json::from_str::<CustomMission>(&json)
                .map_err(|e| conversion_error(0, AppError::Other(e.to_string())))?,
        ),
        None => None,
    };

    Ok(Mission {
        id: row.get("id")?,
        enrollment_id: row.get("enrollment_id")?,
        student_id: row.get("student_id")?,
        instructor_id: row.get("instructor_id")?,
        mission_code: row.get("mission_code")?,
        mission_number: row.get("mission_number")?,
        program_code: row.get("program_code")?,
        mission_type,
        lesson_id: row.get("lesson_id")?,
        lesson_code: row.get("lesson_code")?,
        custom,
        is_customized: row.get::<_, i32>("is_customized")? == 1,
        scheduled_date: date_column(row, "scheduled_date")?,
        scheduled_start_time: row.get("start_time")?,
        aircraft_id: row.get("aircraft_id")?,
        status,
        assessment,
        generate_poa: row.get::<_, i32>("generate_poa")? == 1,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        completed_at: row.get("completed_at")?,
        cancelled_at: row.get("cancelled_at")?,
        cancellation_reason: row.get("cancellation_reason")?,
    })
}

pub fn insert_mission(conn: &Connection, m: &NewMission) -> AppResult<i64> {
    let custom = match &m.custom {
        Some(c) => Some(serde_json::to_string(c).map_err(|e| AppError::Other(e.to_string()))?),
        None => None,
    };

    conn.execute(
        "INSERT INTO missions (
            enrollment_id, student_id, instructor_id, mission_code, mission_number,
            program_code, mission_type, lesson_id, lesson_code, custom, is_customized,
            scheduled_date, start_time, aircraft_id, status, generate_poa, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, 'scheduled', ?15, ?16, ?17)",
        params![
            m.enrollment_id,
            m.student_id,
            m.instructor_id,
            m.mission_code,
            m.mission_number,
            m.program_code,
            m.mission_type.to_db_str(),
            m.lesson_id,
            m.lesson_code,
            custom,
            if m.is_customized { 1 } else { 0 },
            m.scheduled_date.format("%Y-%m-%d").to_string(),
            m.scheduled_start_time,
            m.aircraft_id,
            if m.generate_poa { 1 } else { 0 },
            m.notes,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_mission(conn: &Connection, id: i64) -> AppResult<Mission> {
    conn.query_row("SELECT * FROM missions WHERE id = ?1", [id], map_mission)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("mission {id}")))
}

pub fn load_missions(conn: &Connection, filter: &MissionFilter) -> AppResult<Vec<Mission>> {
    let mut sql = String::from("SELECT * FROM missions WHERE 1=1");
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    if !filter.statuses.is_empty() {
        let marks = vec!["?"; filter.statuses.len()].join(", ");
        sql.push_str(&format!(" AND status IN ({marks})"));
        for s in &filter.statuses {
            args.push(Box::new(s.to_db_str()));
        }
    }
    if let Some(kind) = filter.mission_type {
        sql.push_str(" AND mission_type = ?");
        args.push(Box::new(kind.to_db_str()));
    }
    if let Some(id) = filter.enrollment_id {
        sql.push_str(" AND enrollment_id = ?");
        args.push(Box::new(id));
    }
    if let Some(id) = filter.student_id {
        sql.push_str(" AND student_id = ?");
        args.push(Box::new(id));
    }
    if let Some(id) = filter.instructor_id {
        sql.push_str(" AND instructor_id = ?");
        args.push(Box::new(id));
    }
    if let Some(d) = filter.start_date {
        sql.push_str(" AND scheduled_date >= ?");
        args.push(Box::new(d.format("%Y-%m-%d").to_string()));
    }
    if let Some(d) = filter.end_date {
        sql.push_str(" AND scheduled_date <= ?");
        args.push(Box::new(d.format("%Y-%m-%d").to_string()));
    }

    sql.push_str(" ORDER BY scheduled_date ASC, IFNULL(start_time, '') ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let refs: Vec<&dyn ToSql> = args.iter().map(|a| a.as_ref()).collect();
    let rows = stmt.query_map(refs.as_slice(), map_mission)?;
    collect(rows)
}

pub fn update_mission_status(conn: &Connection, id: i64, update: &StatusUpdate) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let changed = match update.status {
        MissionStatus::Completed | MissionStatus::PartiallyCompleted => conn.execute(
            "UPDATE missions SET status = ?1, assessment = ?2, completed_at = ?3 WHERE id = ?4",
            params![
                update.status.to_db_str(),
                update.assessment.map(|a| a.to_db_str()),
                now,
                id
            ],
        )?,
        MissionStatus::Cancelled => conn.execute(
            "UPDATE missions SET status = ?1, cancelled_at = ?2, cancellation_reason = ?3 WHERE id = ?4",
            params![update.status.to_db_str(), now, update.reason, id],
        )?,
        _ => conn.execute(
            "UPDATE missions SET status = ?1 WHERE id = ?2",
            params![update.status.to_db_str(), id],
        )?,
    };

    if changed == 0 {
        return Err(AppError::NotFound(format!("mission {id}")));
    }
    Ok(())
}

pub fn max_mission_number(
    conn: &Connection,
    enrollment_id: i64,
    mission_type: MissionType,
) -> AppResult<u32> {
    let max: Option<u32> = conn.query_row(
        "SELECT MAX(mission_number) FROM missions WHERE enrollment_id = ?1 AND mission_type = ?2",
        params![enrollment_id, mission_type.to_db_str()],
        |row| row.get(0),
    )?;
    Ok(max.unwrap_or(0))
}

pub fn completed_lesson_ids(conn: &Connection, enrollment_id: i64) -> AppResult<HashSet<i64>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT lesson_id FROM missions
         WHERE enrollment_id = ?1 AND status = 'completed' AND lesson_id IS NOT NULL",
    )?;
    let rows = stmt.query_map([enrollment_id], |row| row.get::<_, i64>(0))?;
    Ok(collect(rows)?.into_iter().collect())
}

pub fn last_completed_mission(
    conn: &Connection,
    enrollment_id: i64,
) -> AppResult<Option<LastCompletedMission>> {
    let found = conn
        .query_row(
            "SELECT m.id, m.mission_code, m.scheduled_date, m.custom, l.title
             FROM missions m
             LEFT JOIN lessons l ON l.id = m.lesson_id
             WHERE m.enrollment_id = ?1 AND m.status = 'completed'
             ORDER BY m.scheduled_date DESC, m.id DESC
             LIMIT 1",
            [enrollment_id],
            |row| {
                let custom: Option<String> = row.get(3)?;
                let lesson_title: Option<String> = row.get(4)?;
                let title = lesson_title
                    .or_else(|| {
                        custom
                            .and_then(|c| serde_json::from_str::<CustomMission>(&c).ok())
                            .map(|c| c.title)
                    })
                    .unwrap_or_default();

                Ok(LastCompletedMission {
                    mission_id: row.get(0)?,
                    mission_code: row.get(1)?,
                    scheduled_date: row.get(2)?,
                    lesson_title: title,
                })
            },
        )
        .optional()?;
    Ok(found)
}
