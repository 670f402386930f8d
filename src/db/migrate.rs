use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20260301_0001_create_school_tables",
        description: "Created aircraft, syllabi, lessons and enrollments tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS aircraft (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            tail_number  TEXT NOT NULL UNIQUE,
            make         TEXT NOT NULL DEFAULT '',
            model        TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS syllabi (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            code   TEXT,
            title  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS lessons (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            syllabus_id         INTEGER NOT NULL REFERENCES syllabi(id),
            title               TEXT NOT NULL,
            description         TEXT NOT NULL DEFAULT '',
            order_index         INTEGER NOT NULL,
            lesson_type         TEXT NOT NULL
                CHECK(lesson_type IN ('flight','ground','simulator','briefing','checkride')),
            estimated_duration  INTEGER,
            is_active           INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS enrollments (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id       INTEGER NOT NULL,
            student_name     TEXT NOT NULL,
            instructor_id    INTEGER NOT NULL,
            instructor_name  TEXT NOT NULL,
            syllabus_id      INTEGER NOT NULL REFERENCES syllabi(id),
            start_date       TEXT NOT NULL,
            status           TEXT NOT NULL DEFAULT 'active'
                CHECK(status IN ('pending','active','on_hold','completed','withdrawn'))
        );

        CREATE INDEX IF NOT EXISTS idx_lessons_syllabus_order ON lessons(syllabus_id, order_index);
        "#,
    },
    Migration {
        version: "20260301_0002_create_missions",
        description: "Created missions table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS missions (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            enrollment_id        INTEGER NOT NULL REFERENCES enrollments(id),
            student_id           INTEGER NOT NULL,
            instructor_id        INTEGER NOT NULL,
            mission_code         TEXT NOT NULL,
            mission_number       INTEGER NOT NULL,
            program_code         TEXT NOT NULL,
            mission_type         TEXT NOT NULL CHECK(mission_type IN ('F','G','S')),
            lesson_id            INTEGER REFERENCES lessons(id),
            lesson_code          TEXT,
            custom               TEXT,
            is_customized        INTEGER NOT NULL DEFAULT 0,
            scheduled_date       TEXT NOT NULL,
            start_time           TEXT,
            aircraft_id          INTEGER REFERENCES aircraft(id),
            status               TEXT NOT NULL DEFAULT 'scheduled'
                CHECK(status IN ('scheduled','in_progress','completed','cancelled','partially_completed')),
            assessment           TEXT,
            generate_poa         INTEGER NOT NULL DEFAULT 1,
            notes                TEXT NOT NULL DEFAULT '',
            created_at           TEXT NOT NULL,
            completed_at         TEXT,
            cancelled_at         TEXT,
            cancellation_reason  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_missions_enrollment ON missions(enrollment_id, mission_type);
        CREATE INDEX IF NOT EXISTS idx_missions_date ON missions(scheduled_date);
        "#,
    },
    Migration {
        version: "20260412_0003_unique_mission_numbers",
        description: "Mission numbers are unique per enrollment and type",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_missions_number
            ON missions(enrollment_id, mission_type, mission_number);
        "#,
    },
];

/// Ensure that the `log` table exists. Migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    conn.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions already recorded in the log, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Public entry point: run all pending migrations, in order.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}
