use crate::api::{MissionFilter, NewMission, SchoolApi, StatusUpdate};
use crate::core::calculator::progress::LastCompletedMission;
use crate::db::{log, queries};
use crate::errors::AppResult;
use crate::models::aircraft::Aircraft;
use crate::models::enrollment::Enrollment;
use crate::models::lesson::Lesson;
use crate::models::mission::Mission;
use crate::models::mission_type::MissionType;
use rusqlite::Connection;
use std::collections::HashSet;

/// [`SchoolApi`] over the local SQLite file.
pub struct SqliteApi<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl SchoolApi for SqliteApi<'_> {
    fn list_aircraft(&self) -> AppResult<Vec<Aircraft>> {
        queries::list_aircraft(self.conn)
    }

    fn list_enrollments(&self) -> AppResult<Vec<Enrollment>> {
        queries::list_enrollments(self.conn)
    }

    fn enrollment(&self, enrollment_id: i64) -> AppResult<Enrollment> {
        queries::load_enrollment(self.conn, enrollment_id)
    }

    fn enrollment_lessons(&self, enrollment_id: i64) -> AppResult<Vec<Lesson>> {
        let enrollment = queries::load_enrollment(self.conn, enrollment_id)?;
        queries::lessons_for_syllabus(self.conn, enrollment.syllabus.id)
    }

    fn lesson(&self, lesson_id: i64) -> AppResult<Lesson> {
        queries::load_lesson(self.conn, lesson_id)
    }

    fn completed_lesson_ids(&self, enrollment_id: i64) -> AppResult<HashSet<i64>> {
        queries::completed_lesson_ids(self.conn, enrollment_id)
    }

    fn last_completed_mission(
        &self,
        enrollment_id: i64,
    ) -> AppResult<Option<LastCompletedMission>> {
        queries::last_completed_mission(self.conn, enrollment_id)
    }

    fn next_mission_number(&self, enrollment_id: i64, mission_type: MissionType) -> AppResult<u32> {
        Ok(queries::max_mission_number(self.conn, enrollment_id, mission_type)? + 1)
    }

    fn insert_mission(&self, mission: &NewMission) -> AppResult<Mission> {
        let id = queries::insert_mission(self.conn, mission)?;
        queries::load_mission(self.conn, id)
    }

    fn mission(&self, mission_id: i64) -> AppResult<Mission> {
        queries::load_mission(self.conn, mission_id)
    }

    fn missions(&self, filter: &MissionFilter) -> AppResult<Vec<Mission>> {
        queries::load_missions(self.conn, filter)
    }

    fn update_mission_status(&self, mission_id: i64, update: &StatusUpdate) -> AppResult<Mission> {
        queries::update_mission_status(self.conn, mission_id, update)?;
        queries::load_mission(self.conn, mission_id)
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        log::audit(self.conn, operation, target, message)
    }
}
