//! Data-access boundary. The scheduling core only talks to the school's
//! records through [`SchoolApi`]; `db::SqliteApi` is the local implementation.

use crate::core::calculator::progress::LastCompletedMission;
use crate::errors::AppResult;
use crate::models::aircraft::Aircraft;
use crate::models::enrollment::Enrollment;
use crate::models::lesson::Lesson;
use crate::models::mission::{CustomMission, InstructorAssessment, Mission, MissionStatus};
use crate::models::mission_type::MissionType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where a mission's content comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    /// A lesson template from the enrollment's syllabus.
    #[default]
    Precreated,
    Custom,
}

/// Body of a mission-creation request, as assembled by the wizard or the
/// express-schedule form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionRequest {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub mode: ContentMode,
    pub lesson_id: Option<i64>,
    pub mission_type: MissionType,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub aircraft_id: Option<i64>,
    #[serde(rename = "generatePOA")]
    pub generate_poa: bool,
    #[serde(default)]
    pub notes: String,
    pub custom: Option<CustomMission>,
}

/// A fully resolved mission ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMission {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub instructor_id: i64,
    pub mission_code: String,
    pub mission_number: u32,
    pub program_code: String,
    pub mission_type: MissionType,
    pub lesson_id: Option<i64>,
    pub lesson_code: Option<String>,
    pub custom: Option<CustomMission>,
    pub is_customized: bool,
    pub scheduled_date: NaiveDate,
    pub scheduled_start_time: Option<String>,
    pub aircraft_id: Option<i64>,
    pub generate_poa: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Default)]
pub struct MissionFilter {
    pub statuses: Vec<MissionStatus>,
    pub mission_type: Option<MissionType>,
    pub enrollment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub instructor_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub status: MissionStatus,
    pub assessment: Option<InstructorAssessment>,
    pub reason: Option<String>,
}

pub trait SchoolApi {
    fn list_aircraft(&self) -> AppResult<Vec<Aircraft>>;

    fn list_enrollments(&self) -> AppResult<Vec<Enrollment>>;

    fn enrollment(&self, enrollment_id: i64) -> AppResult<Enrollment>;

    /// Active lessons of the enrollment's syllabus, ordered by `order_index`.
    fn enrollment_lessons(&self, enrollment_id: i64) -> AppResult<Vec<Lesson>>;

    fn lesson(&self, lesson_id: i64) -> AppResult<Lesson>;

    /// Lesson ids with at least one completed mission for this enrollment.
    fn completed_lesson_ids(&self, enrollment_id: i64) -> AppResult<HashSet<i64>>;

    fn last_completed_mission(&self, enrollment_id: i64)
    -> AppResult<Option<LastCompletedMission>>;

    /// Highest mission number for this enrollment and type, plus one.
    fn next_mission_number(&self, enrollment_id: i64, mission_type: MissionType)
    -> AppResult<u32>;

    fn insert_mission(&self, mission: &NewMission) -> AppResult<Mission>;

    fn mission(&self, mission_id: i64) -> AppResult<Mission>;

    fn missions(&self, filter: &MissionFilter) -> AppResult<Vec<Mission>>;

    fn update_mission_status(&self, mission_id: i64, update: &StatusUpdate) -> AppResult<Mission>;

    /// Append a line to the audit trail. Callers treat failures as non-fatal.
    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()>;
}
