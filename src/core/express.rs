//! One-shot scheduling form: pick a lesson, a date and a slot, done.

use crate::api::{ContentMode, MissionRequest};
use crate::errors::{AppError, AppResult};
use crate::models::enrollment::Enrollment;
use crate::models::lesson::Lesson;
use crate::models::mission_type::MissionType;
use crate::utils::time::parse_time;
use chrono::NaiveDate;

/// Half-hour slots offered by the form, 06:00 through 18:00.
pub const COMMON_START_TIMES: [&str; 25] = [
    "06:00", "06:30", "07:00", "07:30", "08:00", "08:30", "09:00", "09:30", "10:00", "10:30",
    "11:00", "11:30", "12:00", "12:30", "13:00", "13:30", "14:00", "14:30", "15:00", "15:30",
    "16:00", "16:30", "17:00", "17:30", "18:00",
];

pub const DEFAULT_START_TIME: &str = "07:00";

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressForm {
    pub enrollment_id: Option<i64>,
    pub lesson_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub start_time: String,
    pub aircraft_id: Option<i64>,
    pub generate_poa: bool,
    pub notes: String,
}

impl ExpressForm {
    pub fn new(default_start: &str) -> Self {
        Self {
            enrollment_id: None,
            lesson_id: None,
            date: None,
            start_time: default_start.to_string(),
            aircraft_id: None,
            generate_poa: true,
            notes: String::new(),
        }
    }
}

impl Default for ExpressForm {
    fn default() -> Self {
        Self::new(DEFAULT_START_TIME)
    }
}

/// Unknown or missing lesson types schedule as a flight.
pub fn mission_type_for(lesson: Option<&Lesson>) -> MissionType {
    lesson
        .map(|l| l.lesson_type.mission_type())
        .unwrap_or(MissionType::Flight)
}

/// Check the form and turn it into a creation request.
pub fn build_request(
    form: &ExpressForm,
    enrollment: Option<&Enrollment>,
    lesson: Option<&Lesson>,
) -> AppResult<MissionRequest> {
    let required = || AppError::Validation("Please fill in all required fields".into());

    let (Some(enrollment_id), Some(lesson_id), Some(date)) =
        (form.enrollment_id, form.lesson_id, form.date)
    else {
        return Err(required());
    };
    if form.start_time.trim().is_empty() {
        return Err(required());
    }

    let enrollment = enrollment
        .filter(|e| e.id == enrollment_id)
        .ok_or_else(|| AppError::NotFound(format!("enrollment {enrollment_id}")))?;
    let lesson = lesson.filter(|l| l.id == lesson_id);

    let start = form.start_time.trim();
    if parse_time(start).is_none() {
        return Err(AppError::InvalidTime(start.to_string()));
    }

    let mission_type = mission_type_for(lesson);
    if mission_type.requires_aircraft() && form.aircraft_id.is_none() {
        return Err(AppError::Validation(
            "Please select an aircraft for flight missions".into(),
        ));
    }

    Ok(MissionRequest {
        enrollment_id,
        student_id: enrollment.student_id,
        mode: ContentMode::Precreated,
        lesson_id: Some(lesson_id),
        mission_type,
        date,
        start_time: Some(start.to_string()),
        aircraft_id: form.aircraft_id,
        generate_poa: form.generate_poa,
        notes: form.notes.clone(),
        custom: None,
    })
}
