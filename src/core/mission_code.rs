//! Display identifiers for missions and syllabus lessons. Formatting only:
//! sequence numbers come from the data layer, which also owns uniqueness.

use crate::api::SchoolApi;
use crate::errors::AppResult;
use crate::models::enrollment::Enrollment;
use crate::models::mission_type::MissionType;

/// `format_mission_code("DSA", "PPC", 'F', 14) == "DSA-PPC-F14"`
pub fn format_mission_code(
    school_prefix: &str,
    program_code: &str,
    mission_type_letter: char,
    sequence_number: u32,
) -> String {
    format!("{school_prefix}-{program_code}-{mission_type_letter}{sequence_number}")
}

/// `format_lesson_code("PPC", 3) == "PPC-L3"`
pub fn format_lesson_code(program_code: &str, order_index: i32) -> String {
    format!("{program_code}-L{order_index}")
}

/// Code the next mission of this type would get for the enrollment.
pub fn preview_mission_code<A: SchoolApi + ?Sized>(
    api: &A,
    enrollment: &Enrollment,
    mission_type: MissionType,
    school_prefix: &str,
    default_program_code: &str,
) -> AppResult<String> {
    let number = api.next_mission_number(enrollment.id, mission_type)?;
    Ok(format_mission_code(
        school_prefix,
        &enrollment.program_code(default_program_code),
        mission_type.letter(),
        number,
    ))
}
