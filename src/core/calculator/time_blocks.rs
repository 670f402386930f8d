//! Mission time blocks: a mission of a given type, start time and training
//! duration is split into contiguous labeled intervals, each with the set of
//! people present. Nothing here is stored; it is recomputed for display.

use crate::errors::{AppError, AppResult};
use crate::models::mission_type::MissionType;
use crate::models::participant::Participant;
use crate::utils::time::{MINUTES_PER_DAY, format_hhmm, parse_hhmm};
use serde::Serialize;
use std::collections::BTreeSet;

/// Longest accepted block, training or fixed. A mission spans at most a
/// day plus its fixed blocks, so minute arithmetic stays far from overflow.
pub const MAX_BLOCK_MINUTES: i64 = MINUTES_PER_DAY;

/// Fixed block durations around the training block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPolicy {
    /// Student-only aircraft inspection before a flight.
    pub preflight_minutes: i64,
    /// Optional joint briefing before the training block, any mission type.
    pub prebrief_minutes: i64,
    /// Joint debrief after a flight.
    pub postflight_minutes: i64,
    /// Optional joint debrief after ground and simulator sessions.
    pub ground_postbrief_minutes: i64,
    pub allow_cross_midnight: bool,
}

impl Default for BlockPolicy {
    fn default() -> Self {
        Self {
            preflight_minutes: 30,
            prebrief_minutes: 0,
            postflight_minutes: 30,
            ground_postbrief_minutes: 0,
            allow_cross_midnight: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBlock {
    pub label: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub participants: BTreeSet<Participant>,
    /// Offsets in minutes since midnight of the mission day.
    #[serde(skip)]
    pub start_minute: i64,
    #[serde(skip)]
    pub end_minute: i64,
}

impl TimeBlock {
    pub fn includes(&self, who: Participant) -> bool {
        self.participants.contains(&who)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionTimeBreakdown {
    pub mission_type: MissionType,
    pub blocks: Vec<TimeBlock>,
    pub total_student_time: i64,
    pub total_instructor_time: i64,
    pub student_start_time: String,
    pub instructor_start_time: String,
    pub end_time: String,
    pub ends_next_day: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandardDurations {
    pub typical: i64,
    pub min: i64,
    pub max: i64,
}

/// Typical training durations offered when scheduling.
pub fn standard_durations(kind: MissionType) -> StandardDurations {
    match kind {
        MissionType::Flight => StandardDurations {
            typical: 120,
            min: 60,
            max: 180,
        },
        MissionType::Ground | MissionType::Simulator => StandardDurations {
            typical: 90,
            min: 60,
            max: 120,
        },
    }
}

fn training_block_text(kind: MissionType) -> (&'static str, &'static str) {
    match kind {
        MissionType::Flight => (
            "Flight Training",
            "Airborne training maneuvers and procedures",
        ),
        MissionType::Ground => (
            "Ground Instruction",
            "Classroom instruction and knowledge building",
        ),
        MissionType::Simulator => (
            "Simulator Session",
            "Simulator training and procedures practice",
        ),
    }
}

struct Cursor {
    minute: i64,
    wrap: bool,
    blocks: Vec<TimeBlock>,
}

impl Cursor {
    fn push(&mut self, label: &str, description: &str, duration: i64, who: &[Participant]) {
        if duration <= 0 {
            return;
        }
        let start = self.minute;
        let end = start + duration;
        self.blocks.push(TimeBlock {
            label: label.to_string(),
            description: description.to_string(),
            start_time: format_hhmm(start, self.wrap),
            end_time: format_hhmm(end, self.wrap),
            duration_minutes: duration,
            participants: who.iter().copied().collect(),
            start_minute: start,
            end_minute: end,
        });
        self.minute = end;
    }
}

/// Split a mission into time blocks using the default durations.
///
/// `calculate_mission_time_blocks(Flight, "09:00", 120)` yields a student-only
/// pre-flight 09:00–09:30, training 09:30–11:30 and debrief 11:30–12:00.
pub fn calculate_mission_time_blocks(
    mission_type: MissionType,
    start_time: &str,
    training_duration_minutes: i64,
) -> AppResult<MissionTimeBreakdown> {
    calculate_with_policy(
        &BlockPolicy::default(),
        mission_type,
        start_time,
        training_duration_minutes,
    )
}

pub fn calculate_with_policy(
    policy: &BlockPolicy,
    mission_type: MissionType,
    start_time: &str,
    training_duration_minutes: i64,
) -> AppResult<MissionTimeBreakdown> {
    if training_duration_minutes <= 0 || training_duration_minutes > MAX_BLOCK_MINUTES {
        return Err(AppError::InvalidDuration(training_duration_minutes));
    }
    for fixed in [
        policy.preflight_minutes,
        policy.prebrief_minutes,
        policy.postflight_minutes,
        policy.ground_postbrief_minutes,
    ] {
        if !(0..=MAX_BLOCK_MINUTES).contains(&fixed) {
            return Err(AppError::InvalidDuration(fixed));
        }
    }

    let start = parse_hhmm(start_time)?;
    let both = [Participant::Student, Participant::Instructor];

    let mut cursor = Cursor {
        minute: start,
        wrap: policy.allow_cross_midnight,
        blocks: Vec::new(),
    };

    if mission_type == MissionType::Flight {
        cursor.push(
            "Pre-Flight Inspection",
            "Student conducts aircraft pre-flight inspection",
            policy.preflight_minutes,
            &[Participant::Student],
        );
    }

    cursor.push(
        "Pre-Brief",
        "Review objectives, weather, and safety considerations",
        policy.prebrief_minutes,
        &both,
    );

    let (label, description) = training_block_text(mission_type);
    cursor.push(label, description, training_duration_minutes, &both);

    match mission_type {
        MissionType::Flight => cursor.push(
            "Post-Flight Debrief",
            "Review performance and key takeaways",
            policy.postflight_minutes,
            &both,
        ),
        MissionType::Ground | MissionType::Simulator => cursor.push(
            "Post-Brief / Debrief",
            "Review performance and key takeaways",
            policy.ground_postbrief_minutes,
            &both,
        ),
    }

    let end = cursor.minute;
    let ends_next_day = end > MINUTES_PER_DAY;
    if ends_next_day && !policy.allow_cross_midnight {
        return Err(AppError::CrossesMidnight {
            start: format_hhmm(start, false),
            end: format_hhmm(end, true),
        });
    }

    let blocks = cursor.blocks;

    let total_student_time = blocks
        .iter()
        .filter(|b| b.includes(Participant::Student))
        .map(|b| b.duration_minutes)
        .sum();
    let total_instructor_time = blocks
        .iter()
        .filter(|b| b.includes(Participant::Instructor))
        .map(|b| b.duration_minutes)
        .sum();

    // The training block always includes the instructor, so this is found.
    let instructor_start = blocks
        .iter()
        .find(|b| b.includes(Participant::Instructor))
        .map(|b| b.start_minute)
        .unwrap_or(start);

    Ok(MissionTimeBreakdown {
        mission_type,
        student_start_time: format_hhmm(start, policy.allow_cross_midnight),
        instructor_start_time: format_hhmm(instructor_start, policy.allow_cross_midnight),
        end_time: format_hhmm(end, policy.allow_cross_midnight),
        total_student_time,
        total_instructor_time,
        ends_next_day,
        blocks,
    })
}

/// End time only, for list views.
pub fn mission_end_time(
    policy: &BlockPolicy,
    mission_type: MissionType,
    start_time: &str,
    training_duration_minutes: i64,
) -> AppResult<String> {
    calculate_with_policy(policy, mission_type, start_time, training_duration_minutes)
        .map(|b| b.end_time)
}
