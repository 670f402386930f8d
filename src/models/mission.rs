use super::mission_type::MissionType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    PartiallyCompleted,
}

impl MissionStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MissionStatus::Scheduled => "scheduled",
            MissionStatus::InProgress => "in_progress",
            MissionStatus::Completed => "completed",
            MissionStatus::Cancelled => "cancelled",
            MissionStatus::PartiallyCompleted => "partially_completed",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(MissionStatus::Scheduled),
            "in_progress" => Some(MissionStatus::InProgress),
            "completed" => Some(MissionStatus::Completed),
            "cancelled" => Some(MissionStatus::Cancelled),
            "partially_completed" => Some(MissionStatus::PartiallyCompleted),
            _ => None,
        }
    }

    /// Lifecycle: scheduled → in_progress → completed | partially_completed,
    /// and scheduled | in_progress → cancelled.
    pub fn can_transition_to(&self, next: MissionStatus) -> bool {
        use MissionStatus::*;
        matches!(
            (self, next),
            (Scheduled, InProgress)
                | (Scheduled, Cancelled)
                | (InProgress, Completed)
                | (InProgress, PartiallyCompleted)
                | (InProgress, Cancelled)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructorAssessment {
    Satisfactory,
    NeedsMorePractice,
    Outstanding,
}

impl InstructorAssessment {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            InstructorAssessment::Satisfactory => "satisfactory",
            InstructorAssessment::NeedsMorePractice => "needs_more_practice",
            InstructorAssessment::Outstanding => "outstanding",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "satisfactory" => Some(InstructorAssessment::Satisfactory),
            "needs_more_practice" => Some(InstructorAssessment::NeedsMorePractice),
            "outstanding" => Some(InstructorAssessment::Outstanding),
            _ => None,
        }
    }

    /// Numeric score used for averages.
    pub fn score(&self) -> f64 {
        match self {
            InstructorAssessment::Outstanding => 4.0,
            InstructorAssessment::Satisfactory => 3.0,
            InstructorAssessment::NeedsMorePractice => 2.0,
        }
    }
}

/// Free-form content of a mission created without a lesson template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomMission {
    pub title: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub maneuvers: Vec<String>,
    #[serde(default)]
    pub topics: String,
    #[serde(default)]
    pub standards: String,
    #[serde(default)]
    pub prep: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Mission {
    pub id: i64,
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
    pub status: MissionStatus,
    pub assessment: Option<InstructorAssessment>,
    pub generate_poa: bool,
    pub notes: String,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub cancelled_at: Option<String>,
    pub cancellation_reason: Option<String>,
}

impl Mission {
    pub fn date_str(&self) -> String {
        self.scheduled_date.format("%Y-%m-%d").to_string()
    }
}
