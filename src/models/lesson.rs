use super::mission_type::MissionType;
use crate::errors::AppError;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    Flight,
    Ground,
    Simulator,
    Briefing,
    Checkride,
}

impl LessonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Flight => "flight",
            LessonType::Ground => "ground",
            LessonType::Simulator => "simulator",
            LessonType::Briefing => "briefing",
            LessonType::Checkride => "checkride",
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        self.as_str()
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "flight" => Some(LessonType::Flight),
            "ground" => Some(LessonType::Ground),
            "simulator" | "sim" => Some(LessonType::Simulator),
            "briefing" => Some(LessonType::Briefing),
            "checkride" => Some(LessonType::Checkride),
            _ => None,
        }
    }

    /// Mission type a lesson of this kind is scheduled as.
    /// Briefings happen on the ground; checkrides are flown.
    pub fn mission_type(&self) -> MissionType {
        match self {
            LessonType::Flight | LessonType::Checkride => MissionType::Flight,
            LessonType::Ground | LessonType::Briefing => MissionType::Ground,
            LessonType::Simulator => MissionType::Simulator,
        }
    }
}

impl FromStr for LessonType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LessonType::from_db_str(s).ok_or_else(|| AppError::InvalidLessonType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    pub id: i64,
    pub syllabus_id: i64,
    pub title: String,
    pub description: String,
    pub order_index: i32,
    pub lesson_type: LessonType,
    pub estimated_duration_minutes: Option<i64>,
    pub is_active: bool,
}
