use crate::api::{MissionFilter, SchoolApi};
use crate::errors::AppResult;
use crate::models::mission::{Mission, MissionStatus};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentMissionStats {
    pub total_missions: usize,
    pub completed_missions: usize,
    pub cancelled_missions: usize,
    /// Mean assessment score over completed missions that carry one.
    pub average_assessment_score: Option<f64>,
}

pub fn summarize(missions: &[Mission]) -> StudentMissionStats {
    let completed: Vec<&Mission> = missions
        .iter()
        .filter(|m| m.status == MissionStatus::Completed)
        .collect();

    let scores: Vec<f64> = completed
        .iter()
        .filter_map(|m| m.assessment.map(|a| a.score()))
        .collect();

    let average_assessment_score = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    StudentMissionStats {
        total_missions: missions.len(),
        completed_missions: completed.len(),
        cancelled_missions: missions
            .iter()
            .filter(|m| m.status == MissionStatus::Cancelled)
            .count(),
        average_assessment_score,
    }
}

pub fn student_stats<A: SchoolApi + ?Sized>(
    api: &A,
    student_id: i64,
    enrollment_id: Option<i64>,
) -> AppResult<StudentMissionStats> {
    let filter = MissionFilter {
        student_id: Some(student_id),
        enrollment_id,
        ..Default::default()
    };
    Ok(summarize(&api.missions(&filter)?))
}
