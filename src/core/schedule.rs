use crate::api::{ContentMode, MissionRequest, NewMission, SchoolApi, StatusUpdate};
use crate::config::Config;
use crate::core::calculator::time_blocks::{
    MissionTimeBreakdown, calculate_with_policy, standard_durations,
};
use crate::core::mission_code::{format_lesson_code, format_mission_code};
use crate::core::wizard::MissionSubmitter;
use crate::errors::{AppError, AppResult};
use crate::models::lesson::Lesson;
use crate::models::mission::{InstructorAssessment, Mission, MissionStatus};
use crate::models::mission_type::MissionType;
use crate::ui::messages::warning;

/// Training-block length for a mission: the lesson's estimate when it has
/// one, otherwise the typical duration for the mission type.
pub fn training_minutes(lesson: Option<&Lesson>, mission_type: MissionType) -> i64 {
    lesson
        .and_then(|l| l.estimated_duration_minutes)
        .filter(|m| *m > 0)
        .unwrap_or_else(|| standard_durations(mission_type).typical)
}

/// High-level business logic for creating missions and moving them
/// through their lifecycle.
pub struct ScheduleLogic;

impl ScheduleLogic {
    /// Shape checks that need no data lookups.
    pub fn validate_request(req: &MissionRequest) -> AppResult<()> {
        if req.enrollment_id <= 0 || req.student_id <= 0 {
            return Err(AppError::Validation("Missing required fields".into()));
        }

        match req.mode {
            ContentMode::Precreated if req.lesson_id.is_none() => {
                return Err(AppError::Validation("Please select a lesson".into()));
            }
            ContentMode::Custom
                if req
                    .custom
                    .as_ref()
                    .is_none_or(|c| c.title.trim().is_empty()) =>
            {
                return Err(AppError::Validation(
                    "Please enter a title for the custom mission".into(),
                ));
            }
            _ => {}
        }

        if req.mission_type.requires_aircraft() && req.aircraft_id.is_none() {
            return Err(AppError::Validation(
                "Please select an aircraft for flight missions".into(),
            ));
        }

        Ok(())
    }

    /// Time blocks for a request that has a start time.
    pub fn breakdown_for<A: SchoolApi + ?Sized>(
        api: &A,
        cfg: &Config,
        req: &MissionRequest,
    ) -> AppResult<Option<MissionTimeBreakdown>> {
        let Some(start) = req.start_time.as_deref() else {
            return Ok(None);
        };

        let lesson = match (req.mode, req.lesson_id) {
            (ContentMode::Precreated, Some(id)) => Some(api.lesson(id)?),
            _ => None,
        };

        let minutes = training_minutes(lesson.as_ref(), req.mission_type);
        calculate_with_policy(&cfg.block_policy(), req.mission_type, start, minutes).map(Some)
    }

    pub fn create<A: SchoolApi + ?Sized>(
        api: &A,
        cfg: &Config,
        req: &MissionRequest,
    ) -> AppResult<Mission> {
        Self::validate_request(req)?;

        let enrollment = api.enrollment(req.enrollment_id)?;
        if enrollment.student_id != req.student_id {
            return Err(AppError::Validation(format!(
                "Student {} is not enrolled in enrollment {}",
                req.student_id, req.enrollment_id
            )));
        }

        let program_code = enrollment.program_code(&cfg.default_program_code);

        // Lesson template, when one is used
        let lesson = match (req.mode, req.lesson_id) {
            (ContentMode::Precreated, Some(id)) => {
                let lesson = api.lesson(id)?;
                if lesson.syllabus_id != enrollment.syllabus.id {
                    return Err(AppError::Validation(format!(
                        "Lesson '{}' is not part of {}",
                        lesson.title, enrollment.syllabus.title
                    )));
                }
                Some(lesson)
            }
            _ => None,
        };

        if let Some(aircraft_id) = req.aircraft_id
            && !api.list_aircraft()?.iter().any(|a| a.id == aircraft_id)
        {
            return Err(AppError::NotFound(format!("aircraft {aircraft_id}")));
        }

        if let Some(start) = req.start_time.as_deref() {
            let minutes = training_minutes(lesson.as_ref(), req.mission_type);
            calculate_with_policy(&cfg.block_policy(), req.mission_type, start, minutes)?;
        }

        let mission_number = api.next_mission_number(enrollment.id, req.mission_type)?;
        let mission_code = format_mission_code(
            &cfg.school_prefix,
            &program_code,
            req.mission_type.letter(),
            mission_number,
        );

        let new_mission = NewMission {
            enrollment_id: enrollment.id,
            student_id: enrollment.student_id,
            instructor_id: enrollment.instructor_id,
            mission_code: mission_code.clone(),
            mission_number,
            lesson_code: lesson
                .as_ref()
                .map(|l| format_lesson_code(&program_code, l.order_index)),
            program_code,
            mission_type: req.mission_type,
            lesson_id: lesson.as_ref().map(|l| l.id),
            custom: req.custom.clone(),
            is_customized: lesson.is_some() && req.custom.is_some(),
            scheduled_date: req.date,
            scheduled_start_time: req.start_time.clone(),
            aircraft_id: req.aircraft_id,
            generate_poa: req.generate_poa,
            notes: req.notes.clone(),
        };

        let mission = api.insert_mission(&new_mission)?;

        if let Err(e) = api.audit(
            "add",
            &mission_code,
            &format!(
                "Scheduled {} mission for {} on {}",
                req.mission_type.label(),
                enrollment.student_name,
                mission.date_str()
            ),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(mission)
    }

    pub fn start<A: SchoolApi + ?Sized>(api: &A, mission_id: i64) -> AppResult<Mission> {
        Self::transition(
            api,
            mission_id,
            StatusUpdate {
                status: MissionStatus::InProgress,
                assessment: None,
                reason: None,
            },
        )
    }

    pub fn complete<A: SchoolApi + ?Sized>(
        api: &A,
        mission_id: i64,
        assessment: InstructorAssessment,
        partial: bool,
    ) -> AppResult<Mission> {
        let status = if partial {
            MissionStatus::PartiallyCompleted
        } else {
            MissionStatus::Completed
        };
        Self::transition(
            api,
            mission_id,
            StatusUpdate {
                status,
                assessment: Some(assessment),
                reason: None,
            },
        )
    }

    pub fn cancel<A: SchoolApi + ?Sized>(
        api: &A,
        mission_id: i64,
        reason: &str,
    ) -> AppResult<Mission> {
        if reason.trim().is_empty() {
            return Err(AppError::Validation(
                "A cancellation reason is required".into(),
            ));
        }
        Self::transition(
            api,
            mission_id,
            StatusUpdate {
                status: MissionStatus::Cancelled,
                assessment: None,
                reason: Some(reason.trim().to_string()),
            },
        )
    }

    fn transition<A: SchoolApi + ?Sized>(
        api: &A,
        mission_id: i64,
        update: StatusUpdate,
    ) -> AppResult<Mission> {
        let current = api.mission(mission_id)?;

        if !current.status.can_transition_to(update.status) {
            return Err(AppError::InvalidTransition {
                from: current.status.to_db_str().to_string(),
                to: update.status.to_db_str().to_string(),
            });
        }

        let updated = api.update_mission_status(mission_id, &update)?;

        if let Err(e) = api.audit(
            "status",
            &updated.mission_code,
            &format!(
                "{} -> {}",
                current.status.to_db_str(),
                updated.status.to_db_str()
            ),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(updated)
    }
}

/// Submits wizard and express-schedule requests straight to the data layer.
pub struct ApiSubmitter<'a, A: SchoolApi + ?Sized> {
    pub api: &'a A,
    pub cfg: &'a Config,
}

impl<A: SchoolApi + ?Sized> MissionSubmitter for ApiSubmitter<'_, A> {
    fn submit(&self, request: &MissionRequest) -> AppResult<Mission> {
        ScheduleLogic::create(self.api, self.cfg, request)
    }
}
