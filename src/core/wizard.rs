//! Four-step mission creation wizard as an explicit state machine.
//!
//! `WizardState` holds the current step, the form, one error line and the
//! preview data. Inputs arrive as [`WizardAction`]s; each `Next` is gated by
//! a guard for the current step. Remote lookups are not performed here:
//! actions return [`PreviewTicket`]s, the driver fetches, and hands the
//! result back with the ticket. A result whose ticket is no longer the
//! latest of its kind is dropped, so a slow answer for an old mission type
//! can never overwrite the preview of the current one.

use crate::api::{ContentMode, MissionRequest, SchoolApi};
use crate::config::Config;
use crate::core::calculator::time_blocks::{BlockPolicy, MissionTimeBreakdown, calculate_with_policy};
use crate::core::mission_code::preview_mission_code;
use crate::core::schedule::training_minutes;
use crate::core::suggestions::{SuggestionSet, resolve_suggestions};
use crate::errors::{AppError, AppResult};
use crate::models::aircraft::Aircraft;
use crate::models::enrollment::Enrollment;
use crate::models::lesson::Lesson;
use crate::models::mission::{CustomMission, Mission};
use crate::models::mission_type::MissionType;
use crate::ui::messages::request_failed;
use chrono::NaiveDate;
use serde::Serialize;

/// Receives the assembled request on submit (the mission-creation endpoint).
pub trait MissionSubmitter {
    fn submit(&self, request: &MissionRequest) -> AppResult<Mission>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WizardStep {
    SelectStudent,
    MissionDetails,
    ScheduleAndAircraft,
    ReviewAndSubmit,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::SelectStudent => 1,
            WizardStep::MissionDetails => 2,
            WizardStep::ScheduleAndAircraft => 3,
            WizardStep::ReviewAndSubmit => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::SelectStudent => "Select Student",
            WizardStep::MissionDetails => "Mission Details",
            WizardStep::ScheduleAndAircraft => "Schedule & Aircraft",
            WizardStep::ReviewAndSubmit => "Review & Create",
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            WizardStep::SelectStudent => Some(WizardStep::MissionDetails),
            WizardStep::MissionDetails => Some(WizardStep::ScheduleAndAircraft),
            WizardStep::ScheduleAndAircraft => Some(WizardStep::ReviewAndSubmit),
            WizardStep::ReviewAndSubmit => None,
        }
    }

    fn prev(self) -> Option<Self> {
        match self {
            WizardStep::SelectStudent => None,
            WizardStep::MissionDetails => Some(WizardStep::SelectStudent),
            WizardStep::ScheduleAndAircraft => Some(WizardStep::MissionDetails),
            WizardStep::ReviewAndSubmit => Some(WizardStep::ScheduleAndAircraft),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionForm {
    pub enrollment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub mode: ContentMode,
    pub lesson_id: Option<i64>,
    pub mission_type: MissionType,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub aircraft_id: Option<i64>,
    pub generate_poa: bool,
    pub notes: String,
    pub custom: CustomMission,
}

impl Default for MissionForm {
    fn default() -> Self {
        Self {
            enrollment_id: None,
            student_id: None,
            mode: ContentMode::Precreated,
            lesson_id: None,
            mission_type: MissionType::Flight,
            date: None,
            start_time: None,
            aircraft_id: None,
            generate_poa: true,
            notes: String::new(),
            custom: CustomMission::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    SelectEnrollment(i64),
    SetMode(ContentMode),
    SelectLesson(i64),
    SetMissionType(MissionType),
    SetDate(NaiveDate),
    SetStartTime(Option<String>),
    SelectAircraft(Option<i64>),
    SetGeneratePoa(bool),
    SetNotes(String),
    SetCustomTitle(String),
    SetCustomObjective(String),
    SetCustomTopics(String),
    SetCustomStandards(String),
    SetCustomPrep(String),
    ToggleManeuver(String),
    Next,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    MissionCode,
    Suggestions,
}

/// A request the wizard wants made, stamped with the generation that
/// must still be current when the answer comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket {
    pub kind: PreviewKind,
    pub generation: u64,
    pub enrollment_id: i64,
    pub mission_type: MissionType,
}

/// Lists the wizard picks from.
#[derive(Debug, Clone, Default)]
pub struct WizardOptions {
    pub enrollments: Vec<Enrollment>,
    pub lessons: Vec<Lesson>,
    pub aircraft: Vec<Aircraft>,
}

#[derive(Debug, Clone)]
pub struct WizardSettings {
    pub school_prefix: String,
    pub default_program_code: String,
    pub policy: BlockPolicy,
}

impl From<&Config> for WizardSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            school_prefix: cfg.school_prefix.clone(),
            default_program_code: cfg.default_program_code.clone(),
            policy: cfg.block_policy(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WizardState {
    pub step: WizardStep,
    pub form: MissionForm,
    pub error: Option<String>,
    pub submitting: bool,
    pub submitted: Option<Mission>,
    pub mission_code_preview: Option<String>,
    pub suggestions: Option<SuggestionSet>,
    pub options: WizardOptions,
    settings: WizardSettings,
    code_generation: u64,
    suggestion_generation: u64,
}

impl WizardState {
    pub fn new(options: WizardOptions, settings: WizardSettings) -> Self {
        Self {
            step: WizardStep::SelectStudent,
            form: MissionForm::default(),
            error: None,
            submitting: false,
            submitted: None,
            mission_code_preview: None,
            suggestions: None,
            options,
            settings,
            code_generation: 0,
            suggestion_generation: 0,
        }
    }

    pub fn selected_enrollment(&self) -> Option<&Enrollment> {
        let id = self.form.enrollment_id?;
        self.options.enrollments.iter().find(|e| e.id == id)
    }

    pub fn selected_lesson(&self) -> Option<&Lesson> {
        let id = self.form.lesson_id?;
        self.options.lessons.iter().find(|l| l.id == id)
    }

    pub fn selected_aircraft(&self) -> Option<&Aircraft> {
        let id = self.form.aircraft_id?;
        self.options.aircraft.iter().find(|a| a.id == id)
    }

    /// Apply one input. Returns the lookups the driver should now perform.
    pub fn apply(&mut self, action: WizardAction) -> Vec<PreviewTicket> {
        match action {
            WizardAction::SelectEnrollment(id) => self.select_enrollment(id),
            WizardAction::SetMode(mode) => {
                self.form.mode = mode;
                Vec::new()
            }
            WizardAction::SelectLesson(id) => self.select_lesson(id),
            WizardAction::SetMissionType(kind) => self.set_mission_type(kind),
            WizardAction::SetDate(d) => {
                self.form.date = Some(d);
                Vec::new()
            }
            WizardAction::SetStartTime(t) => {
                self.form.start_time = t.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
                Vec::new()
            }
            WizardAction::SelectAircraft(id) => {
                self.form.aircraft_id = id;
                Vec::new()
            }
            WizardAction::SetGeneratePoa(on) => {
                self.form.generate_poa = on;
                Vec::new()
            }
            WizardAction::SetNotes(n) => {
                self.form.notes = n;
                Vec::new()
            }
            WizardAction::SetCustomTitle(v) => {
                self.form.custom.title = v;
                Vec::new()
            }
            WizardAction::SetCustomObjective(v) => {
                self.form.custom.objective = v;
                Vec::new()
            }
            WizardAction::SetCustomTopics(v) => {
                self.form.custom.topics = v;
                Vec::new()
            }
            WizardAction::SetCustomStandards(v) => {
                self.form.custom.standards = v;
                Vec::new()
            }
            WizardAction::SetCustomPrep(v) => {
                self.form.custom.prep = v;
                Vec::new()
            }
            WizardAction::ToggleManeuver(m) => {
                let list = &mut self.form.custom.maneuvers;
                if let Some(pos) = list.iter().position(|x| *x == m) {
                    list.remove(pos);
                } else {
                    list.push(m);
                }
                Vec::new()
            }
            WizardAction::Next => self.next(),
            WizardAction::Back => {
                self.back();
                Vec::new()
            }
        }
    }

    fn select_enrollment(&mut self, id: i64) -> Vec<PreviewTicket> {
        let Some(student_id) = self
            .options
            .enrollments
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.student_id)
        else {
            self.error = Some(format!("Unknown enrollment {id}"));
            return Vec::new();
        };

        if self.form.enrollment_id == Some(id) {
            return Vec::new();
        }

        self.form.enrollment_id = Some(id);
        self.form.student_id = Some(student_id);
        self.form.lesson_id = None;

        // Previews belong to the old enrollment; invalidate any in flight.
        self.mission_code_preview = None;
        self.suggestions = None;
        self.code_generation += 1;
        self.suggestion_generation += 1;

        if self.step >= WizardStep::MissionDetails {
            return self.issue_all();
        }
        Vec::new()
    }

    fn select_lesson(&mut self, id: i64) -> Vec<PreviewTicket> {
        if !self.options.lessons.iter().any(|l| l.id == id) {
            self.error = Some(format!("Unknown lesson {id}"));
            return Vec::new();
        }
        self.form.lesson_id = Some(id);
        match self.selected_lesson().map(|l| l.lesson_type.mission_type()) {
            Some(kind) => self.set_mission_type(kind),
            None => Vec::new(),
        }
    }

    fn set_mission_type(&mut self, kind: MissionType) -> Vec<PreviewTicket> {
        if self.form.mission_type == kind {
            return Vec::new();
        }
        self.form.mission_type = kind;

        match self.form.enrollment_id {
            Some(enrollment_id) => vec![self.issue(PreviewKind::MissionCode, enrollment_id)],
            None => Vec::new(),
        }
    }

    fn issue(&mut self, kind: PreviewKind, enrollment_id: i64) -> PreviewTicket {
        let generation = match kind {
            PreviewKind::MissionCode => {
                self.code_generation += 1;
                self.code_generation
            }
            PreviewKind::Suggestions => {
                self.suggestion_generation += 1;
                self.suggestion_generation
            }
        };
        PreviewTicket {
            kind,
            generation,
            enrollment_id,
            mission_type: self.form.mission_type,
        }
    }

    fn issue_all(&mut self) -> Vec<PreviewTicket> {
        match self.form.enrollment_id {
            Some(id) => vec![
                self.issue(PreviewKind::MissionCode, id),
                self.issue(PreviewKind::Suggestions, id),
            ],
            None => Vec::new(),
        }
    }

    fn is_current(&self, ticket: &PreviewTicket) -> bool {
        let latest = match ticket.kind {
            PreviewKind::MissionCode => self.code_generation,
            PreviewKind::Suggestions => self.suggestion_generation,
        };
        ticket.generation == latest && self.form.enrollment_id == Some(ticket.enrollment_id)
    }

    /// Returns false when the answer was stale and ignored.
    pub fn resolve_code_preview(&mut self, ticket: PreviewTicket, result: AppResult<String>) -> bool {
        if ticket.kind != PreviewKind::MissionCode || !self.is_current(&ticket) {
            return false;
        }
        self.mission_code_preview = match result {
            Ok(code) => Some(code),
            Err(e) => {
                request_failed("generate mission code", e);
                None
            }
        };
        true
    }

    /// Returns false when the answer was stale and ignored.
    pub fn resolve_suggestions(
        &mut self,
        ticket: PreviewTicket,
        result: AppResult<SuggestionSet>,
    ) -> bool {
        if ticket.kind != PreviewKind::Suggestions || !self.is_current(&ticket) {
            return false;
        }
        self.suggestions = match result {
            Ok(set) => Some(set),
            Err(e) => {
                request_failed("load lesson suggestions", e);
                None
            }
        };
        true
    }

    /// Perform the requested lookups against `api`, in order.
    pub fn fulfil<A: SchoolApi + ?Sized>(&mut self, api: &A, tickets: Vec<PreviewTicket>) {
        for ticket in tickets {
            match ticket.kind {
                PreviewKind::MissionCode => {
                    let result = api.enrollment(ticket.enrollment_id).and_then(|e| {
                        preview_mission_code(
                            api,
                            &e,
                            ticket.mission_type,
                            &self.settings.school_prefix,
                            &self.settings.default_program_code,
                        )
                    });
                    self.resolve_code_preview(ticket, result);
                }
                PreviewKind::Suggestions => {
                    let result = resolve_suggestions(api, ticket.enrollment_id);
                    self.resolve_suggestions(ticket, result);
                }
            }
        }
    }

    /// Check the guard for leaving the current step forward.
    fn guard(&self) -> Result<(), String> {
        match self.step {
            WizardStep::SelectStudent => {
                if self.form.enrollment_id.is_none() {
                    return Err("Please select a student enrollment".into());
                }
            }
            WizardStep::MissionDetails => match self.form.mode {
                ContentMode::Precreated if self.form.lesson_id.is_none() => {
                    return Err("Please select a lesson".into());
                }
                ContentMode::Custom if self.form.custom.title.trim().is_empty() => {
                    return Err("Please enter a title for the custom mission".into());
                }
                _ => {}
            },
            WizardStep::ScheduleAndAircraft => {
                if self.form.date.is_none() {
                    return Err("Please select a date".into());
                }
                if self.form.mission_type.requires_aircraft() && self.form.aircraft_id.is_none() {
                    return Err("Please select an aircraft for flight missions".into());
                }
                if self.form.start_time.is_some() {
                    self.time_blocks().map_err(|e| e.to_string())?;
                }
            }
            WizardStep::ReviewAndSubmit => {}
        }
        Ok(())
    }

    fn next(&mut self) -> Vec<PreviewTicket> {
        if let Err(msg) = self.guard() {
            self.error = Some(msg);
            return Vec::new();
        }

        let Some(next) = self.step.next() else {
            return Vec::new();
        };

        self.error = None;
        self.step = next;

        if next == WizardStep::MissionDetails {
            return self.issue_all();
        }
        Vec::new()
    }

    fn back(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.error = None;
            self.step = prev;
        }
    }

    /// Breakdown for the current form, when a start time is set.
    pub fn time_blocks(&self) -> AppResult<Option<MissionTimeBreakdown>> {
        let Some(start) = self.form.start_time.as_deref() else {
            return Ok(None);
        };
        let lesson = match self.form.mode {
            ContentMode::Precreated => self.selected_lesson(),
            ContentMode::Custom => None,
        };
        let minutes = training_minutes(lesson, self.form.mission_type);
        calculate_with_policy(&self.settings.policy, self.form.mission_type, start, minutes).map(Some)
    }

    /// The creation request as it would be submitted now.
    pub fn request(&self) -> AppResult<MissionRequest> {
        let missing = |what: &str| AppError::Validation(format!("Missing {what}"));

        Ok(MissionRequest {
            enrollment_id: self.form.enrollment_id.ok_or_else(|| missing("enrollment"))?,
            student_id: self.form.student_id.ok_or_else(|| missing("student"))?,
            mode: self.form.mode,
            lesson_id: match self.form.mode {
                ContentMode::Precreated => self.form.lesson_id,
                ContentMode::Custom => None,
            },
            mission_type: self.form.mission_type,
            date: self.form.date.ok_or_else(|| missing("date"))?,
            start_time: self.form.start_time.clone(),
            aircraft_id: self.form.aircraft_id,
            generate_poa: self.form.generate_poa,
            notes: self.form.notes.clone(),
            custom: match self.form.mode {
                ContentMode::Custom => Some(self.form.custom.clone()),
                ContentMode::Precreated => None,
            },
        })
    }

    /// Submit from the review step. A rejection is kept as the form error and
    /// the wizard stays where it is with every field intact.
    pub fn submit<S: MissionSubmitter + ?Sized>(&mut self, submitter: &S) -> AppResult<Mission> {
        if self.step != WizardStep::ReviewAndSubmit {
            let msg = "Complete all steps before submitting".to_string();
            self.error = Some(msg.clone());
            return Err(AppError::Validation(msg));
        }

        let request = match self.request() {
            Ok(r) => r,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        self.submitting = true;
        self.error = None;
        let outcome = submitter.submit(&request);
        self.submitting = false;

        match outcome {
            Ok(mission) => {
                self.submitted = Some(mission.clone());
                Ok(mission)
            }
            Err(e) => {
                let msg = e.to_string();
                self.error = Some(if msg.is_empty() {
                    "Failed to create mission".to_string()
                } else {
                    msg
                });
                Err(e)
            }
        }
    }
}
