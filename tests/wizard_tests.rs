use chrono::NaiveDate;
use flightdesk::api::{ContentMode, MissionFilter, MissionRequest, NewMission, SchoolApi, StatusUpdate};
use flightdesk::core::calculator::progress::LastCompletedMission;
use flightdesk::core::calculator::time_blocks::BlockPolicy;
use flightdesk::core::suggestions::SuggestionKind;
use flightdesk::core::wizard::{
    MissionSubmitter, PreviewKind, WizardAction, WizardOptions, WizardSettings, WizardState,
    WizardStep,
};
use flightdesk::errors::{AppError, AppResult};
use flightdesk::models::aircraft::Aircraft;
use flightdesk::models::enrollment::{Enrollment, EnrollmentStatus, Syllabus};
use flightdesk::models::lesson::{Lesson, LessonType};
use flightdesk::models::mission::{Mission, MissionStatus};
use flightdesk::models::mission_type::MissionType;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

mod common;
use common::lesson;

fn enrollment() -> Enrollment {
    Enrollment {
        id: 1,
        student_id: 100,
        student_name: "Jane Doe".into(),
        instructor_id: 7,
        instructor_name: "Sam Pilot".into(),
        syllabus: Syllabus {
            id: 1,
            code: Some("PPC".into()),
            title: "Private Pilot Certificate".into(),
        },
        start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        status: EnrollmentStatus::Active,
    }
}

fn lessons() -> Vec<Lesson> {
    let mut first = lesson(11, 1, "Intro to Flight", LessonType::Flight);
    first.estimated_duration_minutes = Some(60);
    vec![
        first,
        lesson(12, 2, "Aircraft Systems", LessonType::Ground),
        lesson(13, 3, "Procedures Trainer", LessonType::Simulator),
    ]
}

fn aircraft() -> Vec<Aircraft> {
    vec![Aircraft {
        id: 1,
        tail_number: "N12345".into(),
        make: "Cessna".into(),
        model: "172".into(),
    }]
}

/// In-memory collaborator; `fail_numbers` makes code previews fail.
#[derive(Default)]
struct FakeApi {
    fail_numbers: bool,
}

impl SchoolApi for FakeApi {
    fn list_aircraft(&self) -> AppResult<Vec<Aircraft>> {
        Ok(aircraft())
    }

    fn list_enrollments(&self) -> AppResult<Vec<Enrollment>> {
        Ok(vec![enrollment()])
    }

    fn enrollment(&self, enrollment_id: i64) -> AppResult<Enrollment> {
        if enrollment_id == 1 {
            Ok(enrollment())
        } else {
            Err(AppError::NotFound(format!("enrollment {enrollment_id}")))
        }
    }

    fn enrollment_lessons(&self, _enrollment_id: i64) -> AppResult<Vec<Lesson>> {
        Ok(lessons())
    }

    fn lesson(&self, lesson_id: i64) -> AppResult<Lesson> {
        lessons()
            .into_iter()
            .find(|l| l.id == lesson_id)
            .ok_or_else(|| AppError::NotFound(format!("lesson {lesson_id}")))
    }

    fn completed_lesson_ids(&self, _enrollment_id: i64) -> AppResult<HashSet<i64>> {
        Ok(HashSet::new())
    }

    fn last_completed_mission(&self, _: i64) -> AppResult<Option<LastCompletedMission>> {
        Ok(None)
    }

    fn next_mission_number(&self, _: i64, mission_type: MissionType) -> AppResult<u32> {
        if self.fail_numbers {
            return Err(AppError::RequestFailed("mission-number endpoint down".into()));
        }
        Ok(match mission_type {
            MissionType::Flight => 4,
            MissionType::Ground => 2,
            MissionType::Simulator => 1,
        })
    }

    fn insert_mission(&self, _: &NewMission) -> AppResult<Mission> {
        Err(AppError::Other("read-only".into()))
    }

    fn mission(&self, id: i64) -> AppResult<Mission> {
        Err(AppError::NotFound(format!("mission {id}")))
    }

    fn missions(&self, _: &MissionFilter) -> AppResult<Vec<Mission>> {
        Ok(Vec::new())
    }

    fn update_mission_status(&self, id: i64, _: &StatusUpdate) -> AppResult<Mission> {
        Err(AppError::NotFound(format!("mission {id}")))
    }

    fn audit(&self, _: &str, _: &str, _: &str) -> AppResult<()> {
        Ok(())
    }
}

struct FlakySubmitter {
    fail: Cell<bool>,
    seen: RefCell<Vec<MissionRequest>>,
}

impl FlakySubmitter {
    fn new(fail: bool) -> Self {
        Self {
            fail: Cell::new(fail),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl MissionSubmitter for FlakySubmitter {
    fn submit(&self, request: &MissionRequest) -> AppResult<Mission> {
        self.seen.borrow_mut().push(request.clone());
        if self.fail.get() {
            return Err(AppError::RequestFailed("server unavailable".into()));
        }
        Ok(Mission {
            id: 1,
            enrollment_id: request.enrollment_id,
            student_id: request.student_id,
            instructor_id: 7,
            mission_code: "DSA-PPC-F4".into(),
            mission_number: 4,
            program_code: "PPC".into(),
            mission_type: request.mission_type,
            lesson_id: request.lesson_id,
            lesson_code: Some("PPC-L1".into()),
            custom: request.custom.clone(),
            is_customized: false,
            scheduled_date: request.date,
            scheduled_start_time: request.start_time.clone(),
            aircraft_id: request.aircraft_id,
            status: MissionStatus::Scheduled,
            assessment: None,
            generate_poa: request.generate_poa,
            notes: request.notes.clone(),
            created_at: "2026-03-01T10:00:00+00:00".into(),
            completed_at: None,
            cancelled_at: None,
            cancellation_reason: None,
        })
    }
}

fn settings() -> WizardSettings {
    WizardSettings {
        school_prefix: "DSA".into(),
        default_program_code: "PPC".into(),
        policy: BlockPolicy::default(),
    }
}

fn wizard() -> WizardState {
    WizardState::new(
        WizardOptions {
            enrollments: vec![enrollment()],
            lessons: lessons(),
            aircraft: aircraft(),
        },
        settings(),
    )
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

/// Drive a fresh wizard to the review step with a flight lesson.
fn at_review(api: &FakeApi) -> WizardState {
    let mut w = wizard();
    for action in [
        WizardAction::SelectEnrollment(1),
        WizardAction::Next,
        WizardAction::SelectLesson(11),
        WizardAction::Next,
        WizardAction::SetDate(date()),
        WizardAction::SetStartTime(Some("09:00".into())),
        WizardAction::SelectAircraft(Some(1)),
        WizardAction::Next,
    ] {
        let tickets = w.apply(action);
        w.fulfil(api, tickets);
    }
    assert_eq!(w.step, WizardStep::ReviewAndSubmit);
    w
}

#[test]
fn next_without_enrollment_stays_on_step_one() {
    let mut w = wizard();
    let tickets = w.apply(WizardAction::Next);

    assert!(tickets.is_empty());
    assert_eq!(w.step, WizardStep::SelectStudent);
    assert_eq!(w.error.as_deref(), Some("Please select a student enrollment"));
}

#[test]
fn unknown_enrollment_is_not_selected() {
    let mut w = wizard();
    w.apply(WizardAction::SelectEnrollment(99));

    assert_eq!(w.form.enrollment_id, None);
    assert!(w.error.is_some());
}

#[test]
fn entering_step_two_requests_both_previews() {
    let api = FakeApi::default();
    let mut w = wizard();

    w.apply(WizardAction::SelectEnrollment(1));
    assert_eq!(w.form.student_id, Some(100));

    let tickets = w.apply(WizardAction::Next);
    assert_eq!(w.step, WizardStep::MissionDetails);
    assert_eq!(w.error, None);

    let kinds: Vec<PreviewKind> = tickets.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, [PreviewKind::MissionCode, PreviewKind::Suggestions]);

    w.fulfil(&api, tickets);
    assert_eq!(w.mission_code_preview.as_deref(), Some("DSA-PPC-F4"));

    let set = w.suggestions.as_ref().unwrap();
    assert_eq!(set.suggestions[0].kind, SuggestionKind::Next);
    assert_eq!(set.next_lesson().map(|l| l.id), Some(11));
}

#[test]
fn stale_code_preview_is_discarded() {
    let mut w = wizard();
    w.apply(WizardAction::SelectEnrollment(1));
    let first = w.apply(WizardAction::Next);
    let flight_ticket = first[0];

    let second = w.apply(WizardAction::SetMissionType(MissionType::Ground));
    assert_eq!(second.len(), 1);
    let ground_ticket = second[0];
    assert_eq!(ground_ticket.mission_type, MissionType::Ground);

    // the newer answer lands first, the older one afterwards
    assert!(w.resolve_code_preview(ground_ticket, Ok("DSA-PPC-G2".into())));
    assert!(!w.resolve_code_preview(flight_ticket, Ok("DSA-PPC-F4".into())));
    assert_eq!(w.mission_code_preview.as_deref(), Some("DSA-PPC-G2"));
}

#[test]
fn stale_preview_arriving_first_is_also_discarded() {
    let mut w = wizard();
    w.apply(WizardAction::SelectEnrollment(1));
    let flight_ticket = w.apply(WizardAction::Next)[0];
    let sim_ticket = w.apply(WizardAction::SetMissionType(MissionType::Simulator))[0];

    assert!(!w.resolve_code_preview(flight_ticket, Ok("DSA-PPC-F4".into())));
    assert_eq!(w.mission_code_preview, None);

    assert!(w.resolve_code_preview(sim_ticket, Ok("DSA-PPC-S1".into())));
    assert_eq!(w.mission_code_preview.as_deref(), Some("DSA-PPC-S1"));
}

#[test]
fn preview_failure_does_not_block_navigation() {
    let api = FakeApi { fail_numbers: true };
    let mut w = wizard();
    w.apply(WizardAction::SelectEnrollment(1));
    let tickets = w.apply(WizardAction::Next);
    w.fulfil(&api, tickets);

    assert_eq!(w.mission_code_preview, None);
    assert!(w.suggestions.is_some());
    assert_eq!(w.error, None);

    w.apply(WizardAction::SelectLesson(11));
    w.apply(WizardAction::Next);
    assert_eq!(w.step, WizardStep::ScheduleAndAircraft);
}

#[test]
fn step_two_needs_a_lesson_or_a_custom_title() {
    let mut w = wizard();
    w.apply(WizardAction::SelectEnrollment(1));
    w.apply(WizardAction::Next);

    w.apply(WizardAction::Next);
    assert_eq!(w.step, WizardStep::MissionDetails);
    assert_eq!(w.error.as_deref(), Some("Please select a lesson"));

    w.apply(WizardAction::SetMode(ContentMode::Custom));
    w.apply(WizardAction::Next);
    assert_eq!(w.step, WizardStep::MissionDetails);
    assert!(w.error.as_deref().unwrap_or_default().contains("title"));

    w.apply(WizardAction::SetCustomTitle("Crosswind practice".into()));
    w.apply(WizardAction::Next);
    assert_eq!(w.step, WizardStep::ScheduleAndAircraft);
    assert_eq!(w.error, None);
}

#[test]
fn selecting_a_lesson_sets_the_mission_type() {
    let mut w = wizard();
    w.apply(WizardAction::SelectEnrollment(1));
    w.apply(WizardAction::Next);

    let tickets = w.apply(WizardAction::SelectLesson(12));
    assert_eq!(w.form.mission_type, MissionType::Ground);
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].kind, PreviewKind::MissionCode);

    // same type again: nothing to refetch
    assert!(w.apply(WizardAction::SetMissionType(MissionType::Ground)).is_empty());
}

#[test]
fn unknown_lesson_is_not_selected() {
    let mut w = wizard();
    w.apply(WizardAction::SelectEnrollment(1));
    w.apply(WizardAction::Next);

    let tickets = w.apply(WizardAction::SelectLesson(999));
    assert!(tickets.is_empty());
    assert_eq!(w.form.lesson_id, None);
    assert_eq!(w.form.mission_type, MissionType::Flight);
    assert_eq!(w.error.as_deref(), Some("Unknown lesson 999"));

    w.apply(WizardAction::Next);
    assert_eq!(w.step, WizardStep::MissionDetails);
    assert_eq!(w.error.as_deref(), Some("Please select a lesson"));
}

#[test]
fn step_three_guards() {
    let mut w = wizard();
    for a in [
        WizardAction::SelectEnrollment(1),
        WizardAction::Next,
        WizardAction::SelectLesson(11),
        WizardAction::Next,
    ] {
        w.apply(a);
    }
    assert_eq!(w.step, WizardStep::ScheduleAndAircraft);

    w.apply(WizardAction::Next);
    assert_eq!(w.error.as_deref(), Some("Please select a date"));

    w.apply(WizardAction::SetDate(date()));
    w.apply(WizardAction::Next);
    assert_eq!(
        w.error.as_deref(),
        Some("Please select an aircraft for flight missions")
    );
    assert_eq!(w.step, WizardStep::ScheduleAndAircraft);

    w.apply(WizardAction::SelectAircraft(Some(1)));
    w.apply(WizardAction::SetStartTime(Some("23:00".into())));
    w.apply(WizardAction::Next);
    assert_eq!(w.step, WizardStep::ScheduleAndAircraft);
    assert!(w.error.is_some());

    w.apply(WizardAction::SetStartTime(Some("09:00".into())));
    w.apply(WizardAction::Next);
    assert_eq!(w.step, WizardStep::ReviewAndSubmit);
    assert_eq!(w.error, None);

    // lesson estimate (60 min) drives the training block
    let blocks = w.time_blocks().unwrap().unwrap();
    assert_eq!(blocks.end_time, "11:00");
}

#[test]
fn ground_missions_do_not_need_an_aircraft() {
    let mut w = wizard();
    for a in [
        WizardAction::SelectEnrollment(1),
        WizardAction::Next,
        WizardAction::SelectLesson(12),
        WizardAction::Next,
        WizardAction::SetDate(date()),
        WizardAction::Next,
    ] {
        w.apply(a);
    }
    assert_eq!(w.step, WizardStep::ReviewAndSubmit);
}

#[test]
fn back_clears_the_error_and_stops_at_step_one() {
    let mut w = wizard();
    w.apply(WizardAction::SelectEnrollment(1));
    w.apply(WizardAction::Next);
    w.apply(WizardAction::Next);
    assert!(w.error.is_some());

    w.apply(WizardAction::Back);
    assert_eq!(w.step, WizardStep::SelectStudent);
    assert_eq!(w.error, None);

    w.apply(WizardAction::Back);
    assert_eq!(w.step, WizardStep::SelectStudent);
}

#[test]
fn review_payload_uses_wire_names() {
    let api = FakeApi::default();
    let w = at_review(&api);
    let req = w.request().unwrap();

    assert_eq!(req.enrollment_id, 1);
    assert_eq!(req.student_id, 100);
    assert_eq!(req.lesson_id, Some(11));
    assert_eq!(req.custom, None);

    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["missionType"], "F");
    assert_eq!(json["generatePOA"], true);
    assert_eq!(json["mode"], "precreated");
    assert_eq!(json["date"], "2026-03-02");
}

#[test]
fn failed_submit_keeps_the_review_step() {
    let api = FakeApi::default();
    let mut w = at_review(&api);
    let form_before = w.form.clone();

    let submitter = FlakySubmitter::new(true);
    assert!(w.submit(&submitter).is_err());

    assert_eq!(w.step, WizardStep::ReviewAndSubmit);
    assert_eq!(w.form, form_before);
    assert!(w.error.as_deref().unwrap_or_default().contains("server unavailable"));
    assert!(!w.submitting);
    assert!(w.submitted.is_none());

    submitter.fail.set(false);
    let m = w.submit(&submitter).unwrap();
    assert_eq!(m.mission_code, "DSA-PPC-F4");
    assert_eq!(w.error, None);
    assert_eq!(submitter.seen.borrow().len(), 2);
}

#[test]
fn submit_before_review_is_refused() {
    let mut w = wizard();
    let submitter = FlakySubmitter::new(false);

    assert!(w.submit(&submitter).is_err());
    assert!(submitter.seen.borrow().is_empty());
    assert!(w.error.is_some());
}
