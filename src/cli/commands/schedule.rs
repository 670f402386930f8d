use crate::api::{ContentMode, SchoolApi};
use crate::cli::commands::blocks::print_breakdown;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::schedule::ApiSubmitter;
use crate::core::suggestions::SuggestionKind;
use crate::core::wizard::{WizardAction, WizardOptions, WizardSettings, WizardState};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::mission_type::MissionType;
use crate::ui::messages::{header, info, success};
use crate::utils::date::require_date;

/// Apply one input and resolve the lookups it asked for.
fn act<A: SchoolApi + ?Sized>(w: &mut WizardState, api: &A, action: WizardAction) -> AppResult<()> {
    let tickets = w.apply(action);
    w.fulfil(api, tickets);
    match &w.error {
        Some(msg) => Err(AppError::Validation(msg.clone())),
        None => Ok(()),
    }
}

fn advance<A: SchoolApi + ?Sized>(w: &mut WizardState, api: &A) -> AppResult<()> {
    let before = w.step;
    act(w, api, WizardAction::Next)?;
    if w.step == before {
        return Err(AppError::Validation(w.error.clone().unwrap_or_default()));
    }
    Ok(())
}

fn step_header(w: &WizardState) {
    header(format!("Step {} of 4: {}", w.step.number(), w.step.title()));
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Schedule {
        enrollment,
        lesson,
        custom_title,
        objective,
        maneuvers,
        mission_type,
        date,
        start,
        aircraft,
        no_poa,
        notes,
        dry_run,
    } = cmd
    else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let api = pool.api();

    let lessons = match enrollment {
        Some(id) => api.enrollment_lessons(*id)?,
        None => Vec::new(),
    };
    let options = WizardOptions {
        enrollments: api.list_enrollments()?,
        lessons,
        aircraft: api.list_aircraft()?,
    };
    let mut w = WizardState::new(options, WizardSettings::from(cfg));

    // 1. Student
    step_header(&w);
    if let Some(id) = enrollment {
        act(&mut w, &api, WizardAction::SelectEnrollment(*id))?;
    }
    if let Some(e) = w.selected_enrollment() {
        println!("Student: {}", e.display_name());
    }
    advance(&mut w, &api)?;

    // 2. Mission details
    step_header(&w);
    if let Some(set) = &w.suggestions {
        for s in &set.suggestions {
            println!("  {}. {} - {}", s.priority, s.label, s.description);
        }
    }

    match custom_title {
        Some(title) => {
            act(&mut w, &api, WizardAction::SetMode(ContentMode::Custom))?;
            act(&mut w, &api, WizardAction::SetCustomTitle(title.clone()))?;
            if let Some(o) = objective {
                act(&mut w, &api, WizardAction::SetCustomObjective(o.clone()))?;
            }
            for m in maneuvers {
                act(&mut w, &api, WizardAction::ToggleManeuver(m.clone()))?;
            }
        }
        None => {
            let suggested = w.suggestions.as_ref().and_then(|set| {
                set.suggestions
                    .iter()
                    .find(|s| s.kind == SuggestionKind::Next)
                    .and_then(|s| s.lesson.as_ref())
                    .map(|l| l.id)
            });
            if let Some(id) = lesson.or(suggested) {
                act(&mut w, &api, WizardAction::SelectLesson(id))?;
            }
        }
    }

    if let Some(t) = mission_type {
        let kind: MissionType = t.parse()?;
        act(&mut w, &api, WizardAction::SetMissionType(kind))?;
    }

    match w.selected_lesson() {
        Some(l) if w.form.mode == ContentMode::Precreated => {
            println!("Lesson: {} (#{})", l.title, l.order_index)
        }
        _ => {}
    }
    println!("Type: {}", w.form.mission_type.label());
    match &w.mission_code_preview {
        Some(code) => println!("Mission code: {code}"),
        None => info("Mission code will be assigned on creation."),
    }
    advance(&mut w, &api)?;

    // 3. Schedule & aircraft
    step_header(&w);
    if let Some(d) = date {
        act(&mut w, &api, WizardAction::SetDate(require_date(d)?))?;
    }
    act(&mut w, &api, WizardAction::SetStartTime(start.clone()))?;
    act(&mut w, &api, WizardAction::SelectAircraft(*aircraft))?;
    act(&mut w, &api, WizardAction::SetGeneratePoa(!*no_poa))?;
    act(&mut w, &api, WizardAction::SetNotes(notes.clone()))?;
    advance(&mut w, &api)?;

    // 4. Review
    step_header(&w);
    let request = w.request()?;
    println!("Date: {}", request.date.format("%Y-%m-%d"));
    if let Some(a) = w.selected_aircraft() {
        println!("Aircraft: {}", a.display_name());
    }
    println!(
        "Plan of action: {}",
        if request.generate_poa { "yes" } else { "no" }
    );
    if let Some(b) = w.time_blocks()? {
        println!();
        print_breakdown(&b);
    }

    if *dry_run {
        let body = serde_json::to_string_pretty(&request)
            .map_err(|e| AppError::Other(e.to_string()))?;
        println!("{body}");
        info("Dry run: no mission created.");
        return Ok(());
    }

    let submitter = ApiSubmitter { api: &api, cfg };
    let m = w.submit(&submitter)?;
    success(format!(
        "Mission {} scheduled for {}",
        m.mission_code,
        m.date_str()
    ));
    Ok(())
}
