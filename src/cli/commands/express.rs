use crate::api::SchoolApi;
use crate::cli::commands::blocks::print_breakdown;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::express::{ExpressForm, build_request};
use crate::core::schedule::ScheduleLogic;
use crate::core::suggestions::resolve_suggestions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, request_failed, success};
use crate::utils::date::require_date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Express {
        enrollment,
        lesson,
        date,
        start,
        aircraft,
        no_poa,
        notes,
    } = cmd
    else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let api = pool.api();

    let mut form = ExpressForm::new(&cfg.default_start_time);
    form.enrollment_id = *enrollment;
    form.date = match date {
        Some(d) => Some(require_date(d)?),
        None => None,
    };
    if let Some(s) = start {
        form.start_time = s.clone();
    }
    form.aircraft_id = *aircraft;
    form.generate_poa = !*no_poa;
    form.notes = notes.clone();

    let enrollment = match form.enrollment_id {
        Some(id) => Some(api.enrollment(id)?),
        None => None,
    };

    // Without an explicit lesson, take the suggested next one.
    form.lesson_id = match (*lesson, form.enrollment_id) {
        (Some(id), _) => Some(id),
        (None, Some(eid)) => match resolve_suggestions(&api, eid) {
            Ok(set) => set.next_lesson().map(|l| l.id),
            Err(e) => {
                request_failed("load lesson suggestions", e);
                None
            }
        },
        (None, None) => None,
    };

    let lesson = match form.lesson_id {
        Some(id) => Some(api.lesson(id)?),
        None => None,
    };

    let request = build_request(&form, enrollment.as_ref(), lesson.as_ref())?;
    if let Some(l) = &lesson {
        info(format!(
            "Scheduling '{}' as a {} mission",
            l.title,
            request.mission_type.label()
        ));
    }

    if let Some(b) = ScheduleLogic::breakdown_for(&api, cfg, &request)? {
        print_breakdown(&b);
        println!();
    }

    let mission = ScheduleLogic::create(&api, cfg, &request)?;
    success(format!(
        "Mission {} scheduled for {} at {}",
        mission.mission_code,
        mission.date_str(),
        mission.scheduled_start_time.as_deref().unwrap_or("--:--")
    ));
    Ok(())
}
