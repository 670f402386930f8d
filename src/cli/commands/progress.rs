use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::suggestions::{SuggestionSet, resolve_suggestions};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::formatting::{bold, italic, progress_bar};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Progress { enrollment, json } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let set = resolve_suggestions(&pool.api(), *enrollment)?;

        if *json {
            let out = serde_json::to_string_pretty(&set)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{out}");
        } else {
            print_suggestions(&set);
        }
    }
    Ok(())
}

pub fn print_suggestions(set: &SuggestionSet) {
    let p = &set.progress;

    header("Syllabus progress");
    println!(
        "{}  ({}/{} lessons)",
        progress_bar(p.percent_complete, 30),
        p.completed_lessons,
        p.total_lessons
    );

    let title = |l: &Option<crate::models::lesson::Lesson>| {
        l.as_ref()
            .map(|l| format!("{} (#{})", l.title, l.order_index))
            .unwrap_or_else(|| "--".into())
    };
    println!("Current  : {}", title(&p.current));
    if let Some(l) = &p.current
        && !l.description.trim().is_empty()
    {
        let opts = textwrap::Options::new(60)
            .initial_indent("           ")
            .subsequent_indent("           ");
        println!("{}", italic(&textwrap::fill(l.description.trim(), opts)));
    }
    println!("Next     : {}", title(&p.next));
    println!("Previous : {}", title(&p.previous));

    if let Some(last) = &p.last_completed_mission {
        println!(
            "Last     : {} on {} ({})",
            last.mission_code, last.scheduled_date, last.lesson_title
        );
    }

    println!();
    println!("{}", bold("Suggestions"));
    for s in &set.suggestions {
        println!("  {}. {} - {}", s.priority, s.label, italic(&s.description));
    }
}
