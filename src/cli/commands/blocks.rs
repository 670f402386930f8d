use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::time_blocks::{
    MissionTimeBreakdown, calculate_with_policy, standard_durations,
};
use crate::errors::{AppError, AppResult};
use crate::models::mission_type::MissionType;
use crate::utils::colors::RESET;
use crate::utils::formatting::{describe_mission_type, describe_participants};
use crate::utils::table::Table;
use crate::utils::time::{format_duration, format_time_for_display};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Blocks {
        mission_type,
        start,
        minutes,
        json,
    } = cmd
    {
        let kind: MissionType = mission_type.parse()?;
        let minutes = minutes.unwrap_or_else(|| standard_durations(kind).typical);

        let breakdown = calculate_with_policy(&cfg.block_policy(), kind, start, minutes)?;

        if *json {
            let out = serde_json::to_string_pretty(&breakdown)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{out}");
        } else {
            print_breakdown(&breakdown);
        }
    }
    Ok(())
}

/// Block table plus totals, shared by the scheduling commands.
pub fn print_breakdown(b: &MissionTimeBreakdown) {
    let (label, color) = describe_mission_type(b.mission_type);
    println!("{color}{label} mission{RESET}");

    let mut table = Table::new(vec!["Start", "End", "Block", "Duration", "Who"]);
    for block in &b.blocks {
        table.add_row(vec![
            block.start_time.clone(),
            block.end_time.clone(),
            block.label.clone(),
            format_duration(block.duration_minutes),
            describe_participants(&block.participants),
        ]);
    }
    print!("{}", table.render());

    let shown = |t: &str| format_time_for_display(t).unwrap_or_else(|_| t.to_string());
    println!();
    println!(
        "Student    : {} from {}",
        format_duration(b.total_student_time),
        shown(&b.student_start_time)
    );
    println!(
        "Instructor : {} from {}",
        format_duration(b.total_instructor_time),
        shown(&b.instructor_start_time)
    );
    if b.ends_next_day {
        println!("Ends       : {} (next day)", b.end_time);
    } else {
        println!("Ends       : {}", b.end_time);
    }
}
