//! Formatting utilities used for CLI and export outputs.

use crate::models::mission_type::MissionType;
use crate::models::participant::Participant;
use std::collections::BTreeSet;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn italic(s: &str) -> String {
    format!("\x1b[3m{}\x1b[0m", s)
}

/// Percent bar for progress outputs: `[#######---] 70%`.
pub fn progress_bar(percent: u32, width: usize) -> String {
    let pct = percent.min(100) as usize;
    let filled = pct * width / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        pct
    )
}

/// Label and ANSI color for a mission type.
pub fn describe_mission_type(kind: MissionType) -> (String, &'static str) {
    match kind {
        MissionType::Flight => ("Flight".into(), "\x1b[34m"),
        MissionType::Ground => ("Ground".into(), "\x1b[33m"),
        MissionType::Simulator => ("Simulator".into(), "\x1b[35m"),
    }
}

/// `{student, instructor}` → `"student + instructor"`.
pub fn describe_participants(p: &BTreeSet<Participant>) -> String {
    p.iter()
        .map(|x| x.as_str())
        .collect::<Vec<_>>()
        .join(" + ")
}
