/// ANSI color helper utilities for terminal output.
use crate::models::mission::MissionStatus;

pub const RESET: &str = "\x1b[0m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_status(status: MissionStatus) -> &'static str {
    match status {
        MissionStatus::Scheduled => BLUE,
        MissionStatus::InProgress => CYAN,
        MissionStatus::Completed => GREEN,
        MissionStatus::PartiallyCompleted => YELLOW,
        MissionStatus::Cancelled => RED,
    }
}
