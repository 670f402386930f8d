pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

pub use formatting::describe_mission_type;
pub use time::{format_duration, format_time_for_display};
