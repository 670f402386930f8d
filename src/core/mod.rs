pub mod calculator;
pub mod express;
pub mod log;
pub mod mission_code;
pub mod schedule;
pub mod stats;
pub mod suggestions;
pub mod wizard;
