pub mod aircraft;
pub mod blocks;
pub mod config;
pub mod enroll;
pub mod export;
pub mod express;
pub mod init;
pub mod lesson;
pub mod log;
pub mod mission;
pub mod missions;
pub mod progress;
pub mod schedule;
pub mod stats;
