pub mod progress;
pub mod time_blocks;
