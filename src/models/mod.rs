pub mod aircraft;
pub mod enrollment;
pub mod lesson;
pub mod mission;
pub mod mission_type;
pub mod participant;
