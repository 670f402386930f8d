use crate::export::{ExportFormat, ReportKind};
use clap::{Parser, Subcommand};

/// Command-line interface definition for flightdesk
/// Flight-school mission scheduling backed by SQLite
#[derive(Parser)]
#[command(
    name = "flightdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Flight-school mission scheduling: time blocks, lesson suggestions and mission codes on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Inspect or upgrade the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their defaults")]
        migrate: bool,
    },

    /// Print the audit log table
    Log {
        #[arg(long = "print", help = "Print rows from the audit log table")]
        print: bool,
    },

    /// Manage the fleet
    Aircraft {
        #[command(subcommand)]
        action: AircraftAction,
    },

    /// Manage syllabus lessons
    Lesson {
        #[command(subcommand)]
        action: LessonAction,
    },

    /// Enroll a student in a syllabus under an instructor
    Enroll {
        #[arg(long = "student-id")]
        student_id: i64,

        #[arg(long = "student", help = "Student display name")]
        student_name: String,

        #[arg(long = "instructor-id")]
        instructor_id: i64,

        #[arg(long = "instructor", help = "Instructor display name")]
        instructor_name: String,

        /// Syllabus title (created if missing)
        #[arg(long)]
        syllabus: String,

        /// Program code for the syllabus (e.g. PPC)
        #[arg(long)]
        code: Option<String>,

        /// Start date (YYYY-MM-DD), default today
        #[arg(long)]
        start: Option<String>,
    },

    /// List enrollments
    Enrollments,

    /// Show the time blocks of a mission
    Blocks {
        /// Mission type: F, G or S
        mission_type: String,

        /// Start time (HH:MM)
        start: String,

        /// Training minutes (default: typical for the type)
        minutes: Option<i64>,

        #[arg(long, help = "Print the breakdown as JSON")]
        json: bool,
    },

    /// Show syllabus progress and lesson suggestions for an enrollment
    Progress {
        enrollment: i64,

        #[arg(long, help = "Print progress and suggestions as JSON")]
        json: bool,
    },

    /// Create a mission through the four-step wizard
    Schedule {
        #[arg(long)]
        enrollment: Option<i64>,

        /// Lesson id (default: the suggested next lesson)
        #[arg(long, conflicts_with = "custom_title")]
        lesson: Option<i64>,

        /// Create a custom mission with this title instead of a lesson
        #[arg(long = "custom-title")]
        custom_title: Option<String>,

        #[arg(long, requires = "custom_title")]
        objective: Option<String>,

        #[arg(long = "maneuver", requires = "custom_title")]
        maneuvers: Vec<String>,

        /// Mission type override: F, G or S
        #[arg(long = "type")]
        mission_type: Option<String>,

        /// Scheduled date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Start time (HH:MM)
        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        aircraft: Option<i64>,

        #[arg(long = "no-poa", help = "Do not request a plan of action")]
        no_poa: bool,

        #[arg(long, default_value = "")]
        notes: String,

        #[arg(long = "dry-run", help = "Stop at the review step without creating")]
        dry_run: bool,
    },

    /// Schedule the next lesson in one go
    Express {
        #[arg(long)]
        enrollment: Option<i64>,

        #[arg(long)]
        lesson: Option<i64>,

        #[arg(long)]
        date: Option<String>,

        /// Start time (HH:MM), default from configuration
        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        aircraft: Option<i64>,

        #[arg(long = "no-poa")]
        no_poa: bool,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List missions
    Missions {
        #[arg(long)]
        enrollment: Option<i64>,

        #[arg(long)]
        student: Option<i64>,

        /// Filter by status (repeatable)
        #[arg(long = "status")]
        statuses: Vec<String>,

        #[arg(long = "type")]
        mission_type: Option<String>,

        /// Period: YYYY, YYYY-MM, YYYY-MM-DD or start:end
        #[arg(long)]
        range: Option<String>,
    },

    /// Move a mission through its lifecycle
    Mission {
        #[command(subcommand)]
        action: MissionAction,
    },

    /// Mission statistics for a student
    Stats {
        student: i64,

        #[arg(long)]
        enrollment: Option<i64>,
    },

    /// Export a report
    Export {
        #[arg(long, value_enum)]
        report: ReportKind,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Absolute output path
        #[arg(long)]
        file: String,

        #[arg(long)]
        enrollment: Option<i64>,

        #[arg(long)]
        range: Option<String>,

        #[arg(long, help = "Overwrite the output file without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum AircraftAction {
    Add {
        tail_number: String,

        #[arg(long, default_value = "")]
        make: String,

        #[arg(long, default_value = "")]
        model: String,
    },
    List,
}

#[derive(Subcommand)]
pub enum LessonAction {
    Add {
        /// Syllabus title (created if missing)
        #[arg(long)]
        syllabus: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        order: i32,

        /// flight, ground, simulator, briefing or checkride
        #[arg(long = "type", default_value = "flight")]
        lesson_type: String,

        /// Estimated training minutes
        #[arg(long)]
        duration: Option<i64>,

        #[arg(long, default_value = "")]
        description: String,
    },
    List {
        /// Only lessons of this enrollment's syllabus
        #[arg(long)]
        enrollment: i64,
    },
}

#[derive(Subcommand)]
pub enum MissionAction {
    Start {
        id: i64,
    },
    Complete {
        id: i64,

        /// outstanding, satisfactory or needs_more_practice
        #[arg(long)]
        assessment: String,

        #[arg(long, help = "Record as partially completed")]
        partial: bool,
    },
    Cancel {
        id: i64,

        #[arg(long)]
        reason: String,
    },
}
