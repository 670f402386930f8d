use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Pending,
    Active,
    OnHold,
    Completed,
    Withdrawn,
}

impl EnrollmentStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::OnHold => "on_hold",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(EnrollmentStatus::Pending),
            "active" => Some(EnrollmentStatus::Active),
            "on_hold" => Some(EnrollmentStatus::OnHold),
            "completed" => Some(EnrollmentStatus::Completed),
            "withdrawn" => Some(EnrollmentStatus::Withdrawn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Syllabus {
    pub id: i64,
    /// Program segment of mission codes, e.g. `PPC`.
    pub code: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub instructor_id: i64,
    pub instructor_name: String,
    pub syllabus: Syllabus,
    pub start_date: NaiveDate,
    pub status: EnrollmentStatus,
}

impl Enrollment {
    /// Program code for mission codes, falling back to `default_code`
    /// when the syllabus has none.
    pub fn program_code(&self, default_code: &str) -> String {
        self.syllabus
            .code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(default_code)
            .to_string()
    }

    /// `Jane Doe - Private Pilot Certificate`
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.student_name, self.syllabus.title)
    }
}
