use serde::{Deserialize, Serialize};

/// Who is present during a time block. Ordered so that sets of
/// participants render student first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participant {
    Student,
    Instructor,
}

impl Participant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Participant::Student => "student",
            Participant::Instructor => "instructor",
        }
    }
}
