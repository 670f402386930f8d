use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aircraft {
    pub id: i64,
    pub tail_number: String,
    pub make: String,
    pub model: String,
}

impl Aircraft {
    /// `N12345 (Cessna 172)`
    pub fn display_name(&self) -> String {
        format!("{} ({} {})", self.tail_number, self.make, self.model)
    }
}
