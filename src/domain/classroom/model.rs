use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum SmartboardStatus {
    #[default]
    Available,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Smartboard {
    pub number: String,
    #[serde(default)]
    pub status: SmartboardStatus,
}

/// A classroom, unique by `(branch, name)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classroom {
    pub id: String,
    pub branch: String,
    pub name: String,
    pub smartboards: Vec<Smartboard>,
}

impl Classroom {
    pub fn available_smartboards(&self) -> usize {
        self.smartboards
            .iter()
            .filter(|s| s.status == SmartboardStatus::Available)
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct NewClassroom {
    pub branch: String,
    pub name: String,
    pub smartboards: Vec<Smartboard>,
}
