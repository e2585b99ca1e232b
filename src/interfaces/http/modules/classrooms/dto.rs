use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Classroom, Smartboard};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomDto {
    pub id: String,
    pub branch: String,
    pub name: String,
    pub smartboards: Vec<Smartboard>,
    pub available_smartboards: usize,
}

impl From<Classroom> for ClassroomDto {
    fn from(c: Classroom) -> Self {
        let available_smartboards = c.available_smartboards();
        Self {
            id: c.id,
            branch: c.branch,
            name: c.name,
            smartboards: c.smartboards,
            available_smartboards,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClassroomRequest {
    #[validate(length(min = 1, max = 64, message = "branch is required"))]
    #[schema(example = "CSE")]
    pub branch: String,
    #[validate(length(min = 1, max = 128, message = "name is required"))]
    #[schema(example = "A-101")]
    pub name: String,
    #[serde(default)]
    pub smartboards: Vec<Smartboard>,
}
