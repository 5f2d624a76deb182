use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationEntry {
    pub id: i32,
    pub institution: String,
    pub degree: String,
    #[serde(skip)]
    pub resume_id: i32,
}
