use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConferenceEntry {
    pub id: i32,
    pub name: String,
    pub year: i32,
    #[serde(skip)]
    pub resume_id: i32,
}
