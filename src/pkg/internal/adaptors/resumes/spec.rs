use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pkg::internal::adaptors::conferences::spec::ConferenceEntry;
use crate::pkg::internal::adaptors::educations::spec::EducationEntry;
use crate::pkg::internal::adaptors::keywords::spec::KeywordEntry;
use crate::pkg::internal::adaptors::skills::spec::SkillEntry;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeEntry {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub user_id: i32,
}

// resume row plus its dereferenced children, as returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeView {
    pub id: i32,
    pub user_id: i32,
    pub date: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub educations: Vec<EducationEntry>,
    pub conferences: Vec<ConferenceEntry>,
    pub skills: Vec<SkillEntry>,
    pub keywords: Vec<KeywordEntry>,
}
