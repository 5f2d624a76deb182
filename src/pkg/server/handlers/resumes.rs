use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use standard_error::{StandardError, Status};

use crate::{
    pkg::{
        internal::{
            adaptors::{resumes::spec::ResumeView, users::selectors::UserSelector},
            resume::ResumeAggregate,
        },
        server::{
            middlewares::authn::AuthUser,
            state::{AppState, GetTxn},
        },
    },
    prelude::Result,
};

#[derive(Debug, Clone, Deserialize)]
pub struct EducationInput {
    pub institution: String,
    pub degree: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceInput {
    pub name: String,
    pub year: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordInput {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateResumeInput {
    pub user_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub educations: Vec<EducationInput>,
    #[serde(default)]
    pub conferences: Vec<ConferenceInput>,
    #[serde(default)]
    pub skills: Vec<SkillInput>,
    #[serde(default)]
    pub keywords: Vec<KeywordInput>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceResumeInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub educations: Vec<EducationInput>,
    #[serde(default)]
    pub conferences: Vec<ConferenceInput>,
    #[serde(default)]
    pub skills: Vec<SkillInput>,
    #[serde(default)]
    pub keywords: Vec<KeywordInput>,
}

// list fields are tri-state: omitted keeps the current sub-collection,
// an empty list clears it, a populated list replaces it
#[derive(Debug, Default, Deserialize)]
pub struct PatchResumeInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub educations: Option<Vec<EducationInput>>,
    pub conferences: Option<Vec<ConferenceInput>>,
    pub skills: Option<Vec<SkillInput>>,
    pub keywords: Option<Vec<KeywordInput>>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateResumeInput>,
) -> Result<Json<ResumeView>> {
    let mut tx = state.db_pool.begin_txn().await?;
    if UserSelector::new(&mut tx)
        .get_by_id(input.user_id)
        .await?
        .is_none()
    {
        return Err(StandardError::new("ERR-USER-002").code(StatusCode::NOT_FOUND));
    }
    let view = ResumeAggregate::create(&mut tx, input).await?;
    tx.commit().await?;
    Ok(Json(view))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(resume_id): Path<i32>,
) -> Result<Json<ResumeView>> {
    let mut tx = state.db_pool.begin_txn().await?;
    match ResumeAggregate::fetch(&mut tx, resume_id).await? {
        Some(view) => Ok(Json(view)),
        None => Err(StandardError::new("ERR-RESUME-001").code(StatusCode::NOT_FOUND)),
    }
}

pub async fn replace(
    State(state): State<AppState>,
    Path(resume_id): Path<i32>,
    Json(input): Json<ReplaceResumeInput>,
) -> Result<Json<ResumeView>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let view = match ResumeAggregate::replace(&mut tx, resume_id, input).await? {
        Some(view) => view,
        None => return Err(StandardError::new("ERR-RESUME-001").code(StatusCode::NOT_FOUND)),
    };
    tx.commit().await?;
    Ok(Json(view))
}

pub async fn update(
    State(state): State<AppState>,
    Path(resume_id): Path<i32>,
    Json(input): Json<PatchResumeInput>,
) -> Result<Json<ResumeView>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let view = match ResumeAggregate::update(&mut tx, resume_id, input).await? {
        Some(view) => view,
        None => return Err(StandardError::new("ERR-RESUME-001").code(StatusCode::NOT_FOUND)),
    };
    tx.commit().await?;
    Ok(Json(view))
}

pub async fn remove(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(resume_id): Path<i32>,
) -> Result<Json<ResumeView>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let view = match ResumeAggregate::remove(&mut tx, resume_id).await? {
        Some(view) => view,
        None => return Err(StandardError::new("ERR-RESUME-001").code(StatusCode::NOT_FOUND)),
    };
    tx.commit().await?;
    tracing::info!("{} deleted resume {}", &user.email, resume_id);
    Ok(Json(view))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_distinguishes_omitted_from_empty() {
        let omitted: PatchResumeInput =
            serde_json::from_str(r#"{"title": "t"}"#).expect("valid payload");
        assert!(omitted.keywords.is_none());

        let empty: PatchResumeInput =
            serde_json::from_str(r#"{"keywords": []}"#).expect("valid payload");
        assert_eq!(empty.keywords.expect("present").len(), 0);
        assert!(empty.title.is_none());

        let populated: PatchResumeInput =
            serde_json::from_str(r#"{"skills": [{"type": "Lang", "name": "Rust"}]}"#)
                .expect("valid payload");
        let skills = populated.skills.expect("present");
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].kind, "Lang");
    }

    #[test]
    fn test_replace_defaults_overwrite_scalars() {
        let input: ReplaceResumeInput = serde_json::from_str("{}").expect("valid payload");
        assert_eq!(input.title, "");
        assert_eq!(input.description, "");
        assert!(input.educations.is_empty());
        assert!(input.skills.is_empty());
    }
}
