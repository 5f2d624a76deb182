use sqlx::PgConnection;

use crate::{
    pkg::{
        internal::adaptors::{
            conferences::{mutators::ConferenceMutator, selectors::ConferenceSelector},
            educations::{mutators::EducationMutator, selectors::EducationSelector},
            keywords::{mutators::KeywordMutator, selectors::KeywordSelector},
            resumes::{
                mutators::ResumeMutator,
                selectors::ResumeSelector,
                spec::{ResumeEntry, ResumeView},
            },
            skills::{mutators::SkillMutator, selectors::SkillSelector},
        },
        server::handlers::resumes::{
            ConferenceInput, CreateResumeInput, EducationInput, KeywordInput, PatchResumeInput,
            ReplaceResumeInput, SkillInput,
        },
    },
    prelude::Result,
};

// every public operation runs against the caller's connection, so a handler
// wraps one whole aggregate mutation in a single transaction
pub struct ResumeAggregate;

impl ResumeAggregate {
    pub async fn fetch(pool: &mut PgConnection, resume_id: i32) -> Result<Option<ResumeView>> {
        let entry = match ResumeSelector::new(&mut *pool).get_by_id(resume_id).await? {
            Some(entry) => entry,
            None => return Ok(None),
        };
        Ok(Some(Self::assemble(pool, entry).await?))
    }

    async fn assemble(pool: &mut PgConnection, entry: ResumeEntry) -> Result<ResumeView> {
        let educations = EducationSelector::new(&mut *pool)
            .get_for_resume(entry.id)
            .await?;
        let conferences = ConferenceSelector::new(&mut *pool)
            .get_for_resume(entry.id)
            .await?;
        let skills = SkillSelector::new(&mut *pool).get_for_resume(entry.id).await?;
        let keywords = KeywordSelector::new(&mut *pool)
            .get_for_resume(entry.id)
            .await?;
        Ok(ResumeView {
            id: entry.id,
            user_id: entry.user_id,
            date: entry.date,
            title: entry.title,
            description: entry.description,
            educations,
            conferences,
            skills,
            keywords,
        })
    }

    pub async fn create(pool: &mut PgConnection, input: CreateResumeInput) -> Result<ResumeView> {
        let entry = ResumeMutator::new(&mut *pool)
            .create(input.user_id, &input.title, &input.description)
            .await?;
        EducationMutator::new(&mut *pool)
            .bulk_create(entry.id, input.educations)
            .await?;
        ConferenceMutator::new(&mut *pool)
            .bulk_create(entry.id, input.conferences)
            .await?;
        Self::attach_skills(&mut *pool, entry.id, &input.skills).await?;
        Self::attach_keywords(&mut *pool, entry.id, &input.keywords).await?;
        tracing::debug!("created resume {} for user {}", entry.id, entry.user_id);
        Self::assemble(pool, entry).await
    }

    // total replace: scalars overwritten as given, every sub-collection
    // dropped and rebuilt, even from an empty list
    pub async fn replace(
        pool: &mut PgConnection,
        resume_id: i32,
        input: ReplaceResumeInput,
    ) -> Result<Option<ResumeView>> {
        let entry = match ResumeMutator::new(&mut *pool)
            .overwrite(resume_id, &input.title, &input.description)
            .await?
        {
            Some(entry) => entry,
            None => return Ok(None),
        };
        Self::replace_educations(&mut *pool, resume_id, input.educations).await?;
        Self::replace_conferences(&mut *pool, resume_id, input.conferences).await?;
        Self::replace_skills(&mut *pool, resume_id, &input.skills).await?;
        Self::replace_keywords(&mut *pool, resume_id, &input.keywords).await?;
        Self::assemble(pool, entry).await.map(Some)
    }

    // partial replace: absent fields stay untouched, a present list replaces
    // its sub-collection (an explicitly empty list clears it)
    pub async fn update(
        pool: &mut PgConnection,
        resume_id: i32,
        input: PatchResumeInput,
    ) -> Result<Option<ResumeView>> {
        let entry = match ResumeSelector::new(&mut *pool).get_by_id(resume_id).await? {
            Some(entry) => entry,
            None => return Ok(None),
        };
        let entry = if input.title.is_some() || input.description.is_some() {
            match ResumeMutator::new(&mut *pool)
                .update(resume_id, input.title.as_deref(), input.description.as_deref())
                .await?
            {
                Some(entry) => entry,
                None => return Ok(None),
            }
        } else {
            entry
        };
        if let Some(educations) = input.educations {
            Self::replace_educations(&mut *pool, resume_id, educations).await?;
        }
        if let Some(conferences) = input.conferences {
            Self::replace_conferences(&mut *pool, resume_id, conferences).await?;
        }
        if let Some(skills) = input.skills {
            Self::replace_skills(&mut *pool, resume_id, &skills).await?;
        }
        if let Some(keywords) = input.keywords {
            Self::replace_keywords(&mut *pool, resume_id, &keywords).await?;
        }
        Self::assemble(pool, entry).await.map(Some)
    }

    // destructive read: the returned view is the state from before the delete
    pub async fn remove(pool: &mut PgConnection, resume_id: i32) -> Result<Option<ResumeView>> {
        let view = match Self::fetch(&mut *pool, resume_id).await? {
            Some(view) => view,
            None => return Ok(None),
        };
        EducationMutator::new(&mut *pool)
            .delete_for_resume(resume_id)
            .await?;
        ConferenceMutator::new(&mut *pool)
            .delete_for_resume(resume_id)
            .await?;
        let skill_ids = SkillMutator::new(&mut *pool).dissociate_all(resume_id).await?;
        SkillMutator::new(&mut *pool).prune_orphans(&skill_ids).await?;
        let keyword_ids = KeywordMutator::new(&mut *pool)
            .dissociate_all(resume_id)
            .await?;
        KeywordMutator::new(&mut *pool)
            .prune_orphans(&keyword_ids)
            .await?;
        ResumeMutator::new(&mut *pool).delete(resume_id).await?;
        tracing::debug!("deleted resume {}", resume_id);
        Ok(Some(view))
    }

    pub async fn remove_for_user(pool: &mut PgConnection, user_id: i32) -> Result<u64> {
        let resume_ids = ResumeSelector::new(&mut *pool)
            .get_ids_for_user(user_id)
            .await?;
        let mut removed = 0;
        for resume_id in resume_ids {
            if Self::remove(&mut *pool, resume_id).await?.is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn attach_skills(
        pool: &mut PgConnection,
        resume_id: i32,
        skills: &[SkillInput],
    ) -> Result<()> {
        for skill in skills {
            let row = SkillMutator::new(&mut *pool)
                .get_or_create(&skill.kind, &skill.name)
                .await?;
            SkillMutator::new(&mut *pool)
                .associate(resume_id, row.id)
                .await?;
        }
        Ok(())
    }

    async fn attach_keywords(
        pool: &mut PgConnection,
        resume_id: i32,
        keywords: &[KeywordInput],
    ) -> Result<()> {
        for keyword in keywords {
            let row = KeywordMutator::new(&mut *pool)
                .get_or_create(&keyword.name)
                .await?;
            KeywordMutator::new(&mut *pool)
                .associate(resume_id, row.id)
                .await?;
        }
        Ok(())
    }

    async fn replace_educations(
        pool: &mut PgConnection,
        resume_id: i32,
        educations: Vec<EducationInput>,
    ) -> Result<()> {
        EducationMutator::new(&mut *pool)
            .delete_for_resume(resume_id)
            .await?;
        EducationMutator::new(&mut *pool)
            .bulk_create(resume_id, educations)
            .await?;
        Ok(())
    }

    async fn replace_conferences(
        pool: &mut PgConnection,
        resume_id: i32,
        conferences: Vec<ConferenceInput>,
    ) -> Result<()> {
        ConferenceMutator::new(&mut *pool)
            .delete_for_resume(resume_id)
            .await?;
        ConferenceMutator::new(&mut *pool)
            .bulk_create(resume_id, conferences)
            .await?;
        Ok(())
    }

    async fn replace_skills(
        pool: &mut PgConnection,
        resume_id: i32,
        skills: &[SkillInput],
    ) -> Result<()> {
        let skill_ids = SkillMutator::new(&mut *pool).dissociate_all(resume_id).await?;
        Self::attach_skills(&mut *pool, resume_id, skills).await?;
        // prune after re-attach so rows listed again are not dropped in between
        SkillMutator::new(&mut *pool).prune_orphans(&skill_ids).await?;
        Ok(())
    }

    async fn replace_keywords(
        pool: &mut PgConnection,
        resume_id: i32,
        keywords: &[KeywordInput],
    ) -> Result<()> {
        let keyword_ids = KeywordMutator::new(&mut *pool)
            .dissociate_all(resume_id)
            .await?;
        Self::attach_keywords(&mut *pool, resume_id, keywords).await?;
        KeywordMutator::new(&mut *pool)
            .prune_orphans(&keyword_ids)
            .await?;
        Ok(())
    }
}

// lifecycle tests run against a real database, `cargo run -- migrate` first
#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::internal::adaptors::users::{
        mutators::UserMutator, selectors::UserSelector, spec::UserEntry,
    };
    use crate::pkg::internal::auth::hash_password;
    use crate::pkg::server::state::{AppState, GetTxn};

    async fn ensure_user(pool: &mut PgConnection, email: &str) -> Result<UserEntry> {
        if let Some(user) = UserSelector::new(&mut *pool).get_by_email(email).await? {
            return Ok(user);
        }
        let hashed = hash_password("pw")?;
        UserMutator::new(pool)
            .create(email, &hashed, "Ryan", "Gosling")
            .await
    }

    async fn count_skills(pool: &mut PgConnection, kind: &str, name: &str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM skills WHERE type = $1 AND name = $2",
        )
        .bind(kind)
        .bind(name)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    // tag keeps the globally shared skill rows distinct per test, so the
    // suite can run in parallel against one database
    fn payload(user_id: i32, tag: &str) -> CreateResumeInput {
        serde_json::from_value(serde_json::json!({
            "user_id": user_id,
            "title": "My cool resume",
            "description": "Cool resume for a cool company",
            "educations": [
                {"institution": "Southern Federal University", "degree": "Bachelor"},
                {"institution": "Moscow State University", "degree": "Master"}
            ],
            "conferences": [{"name": "Spring for professionals", "year": 2023}],
            "skills": [
                {"type": "Framework", "name": format!("Spring-{}", tag)},
                {"type": "Programming language", "name": format!("Java-{}", tag)}
            ],
            "keywords": [{"name": "Remote working"}]
        }))
        .expect("valid payload")
    }

    #[tokio::test]
    #[traced_test]
    #[ignore]
    async fn test_create_get_roundtrip() -> Result<()> {
        let state = AppState::new()?;
        let mut tx = state.db_pool.begin_txn().await?;
        let user = ensure_user(&mut tx, "roundtrip@test.local").await?;

        let created = ResumeAggregate::create(&mut tx, payload(user.id, "roundtrip")).await?;
        let fetched = ResumeAggregate::fetch(&mut tx, created.id)
            .await?
            .expect("resume should exist");

        assert_eq!(fetched.title, "My cool resume");
        assert_eq!(fetched.description, "Cool resume for a cool company");
        assert_eq!(fetched.date, created.date);
        assert_eq!(fetched.educations.len(), 2);
        assert_eq!(fetched.conferences.len(), 1);
        assert_eq!(fetched.skills.len(), 2);
        assert_eq!(fetched.keywords.len(), 1);
        assert_eq!(fetched.keywords[0].name, "Remote working");

        ResumeAggregate::remove(&mut tx, created.id).await?;
        tx.commit().await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore]
    async fn test_shared_skill_dedup_and_orphan_cleanup() -> Result<()> {
        let state = AppState::new()?;
        let mut tx = state.db_pool.begin_txn().await?;
        let user = ensure_user(&mut tx, "dedup@test.local").await?;

        let first = ResumeAggregate::create(&mut tx, payload(user.id, "dedup")).await?;
        let second = ResumeAggregate::create(&mut tx, payload(user.id, "dedup")).await?;

        // two resumes, one global row per (type, name)
        assert_eq!(count_skills(&mut tx, "Framework", "Spring-dedup").await?, 1);
        assert_eq!(first.skills[0].id, second.skills[0].id);

        // the shared row survives while the other resume still references it
        ResumeAggregate::remove(&mut tx, first.id).await?;
        assert_eq!(count_skills(&mut tx, "Framework", "Spring-dedup").await?, 1);

        // dropping the last referencer prunes it
        ResumeAggregate::remove(&mut tx, second.id).await?;
        assert_eq!(count_skills(&mut tx, "Framework", "Spring-dedup").await?, 0);
        tx.commit().await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore]
    async fn test_duplicate_skill_input_collapses() -> Result<()> {
        let state = AppState::new()?;
        let mut tx = state.db_pool.begin_txn().await?;
        let user = ensure_user(&mut tx, "duplicate@test.local").await?;

        let input: CreateResumeInput = serde_json::from_value(serde_json::json!({
            "user_id": user.id,
            "title": "dup",
            "skills": [
                {"type": "Lang", "name": "Python-dup"},
                {"type": "Lang", "name": "Python-dup"}
            ]
        }))
        .expect("valid payload");
        let view = ResumeAggregate::create(&mut tx, input).await?;

        assert_eq!(count_skills(&mut tx, "Lang", "Python-dup").await?, 1);
        assert_eq!(view.skills.len(), 1);

        let deleted = ResumeAggregate::remove(&mut tx, view.id)
            .await?
            .expect("resume should exist");
        assert_eq!(deleted.title, "dup");
        assert!(ResumeAggregate::fetch(&mut tx, view.id).await?.is_none());
        assert_eq!(count_skills(&mut tx, "Lang", "Python-dup").await?, 0);
        tx.commit().await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore]
    async fn test_replace_clears_unlisted_children() -> Result<()> {
        let state = AppState::new()?;
        let mut tx = state.db_pool.begin_txn().await?;
        let user = ensure_user(&mut tx, "replace@test.local").await?;

        let created = ResumeAggregate::create(&mut tx, payload(user.id, "replace")).await?;
        let input: ReplaceResumeInput = serde_json::from_value(serde_json::json!({
            "title": "Trimmed",
            "description": "",
            "skills": [{"type": "Framework", "name": "Spring-replace"}]
        }))
        .expect("valid payload");
        let replaced = ResumeAggregate::replace(&mut tx, created.id, input)
            .await?
            .expect("resume should exist");

        assert_eq!(replaced.title, "Trimmed");
        assert_eq!(replaced.description, "");
        assert_eq!(replaced.date, created.date);
        assert!(replaced.educations.is_empty());
        assert!(replaced.conferences.is_empty());
        assert_eq!(replaced.skills.len(), 1);
        assert!(replaced.keywords.is_empty());
        // the dropped skill was only referenced here, so it is gone
        assert_eq!(
            count_skills(&mut tx, "Programming language", "Java-replace").await?,
            0
        );
        assert_eq!(count_skills(&mut tx, "Framework", "Spring-replace").await?, 1);

        ResumeAggregate::remove(&mut tx, created.id).await?;
        tx.commit().await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore]
    async fn test_patch_preserves_omitted_collections() -> Result<()> {
        let state = AppState::new()?;
        let mut tx = state.db_pool.begin_txn().await?;
        let user = ensure_user(&mut tx, "patch@test.local").await?;

        let created = ResumeAggregate::create(&mut tx, payload(user.id, "patch")).await?;
        let input: PatchResumeInput =
            serde_json::from_value(serde_json::json!({"description": "only this changes"}))
                .expect("valid payload");
        let patched = ResumeAggregate::update(&mut tx, created.id, input)
            .await?
            .expect("resume should exist");

        assert_eq!(patched.title, created.title);
        assert_eq!(patched.description, "only this changes");
        assert_eq!(patched.educations.len(), 2);
        assert_eq!(patched.conferences.len(), 1);
        assert_eq!(patched.skills.len(), 2);
        assert_eq!(patched.keywords.len(), 1);

        // an explicitly empty list clears the sub-collection
        let input: PatchResumeInput =
            serde_json::from_value(serde_json::json!({"keywords": []})).expect("valid payload");
        let patched = ResumeAggregate::update(&mut tx, created.id, input)
            .await?
            .expect("resume should exist");
        assert!(patched.keywords.is_empty());
        assert_eq!(patched.skills.len(), 2);

        ResumeAggregate::remove(&mut tx, created.id).await?;
        tx.commit().await?;
        Ok(())
    }
}
