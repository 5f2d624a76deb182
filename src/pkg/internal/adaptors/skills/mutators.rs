use sqlx::PgConnection;

use crate::pkg::internal::adaptors::skills::spec::SkillEntry;
use crate::prelude::Result;

pub struct SkillMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> SkillMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        SkillMutator { pool }
    }

    // atomic insert-if-absent keyed on (type, name); the no-op DO UPDATE makes
    // RETURNING yield the existing row instead of nothing
    pub async fn get_or_create(&mut self, kind: &str, name: &str) -> Result<SkillEntry> {
        let row = sqlx::query_as::<_, SkillEntry>(
            r#"
            INSERT INTO skills (type, name)
            VALUES ($1, $2)
            ON CONFLICT (type, name) DO UPDATE
            SET name = EXCLUDED.name
            RETURNING id, type, name
            "#,
        )
        .bind(kind)
        .bind(name)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn associate(&mut self, resume_id: i32, skill_id: i32) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resume_skill_associations (resume_id, skill_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(resume_id)
        .bind(skill_id)
        .execute(&mut *self.pool)
        .await?;
        Ok(())
    }

    pub async fn dissociate_all(&mut self, resume_id: i32) -> Result<Vec<i32>> {
        let skill_ids = sqlx::query_scalar::<_, i32>(
            "DELETE FROM resume_skill_associations WHERE resume_id = $1 RETURNING skill_id",
        )
        .bind(resume_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(skill_ids)
    }

    pub async fn prune_orphans(&mut self, skill_ids: &[i32]) -> Result<u64> {
        if skill_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            r#"
            DELETE FROM skills s
            WHERE s.id = ANY($1)
            AND NOT EXISTS (
                SELECT 1 FROM resume_skill_associations a WHERE a.skill_id = s.id
            )
            "#,
        )
        .bind(skill_ids)
        .execute(&mut *self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
