use sqlx::PgConnection;

use crate::pkg::internal::adaptors::keywords::spec::KeywordEntry;
use crate::prelude::Result;

pub struct KeywordMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> KeywordMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        KeywordMutator { pool }
    }

    pub async fn get_or_create(&mut self, name: &str) -> Result<KeywordEntry> {
        let row = sqlx::query_as::<_, KeywordEntry>(
            r#"
            INSERT INTO keywords (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE
            SET name = EXCLUDED.name
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn associate(&mut self, resume_id: i32, keyword_id: i32) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resume_keyword_associations (resume_id, keyword_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(resume_id)
        .bind(keyword_id)
        .execute(&mut *self.pool)
        .await?;
        Ok(())
    }

    pub async fn dissociate_all(&mut self, resume_id: i32) -> Result<Vec<i32>> {
        let keyword_ids = sqlx::query_scalar::<_, i32>(
            "DELETE FROM resume_keyword_associations WHERE resume_id = $1 RETURNING keyword_id",
        )
        .bind(resume_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(keyword_ids)
    }

    pub async fn prune_orphans(&mut self, keyword_ids: &[i32]) -> Result<u64> {
        if keyword_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            r#"
            DELETE FROM keywords k
            WHERE k.id = ANY($1)
            AND NOT EXISTS (
                SELECT 1 FROM resume_keyword_associations a WHERE a.keyword_id = k.id
            )
            "#,
        )
        .bind(keyword_ids)
        .execute(&mut *self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
