use sqlx::PgConnection;

use crate::pkg::internal::adaptors::keywords::spec::KeywordEntry;
use crate::prelude::Result;

pub struct KeywordSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> KeywordSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        KeywordSelector { pool }
    }

    pub async fn get_for_resume(&mut self, resume_id: i32) -> Result<Vec<KeywordEntry>> {
        let rows = sqlx::query_as::<_, KeywordEntry>(
            "SELECT k.id, k.name
             FROM keywords k
             JOIN resume_keyword_associations a ON a.keyword_id = k.id
             WHERE a.resume_id = $1 ORDER BY k.id",
        )
        .bind(resume_id)
        .fetch_all(&mut *self.pool)
        .await?;

        Ok(rows)
    }
}
