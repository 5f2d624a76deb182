use sqlx::PgConnection;

use crate::pkg::internal::adaptors::resumes::spec::ResumeEntry;
use crate::prelude::Result;

pub struct ResumeSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResumeSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResumeSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<ResumeEntry>> {
        let row = sqlx::query_as::<_, ResumeEntry>(
            "SELECT id, date, title, description, user_id FROM resumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_ids_for_user(&mut self, user_id: i32) -> Result<Vec<i32>> {
        let rows = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM resumes WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
