use sqlx::PgConnection;

use crate::pkg::internal::adaptors::conferences::spec::ConferenceEntry;
use crate::prelude::Result;

pub struct ConferenceSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ConferenceSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ConferenceSelector { pool }
    }

    pub async fn get_for_resume(&mut self, resume_id: i32) -> Result<Vec<ConferenceEntry>> {
        let rows = sqlx::query_as::<_, ConferenceEntry>(
            "SELECT id, name, year, resume_id
             FROM conferences WHERE resume_id = $1 ORDER BY id",
        )
        .bind(resume_id)
        .fetch_all(&mut *self.pool)
        .await?;

        Ok(rows)
    }
}
