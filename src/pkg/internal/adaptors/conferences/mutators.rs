use sqlx::PgConnection;

use crate::pkg::internal::adaptors::conferences::spec::ConferenceEntry;
use crate::pkg::server::handlers::resumes::ConferenceInput;
use crate::prelude::Result;

pub struct ConferenceMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ConferenceMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ConferenceMutator { pool }
    }

    pub async fn bulk_create(
        &mut self,
        resume_id: i32,
        conferences: Vec<ConferenceInput>,
    ) -> Result<Vec<ConferenceEntry>> {
        if conferences.is_empty() {
            return Ok(Vec::new());
        }
        let mut query_builder =
            sqlx::QueryBuilder::new("INSERT INTO conferences (name, year, resume_id) ");
        query_builder.push_values(conferences, |mut b, conference| {
            b.push_bind(conference.name)
                .push_bind(conference.year)
                .push_bind(resume_id);
        });
        query_builder.push(" RETURNING id, name, year, resume_id");
        let rows = query_builder
            .build_query_as::<ConferenceEntry>()
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn delete_for_resume(&mut self, resume_id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM conferences WHERE resume_id = $1")
            .bind(resume_id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
