use sqlx::PgConnection;

use crate::pkg::internal::adaptors::educations::spec::EducationEntry;
use crate::prelude::Result;

pub struct EducationSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> EducationSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        EducationSelector { pool }
    }

    pub async fn get_for_resume(&mut self, resume_id: i32) -> Result<Vec<EducationEntry>> {
        let rows = sqlx::query_as::<_, EducationEntry>(
            "SELECT id, institution, degree, resume_id
             FROM educations WHERE resume_id = $1 ORDER BY id",
        )
        .bind(resume_id)
        .fetch_all(&mut *self.pool)
        .await?;

        Ok(rows)
    }
}
