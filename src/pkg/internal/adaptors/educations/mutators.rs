use sqlx::PgConnection;

use crate::pkg::internal::adaptors::educations::spec::EducationEntry;
use crate::pkg::server::handlers::resumes::EducationInput;
use crate::prelude::Result;

pub struct EducationMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> EducationMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        EducationMutator { pool }
    }

    pub async fn bulk_create(
        &mut self,
        resume_id: i32,
        educations: Vec<EducationInput>,
    ) -> Result<Vec<EducationEntry>> {
        if educations.is_empty() {
            return Ok(Vec::new());
        }
        let mut query_builder =
            sqlx::QueryBuilder::new("INSERT INTO educations (institution, degree, resume_id) ");
        query_builder.push_values(educations, |mut b, education| {
            b.push_bind(education.institution)
                .push_bind(education.degree)
                .push_bind(resume_id);
        });
        query_builder.push(" RETURNING id, institution, degree, resume_id");
        let rows = query_builder
            .build_query_as::<EducationEntry>()
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn delete_for_resume(&mut self, resume_id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM educations WHERE resume_id = $1")
            .bind(resume_id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
