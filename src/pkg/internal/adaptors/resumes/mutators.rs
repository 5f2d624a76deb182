use sqlx::PgConnection;

use crate::pkg::internal::adaptors::resumes::spec::ResumeEntry;
use crate::prelude::Result;

pub struct ResumeMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResumeMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResumeMutator { pool }
    }

    pub async fn create(
        &mut self,
        user_id: i32,
        title: &str,
        description: &str,
    ) -> Result<ResumeEntry> {
        let row = sqlx::query_as::<_, ResumeEntry>(
            r#"
            INSERT INTO resumes (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, date, title, description, user_id
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(user_id)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    // full replace of the scalar fields; date stays untouched
    pub async fn overwrite(
        &mut self,
        id: i32,
        title: &str,
        description: &str,
    ) -> Result<Option<ResumeEntry>> {
        let row = sqlx::query_as::<_, ResumeEntry>(
            r#"
            UPDATE resumes SET title = $2, description = $3
            WHERE id = $1
            RETURNING id, date, title, description, user_id
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &mut self,
        id: i32,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<ResumeEntry>> {
        let mut query = String::from("UPDATE resumes SET id = id");
        let mut param_count = 1;

        if title.is_some() {
            param_count += 1;
            query.push_str(&format!(", title = ${}", param_count));
        }
        if description.is_some() {
            param_count += 1;
            query.push_str(&format!(", description = ${}", param_count));
        }

        query.push_str(" WHERE id = $1 RETURNING id, date, title, description, user_id");

        let mut q = sqlx::query_as::<_, ResumeEntry>(&query).bind(id);

        if let Some(title) = title {
            q = q.bind(title);
        }
        if let Some(description) = description {
            q = q.bind(description);
        }
        let row = q.fetch_optional(&mut *self.pool).await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
