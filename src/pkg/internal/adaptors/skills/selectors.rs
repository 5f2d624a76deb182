use sqlx::PgConnection;

use crate::pkg::internal::adaptors::skills::spec::SkillEntry;
use crate::prelude::Result;

pub struct SkillSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> SkillSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        SkillSelector { pool }
    }

    pub async fn get_for_resume(&mut self, resume_id: i32) -> Result<Vec<SkillEntry>> {
        let rows = sqlx::query_as::<_, SkillEntry>(
            "SELECT s.id, s.type, s.name
             FROM skills s
             JOIN resume_skill_associations a ON a.skill_id = s.id
             WHERE a.resume_id = $1 ORDER BY s.id",
        )
        .bind(resume_id)
        .fetch_all(&mut *self.pool)
        .await?;

        Ok(rows)
    }
}
