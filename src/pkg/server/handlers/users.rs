use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use standard_error::{StandardError, Status};

use crate::{
    pkg::{
        internal::{
            adaptors::users::{mutators::UserMutator, selectors::UserSelector},
            resume::ResumeAggregate,
        },
        server::{
            middlewares::authn::AuthUser,
            state::{AppState, GetTxn},
        },
    },
    prelude::Result,
};

// support-only path, not part of the public surface
pub async fn remove(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<i32>,
) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    if UserSelector::new(&mut tx)
        .get_by_id(user_id)
        .await?
        .is_none()
    {
        return Err(StandardError::new("ERR-USER-002").code(StatusCode::NOT_FOUND));
    }
    let removed = ResumeAggregate::remove_for_user(&mut tx, user_id).await?;
    UserMutator::new(&mut tx).delete(user_id).await?;
    tx.commit().await?;
    tracing::info!(
        "{} deleted user {} along with {} resumes",
        &caller.email,
        user_id,
        removed
    );
    Ok(())
}
