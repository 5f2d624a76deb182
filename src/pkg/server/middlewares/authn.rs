use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use standard_error::{StandardError, Status};

use crate::{
    pkg::{
        internal::{adaptors::users::spec::UserEntry, auth},
        server::state::AppState,
    },
    prelude::Result,
};

// bearer-token guard for the destructive routes; all rejection causes look
// the same to the caller
pub struct AuthUser(pub UserEntry);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = StandardError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let token = match header.and_then(|value| value.strip_prefix("Bearer ")) {
            Some(token) => token,
            None => {
                tracing::warn!("token missing, authentication denied");
                return Err(unauthorized());
            }
        };
        let mut conn = state.db_pool.acquire().await?;
        match auth::authorize(&mut conn, token, &state.settings.jwt_secret).await? {
            Some(user) => Ok(AuthUser(user)),
            None => Err(unauthorized()),
        }
    }
}

fn unauthorized() -> StandardError {
    StandardError::new("ERR-AUTH-002").code(StatusCode::UNAUTHORIZED)
}
