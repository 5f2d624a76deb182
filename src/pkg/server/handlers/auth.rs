use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use standard_error::{Interpolate, StandardError, Status};
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::users::{
                mutators::UserMutator,
                selectors::UserSelector,
                spec::UserView,
            },
            auth::{authenticate, hash_password, Claims},
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

#[derive(Deserialize, Validate)]
pub struct SignupInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct SigninInput {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupInput>,
) -> Result<Json<UserView>> {
    input.validate().map_err(|e| {
        StandardError::new("ERR-VALIDATION-001")
            .interpolate_err(e.to_string())
            .code(StatusCode::UNPROCESSABLE_ENTITY)
    })?;
    let mut tx = state.db_pool.begin_txn().await?;
    if UserSelector::new(&mut tx)
        .get_by_email(&input.email)
        .await?
        .is_some()
    {
        return Err(StandardError::new("ERR-USER-001").code(StatusCode::CONFLICT));
    }
    let hashed = hash_password(&input.password)?;
    let user = UserMutator::new(&mut tx)
        .create(&input.email, &hashed, &input.first_name, &input.last_name)
        .await?;
    tx.commit().await?;
    tracing::info!("user {} signed up", &user.email);
    Ok(Json(user.into()))
}

pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SigninInput>,
) -> Result<Json<TokenResponse>> {
    let mut conn = state.db_pool.acquire().await?;
    let email = match authenticate(&mut conn, &input.email, &input.password).await? {
        Some(email) => email,
        None => {
            tracing::warn!("failed signin attempt for {}", &input.email);
            return Err(StandardError::new("ERR-AUTH-001").code(StatusCode::UNAUTHORIZED));
        }
    };
    let token = Claims::issue(
        &email,
        &state.settings.jwt_secret,
        state.settings.token_validity_minutes,
    )?;
    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}
