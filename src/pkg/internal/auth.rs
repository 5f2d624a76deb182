use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use standard_error::{Interpolate, StandardError};

use crate::{
    pkg::internal::adaptors::users::{selectors::UserSelector, spec::UserEntry},
    prelude::Result,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: usize,
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StandardError::new("ERR-AUTH-000").interpolate_err(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hashed: &str) -> bool {
    match PasswordHash::new(hashed) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

impl Claims {
    // the token carries the email claim and the expiry, nothing else
    pub fn issue(email: &str, secret: &str, validity_minutes: i64) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(chrono::Duration::minutes(validity_minutes))
            .ok_or_else(|| StandardError::new("ERR-AUTH-000"))?
            .timestamp();
        let claims = Claims {
            email: email.to_string(),
            exp: expiration as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| StandardError::new("ERR-AUTH-000").interpolate_err(e.to_string()))
    }

    // bad signature, malformed and expired tokens all collapse to None
    pub fn decode(token: &str, secret: &str) -> Option<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .ok()
    }
}

// None for unknown email or wrong password, without telling which
pub async fn authenticate(
    pool: &mut PgConnection,
    email: &str,
    password: &str,
) -> Result<Option<String>> {
    let user = match UserSelector::new(pool).get_by_email(email).await? {
        Some(user) => user,
        None => return Ok(None),
    };
    if !verify_password(password, &user.password) {
        return Ok(None);
    }
    Ok(Some(user.email))
}

// a decoded token is only as good as the user it points at: deleting the
// user revokes every token issued for them
pub async fn authorize(
    pool: &mut PgConnection,
    token: &str,
    secret: &str,
) -> Result<Option<UserEntry>> {
    let claims = match Claims::decode(token, secret) {
        Some(claims) => claims,
        None => return Ok(None),
    };
    let user = UserSelector::new(pool).get_by_email(&claims.email).await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_password_hash_roundtrip() -> Result<()> {
        let hash = hash_password("supercoolpassword123")?;
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("supercoolpassword123", &hash));
        assert!(!verify_password("wrongpassword", &hash));
        Ok(())
    }

    #[test]
    fn test_password_hashes_are_salted() -> Result<()> {
        let first = hash_password("pw")?;
        let second = hash_password("pw")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("pw", "not-a-phc-string"));
    }

    #[test]
    fn test_token_roundtrip() -> Result<()> {
        let token = Claims::issue("a@b.com", SECRET, 30)?;
        let claims = Claims::decode(&token, SECRET).expect("token should decode");
        assert_eq!(claims.email, "a@b.com");
        Ok(())
    }

    #[test]
    fn test_token_expired() -> Result<()> {
        let token = Claims::issue("a@b.com", SECRET, -5)?;
        assert!(Claims::decode(&token, SECRET).is_none());
        Ok(())
    }

    #[test]
    fn test_token_wrong_secret() -> Result<()> {
        let token = Claims::issue("a@b.com", SECRET, 30)?;
        assert!(Claims::decode(&token, "other-secret").is_none());
        Ok(())
    }

    #[test]
    fn test_token_malformed() {
        assert!(Claims::decode("definitely.not.a.token", SECRET).is_none());
    }
}
