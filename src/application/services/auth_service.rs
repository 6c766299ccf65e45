//! Authentication Service
//!
//! Sign-up, sign-in and the session token carried in the session cookie.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::dto::{LoginForm, SignUpForm};
use crate::config::SessionSettings;
use crate::domain::{Filter, Member, MemberRole, Repository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::validate_form;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Authentication service trait
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account. The very first account becomes an administrator.
    async fn sign_up(&self, form: SignUpForm) -> Result<Member, AppError>;

    /// Check credentials and return the member they belong to
    async fn sign_in(&self, form: LoginForm) -> Result<Member, AppError>;
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (member ID)
    pub sub: String,
    pub role: MemberRole,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    pub jti: String,
}

impl SessionClaims {
    pub fn member_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid session".into()))
    }
}

/// Issues and verifies HS256 session tokens.
#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl SessionTokens {
    pub fn new(settings: &SessionSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            lifetime: Duration::hours(settings.expiry_hours),
        }
    }

    pub fn issue(&self, member: &Member) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: member.id.to_string(),
            role: member.role,
            exp: (now + self.lifetime).timestamp(),
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Decode a token, rejecting bad signatures and expired tokens.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("session token rejected: {}", e);
                AppError::Unauthorized("Invalid session".into())
            })
    }
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// AuthService implementation
pub struct AuthServiceImpl {
    members: Arc<dyn Repository<Member>>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl AuthServiceImpl {
    pub fn new(members: Arc<dyn Repository<Member>>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            members,
            id_generator,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    #[tracing::instrument(skip(self, form), fields(email = %form.email))]
    async fn sign_up(&self, form: SignUpForm) -> Result<Member, AppError> {
        validate_form(&form)?;

        if self
            .members
            .exists(&Filter::eq_ignore_case("email", &form.email))
            .await?
        {
            return Err(AppError::Conflict(
                "An account with this email already exists".into(),
            ));
        }

        let role = if self.members.exists(&Filter::all()).await? {
            MemberRole::User
        } else {
            MemberRole::Admin
        };

        let member = Member {
            id: self.id_generator.generate(),
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            role,
            password_hash: hash_password(&form.password)?,
            ..Default::default()
        };

        let member = self.members.add(&member).await?;
        tracing::info!(member_id = member.id, role = %member.role, "account created");

        Ok(member)
    }

    #[tracing::instrument(skip(self, form), fields(email = %form.email))]
    async fn sign_in(&self, form: LoginForm) -> Result<Member, AppError> {
        validate_form(&form)?;

        let member = self
            .members
            .find(&Filter::eq_ignore_case("email", &form.email))
            .await?
            .ok_or_else(|| {
                tracing::warn!("sign-in for unknown email");
                AppError::Unauthorized(INVALID_CREDENTIALS.into())
            })?;

        if !verify_password(&form.password, &member.password_hash)? {
            tracing::warn!(member_id = member.id, "sign-in with wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        tracing::info!(member_id = member.id, "signed in");
        Ok(member)
    }
}
