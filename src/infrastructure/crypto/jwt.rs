//! JWT Token handling
//!
//! Tokens carry one canonical subject field (`sub`) plus role and display
//! data. Lifetime depends on the role: faculty sessions are short, admin
//! sessions long. Verification is a pure function of token, secret and
//! clock; there is no refresh or revocation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Identity, Role};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Issuer claim
    pub issuer: String,
    /// Lifetime of faculty tokens
    pub faculty_ttl: Duration,
    /// Lifetime of admin tokens
    pub admin_ttl: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: "smartboard-booking".to_string(),
            faculty_ttl: Duration::hours(1),
            admin_ttl: Duration::hours(24),
        }
    }

    pub fn ttl_for(&self, role: Role) -> Duration {
        match role {
            Role::Faculty => self.faculty_ttl,
            Role::Admin => self.admin_ttl,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("faculty_ttl", &self.faculty_ttl)
            .field("admin_ttl", &self.admin_ttl)
            .finish()
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (identity id)
    pub sub: String,
    /// Display name
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn for_identity(identity: &Identity, config: &JwtConfig, now: DateTime<Utc>) -> Self {
        let role = identity.role();
        let exp = now + config.ttl_for(role);

        Self {
            sub: identity.subject_id().to_string(),
            name: identity.name().to_string(),
            role,
            branch: identity.branch().map(str::to_string),
            admin_id: identity.admin_id().map(str::to_string),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    /// Expired at or after the `exp` instant
    pub fn is_expired_at(&self, now_ts: i64) -> bool {
        now_ts >= self.exp
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Create a signed token for an identity
pub fn create_token(identity: &Identity, config: &JwtConfig) -> Result<String, TokenError> {
    create_token_at(identity, config, Utc::now())
}

pub fn create_token_at(
    identity: &Identity,
    config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let claims = TokenClaims::for_identity(identity, config, now);

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?)
}

/// Verify and decode a token against the current clock
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<TokenClaims, TokenError> {
    verify_token_at(token, config, Utc::now().timestamp())
}

/// Verify and decode a token against an explicit clock (Unix seconds)
pub fn verify_token_at(
    token: &str,
    config: &JwtConfig,
    now_ts: i64,
) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);
    // Expiry is checked below against the supplied clock, without leeway.
    validation.validate_exp = false;
    validation.leeway = 0;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    if token_data.claims.is_expired_at(now_ts) {
        return Err(TokenError::Expired);
    }

    Ok(token_data.claims)
}

/// Shared issuer/verifier bound to one process-wide configuration
#[derive(Debug, Clone)]
pub struct TokenService {
    config: Arc<JwtConfig>,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        create_token(identity, &self.config)
    }

    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, TokenError> {
        create_token_at(identity, &self.config, now)
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        verify_token(token, &self.config)
    }

    pub fn verify_at(&self, token: &str, now_ts: i64) -> Result<TokenClaims, TokenError> {
        verify_token_at(token, &self.config, now_ts)
    }

    /// Token lifetime for a role, in seconds
    pub fn expires_in(&self, role: Role) -> i64 {
        self.config.ttl_for(role).num_seconds()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Admin, User};

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret")
    }

    fn faculty() -> Identity {
        Identity::User(User {
            id: "user-1".into(),
            name: "Grace Hopper".into(),
            email: "grace@campus.edu".into(),
            password_hash: "x".into(),
            branch: "CSE".into(),
            phone: None,
            role: Role::Faculty,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    fn admin() -> Identity {
        Identity::Admin(Admin {
            id: "admin-1".into(),
            admin_id: "A001".into(),
            name: "Registrar".into(),
            position: "Head".into(),
            branch: "ADMIN".into(),
            email: "admin@campus.edu".into(),
            phone: "555".into(),
            password_hash: "x".into(),
            is_active: true,
            created_at: Utc::now(),
        })
    }

    #[test]
    fn faculty_token_roundtrip() {
        let cfg = config();
        let token = create_token(&faculty(), &cfg).unwrap();
        let claims = verify_token(&token, &cfg).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, Role::Faculty);
        assert_eq!(claims.branch.as_deref(), Some("CSE"));
        assert_eq!(claims.admin_id, None);
        assert!(!claims.is_admin());
    }

    #[test]
    fn faculty_token_lives_one_hour() {
        let cfg = config();
        let now = Utc::now();
        let token = create_token_at(&faculty(), &cfg, now).unwrap();
        let expiry = (now + Duration::hours(1)).timestamp();

        assert!(verify_token_at(&token, &cfg, expiry - 1).is_ok());
        assert!(matches!(
            verify_token_at(&token, &cfg, expiry),
            Err(TokenError::Expired)
        ));
        assert!(matches!(
            verify_token_at(&token, &cfg, expiry + 1),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn admin_token_lives_24_hours() {
        let cfg = config();
        let now = Utc::now();
        let token = create_token_at(&admin(), &cfg, now).unwrap();
        let claims = verify_token_at(&token, &cfg, now.timestamp()).unwrap();
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert_eq!(claims.admin_id.as_deref(), Some("A001"));
        assert!(claims.is_admin());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token(&faculty(), &config()).unwrap();
        let other = JwtConfig::new("another-secret");
        assert!(matches!(
            verify_token(&token, &other),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let cfg = config();
        let token = create_token(&faculty(), &cfg).unwrap();
        let mut other = config();
        other.issuer = "someone-else".into();
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(verify_token("not.a.jwt", &config()).is_err());
        assert!(verify_token("", &config()).is_err());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let cfg = config();
        let token = create_token(&faculty(), &cfg).unwrap();
        let forged_admin = create_token(&admin(), &JwtConfig::new("attacker")).unwrap();
        let forged_payload = forged_admin.split('.').nth(1).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
        assert!(verify_token(&tampered, &cfg).is_err());
    }

    #[test]
    fn service_reports_lifetime_by_role() {
        let tokens = TokenService::new(config());
        assert_eq!(tokens.expires_in(Role::Faculty), 3600);
        assert_eq!(tokens.expires_in(Role::Admin), 86_400);

        let now = Utc::now();
        let token = tokens.issue_at(&faculty(), now).unwrap();
        assert_eq!(tokens.verify_at(&token, now.timestamp()).unwrap().sub, "user-1");
    }
}
