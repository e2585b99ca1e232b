//! Authentication middleware for Axum
//!
//! `require_auth` verifies the bearer token and, when the gate names
//! roles, checks the caller holds one of them. It fails closed: any
//! verification error rejects the request.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::domain::Role;
use crate::infrastructure::crypto::jwt::{TokenClaims, TokenService};
use crate::interfaces::http::common::ApiError;

/// Authentication error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    BadTokenFormat,
    InvalidToken,
    InsufficientPermissions,
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken => ApiError::unauthorized("NO_TOKEN", "No token provided"),
            AuthError::BadTokenFormat => {
                ApiError::unauthorized("BAD_TOKEN_FORMAT", "Expected 'Authorization: Bearer <token>'")
            }
            AuthError::InvalidToken => {
                ApiError::unauthorized("INVALID_OR_EXPIRED_TOKEN", "Invalid or expired token")
            }
            AuthError::InsufficientPermissions => {
                ApiError::forbidden("Access denied: insufficient role")
            }
        }
    }
}

/// Gate state: the verifier plus the roles allowed through.
///
/// An empty role set admits any authenticated caller.
#[derive(Clone)]
pub struct AuthGate {
    tokens: TokenService,
    required: Arc<[Role]>,
}

impl AuthGate {
    /// Admit any caller holding a valid token
    pub fn any(tokens: TokenService) -> Self {
        Self {
            tokens,
            required: Arc::from(Vec::new()),
        }
    }

    /// Admit only callers whose role is in `roles`
    pub fn roles(tokens: TokenService, roles: &[Role]) -> Self {
        Self {
            tokens,
            required: Arc::from(roles.to_vec()),
        }
    }

    /// Decide on a raw `Authorization` header value.
    pub fn authorize(&self, auth_header: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
        let auth_header = auth_header.ok_or(AuthError::MissingToken)?;
        let token = extract_token(auth_header).ok_or(AuthError::BadTokenFormat)?;

        let claims = self.tokens.verify(token).map_err(|e| {
            debug!(error = %e, "Token rejected");
            AuthError::InvalidToken
        })?;

        if !self.required.is_empty() && !self.required.contains(&claims.role) {
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(AuthenticatedUser::from_claims(claims))
    }
}

/// Caller identity attached to the request by `require_auth`
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    pub branch: Option<String>,
    pub admin_id: Option<String>,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            role: claims.role,
            branch: claims.branch,
            admin_id: claims.admin_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT authentication middleware
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let header_value = request.headers().get(header::AUTHORIZATION);
    let decision = match header_value {
        None => Err(AuthError::MissingToken),
        Some(value) => match value.to_str() {
            Ok(raw) => gate.authorize(Some(raw)),
            Err(_) => Err(AuthError::BadTokenFormat),
        },
    };

    match decision {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            if e != AuthError::MissingToken {
                metrics::counter!("auth_failures_total").increment(1);
            }
            ApiError::from(e).into_response()
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{middleware, Extension, Router};
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    use crate::domain::{Admin, Identity, User};
    use crate::infrastructure::crypto::jwt::JwtConfig;

    fn tokens() -> TokenService {
        TokenService::new(JwtConfig::new("gate-secret"))
    }

    fn faculty() -> Identity {
        Identity::User(User {
            id: "user-1".into(),
            name: "Ada".into(),
            email: "ada@campus.edu".into(),
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

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        user.user_id
    }

    fn app(gate: AuthGate) -> Router {
        Router::new()
            .route("/guarded", get(whoami))
            .route_layer(middleware::from_fn_with_state(gate, require_auth))
    }

    async fn call(gate: AuthGate, auth: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().uri("/guarded");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let resp = app(gate)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn missing_header_is_no_token() {
        let (status, body) = call(AuthGate::any(tokens()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "NO_TOKEN");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn non_bearer_header_is_bad_format() {
        let token = tokens().issue(&faculty()).unwrap();
        for header in [token.as_str(), "Basic abc", "Bearer ", "Bearer    "] {
            let (status, body) = call(AuthGate::any(tokens()), Some(header)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{header}");
            assert_eq!(body["code"], "BAD_TOKEN_FORMAT", "{header}");
        }
    }

    #[tokio::test]
    async fn forged_or_expired_token_is_rejected() {
        let forged = TokenService::new(JwtConfig::new("other")).issue(&faculty()).unwrap();
        let (status, body) =
            call(AuthGate::any(tokens()), Some(&format!("Bearer {forged}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_OR_EXPIRED_TOKEN");

        let stale = tokens()
            .issue_at(&faculty(), Utc::now() - Duration::hours(2))
            .unwrap();
        let (status, body) = call(AuthGate::any(tokens()), Some(&format!("Bearer {stale}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_OR_EXPIRED_TOKEN");
    }

    #[tokio::test]
    async fn valid_token_reaches_handler_with_identity() {
        let token = tokens().issue(&faculty()).unwrap();
        let resp = app(AuthGate::any(tokens()))
            .oneshot(
                Request::builder()
                    .uri("/guarded")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"user-1");
    }

    #[tokio::test]
    async fn role_gate_admits_only_listed_roles() {
        let gate = AuthGate::roles(tokens(), &[Role::Admin]);

        let faculty_token = tokens().issue(&faculty()).unwrap();
        let (status, body) = call(gate.clone(), Some(&format!("Bearer {faculty_token}"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");

        let admin_token = tokens().issue(&admin()).unwrap();
        let (status, _) = call(gate, Some(&format!("Bearer {admin_token}"))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn authorize_exposes_claims() {
        let gate = AuthGate::any(tokens());
        let token = tokens().issue(&admin()).unwrap();
        let user = gate.authorize(Some(&format!("Bearer {token}"))).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.admin_id.as_deref(), Some("A001"));
    }
}
