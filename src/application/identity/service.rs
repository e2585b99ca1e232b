//! Authentication service
//!
//! Login checks the admin table first, then faculty users. Registration
//! is only open to emails on the faculty roster.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::{
    Admin, AdminUpdate, DomainError, DomainResult, Identity, NewAdmin, NewUser,
    RepositoryProvider, Role, User,
};
use crate::infrastructure::crypto::jwt::TokenService;
use crate::infrastructure::crypto::password::{hash_password_with_cost, verify_password as bcrypt_verify};
use crate::shared::{non_blank, normalize_email, with_timeout, DEFAULT_STORAGE_TIMEOUT};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Authentication result returned after a successful login or registration
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub identity: Identity,
}

/// Administrator details with a plaintext password, hashed on creation.
/// Also the shape of the account seeded at startup.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub admin_id: String,
    pub name: String,
    pub position: String,
    pub branch: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Check a candidate password against the identity's stored hash.
///
/// A stored value that is not a valid bcrypt hash never matches.
pub fn verify_password(identity: &Identity, candidate: &str) -> bool {
    match bcrypt_verify(candidate, identity.password_hash()) {
        Ok(matches) => matches,
        Err(e) => {
            warn!(subject = %identity.subject_id(), error = %e, "Stored password hash is unusable");
            false
        }
    }
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    tokens: TokenService,
    bcrypt_cost: u32,
    storage_timeout: Duration,
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, tokens: TokenService) -> Self {
        Self {
            repos,
            tokens,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn with_storage_timeout(mut self, limit: Duration) -> Self {
        self.storage_timeout = limit;
        self
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a role-scoped token.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(
                "Email and password are required".into(),
            ));
        }

        let credentials = self.repos.credentials();

        let admin = with_timeout(
            self.storage_timeout,
            "credentials.find_admin_by_email",
            credentials.find_admin_by_email(&email),
        )
        .await?;

        let identity = match admin {
            Some(admin) => Identity::Admin(admin),
            None => {
                let user = with_timeout(
                    self.storage_timeout,
                    "credentials.find_user_by_email",
                    credentials.find_user_by_email(&email),
                )
                .await?;
                match user {
                    Some(user) => Identity::User(user),
                    None => return Err(self.reject(&email, "unknown email")),
                }
            }
        };

        if !identity.is_active() {
            return Err(self.reject(&email, "account disabled"));
        }
        if !verify_password(&identity, password) {
            return Err(self.reject(&email, "wrong password"));
        }

        if let Identity::User(user) = &identity {
            with_timeout(
                self.storage_timeout,
                "credentials.touch_last_login",
                credentials.touch_last_login(&user.id),
            )
            .await?;
        }

        info!(user_id = %identity.subject_id(), role = %identity.role(), "Login succeeded");
        self.issue(identity)
    }

    // ── Registration ────────────────────────────────────────────

    /// First-time registration of a rostered faculty member.
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(DomainError::Validation("Email is required".into()));
        }

        let credentials = self.repos.credentials();

        let faculty = with_timeout(
            self.storage_timeout,
            "credentials.find_faculty_by_email",
            credentials.find_faculty_by_email(&email),
        )
        .await?
        .ok_or_else(|| DomainError::NotEligible("Faculty not found in records".into()))?;

        let existing = with_timeout(
            self.storage_timeout,
            "credentials.find_user_by_email",
            credentials.find_user_by_email(&email),
        )
        .await?;
        if existing.is_some() {
            return Err(DomainError::AlreadyRegistered(email));
        }

        let password_hash = self.hash_secret(password)?;

        let user = with_timeout(
            self.storage_timeout,
            "credentials.create_user",
            credentials.create_user(NewUser {
                name: faculty.name,
                email,
                password_hash,
                branch: faculty.branch.to_uppercase(),
                phone: non_blank(faculty.phone.as_deref()).map(str::to_string),
                role: Role::Faculty,
            }),
        )
        .await?;

        info!(user_id = %user.id, branch = %user.branch, "Faculty member registered");
        self.issue(Identity::User(user))
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Current identity behind a verified token subject.
    ///
    /// Admin tokens resolve against the admins table first. A users row
    /// carrying the admin role is found through the fallback.
    pub async fn profile(&self, subject_id: &str, role: Role) -> DomainResult<Identity> {
        let credentials = self.repos.credentials();

        if role == Role::Admin {
            let admin = with_timeout(
                self.storage_timeout,
                "credentials.find_admin_by_id",
                credentials.find_admin_by_id(subject_id),
            )
            .await?;
            if let Some(admin) = admin {
                return Ok(Identity::Admin(admin));
            }
        }

        with_timeout(
            self.storage_timeout,
            "credentials.find_user_by_id",
            credentials.find_user_by_id(subject_id),
        )
        .await?
        .map(Identity::User)
        .ok_or_else(|| DomainError::not_found("User", "id", subject_id))
    }

    /// Create `admin` unless an administrator already exists.
    pub async fn seed_default_admin(&self, admin: &AdminAccount) -> DomainResult<Option<Admin>> {
        let existing = with_timeout(
            self.storage_timeout,
            "credentials.count_admins",
            self.repos.credentials().count_admins(),
        )
        .await?;
        if existing > 0 {
            return Ok(None);
        }

        let created = self.create_admin(admin).await?;
        info!(admin_id = %created.admin_id, email = %created.email, "Default admin created");
        Ok(Some(created))
    }

    // ── Admin accounts ──────────────────────────────────────────

    pub async fn list_admins(&self) -> DomainResult<Vec<Admin>> {
        with_timeout(
            self.storage_timeout,
            "credentials.list_active_admins",
            self.repos.credentials().list_active_admins(),
        )
        .await
    }

    pub async fn get_admin(&self, id: &str) -> DomainResult<Admin> {
        with_timeout(
            self.storage_timeout,
            "credentials.find_admin_by_id",
            self.repos.credentials().find_admin_by_id(id),
        )
        .await?
        .ok_or_else(|| DomainError::not_found("Admin", "id", id))
    }

    pub async fn create_admin(&self, admin: &AdminAccount) -> DomainResult<Admin> {
        let email = normalize_email(&admin.email);
        if email.is_empty() {
            return Err(DomainError::Validation("Email is required".into()));
        }
        let password_hash = self.hash_secret(&admin.password)?;

        let created = with_timeout(
            self.storage_timeout,
            "credentials.create_admin",
            self.repos.credentials().create_admin(NewAdmin {
                admin_id: admin.admin_id.clone(),
                name: admin.name.clone(),
                position: admin.position.clone(),
                branch: admin.branch.clone(),
                email,
                phone: admin.phone.clone(),
                password_hash,
            }),
        )
        .await?;

        info!(admin_id = %created.admin_id, "Admin account created");
        Ok(created)
    }

    /// Apply `update`; a `new_password` is hashed into it first.
    pub async fn update_admin(
        &self,
        id: &str,
        mut update: AdminUpdate,
        new_password: Option<&str>,
    ) -> DomainResult<Admin> {
        if let Some(email) = update.email.as_deref() {
            let email = normalize_email(email);
            if email.is_empty() {
                return Err(DomainError::Validation("Email must not be blank".into()));
            }
            update.email = Some(email);
        }
        if let Some(password) = new_password {
            update.password_hash = Some(self.hash_secret(password)?);
        }

        let updated = with_timeout(
            self.storage_timeout,
            "credentials.update_admin",
            self.repos.credentials().update_admin(id, update),
        )
        .await?;

        info!(admin_id = %updated.admin_id, "Admin account updated");
        Ok(updated)
    }

    /// Soft delete: the row stays but login is refused from now on.
    pub async fn deactivate_admin(&self, id: &str, acting_subject: &str) -> DomainResult<Admin> {
        if id == acting_subject {
            return Err(DomainError::Validation(
                "Admins cannot deactivate their own account".into(),
            ));
        }

        let admin = with_timeout(
            self.storage_timeout,
            "credentials.set_admin_active",
            self.repos.credentials().set_admin_active(id, false),
        )
        .await?;

        info!(admin_id = %admin.admin_id, "Admin account deactivated");
        Ok(admin)
    }

    /// Replace a registered user's password on their behalf.
    pub async fn reset_user_password(&self, email: &str, new_password: &str) -> DomainResult<User> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(DomainError::Validation("Email is required".into()));
        }
        let password_hash = self.hash_secret(new_password)?;

        let credentials = self.repos.credentials();
        let user = with_timeout(
            self.storage_timeout,
            "credentials.find_user_by_email",
            credentials.find_user_by_email(&email),
        )
        .await?
        .ok_or_else(|| DomainError::not_found("User", "email", email.as_str()))?;

        with_timeout(
            self.storage_timeout,
            "credentials.set_user_password",
            credentials.set_user_password(&user.id, password_hash),
        )
        .await?;

        info!(user_id = %user.id, "Password reset by admin");
        Ok(user)
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// Enforce the minimum length, then bcrypt at the configured cost.
    fn hash_secret(&self, password: &str) -> DomainResult<String> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        hash_password_with_cost(password, self.bcrypt_cost)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))
    }

    fn issue(&self, identity: Identity) -> DomainResult<AuthResult> {
        let token = self
            .tokens
            .issue(&identity)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.tokens.expires_in(identity.role()),
            identity,
        })
    }

    fn reject(&self, email: &str, reason: &'static str) -> DomainError {
        metrics::counter!("auth_failures_total").increment(1);
        warn!(email = %email, reason, "Login rejected");
        DomainError::InvalidCredentials
    }
}

// ── Tests ──────────────────────────────────────────────────────
