use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::errors::DomainError;

/// Role carried by every identity and every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Faculty,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Faculty => "faculty",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "faculty" => Ok(Self::Faculty),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

/// Faculty-derived user created at registration
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub branch: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Seeded administrator. Never hard-deleted; `is_active` gates login.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: String,
    pub admin_id: String,
    pub name: String,
    pub position: String,
    pub branch: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Pre-provisioned faculty roster entry. Only emails on the roster may register.
#[derive(Debug, Clone)]
pub struct FacultyRecord {
    pub id: String,
    pub faculty_id: String,
    pub name: String,
    pub branch: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub branch: String,
    pub phone: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub admin_id: String,
    pub name: String,
    pub position: String,
    pub branch: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}

/// Partial update of an admin account; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct AdminUpdate {
    pub name: Option<String>,
    pub position: Option<String>,
    pub branch: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
}

impl AdminUpdate {
    pub fn apply(self, admin: &mut Admin) {
        if let Some(name) = self.name {
            admin.name = name;
        }
        if let Some(position) = self.position {
            admin.position = position;
        }
        if let Some(branch) = self.branch {
            admin.branch = branch;
        }
        if let Some(email) = self.email {
            admin.email = email;
        }
        if let Some(phone) = self.phone {
            admin.phone = phone;
        }
        if let Some(hash) = self.password_hash {
            admin.password_hash = hash;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewFaculty {
    pub faculty_id: String,
    pub name: String,
    pub branch: String,
    pub email: String,
    pub phone: Option<String>,
}

/// An authenticated principal, either a faculty-derived user or an admin.
#[derive(Debug, Clone)]
pub enum Identity {
    User(User),
    Admin(Admin),
}

impl Identity {
    /// Canonical subject id written into the token `sub` claim.
    pub fn subject_id(&self) -> &str {
        match self {
            Self::User(u) => &u.id,
            Self::Admin(a) => &a.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::User(u) => &u.name,
            Self::Admin(a) => &a.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::User(u) => &u.email,
            Self::Admin(a) => &a.email,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::User(u) => u.role,
            Self::Admin(_) => Role::Admin,
        }
    }

    pub fn branch(&self) -> Option<&str> {
        match self {
            Self::User(u) => Some(u.branch.as_str()),
            Self::Admin(a) => Some(a.branch.as_str()).filter(|b| !b.is_empty()),
        }
    }

    pub fn admin_id(&self) -> Option<&str> {
        match self {
            Self::User(_) => None,
            Self::Admin(a) => Some(a.admin_id.as_str()),
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            Self::User(u) => &u.password_hash,
            Self::Admin(a) => &a.password_hash,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::User(u) => u.is_active,
            Self::Admin(a) => a.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Admin {
        Admin {
            id: "adm-1".into(),
            admin_id: "A001".into(),
            name: "Registrar".into(),
            position: "Head".into(),
            branch: String::new(),
            email: "admin@campus.edu".into(),
            phone: "555".into(),
            password_hash: "hash".into(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_roundtrips_through_str() {
        assert_eq!("faculty".parse::<Role>().unwrap(), Role::Faculty);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn admin_identity_is_always_admin_role() {
        let identity = Identity::Admin(admin());
        assert_eq!(identity.role(), Role::Admin);
        assert_eq!(identity.subject_id(), "adm-1");
        assert_eq!(identity.admin_id(), Some("A001"));
        assert_eq!(identity.branch(), None);
    }
}
