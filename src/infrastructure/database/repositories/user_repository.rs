use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;

use super::{db_err, is_unique_violation};
use crate::domain::{
    Admin, AdminUpdate, CredentialStore, DomainError, DomainResult, FacultyRecord, NewAdmin,
    NewFaculty, NewUser, Role, User,
};
use crate::infrastructure::database::entities::{admin, faculty, user};

/// Users, admins and the faculty roster in one store
pub struct SeaOrmCredentialStore {
    db: DatabaseConnection,
}

impl SeaOrmCredentialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> Role {
    match role {
        user::UserRole::Faculty => Role::Faculty,
        user::UserRole::Admin => Role::Admin,
    }
}

fn domain_role_to_entity(role: Role) -> user::UserRole {
    match role {
        Role::Faculty => user::UserRole::Faculty,
        Role::Admin => user::UserRole::Admin,
    }
}

fn user_model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        name: m.name,
        email: m.email,
        password_hash: m.password_hash,
        branch: m.branch,
        phone: m.phone,
        role: entity_role_to_domain(m.role),
        is_active: m.is_active,
        last_login_at: m.last_login_at,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn admin_model_to_domain(m: admin::Model) -> Admin {
    Admin {
        id: m.id,
        admin_id: m.admin_id,
        name: m.name,
        position: m.position,
        branch: m.branch,
        email: m.email,
        phone: m.phone,
        password_hash: m.password_hash,
        is_active: m.is_active,
        created_at: m.created_at,
    }
}

fn faculty_model_to_domain(m: faculty::Model) -> FacultyRecord {
    FacultyRecord {
        id: m.id,
        faculty_id: m.faculty_id,
        name: m.name,
        branch: m.branch,
        email: m.email,
        phone: m.phone,
    }
}

impl SeaOrmCredentialStore {
    async fn admin_model(&self, id: &str) -> DomainResult<admin::Model> {
        admin::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Admin", "id", id))
    }
}

// ── CredentialStore impl ────────────────────────────────────────

#[async_trait]
impl CredentialStore for SeaOrmCredentialStore {
    async fn find_admin_by_email(&self, email: &str) -> DomainResult<Option<Admin>> {
        let model = admin::Entity::find()
            .filter(admin::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(admin_model_to_domain))
    }

    async fn find_admin_by_id(&self, id: &str) -> DomainResult<Option<Admin>> {
        let model = admin::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(admin_model_to_domain))
    }

    async fn create_admin(&self, new: NewAdmin) -> DomainResult<Admin> {
        let model = admin::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            admin_id: Set(new.admin_id),
            name: Set(new.name),
            position: Set(new.position),
            branch: Set(new.branch),
            email: Set(new.email.clone()),
            phone: Set(new.phone),
            password_hash: Set(new.password_hash),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        };

        match model.insert(&self.db).await {
            Ok(inserted) => Ok(admin_model_to_domain(inserted)),
            Err(e) if is_unique_violation(&e) => {
                Err(DomainError::Conflict(format!("Admin {} already exists", new.email)))
            }
            Err(e) => Err(db_err(e)),
        }
    }

    async fn count_admins(&self) -> DomainResult<u64> {
        admin::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn list_active_admins(&self) -> DomainResult<Vec<Admin>> {
        let models = admin::Entity::find()
            .filter(admin::Column::IsActive.eq(true))
            .order_by_desc(admin::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(admin_model_to_domain).collect())
    }

    async fn update_admin(&self, id: &str, update: AdminUpdate) -> DomainResult<Admin> {
        let mut current = admin_model_to_domain(self.admin_model(id).await?);
        update.apply(&mut current);

        let model = admin::ActiveModel {
            id: Set(current.id),
            admin_id: Set(current.admin_id),
            name: Set(current.name),
            position: Set(current.position),
            branch: Set(current.branch),
            email: Set(current.email.clone()),
            phone: Set(current.phone),
            password_hash: Set(current.password_hash),
            is_active: Set(current.is_active),
            created_at: Set(current.created_at),
        };

        match model.update(&self.db).await {
            Ok(updated) => Ok(admin_model_to_domain(updated)),
            Err(e) if is_unique_violation(&e) => Err(DomainError::Conflict(format!(
                "Admin {} already exists",
                current.email
            ))),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn set_admin_active(&self, id: &str, active: bool) -> DomainResult<Admin> {
        let mut model: admin::ActiveModel = self.admin_model(id).await?.into();
        model.is_active = Set(active);
        let updated = model.update(&self.db).await.map_err(db_err)?;
        Ok(admin_model_to_domain(updated))
    }

    async fn find_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn find_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn create_user(&self, new: NewUser) -> DomainResult<User> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(new.name),
            email: Set(new.email.clone()),
            password_hash: Set(new.password_hash),
            branch: Set(new.branch),
            phone: Set(new.phone),
            role: Set(domain_role_to_entity(new.role)),
            is_active: Set(true),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match model.insert(&self.db).await {
            Ok(inserted) => {
                debug!(user_id = %inserted.id, "User created");
                Ok(user_model_to_domain(inserted))
            }
            Err(e) if is_unique_violation(&e) => Err(DomainError::AlreadyRegistered(new.email)),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn touch_last_login(&self, user_id: &str) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;

        let now = Utc::now();
        let mut active: user::ActiveModel = existing.into();
        active.last_login_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn set_user_password(&self, user_id: &str, password_hash: String) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;

        let mut active: user::ActiveModel = existing.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_faculty_by_email(&self, email: &str) -> DomainResult<Option<FacultyRecord>> {
        let model = faculty::Entity::find()
            .filter(faculty::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(faculty_model_to_domain))
    }

    async fn list_faculty(&self) -> DomainResult<Vec<FacultyRecord>> {
        let models = faculty::Entity::find()
            .order_by_asc(faculty::Column::Branch)
            .order_by_asc(faculty::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(faculty_model_to_domain).collect())
    }

    async fn create_faculty(&self, new: NewFaculty) -> DomainResult<FacultyRecord> {
        let model = faculty::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            faculty_id: Set(new.faculty_id),
            name: Set(new.name),
            branch: Set(new.branch),
            email: Set(new.email.clone()),
            phone: Set(new.phone),
            created_at: Set(Utc::now()),
        };

        match model.insert(&self.db).await {
            Ok(inserted) => Ok(faculty_model_to_domain(inserted)),
            Err(e) if is_unique_violation(&e) => Err(DomainError::Conflict(format!(
                "Faculty member {} already on the roster",
                new.email
            ))),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn count_faculty(&self) -> DomainResult<u64> {
        faculty::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn delete_faculty(&self, id: &str) -> DomainResult<FacultyRecord> {
        let existing = faculty::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Faculty", "id", id))?;

        faculty::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(faculty_model_to_domain(existing))
    }

    async fn faculty_branches(&self) -> DomainResult<Vec<String>> {
        faculty::Entity::find()
            .select_only()
            .column(faculty::Column::Branch)
            .distinct()
            .order_by_asc(faculty::Column::Branch)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Tests ──────────────────────────────────────────────────────
