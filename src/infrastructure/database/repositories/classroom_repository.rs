//! SeaORM implementation of ClassroomRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, is_unique_violation};
use crate::domain::{Classroom, ClassroomRepository, DomainError, DomainResult, NewClassroom};
use crate::infrastructure::database::entities::classroom;

pub struct SeaOrmClassroomRepository {
    db: DatabaseConnection,
}

impl SeaOrmClassroomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: classroom::Model) -> DomainResult<Classroom> {
    let smartboards = serde_json::from_str(&m.smartboards).map_err(|e| {
        DomainError::Storage(format!("Corrupt smartboards for classroom {}: {}", m.id, e))
    })?;

    Ok(Classroom {
        id: m.id,
        branch: m.branch,
        name: m.name,
        smartboards,
    })
}

#[async_trait]
impl ClassroomRepository for SeaOrmClassroomRepository {
    async fn list(&self) -> DomainResult<Vec<Classroom>> {
        let models = classroom::Entity::find()
            .order_by_asc(classroom::Column::Branch)
            .order_by_asc(classroom::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn list_by_branch(&self, branch: &str) -> DomainResult<Vec<Classroom>> {
        let models = classroom::Entity::find()
            .filter(classroom::Column::Branch.eq(branch))
            .order_by_asc(classroom::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn create(&self, new: NewClassroom) -> DomainResult<Classroom> {
        let smartboards = serde_json::to_string(&new.smartboards)
            .map_err(|e| DomainError::Validation(format!("Invalid smartboards: {}", e)))?;

        let model = classroom::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            branch: Set(new.branch.clone()),
            name: Set(new.name.clone()),
            smartboards: Set(smartboards),
            created_at: Set(Utc::now()),
        };

        match model.insert(&self.db).await {
            Ok(inserted) => model_to_domain(inserted),
            Err(e) if is_unique_violation(&e) => Err(DomainError::Conflict(format!(
                "Classroom {} already exists in branch {}",
                new.name, new.branch
            ))),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<Classroom> {
        let existing = classroom::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Classroom", "id", id))?;

        classroom::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        model_to_domain(existing)
    }

    async fn count(&self) -> DomainResult<u64> {
        classroom::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
