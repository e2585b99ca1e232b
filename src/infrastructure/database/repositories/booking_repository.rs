//! SeaORM implementation of BookingRepository
//!
//! Slot exclusivity is delegated to the `ux_bookings_slot` unique index.
//! `create` never checks before inserting; it translates the index
//! violation into `SlotTaken`.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use super::{db_err, is_unique_violation};
use crate::domain::{Booking, BookingRepository, DomainError, DomainResult, NewBooking, TimeSlot};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let time_slot = m
        .time_slot
        .parse::<TimeSlot>()
        .map_err(|_| DomainError::Storage(format!("Corrupt time slot in booking {}", m.id)))?;

    Ok(Booking {
        id: m.id,
        date: m.date,
        classroom: m.classroom,
        time_slot,
        owner_user_id: m.owner_user_id,
        created_at: m.created_at,
    })
}

fn models_to_domain(models: Vec<booking::Model>) -> DomainResult<Vec<Booking>> {
    models.into_iter().map(model_to_domain).collect()
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, new: NewBooking) -> DomainResult<Booking> {
        let id = uuid::Uuid::new_v4().to_string();
        debug!(booking_id = %id, classroom = %new.classroom, date = %new.date, slot = %new.time_slot, "Inserting booking");

        let model = booking::ActiveModel {
            id: Set(id.clone()),
            date: Set(new.date),
            classroom: Set(new.classroom.clone()),
            time_slot: Set(new.time_slot.as_str().to_string()),
            owner_user_id: Set(new.owner_user_id.clone()),
            created_at: Set(Utc::now()),
        };

        match model.insert(&self.db).await {
            Ok(inserted) => model_to_domain(inserted),
            Err(e) if is_unique_violation(&e) => Err(new.slot_taken()),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn find_slot(
        &self,
        classroom: &str,
        date: NaiveDate,
        time_slot: TimeSlot,
    ) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::Classroom.eq(classroom))
            .filter(booking::Column::Date.eq(date))
            .filter(booking::Column::TimeSlot.eq(time_slot.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn list_by_owner(&self, owner_user_id: &str) -> DomainResult<Vec<Booking>> {
        // Slot strings are zero-padded, so lexical order is chronological.
        let models = booking::Entity::find()
            .filter(booking::Column::OwnerUserId.eq(owner_user_id))
            .order_by_asc(booking::Column::Date)
            .order_by_asc(booking::Column::TimeSlot)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }

    async fn booked_slots(&self, classroom: &str, date: NaiveDate) -> DomainResult<Vec<TimeSlot>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Classroom.eq(classroom))
            .filter(booking::Column::Date.eq(date))
            .order_by_asc(booking::Column::TimeSlot)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models_to_domain(models)?
            .into_iter()
            .map(|b| b.time_slot)
            .collect())
    }

    async fn list_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::Date)
            .order_by_asc(booking::Column::TimeSlot)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = booking::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Booking", "id", id));
        }
        debug!(booking_id = %id, "Booking deleted");
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        booking::Entity::find().count(&self.db).await.map_err(db_err)
    }
}

// ── Tests ──────────────────────────────────────────────────────
