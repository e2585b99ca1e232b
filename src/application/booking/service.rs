//! Booking service
//!
//! A create request moves through: validate → pre-check → atomic insert.
//! The pre-check only produces the friendly error early; the ledger's
//! atomic insert is what decides a race. Nothing here retries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::{
    normalize_booking_date, Booking, DomainError, DomainResult, NewBooking, RepositoryProvider,
    Role, TimeSlot,
};
use crate::shared::{non_blank, with_timeout, DEFAULT_STORAGE_TIMEOUT};

/// Booking joined with its owner's display data (admin listing)
#[derive(Debug, Clone)]
pub struct BookingWithOwner {
    pub booking: Booking,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    storage_timeout: Duration,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_storage_timeout(mut self, limit: Duration) -> Self {
        self.storage_timeout = limit;
        self
    }

    /// Reserve `(classroom, date, time)` for `owner_user_id`.
    ///
    /// Fails with `Validation` / `InvalidSlot` on bad input and with
    /// `SlotTaken` when the slot is already held, whether that is seen by
    /// the pre-check or by the insert itself.
    pub async fn create(
        &self,
        owner_user_id: &str,
        date: Option<&str>,
        classroom: Option<&str>,
        time: Option<&str>,
    ) -> DomainResult<Booking> {
        let new = NewBooking::parse(date, classroom, time, owner_user_id)?;

        let existing = with_timeout(
            self.storage_timeout,
            "bookings.find_slot",
            self.repos
                .bookings()
                .find_slot(&new.classroom, new.date, new.time_slot),
        )
        .await?;

        if existing.is_some() {
            metrics::counter!("bookings_slot_taken_total").increment(1);
            debug!(classroom = %new.classroom, date = %new.date, slot = %new.time_slot, "Slot rejected by pre-check");
            return Err(new.slot_taken());
        }

        let result = with_timeout(
            self.storage_timeout,
            "bookings.create",
            self.repos.bookings().create(new),
        )
        .await;

        match &result {
            Ok(booking) => {
                metrics::counter!("bookings_created_total").increment(1);
                info!(
                    booking_id = %booking.id,
                    user_id = %booking.owner_user_id,
                    classroom = %booking.classroom,
                    date = %booking.date,
                    slot = %booking.time_slot,
                    "Booking created"
                );
            }
            Err(DomainError::SlotTaken { .. }) => {
                metrics::counter!("bookings_slot_taken_total").increment(1);
            }
            Err(_) => {}
        }
        result
    }

    /// The caller's own bookings, chronological
    pub async fn list_mine(&self, user_id: &str) -> DomainResult<Vec<Booking>> {
        with_timeout(
            self.storage_timeout,
            "bookings.list_by_owner",
            self.repos.bookings().list_by_owner(user_id),
        )
        .await
    }

    /// Occupied slots of one classroom on one day
    pub async fn availability(
        &self,
        date: Option<&str>,
        classroom: Option<&str>,
    ) -> DomainResult<Vec<TimeSlot>> {
        let (Some(date), Some(classroom)) = (non_blank(date), non_blank(classroom)) else {
            return Err(DomainError::Validation(
                "Date and classroom are required".into(),
            ));
        };
        let date = normalize_booking_date(date)?;

        with_timeout(
            self.storage_timeout,
            "bookings.booked_slots",
            self.repos.bookings().booked_slots(classroom, date),
        )
        .await
    }

    /// Cancel a booking. Only its owner or an admin may do so.
    pub async fn delete(&self, id: &str, user_id: &str, role: Role) -> DomainResult<Booking> {
        let booking = with_timeout(
            self.storage_timeout,
            "bookings.find_by_id",
            self.repos.bookings().find_by_id(id),
        )
        .await?
        .ok_or_else(|| DomainError::not_found("Booking", "id", id))?;

        if !booking.is_owned_by(user_id) && role != Role::Admin {
            return Err(DomainError::Forbidden(
                "Only the owner or an admin can cancel this booking".into(),
            ));
        }

        with_timeout(
            self.storage_timeout,
            "bookings.delete",
            self.repos.bookings().delete(id),
        )
        .await?;

        info!(booking_id = %id, user_id = %user_id, "Booking cancelled");
        Ok(booking)
    }

    /// Every booking with owner name and email resolved
    pub async fn list_all(&self) -> DomainResult<Vec<BookingWithOwner>> {
        let bookings = with_timeout(
            self.storage_timeout,
            "bookings.list_all",
            self.repos.bookings().list_all(),
        )
        .await?;

        let mut owners: HashMap<String, Option<(String, String)>> = HashMap::new();
        let mut result = Vec::with_capacity(bookings.len());

        for booking in bookings {
            if !owners.contains_key(&booking.owner_user_id) {
                let owner = self.resolve_owner(&booking.owner_user_id).await?;
                owners.insert(booking.owner_user_id.clone(), owner);
            }
            let owner = owners.get(&booking.owner_user_id).cloned().flatten();

            result.push(BookingWithOwner {
                owner_name: owner.as_ref().map(|(name, _)| name.clone()),
                owner_email: owner.map(|(_, email)| email),
                booking,
            });
        }

        Ok(result)
    }

    pub async fn count(&self) -> DomainResult<u64> {
        with_timeout(
            self.storage_timeout,
            "bookings.count",
            self.repos.bookings().count(),
        )
        .await
    }

    async fn resolve_owner(&self, owner_id: &str) -> DomainResult<Option<(String, String)>> {
        let credentials = self.repos.credentials();

        let user = with_timeout(
            self.storage_timeout,
            "credentials.find_user_by_id",
            credentials.find_user_by_id(owner_id),
        )
        .await?;
        if let Some(user) = user {
            return Ok(Some((user.name, user.email)));
        }

        let admin = with_timeout(
            self.storage_timeout,
            "credentials.find_admin_by_id",
            credentials.find_admin_by_id(owner_id),
        )
        .await?;
        Ok(admin.map(|a| (a.name, a.email)))
    }
}

// ── Tests ──────────────────────────────────────────────────────
