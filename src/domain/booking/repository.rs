//! Booking ledger interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Booking, NewBooking, TimeSlot};
use crate::domain::DomainResult;

/// The authoritative store of bookings.
///
/// Implementations guarantee at most one booking per
/// `(classroom, date, time_slot)`: `create` must reject a second insert for
/// the same key atomically with `DomainError::SlotTaken`, independently of
/// any earlier `find_slot` check.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Atomically insert a booking, or fail with `SlotTaken`
    async fn create(&self, booking: NewBooking) -> DomainResult<Booking>;

    /// Booking occupying the given slot, if any
    async fn find_slot(
        &self,
        classroom: &str,
        date: NaiveDate,
        time_slot: TimeSlot,
    ) -> DomainResult<Option<Booking>>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// Bookings of one owner, sorted by (date, slot) ascending
    async fn list_by_owner(&self, owner_user_id: &str) -> DomainResult<Vec<Booking>>;

    /// Occupied slots of a classroom on a day, in chronological order
    async fn booked_slots(&self, classroom: &str, date: NaiveDate) -> DomainResult<Vec<TimeSlot>>;

    /// Every booking, newest date first, slots ascending within a day
    async fn list_all(&self) -> DomainResult<Vec<Booking>>;

    /// Hard delete. Fails with `NotFound` when the id is unknown.
    async fn delete(&self, id: &str) -> DomainResult<()>;

    async fn count(&self) -> DomainResult<u64>;
}
