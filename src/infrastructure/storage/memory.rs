//! In-memory storage implementation
//!
//! Bookings are keyed by their slot triple, so `DashMap::entry` gives the
//! same atomic per-key insert the SQLite unique index gives in production.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    Admin, AdminUpdate, Booking, BookingRepository, Classroom, ClassroomRepository, CredentialStore,
    DomainError, DomainResult, FacultyRecord, NewAdmin, NewBooking, NewClassroom, NewFaculty,
    NewUser, RepositoryProvider, TimeSlot, User,
};

type SlotKey = (String, NaiveDate, TimeSlot);

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ── Bookings ───────────────────────────────────────────────────

/// In-memory booking ledger for development and testing
#[derive(Default)]
pub struct InMemoryBookingRepository {
    by_slot: DashMap<SlotKey, Booking>,
    slot_of: DashMap<String, SlotKey>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect<F>(&self, keep: F) -> Vec<Booking>
    where
        F: Fn(&Booking) -> bool,
    {
        self.by_slot
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, new: NewBooking) -> DomainResult<Booking> {
        let key = (new.classroom.clone(), new.date, new.time_slot);

        match self.by_slot.entry(key.clone()) {
            Entry::Occupied(_) => Err(new.slot_taken()),
            Entry::Vacant(vacant) => {
                let booking = new.into_booking(new_id(), Utc::now());
                self.slot_of.insert(booking.id.clone(), key);
                vacant.insert(booking.clone());
                Ok(booking)
            }
        }
    }

    async fn find_slot(
        &self,
        classroom: &str,
        date: NaiveDate,
        time_slot: TimeSlot,
    ) -> DomainResult<Option<Booking>> {
        let key = (classroom.to_string(), date, time_slot);
        Ok(self.by_slot.get(&key).map(|b| b.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let Some(key) = self.slot_of.get(id).map(|k| k.value().clone()) else {
            return Ok(None);
        };
        Ok(self.by_slot.get(&key).map(|b| b.value().clone()))
    }

    async fn list_by_owner(&self, owner_user_id: &str) -> DomainResult<Vec<Booking>> {
        let mut bookings = self.collect(|b| b.is_owned_by(owner_user_id));
        bookings.sort_by(|a, b| (a.date, a.time_slot).cmp(&(b.date, b.time_slot)));
        Ok(bookings)
    }

    async fn booked_slots(&self, classroom: &str, date: NaiveDate) -> DomainResult<Vec<TimeSlot>> {
        let mut slots: Vec<TimeSlot> = self
            .collect(|b| b.classroom == classroom && b.date == date)
            .into_iter()
            .map(|b| b.time_slot)
            .collect();
        slots.sort();
        Ok(slots)
    }

    async fn list_all(&self) -> DomainResult<Vec<Booking>> {
        let mut bookings = self.collect(|_| true);
        bookings.sort_by(|a, b| b.date.cmp(&a.date).then(a.time_slot.cmp(&b.time_slot)));
        Ok(bookings)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let (_, key) = self
            .slot_of
            .remove(id)
            .ok_or_else(|| DomainError::not_found("Booking", "id", id))?;
        self.by_slot.remove(&key);
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.by_slot.len() as u64)
    }
}

// ── Credentials ────────────────────────────────────────────────

/// Users, admins and roster keyed by normalized email
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: DashMap<String, User>,
    admins: DashMap<String, Admin>,
    faculty: DashMap<String, FacultyRecord>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn admin_key(&self, id: &str) -> DomainResult<String> {
        self.admins
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.key().clone())
            .ok_or_else(|| DomainError::not_found("Admin", "id", id))
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_admin_by_email(&self, email: &str) -> DomainResult<Option<Admin>> {
        Ok(self.admins.get(email).map(|a| a.value().clone()))
    }

    async fn find_admin_by_id(&self, id: &str) -> DomainResult<Option<Admin>> {
        Ok(self
            .admins
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.value().clone()))
    }

    async fn create_admin(&self, new: NewAdmin) -> DomainResult<Admin> {
        match self.admins.entry(new.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "Admin {} already exists",
                new.email
            ))),
            Entry::Vacant(vacant) => {
                let admin = Admin {
                    id: new_id(),
                    admin_id: new.admin_id,
                    name: new.name,
                    position: new.position,
                    branch: new.branch,
                    email: new.email,
                    phone: new.phone,
                    password_hash: new.password_hash,
                    is_active: true,
                    created_at: Utc::now(),
                };
                vacant.insert(admin.clone());
                Ok(admin)
            }
        }
    }

    async fn count_admins(&self) -> DomainResult<u64> {
        Ok(self.admins.len() as u64)
    }

    async fn list_active_admins(&self) -> DomainResult<Vec<Admin>> {
        let mut admins: Vec<Admin> = self
            .admins
            .iter()
            .filter(|a| a.is_active)
            .map(|a| a.value().clone())
            .collect();
        admins.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(admins)
    }

    async fn update_admin(&self, id: &str, update: AdminUpdate) -> DomainResult<Admin> {
        let key = self.admin_key(id)?;
        let mut admin = self
            .admins
            .get(&key)
            .map(|a| a.value().clone())
            .ok_or_else(|| DomainError::not_found("Admin", "id", id))?;
        update.apply(&mut admin);

        if admin.email == key {
            self.admins.insert(key, admin.clone());
            return Ok(admin);
        }

        // Email is the map key, so a changed email moves the entry. The
        // shard lock from `entry` must be released before removing.
        match self.admins.entry(admin.email.clone()) {
            Entry::Occupied(_) => {
                return Err(DomainError::Conflict(format!(
                    "Admin {} already exists",
                    admin.email
                )))
            }
            Entry::Vacant(vacant) => {
                vacant.insert(admin.clone());
            }
        }
        self.admins.remove(&key);
        Ok(admin)
    }

    async fn set_admin_active(&self, id: &str, active: bool) -> DomainResult<Admin> {
        let key = self.admin_key(id)?;
        let mut admin = self
            .admins
            .get_mut(&key)
            .ok_or_else(|| DomainError::not_found("Admin", "id", id))?;
        admin.is_active = active;
        Ok(admin.clone())
    }

    async fn find_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(email).map(|u| u.value().clone()))
    }

    async fn find_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.value().clone()))
    }

    async fn create_user(&self, new: NewUser) -> DomainResult<User> {
        match self.users.entry(new.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::AlreadyRegistered(new.email)),
            Entry::Vacant(vacant) => {
                let now = Utc::now();
                let user = User {
                    id: new_id(),
                    name: new.name,
                    email: new.email,
                    password_hash: new.password_hash,
                    branch: new.branch,
                    phone: new.phone,
                    role: new.role,
                    is_active: true,
                    last_login_at: None,
                    created_at: now,
                    updated_at: now,
                };
                vacant.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn touch_last_login(&self, user_id: &str) -> DomainResult<()> {
        let mut user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;
        let now = Utc::now();
        user.last_login_at = Some(now);
        user.updated_at = now;
        Ok(())
    }

    async fn set_user_password(&self, user_id: &str, password_hash: String) -> DomainResult<()> {
        let mut user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;
        user.password_hash = password_hash;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn find_faculty_by_email(&self, email: &str) -> DomainResult<Option<FacultyRecord>> {
        Ok(self.faculty.get(email).map(|f| f.value().clone()))
    }

    async fn list_faculty(&self) -> DomainResult<Vec<FacultyRecord>> {
        let mut roster: Vec<FacultyRecord> =
            self.faculty.iter().map(|f| f.value().clone()).collect();
        roster.sort_by(|a, b| (&a.branch, &a.name).cmp(&(&b.branch, &b.name)));
        Ok(roster)
    }

    async fn create_faculty(&self, new: NewFaculty) -> DomainResult<FacultyRecord> {
        match self.faculty.entry(new.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "Faculty member {} already on the roster",
                new.email
            ))),
            Entry::Vacant(vacant) => {
                let record = FacultyRecord {
                    id: new_id(),
                    faculty_id: new.faculty_id,
                    name: new.name,
                    branch: new.branch,
                    email: new.email,
                    phone: new.phone,
                };
                vacant.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn count_faculty(&self) -> DomainResult<u64> {
        Ok(self.faculty.len() as u64)
    }

    async fn delete_faculty(&self, id: &str) -> DomainResult<FacultyRecord> {
        let key = self
            .faculty
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.key().clone())
            .ok_or_else(|| DomainError::not_found("Faculty", "id", id))?;
        self.faculty
            .remove(&key)
            .map(|(_, record)| record)
            .ok_or_else(|| DomainError::not_found("Faculty", "id", id))
    }

    async fn faculty_branches(&self) -> DomainResult<Vec<String>> {
        let mut branches: Vec<String> = self.faculty.iter().map(|f| f.branch.clone()).collect();
        branches.sort();
        branches.dedup();
        Ok(branches)
    }
}

// ── Classrooms ─────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryClassroomRepository {
    rooms: DashMap<(String, String), Classroom>,
}

impl InMemoryClassroomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClassroomRepository for InMemoryClassroomRepository {
    async fn list(&self) -> DomainResult<Vec<Classroom>> {
        let mut rooms: Vec<Classroom> = self.rooms.iter().map(|r| r.value().clone()).collect();
        rooms.sort_by(|a, b| (&a.branch, &a.name).cmp(&(&b.branch, &b.name)));
        Ok(rooms)
    }

    async fn list_by_branch(&self, branch: &str) -> DomainResult<Vec<Classroom>> {
        let mut rooms: Vec<Classroom> = self
            .rooms
            .iter()
            .filter(|r| r.branch == branch)
            .map(|r| r.value().clone())
            .collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rooms)
    }

    async fn create(&self, new: NewClassroom) -> DomainResult<Classroom> {
        match self.rooms.entry((new.branch.clone(), new.name.clone())) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "Classroom {} already exists in branch {}",
                new.name, new.branch
            ))),
            Entry::Vacant(vacant) => {
                let room = Classroom {
                    id: new_id(),
                    branch: new.branch,
                    name: new.name,
                    smartboards: new.smartboards,
                };
                vacant.insert(room.clone());
                Ok(room)
            }
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<Classroom> {
        let key = self
            .rooms
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.key().clone())
            .ok_or_else(|| DomainError::not_found("Classroom", "id", id))?;
        self.rooms
            .remove(&key)
            .map(|(_, room)| room)
            .ok_or_else(|| DomainError::not_found("Classroom", "id", id))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.rooms.len() as u64)
    }
}

// ── Provider ───────────────────────────────────────────────────

/// Process-local `RepositoryProvider`; state is lost on restart
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    credentials: InMemoryCredentialStore,
    bookings: InMemoryBookingRepository,
    classrooms: InMemoryClassroomRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn credentials(&self) -> &dyn CredentialStore {
        &self.credentials
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn classrooms(&self) -> &dyn ClassroomRepository {
        &self.classrooms
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn booking(classroom: &str, day: u32, slot: TimeSlot, owner: &str) -> NewBooking {
        NewBooking {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            classroom: classroom.into(),
            time_slot: slot,
            owner_user_id: owner.into(),
        }
    }

    #[tokio::test]
    async fn concurrent_creates_admit_exactly_one() {
        let repo = Arc::new(InMemoryBookingRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(booking("A-101", 3, TimeSlot::At1045, &format!("u{i}")))
                        .await
                })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(e) => assert!(matches!(e, DomainError::SlotTaken { .. })),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_removes_both_indexes() {
        let repo = InMemoryBookingRepository::new();
        let created = repo
            .create(booking("A-101", 3, TimeSlot::At0830, "u1"))
            .await
            .unwrap();

        repo.delete(&created.id).await.unwrap();
        assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
        assert!(repo.booked_slots("A-101", created.date).await.unwrap().is_empty());
        assert!(matches!(
            repo.delete(&created.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn availability_is_chronological() {
        let repo = InMemoryBookingRepository::new();
        repo.create(booking("A-101", 3, TimeSlot::At1630, "u1")).await.unwrap();
        repo.create(booking("A-101", 3, TimeSlot::At0930, "u2")).await.unwrap();
        repo.create(booking("B-202", 3, TimeSlot::At0830, "u2")).await.unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(
            repo.booked_slots("A-101", date).await.unwrap(),
            vec![TimeSlot::At0930, TimeSlot::At1630]
        );
    }

    #[tokio::test]
    async fn duplicate_user_is_already_registered() {
        let store = InMemoryCredentialStore::new();
        let new_user = NewUser {
            name: "Ada".into(),
            email: "ada@campus.edu".into(),
            password_hash: "h".into(),
            branch: "CSE".into(),
            phone: None,
            role: crate::domain::Role::Faculty,
        };

        let user = store.create_user(new_user.clone()).await.unwrap();
        assert!(matches!(
            store.create_user(new_user).await,
            Err(DomainError::AlreadyRegistered(_))
        ));

        store.touch_last_login(&user.id).await.unwrap();
        let reloaded = store.find_user_by_id(&user.id).await.unwrap().unwrap();
        assert!(reloaded.last_login_at.is_some());
    }

    #[tokio::test]
    async fn admin_email_change_moves_lookup_key() {
        let store = InMemoryCredentialStore::new();
        let admin = store
            .create_admin(NewAdmin {
                admin_id: "A001".into(),
                name: "Registrar".into(),
                position: "Head".into(),
                branch: "ADMIN".into(),
                email: "old@campus.edu".into(),
                phone: "555".into(),
                password_hash: "h".into(),
            })
            .await
            .unwrap();

        store
            .update_admin(
                &admin.id,
                AdminUpdate {
                    email: Some("new@campus.edu".into()),
                    ..AdminUpdate::default()
                },
            )
            .await
            .unwrap();

        assert!(store.find_admin_by_email("old@campus.edu").await.unwrap().is_none());
        let moved = store.find_admin_by_email("new@campus.edu").await.unwrap().unwrap();
        assert_eq!(moved.id, admin.id);

        store.set_admin_active(&admin.id, false).await.unwrap();
        assert!(store.list_active_admins().await.unwrap().is_empty());
    }
}
