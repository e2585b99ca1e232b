//! In-memory repository implementations

mod memory;

pub use memory::{
    InMemoryBookingRepository, InMemoryClassroomRepository, InMemoryCredentialStore,
    InMemoryRepositoryProvider,
};
