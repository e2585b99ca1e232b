//! Classroom catalogue

pub mod model;
pub mod repository;

pub use model::{Classroom, NewClassroom, Smartboard, SmartboardStatus};
pub use repository::ClassroomRepository;
