//! SeaORM entities, one module per table

pub mod course;
pub mod course_history;
pub mod course_task;
pub mod location;
pub mod school;
pub mod student;
pub mod task;
