//! Repository implementations using SeaORM

pub mod course_history_repository;
pub mod course_repository;
pub mod location_repository;
pub mod school_repository;
pub mod student_repository;
mod support;
pub mod task_repository;

pub use course_history_repository::SeaOrmCourseHistoryRepository;
pub use course_repository::SeaOrmCourseRepository;
pub use location_repository::SeaOrmLocationRepository;
pub use school_repository::SeaOrmSchoolRepository;
pub use student_repository::SeaOrmStudentRepository;
pub use task_repository::SeaOrmTaskRepository;
