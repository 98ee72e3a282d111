//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.
//!
//! `save` inserts when the entity has no identifier and updates otherwise;
//! updating an identifier with no matching row is `DomainError::NotFound`.
//! `delete_by_id` is idempotent.

use async_trait::async_trait;

use super::DomainError;
use super::entities::{Course, CourseHistory, Location, School, Student, Task};
use super::page::{Page, PageRequest};

/// Repository trait for School entity
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    async fn save(&self, school: School) -> Result<School, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<School>, DomainError>;

    /// All schools, unpaged and in storage order
    async fn find_all(&self) -> Result<Vec<School>, DomainError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;
}

/// Repository trait for Location entity
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn save(&self, location: Location) -> Result<Location, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>, DomainError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;
}

/// Repository trait for Student entity
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Persists the student together with its owning `school` reference
    async fn save(&self, student: Student) -> Result<Student, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DomainError>;

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Student>, DomainError>;

    /// The reverse side of Student -> School
    async fn find_by_school(&self, school_id: i64) -> Result<Vec<Student>, DomainError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;
}

/// Repository trait for Task entity
///
/// Task is the inverse side of Course-Task: saving a task never touches
/// the join table.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn save(&self, task: Task) -> Result<Task, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, DomainError>;

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Task>, DomainError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;
}

/// Repository trait for Course entity
///
/// Course owns the Course-Task join table: `save` replaces the stored task
/// set with `course.tasks`.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn save(&self, course: Course) -> Result<Course, DomainError>;

    /// Lazy lookup: `tasks` is left empty
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, DomainError>;

    /// Lazy listing: `tasks` is left empty
    async fn find_all(&self, page: &PageRequest) -> Result<Page<Course>, DomainError>;

    /// Eager listing: `tasks` is populated for every course of the page
    async fn find_all_with_tasks(&self, page: &PageRequest) -> Result<Page<Course>, DomainError>;

    /// Eager lookup: `tasks` is populated
    async fn find_one_with_tasks(&self, id: i64) -> Result<Option<Course>, DomainError>;

    /// The reverse side of Course -> Task
    async fn find_by_task(&self, task_id: i64) -> Result<Vec<Course>, DomainError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;
}

/// Repository trait for CourseHistory entity
#[async_trait]
pub trait CourseHistoryRepository: Send + Sync {
    async fn save(&self, history: CourseHistory) -> Result<CourseHistory, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<CourseHistory>, DomainError>;

    async fn find_all(&self, page: &PageRequest) -> Result<Page<CourseHistory>, DomainError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError>;
}
