//! Entity services - thin pass-through layer over the repositories
//!
//! Each service fronts single-entity lookups with a read-through cache and
//! evicts the entry on every write.

pub mod course_history_service;
pub mod course_service;
pub mod school_service;

pub use course_history_service::CourseHistoryService;
pub use course_service::CourseService;
pub use school_service::SchoolService;
