//! Application state containing services, repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{LocationRepository, StudentRepository, TaskRepository};
use crate::infrastructure::config::Config;
use crate::infrastructure::{
    SeaOrmCourseHistoryRepository, SeaOrmCourseRepository, SeaOrmLocationRepository,
    SeaOrmSchoolRepository, SeaOrmStudentRepository, SeaOrmTaskRepository,
};
use crate::services::{CourseHistoryService, CourseService, SchoolService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    pub schools: Arc<SchoolService>,
    pub courses: Arc<CourseService>,
    pub course_histories: Arc<CourseHistoryService>,
    /// Repositories without an HTTP surface
    pub location_repo: Arc<dyn LocationRepository>,
    pub student_repo: Arc<dyn StudentRepository>,
    pub task_repo: Arc<dyn TaskRepository>,
    /// CORS origins; empty means any
    pub cors_allowed_origins: Vec<String>,
}

impl AppState {
    /// Create a new AppState with all repositories and services initialized
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        let cache = config.cache_enabled;
        let student_repo: Arc<dyn StudentRepository> =
            Arc::new(SeaOrmStudentRepository::new(db.clone()));

        Self {
            schools: Arc::new(SchoolService::new(
                Arc::new(SeaOrmSchoolRepository::new(db.clone())),
                student_repo.clone(),
                cache,
            )),
            courses: Arc::new(CourseService::new(
                Arc::new(SeaOrmCourseRepository::new(db.clone())),
                cache,
            )),
            course_histories: Arc::new(CourseHistoryService::new(
                Arc::new(SeaOrmCourseHistoryRepository::new(db.clone())),
                cache,
            )),
            location_repo: Arc::new(SeaOrmLocationRepository::new(db.clone())),
            student_repo,
            task_repo: Arc::new(SeaOrmTaskRepository::new(db.clone())),
            cors_allowed_origins: config.cors_allowed_origins.clone(),
            db,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
