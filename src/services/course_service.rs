//! Course Service

use std::sync::Arc;

use crate::domain::{Course, CourseRepository, DomainError, Page, PageRequest};
use crate::infrastructure::cache::ReadThroughCache;

pub struct CourseService {
    repo: Arc<dyn CourseRepository>,
    cache: ReadThroughCache<Course>,
}

impl CourseService {
    pub fn new(repo: Arc<dyn CourseRepository>, cache_enabled: bool) -> Self {
        Self {
            repo,
            cache: ReadThroughCache::new("course", cache_enabled),
        }
    }

    pub async fn save(&self, course: Course) -> Result<Course, DomainError> {
        tracing::debug!("Request to save Course : {:?}", course);
        let saved = self.repo.save(course).await?;
        if let Some(id) = saved.id {
            self.cache.invalidate(id);
        }
        Ok(saved)
    }

    pub async fn find_all(&self, page: &PageRequest) -> Result<Page<Course>, DomainError> {
        tracing::debug!("Request to get all Courses");
        self.repo.find_all(page).await
    }

    pub async fn find_all_with_tasks(
        &self,
        page: &PageRequest,
    ) -> Result<Page<Course>, DomainError> {
        tracing::debug!("Request to get all Courses with tasks");
        self.repo.find_all_with_tasks(page).await
    }

    /// Single course with its tasks populated
    pub async fn find_one(&self, id: i64) -> Result<Option<Course>, DomainError> {
        tracing::debug!("Request to get Course : {}", id);
        self.cache
            .get_or_load(id, || self.repo.find_one_with_tasks(id))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        tracing::debug!("Request to delete Course : {}", id);
        self.repo.delete_by_id(id).await?;
        self.cache.invalidate(id);
        Ok(())
    }
}
