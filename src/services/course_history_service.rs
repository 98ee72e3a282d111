//! CourseHistory Service

use std::sync::Arc;

use crate::domain::{CourseHistory, CourseHistoryRepository, DomainError, Page, PageRequest};
use crate::infrastructure::cache::ReadThroughCache;

pub struct CourseHistoryService {
    repo: Arc<dyn CourseHistoryRepository>,
    cache: ReadThroughCache<CourseHistory>,
}

impl CourseHistoryService {
    pub fn new(repo: Arc<dyn CourseHistoryRepository>, cache_enabled: bool) -> Self {
        Self {
            repo,
            cache: ReadThroughCache::new("courseHistory", cache_enabled),
        }
    }

    pub async fn save(&self, history: CourseHistory) -> Result<CourseHistory, DomainError> {
        tracing::debug!("Request to save CourseHistory : {:?}", history);
        let saved = self.repo.save(history).await?;
        if let Some(id) = saved.id {
            self.cache.invalidate(id);
        }
        Ok(saved)
    }

    pub async fn find_all(&self, page: &PageRequest) -> Result<Page<CourseHistory>, DomainError> {
        tracing::debug!("Request to get all CourseHistories");
        self.repo.find_all(page).await
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<CourseHistory>, DomainError> {
        tracing::debug!("Request to get CourseHistory : {}", id);
        self.cache
            .get_or_load(id, || self.repo.find_by_id(id))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        tracing::debug!("Request to delete CourseHistory : {}", id);
        self.repo.delete_by_id(id).await?;
        self.cache.invalidate(id);
        Ok(())
    }
}
