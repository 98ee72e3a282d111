//! School Service

use std::sync::Arc;

use crate::domain::{DomainError, School, SchoolRepository, StudentRepository};
use crate::infrastructure::cache::ReadThroughCache;

/// Students are written through their own repository, so the cached
/// school row never answers for membership.
pub struct SchoolService {
    repo: Arc<dyn SchoolRepository>,
    students: Arc<dyn StudentRepository>,
    cache: ReadThroughCache<School>,
}

impl SchoolService {
    pub fn new(
        repo: Arc<dyn SchoolRepository>,
        students: Arc<dyn StudentRepository>,
        cache_enabled: bool,
    ) -> Self {
        Self {
            repo,
            students,
            cache: ReadThroughCache::new("school", cache_enabled),
        }
    }

    pub async fn save(&self, school: School) -> Result<School, DomainError> {
        tracing::debug!("Request to save School : {:?}", school);
        let saved = self.repo.save(school).await?;
        if let Some(id) = saved.id {
            self.cache.invalidate(id);
        }
        Ok(saved)
    }

    /// Every school, unpaged
    pub async fn find_all(&self) -> Result<Vec<School>, DomainError> {
        tracing::debug!("Request to get all Schools");
        self.repo.find_all().await
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<School>, DomainError> {
        tracing::debug!("Request to get School : {}", id);
        let Some(mut school) = self
            .cache
            .get_or_load(id, || self.repo.find_by_id(id))
            .await?
        else {
            return Ok(None);
        };

        school.students = self
            .students
            .find_by_school(id)
            .await?
            .into_iter()
            .map(|mut student| {
                student.school = None;
                student
            })
            .collect();
        Ok(Some(school))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        tracing::debug!("Request to delete School : {}", id);
        self.repo.delete_by_id(id).await?;
        self.cache.invalidate(id);
        Ok(())
    }
}
