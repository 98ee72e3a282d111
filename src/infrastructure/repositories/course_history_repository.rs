//! SeaORM implementation of CourseHistoryRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};

use super::support::{
    apply_sort, course_history_from_model, courses_by_id, distinct_ids, format_timestamp,
    reference_id, schools_by_id, students_by_id,
};
use crate::domain::{CourseHistory, CourseHistoryRepository, DomainError, Identified, Page, PageRequest};
use crate::models::course_history::{self, ActiveModel, Column, Entity as CourseHistoryEntity};

/// SeaORM-based implementation of CourseHistoryRepository
pub struct SeaOrmCourseHistoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourseHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Decodes rows and attaches course, school and student (one level deep).
    async fn with_references(
        &self,
        models: Vec<course_history::Model>,
    ) -> Result<Vec<CourseHistory>, DomainError> {
        let courses =
            courses_by_id(&self.db, distinct_ids(models.iter().map(|m| m.course_id))).await?;
        let schools =
            schools_by_id(&self.db, distinct_ids(models.iter().map(|m| m.school_id))).await?;
        let students =
            students_by_id(&self.db, distinct_ids(models.iter().map(|m| m.student_id))).await?;

        models
            .iter()
            .map(|m| {
                let mut history = course_history_from_model(m)?;
                history.course = m.course_id.and_then(|id| courses.get(&id).cloned());
                history.school = m.school_id.and_then(|id| schools.get(&id).cloned());
                history.student = m.student_id.and_then(|id| students.get(&id).cloned());
                Ok(history)
            })
            .collect()
    }
}

fn sort_column(property: &str) -> Option<Column> {
    match property {
        "id" => Some(Column::Id),
        "startDate" => Some(Column::StartDate),
        "endDate" => Some(Column::EndDate),
        "language" => Some(Column::Language),
        _ => None,
    }
}

#[async_trait]
impl CourseHistoryRepository for SeaOrmCourseHistoryRepository {
    async fn save(&self, history: CourseHistory) -> Result<CourseHistory, DomainError> {
        let entity = CourseHistory::ENTITY_NAME;
        let course_id = reference_id(entity, history.course.as_ref())?;
        let school_id = reference_id(entity, history.school.as_ref())?;
        let student_id = reference_id(entity, history.student.as_ref())?;

        let txn = self.db.begin().await?;
        let mut active = match history.id {
            None => <ActiveModel as Default>::default(),
            Some(id) => CourseHistoryEntity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or(DomainError::NotFound)?
                .into(),
        };
        active.start_date = Set(history.start_date.as_ref().map(format_timestamp));
        active.end_date = Set(history.end_date.as_ref().map(format_timestamp));
        active.language = Set(history.language.as_ref().map(|l| l.as_str().to_string()));
        active.course_id = Set(course_id);
        active.school_id = Set(school_id);
        active.student_id = Set(student_id);

        // A second history pointing at an already-used course, school or
        // student violates a UNIQUE constraint and surfaces as Storage.
        let model = if history.id.is_some() {
            active.update(&txn).await?
        } else {
            active.insert(&txn).await?
        };
        txn.commit().await?;

        let mut saved = self.with_references(vec![model]).await?;
        saved.pop().ok_or(DomainError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CourseHistory>, DomainError> {
        let Some(model) = CourseHistoryEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.with_references(vec![model]).await?.pop())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<CourseHistory>, DomainError> {
        let query = apply_sort(
            CourseHistoryEntity::find(),
            page,
            CourseHistory::ENTITY_NAME,
            Column::Id,
            sort_column,
        )?;

        let paginator = query.paginate(&self.db, page.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page).await?;

        Ok(Page::new(self.with_references(models).await?, page, total))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        CourseHistoryEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
