//! SeaORM implementation of CourseRepository
//!
//! Course is the owning side of the `course_task` join table: saving a
//! course rewrites its join rows inside one transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use super::support::{apply_sort, distinct_ids, reference_id, students_by_id};
use crate::domain::{
    Course, CourseRepository, DomainError, Identified, Page, PageRequest, Task,
};
use crate::models::course::{self, ActiveModel, Column, Entity as CourseEntity};
use crate::models::{course_task, task};

/// SeaORM-based implementation of CourseRepository
pub struct SeaOrmCourseRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Converts rows and attaches each course's student.
    async fn with_students(&self, models: Vec<course::Model>) -> Result<Vec<Course>, DomainError> {
        let students =
            students_by_id(&self.db, distinct_ids(models.iter().map(|m| m.student_id))).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let student = m.student_id.and_then(|id| students.get(&id).cloned());
                let mut course = Course::from(m);
                course.student = student;
                course
            })
            .collect())
    }

    /// Fills `tasks` for every course with a single join query.
    async fn with_tasks(&self, mut courses: Vec<Course>) -> Result<Vec<Course>, DomainError> {
        let ids = distinct_ids(courses.iter().map(|c| c.id));
        let mut tasks = tasks_by_course(&self.db, ids).await?;
        for course in &mut courses {
            if let Some(id) = course.id {
                course.tasks = tasks.remove(&id).unwrap_or_default();
            }
        }
        Ok(courses)
    }

    async fn page(&self, page: &PageRequest) -> Result<Page<Course>, DomainError> {
        let query = apply_sort(
            CourseEntity::find(),
            page,
            Course::ENTITY_NAME,
            Column::Id,
            sort_column,
        )?;

        let paginator = query.paginate(&self.db, page.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page).await?;

        Ok(Page::new(self.with_students(models).await?, page, total))
    }
}

fn sort_column(property: &str) -> Option<Column> {
    match property {
        "id" => Some(Column::Id),
        "courseTitle" => Some(Column::CourseTitle),
        "minSalary" => Some(Column::MinSalary),
        "maxSalary" => Some(Column::MaxSalary),
        _ => None,
    }
}

async fn tasks_by_course<C: ConnectionTrait>(
    db: &C,
    course_ids: Vec<i64>,
) -> Result<HashMap<i64, Vec<Task>>, DomainError> {
    if course_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = course_task::Entity::find()
        .filter(course_task::Column::CourseId.is_in(course_ids))
        .order_by_asc(course_task::Column::TaskId)
        .find_also_related(task::Entity)
        .all(db)
        .await?;

    let mut out: HashMap<i64, Vec<Task>> = HashMap::new();
    for (link, task) in rows {
        if let Some(task) = task {
            out.entry(link.course_id).or_default().push(Task::from(task));
        }
    }
    Ok(out)
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn save(&self, course: Course) -> Result<Course, DomainError> {
        let student_id = reference_id(Course::ENTITY_NAME, course.student.as_ref())?;
        let task_ids = course
            .tasks
            .iter()
            .map(|t| reference_id(Course::ENTITY_NAME, Some(t)))
            .collect::<Result<Vec<_>, _>>()?;
        let task_ids = distinct_ids(task_ids);

        let txn = self.db.begin().await?;

        let mut active = match course.id {
            None => <ActiveModel as Default>::default(),
            Some(id) => CourseEntity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or(DomainError::NotFound)?
                .into(),
        };
        active.course_title = Set(course.course_title);
        active.min_salary = Set(course.min_salary);
        active.max_salary = Set(course.max_salary);
        active.student_id = Set(student_id);

        let saved = if course.id.is_some() {
            active.update(&txn).await?
        } else {
            active.insert(&txn).await?
        };

        // Replace the stored task set with the in-memory one
        course_task::Entity::delete_many()
            .filter(course_task::Column::CourseId.eq(saved.id))
            .exec(&txn)
            .await?;
        for task_id in &task_ids {
            let link = course_task::ActiveModel {
                course_id: Set(saved.id),
                task_id: Set(*task_id),
            };
            link.insert(&txn).await?;
        }

        txn.commit().await?;
        tracing::debug!(course_id = saved.id, tasks = task_ids.len(), "saved course");

        self.find_one_with_tasks(saved.id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, DomainError> {
        let Some(model) = CourseEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.with_students(vec![model]).await?.pop())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Course>, DomainError> {
        self.page(page).await
    }

    async fn find_all_with_tasks(&self, page: &PageRequest) -> Result<Page<Course>, DomainError> {
        let lazy = self.page(page).await?;
        let content = self.with_tasks(lazy.content).await?;
        Ok(Page::new(content, page, lazy.total_elements))
    }

    async fn find_one_with_tasks(&self, id: i64) -> Result<Option<Course>, DomainError> {
        let Some(course) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        Ok(self.with_tasks(vec![course]).await?.pop())
    }

    async fn find_by_task(&self, task_id: i64) -> Result<Vec<Course>, DomainError> {
        let models = CourseEntity::find()
            .join(JoinType::InnerJoin, course::Relation::CourseTask.def())
            .filter(course_task::Column::TaskId.eq(task_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        self.with_students(models).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;
        course_task::Entity::delete_many()
            .filter(course_task::Column::CourseId.eq(id))
            .exec(&txn)
            .await?;
        CourseEntity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}
