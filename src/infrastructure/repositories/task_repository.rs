//! SeaORM implementation of TaskRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};

use super::support::apply_sort;
use crate::domain::{DomainError, Identified, Page, PageRequest, Task, TaskRepository};
use crate::models::task::{ActiveModel, Column, Entity as TaskEntity};

/// SeaORM-based implementation of TaskRepository
pub struct SeaOrmTaskRepository {
    db: DatabaseConnection,
}

impl SeaOrmTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(property: &str) -> Option<Column> {
    match property {
        "id" => Some(Column::Id),
        "title" => Some(Column::Title),
        "description" => Some(Column::Description),
        _ => None,
    }
}

#[async_trait]
impl TaskRepository for SeaOrmTaskRepository {
    async fn save(&self, task: Task) -> Result<Task, DomainError> {
        let txn = self.db.begin().await?;
        let model = match task.id {
            None => {
                let active = ActiveModel {
                    title: Set(task.title),
                    description: Set(task.description),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(id) => {
                let existing = TaskEntity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or(DomainError::NotFound)?;
                let mut active: ActiveModel = existing.into();
                active.title = Set(task.title);
                active.description = Set(task.description);
                active.update(&txn).await?
            }
        };
        txn.commit().await?;

        Ok(Task::from(model))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, DomainError> {
        let task = TaskEntity::find_by_id(id).one(&self.db).await?;
        Ok(task.map(Task::from))
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Task>, DomainError> {
        let query = apply_sort(TaskEntity::find(), page, Task::ENTITY_NAME, Column::Id, sort_column)?;

        let paginator = query.paginate(&self.db, page.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page).await?;

        Ok(Page::new(
            models.into_iter().map(Task::from).collect(),
            page,
            total,
        ))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        TaskEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
