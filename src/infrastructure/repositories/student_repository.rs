//! SeaORM implementation of StudentRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::support::{apply_sort, distinct_ids, reference_id, schools_by_id};
use crate::domain::{
    DomainError, Identified, Page, PageRequest, Student, StudentRepository,
};
use crate::models::student::{self, ActiveModel, Column, Entity as StudentEntity};

/// SeaORM-based implementation of StudentRepository
pub struct SeaOrmStudentRepository {
    db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_schools(&self, models: Vec<student::Model>) -> Result<Vec<Student>, DomainError> {
        let schools =
            schools_by_id(&self.db, distinct_ids(models.iter().map(|m| m.school_id))).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let school = m.school_id.and_then(|id| schools.get(&id).cloned());
                let mut student = Student::from(m);
                student.school = school;
                student
            })
            .collect())
    }
}

fn sort_column(property: &str) -> Option<Column> {
    match property {
        "id" => Some(Column::Id),
        "firstName" => Some(Column::FirstName),
        "lastName" => Some(Column::LastName),
        "email" => Some(Column::Email),
        _ => None,
    }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn save(&self, student: Student) -> Result<Student, DomainError> {
        let school_id = reference_id(Student::ENTITY_NAME, student.school.as_ref())?;

        let txn = self.db.begin().await?;
        let mut active = match student.id {
            None => <ActiveModel as Default>::default(),
            Some(id) => StudentEntity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or(DomainError::NotFound)?
                .into(),
        };
        active.first_name = Set(student.first_name);
        active.last_name = Set(student.last_name);
        active.email = Set(student.email);
        active.school_id = Set(school_id);

        let model = if student.id.is_some() {
            active.update(&txn).await?
        } else {
            active.insert(&txn).await?
        };
        txn.commit().await?;

        let mut saved = self.with_schools(vec![model]).await?;
        saved.pop().ok_or(DomainError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DomainError> {
        let Some(model) = StudentEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.with_schools(vec![model]).await?.pop())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Student>, DomainError> {
        let query = apply_sort(
            StudentEntity::find(),
            page,
            Student::ENTITY_NAME,
            Column::Id,
            sort_column,
        )?;

        let paginator = query.paginate(&self.db, page.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page).await?;

        Ok(Page::new(self.with_schools(models).await?, page, total))
    }

    async fn find_by_school(&self, school_id: i64) -> Result<Vec<Student>, DomainError> {
        let models = StudentEntity::find()
            .filter(Column::SchoolId.eq(school_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        self.with_schools(models).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        StudentEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
