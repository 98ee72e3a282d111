//! SeaORM implementation of SchoolRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};

use super::support::{distinct_ids, locations_by_id, reference_id, students_by_school};
use crate::domain::{DomainError, Identified, School, SchoolRepository};
use crate::models::school::{self, ActiveModel, Entity as SchoolEntity};

/// SeaORM-based implementation of SchoolRepository
pub struct SeaOrmSchoolRepository {
    db: DatabaseConnection,
}

impl SeaOrmSchoolRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attaches each school's location and students.
    async fn with_relations(&self, models: Vec<school::Model>) -> Result<Vec<School>, DomainError> {
        let locations =
            locations_by_id(&self.db, distinct_ids(models.iter().map(|m| m.location_id))).await?;
        let mut students = students_by_school(&self.db, models.iter().map(|m| m.id).collect()).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let location = m.location_id.and_then(|id| locations.get(&id).cloned());
                let members = students.remove(&m.id).unwrap_or_default();
                let mut school = School::from(m);
                school.location = location;
                school.students = members;
                school
            })
            .collect())
    }
}

#[async_trait]
impl SchoolRepository for SeaOrmSchoolRepository {
    async fn save(&self, school: School) -> Result<School, DomainError> {
        let location_id = reference_id(School::ENTITY_NAME, school.location.as_ref())?;
        // NOT NULL column; an empty name is rejected at the API boundary.
        let name = school.school_name.unwrap_or_default();

        let txn = self.db.begin().await?;
        let model = match school.id {
            None => {
                let active = ActiveModel {
                    school_name: Set(name),
                    location_id: Set(location_id),
                    ..Default::default()
                };
                active.insert(&txn).await?
            }
            Some(id) => {
                let existing = SchoolEntity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or(DomainError::NotFound)?;
                let mut active: ActiveModel = existing.into();
                active.school_name = Set(name);
                active.location_id = Set(location_id);
                active.update(&txn).await?
            }
        };
        txn.commit().await?;

        let mut saved = self.with_relations(vec![model]).await?;
        saved.pop().ok_or(DomainError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<School>, DomainError> {
        let Some(model) = SchoolEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.with_relations(vec![model]).await?.pop())
    }

    async fn find_all(&self) -> Result<Vec<School>, DomainError> {
        let models = SchoolEntity::find()
            .order_by_asc(school::Column::Id)
            .all(&self.db)
            .await?;
        self.with_relations(models).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        SchoolEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
