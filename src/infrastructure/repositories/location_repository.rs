//! SeaORM implementation of LocationRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};

use crate::domain::{DomainError, Location, LocationRepository};
use crate::models::location::{ActiveModel, Entity as LocationEntity};

/// SeaORM-based implementation of LocationRepository
pub struct SeaOrmLocationRepository {
    db: DatabaseConnection,
}

impl SeaOrmLocationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LocationRepository for SeaOrmLocationRepository {
    async fn save(&self, location: Location) -> Result<Location, DomainError> {
        let txn = self.db.begin().await?;
        let model = match location.id {
            None => {
                let mut active = <ActiveModel as Default>::default();
                apply(&mut active, location);
                active.insert(&txn).await?
            }
            Some(id) => {
                let existing = LocationEntity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or(DomainError::NotFound)?;
                let mut active: ActiveModel = existing.into();
                apply(&mut active, location);
                active.update(&txn).await?
            }
        };
        txn.commit().await?;

        Ok(Location::from(model))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>, DomainError> {
        let location = LocationEntity::find_by_id(id).one(&self.db).await?;
        Ok(location.map(Location::from))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DomainError> {
        LocationEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

fn apply(active: &mut ActiveModel, location: Location) {
    active.street_address = Set(location.street_address);
    active.postal_code = Set(location.postal_code);
    active.city = Set(location.city);
    active.state_province = Set(location.state_province);
}
