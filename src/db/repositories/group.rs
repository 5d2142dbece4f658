use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::time::Duration;

use crate::db::{entities::music_group, with_timeout};
use crate::error::Result;

#[derive(Clone)]
pub struct GroupRepository {
    db: DatabaseConnection,
    timeout: Duration,
}

impl GroupRepository {
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Id of the group called `name`, or `None` when no such group exists.
    pub async fn find_group_id(&self, name: &str) -> Result<Option<i32>> {
        let group = with_timeout(
            self.timeout,
            music_group::Entity::find()
                .filter(music_group::Column::Name.eq(name))
                .one(&self.db),
        )
        .await?;

        if group.is_none() {
            tracing::debug!(group = %name, "Group does not exist");
        }

        Ok(group.map(|g| g.id))
    }

    /// Insert a new group and return its id.
    ///
    /// Not idempotent: callers check [`Self::find_group_id`] first.
    pub async fn create_group(&self, name: &str) -> Result<i32> {
        let group = music_group::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        let created = with_timeout(self.timeout, group.insert(&self.db)).await?;
        tracing::info!(group = %name, id = created.id, "Created music group");

        Ok(created.id)
    }

    pub async fn find_group_name(&self, id: i32) -> Result<Option<String>> {
        let group = with_timeout(
            self.timeout,
            music_group::Entity::find_by_id(id).one(&self.db),
        )
        .await?;

        Ok(group.map(|g| g.name))
    }
}
