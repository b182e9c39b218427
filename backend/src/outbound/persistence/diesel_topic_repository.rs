//! PostgreSQL-backed `TopicRepository`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StorageError, TopicRepository};
use crate::domain::{Topic, TopicSlug};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::TopicRow;
use super::pool::DbPool;
use super::schema::topics;

/// Diesel-backed topic storage.
#[derive(Clone)]
pub struct DieselTopicRepository {
    pool: DbPool,
}

impl DieselTopicRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for DieselTopicRepository {
    async fn exists(&self, slug: &TopicSlug) -> Result<bool, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(topics::table.filter(topics::slug.eq(slug.as_str()))))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "topic exists"))
    }

    async fn list(&self) -> Result<Vec<Topic>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TopicRow> = topics::table
            .order(topics::slug.asc())
            .select(TopicRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list topics"))?;
        rows.into_iter().map(Topic::try_from).collect()
    }
}
