//! PostgreSQL repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr,
};

use journal_core::domain::{NewPost, Post};
use journal_core::error::RepoError;
use journal_core::ports::PostRepository;

use super::connections::DatabaseConnections;
use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository over the shared, lazily opened pool.
pub struct PostgresPostRepository {
    connections: Arc<DatabaseConnections>,
}

impl PostgresPostRepository {
    pub fn new(connections: Arc<DatabaseConnections>) -> Self {
        Self { connections }
    }

    async fn db(&self) -> Result<&DbConn, RepoError> {
        self.connections.main().await.map_err(|e| {
            tracing::error!(error = %e, "Database unavailable");
            RepoError::Connection(e.to_string())
        })
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .filter(post::Column::PublishedAt.is_not_null())
            .order_by_desc(post::Column::PublishedAt)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(self.db().await?)
            .await
            .map_err(classify)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        let row = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(self.db().await?)
            .await
            .map_err(classify)?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, new_post: &NewPost) -> Result<Post, RepoError> {
        let active_model = post::ActiveModel::from(new_post.clone());
        let model = active_model
            .insert(self.db().await?)
            .await
            .map_err(classify)?;

        Ok(model.into())
    }
}

/// Map a SeaORM error onto the repository taxonomy. Only the driver's unique-violation
/// signal becomes [`RepoError::UniqueViolation`].
pub(crate) fn classify(err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepoError::UniqueViolation(detail);
    }

    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}
