//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use scribe_core::domain::{Category, Comment, Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    CategoryRepository, CommentRepository, FeedFilter, LocationRepository, PostRepository,
    UserRepository,
};
use scribe_core::visibility::FeedItem;

use super::entity::category::Entity as CategoryEntity;
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::Entity as LocationEntity;
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(super::entity::category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {}

/// One row of the grouped comment tally.
#[derive(Debug, FromQueryResult)]
struct CommentTally {
    post_id: Uuid,
    count: i64,
}

impl PostgresPostRepository {
    /// Comment counts per post, one grouped query.
    async fn comment_tallies(&self) -> Result<HashMap<Uuid, i64>, RepoError> {
        let tallies = CommentEntity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(comment::Column::Id.count(), "count")
            .group_by(comment::Column::PostId)
            .into_model::<CommentTally>()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(tallies.into_iter().map(|t| (t.post_id, t.count)).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn feed(&self, filter: FeedFilter) -> Result<Vec<FeedItem>, RepoError> {
        let mut query = PostEntity::find();
        if let Some(author_id) = filter.author_id {
            query = query.filter(post::Column::AuthorId.eq(author_id));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(post::Column::CategoryId.eq(category_id));
        }

        let rows = query
            .find_also_related(CategoryEntity)
            .order_by_desc(post::Column::PubDate)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let tallies = self.comment_tallies().await?;

        Ok(rows
            .into_iter()
            .map(|(model, category)| {
                let post: Post = model.into();
                let comment_count = tallies.get(&post.id).copied().unwrap_or(0);
                FeedItem {
                    comment_count,
                    category_published: category.map(|c| c.is_published).unwrap_or(false),
                    post,
                }
            })
            .collect())
    }

    async fn feed_item(&self, id: Uuid) -> Result<Option<FeedItem>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(CategoryEntity)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let Some((model, category)) = row else {
            return Ok(None);
        };

        let comment_count = CommentEntity::find()
            .filter(comment::Column::PostId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Some(FeedItem {
            post: model.into(),
            comment_count: comment_count as i64,
            category_published: category.map(|c| c.is_published).unwrap_or(false),
        }))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
