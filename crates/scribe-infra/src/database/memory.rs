//! In-memory repository implementations over one shared store.
//!
//! Used as the fallback when no database is configured and as the
//! backing store for handler-level tests. The store enforces the same
//! referential rules the Postgres schema does: deleting a post removes
//! its comments, deleting a category or location nulls the reference on
//! posts, deleting a user removes their posts and comments.
//! Note: data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Category, Comment, Location, Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, FeedFilter, LocationRepository,
    PostRepository, UserRepository,
};
use scribe_core::visibility::FeedItem;

/// Shared in-memory tables.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    categories: RwLock<HashMap<Uuid, Category>>,
    locations: RwLock<HashMap<Uuid, Location>>,
    posts: RwLock<HashMap<Uuid, Post>>,
    comments: RwLock<HashMap<Uuid, Comment>>,
}

macro_rules! memory_repo {
    ($name:ident, $entity:ty, $table:ident) => {
        pub struct $name {
            store: Arc<MemoryStore>,
        }

        impl $name {
            pub fn new(store: Arc<MemoryStore>) -> Self {
                Self { store }
            }
        }

        #[async_trait]
        impl BaseRepository<$entity, Uuid> for $name {
            async fn find_by_id(&self, id: Uuid) -> Result<Option<$entity>, RepoError> {
                Ok(self.store.$table.read().await.get(&id).cloned())
            }

            async fn insert(&self, entity: $entity) -> Result<$entity, RepoError> {
                let mut table = self.store.$table.write().await;
                if table.contains_key(&entity.id) {
                    return Err(RepoError::Constraint("Entity already exists".to_string()));
                }
                table.insert(entity.id, entity.clone());
                Ok(entity)
            }

            async fn update(&self, entity: $entity) -> Result<$entity, RepoError> {
                let mut table = self.store.$table.write().await;
                if !table.contains_key(&entity.id) {
                    return Err(RepoError::NotFound);
                }
                table.insert(entity.id, entity.clone());
                Ok(entity)
            }

            async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
                if self.store.$table.write().await.remove(&id).is_none() {
                    return Err(RepoError::NotFound);
                }
                self.store.cascade_from(stringify!($table), id).await;
                Ok(())
            }
        }
    };
}

memory_repo!(InMemoryUserRepository, User, users);
memory_repo!(InMemoryCategoryRepository, Category, categories);
memory_repo!(InMemoryLocationRepository, Location, locations);
memory_repo!(InMemoryPostRepository, Post, posts);
memory_repo!(InMemoryCommentRepository, Comment, comments);

impl MemoryStore {
    /// Apply the referential rules after a row vanished from `table`.
    async fn cascade_from(&self, table: &str, id: Uuid) {
        match table {
            "posts" => {
                self.comments.write().await.retain(|_, c| c.post_id != id);
            }
            "categories" => {
                for post in self.posts.write().await.values_mut() {
                    if post.category_id == Some(id) {
                        post.category_id = None;
                    }
                }
            }
            "locations" => {
                for post in self.posts.write().await.values_mut() {
                    if post.location_id == Some(id) {
                        post.location_id = None;
                    }
                }
            }
            "users" => {
                let doomed: Vec<Uuid> = {
                    let posts = self.posts.read().await;
                    posts
                        .values()
                        .filter(|p| p.author_id == id)
                        .map(|p| p.id)
                        .collect()
                };
                self.posts.write().await.retain(|_, p| p.author_id != id);
                self.comments
                    .write()
                    .await
                    .retain(|_, c| c.author_id != id && !doomed.contains(&c.post_id));
            }
            _ => {}
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        Ok(self
            .store
            .categories
            .read()
            .await
            .values()
            .find(|c| c.slug == slug)
            .cloned())
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn feed(&self, filter: FeedFilter) -> Result<Vec<FeedItem>, RepoError> {
        let posts = self.store.posts.read().await;
        let categories = self.store.categories.read().await;
        let comments = self.store.comments.read().await;

        let mut items: Vec<FeedItem> = posts
            .values()
            .filter(|p| filter.author_id.is_none_or(|a| p.author_id == a))
            .filter(|p| filter.category_id.is_none_or(|c| p.category_id == Some(c)))
            .map(|p| FeedItem {
                comment_count: comments.values().filter(|c| c.post_id == p.id).count() as i64,
                category_published: p
                    .category_id
                    .and_then(|id| categories.get(&id))
                    .map(|c| c.is_published)
                    .unwrap_or(false),
                post: p.clone(),
            })
            .collect();

        items.sort_by(|a, b| b.post.pub_date.cmp(&a.post.pub_date));
        Ok(items)
    }

    async fn feed_item(&self, id: Uuid) -> Result<Option<FeedItem>, RepoError> {
        let posts = self.store.posts.read().await;
        let Some(post) = posts.get(&id) else {
            return Ok(None);
        };
        let categories = self.store.categories.read().await;
        let comments = self.store.comments.read().await;

        Ok(Some(FeedItem {
            comment_count: comments.values().filter(|c| c.post_id == id).count() as i64,
            category_published: post
                .category_id
                .and_then(|cid| categories.get(&cid))
                .map(|c| c.is_published)
                .unwrap_or(false),
            post: post.clone(),
        }))
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let comments = self.store.comments.read().await;
        let mut found: Vec<Comment> = comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::default())
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let store = store();
        let repo = InMemoryPostRepository::new(store);
        let post = Post::new(
            Uuid::new_v4(),
            "t".to_owned(),
            "x".to_owned(),
            Utc::now(),
            None,
            None,
        );

        let saved = repo.insert(post.clone()).await.unwrap();
        assert_eq!(saved.id, post.id);
        assert!(repo.find_by_id(post.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn double_insert_is_a_constraint_violation() {
        let repo = InMemoryUserRepository::new(store());
        let user = User::new("ana".into(), "ana@example.com".into(), "hash".into());
        repo.insert(user.clone()).await.unwrap();
        assert!(matches!(
            repo.insert(user).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn update_of_missing_entity_is_not_found() {
        let repo = InMemoryCommentRepository::new(store());
        let comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "hi".into());
        assert!(matches!(
            repo.update(comment).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn deleting_post_removes_its_comments() {
        let store = store();
        let posts = InMemoryPostRepository::new(store.clone());
        let comments = InMemoryCommentRepository::new(store);

        let post = Post::new(
            Uuid::new_v4(),
            "t".to_owned(),
            "x".to_owned(),
            Utc::now(),
            None,
            None,
        );
        posts.insert(post.clone()).await.unwrap();
        comments
            .insert(Comment::new(post.id, Uuid::new_v4(), "first".into()))
            .await
            .unwrap();
        comments
            .insert(Comment::new(post.id, Uuid::new_v4(), "second".into()))
            .await
            .unwrap();

        posts.delete(post.id).await.unwrap();
        assert!(comments.find_by_post(post.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_category_nulls_post_reference() {
        let store = store();
        let categories = InMemoryCategoryRepository::new(store.clone());
        let posts = InMemoryPostRepository::new(store);

        let category = Category::new("News".into(), "".into(), "news".into());
        categories.insert(category.clone()).await.unwrap();
        let post = Post::new(
            Uuid::new_v4(),
            "t".to_owned(),
            "x".to_owned(),
            Utc::now(),
            Some(category.id),
            None,
        );
        posts.insert(post.clone()).await.unwrap();

        categories.delete(category.id).await.unwrap();
        let kept = posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(kept.category_id, None);
        // And without a category the post is no longer public.
        let item = posts.feed_item(post.id).await.unwrap().unwrap();
        assert!(!item.category_published);
    }

    #[tokio::test]
    async fn feed_counts_comments_exactly() {
        let store = store();
        let posts = InMemoryPostRepository::new(store.clone());
        let comments = InMemoryCommentRepository::new(store);

        let post = Post::new(
            Uuid::new_v4(),
            "t".to_owned(),
            "x".to_owned(),
            Utc::now(),
            None,
            None,
        );
        posts.insert(post.clone()).await.unwrap();
        for i in 0..3 {
            comments
                .insert(Comment::new(post.id, Uuid::new_v4(), format!("c{i}")))
                .await
                .unwrap();
        }

        let feed = posts.feed(FeedFilter::default()).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].comment_count, 3);
    }

    #[tokio::test]
    async fn comments_listed_oldest_first() {
        let store = store();
        let comments = InMemoryCommentRepository::new(store);
        let post_id = Uuid::new_v4();

        let mut first = Comment::new(post_id, Uuid::new_v4(), "first".into());
        first.created_at = Utc::now() - chrono::TimeDelta::minutes(5);
        let second = Comment::new(post_id, Uuid::new_v4(), "second".into());
        comments.insert(second).await.unwrap();
        comments.insert(first).await.unwrap();

        let listed = comments.find_by_post(post_id).await.unwrap();
        assert_eq!(listed[0].text, "first");
        assert_eq!(listed[1].text, "second");
    }
}
