use crate::database::entity::{comment, post, user};
use crate::database::postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};
use scribe_core::domain::Post;
use scribe_core::ports::{BaseRepository, CommentRepository, UserRepository};
use sea_orm::{DatabaseBackend, MockDatabase};

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = uuid::Uuid::new_v4();
    let author_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            author_id,
            category_id: None,
            location_id: None,
            title: "Test Post".to_owned(),
            text: "Text".to_owned(),
            pub_date: now.into(),
            is_published: true,
            image: None,
            created_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    assert!(result.is_some());
    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.author_id, author_id);
}

#[tokio::test]
async fn test_find_user_by_username() {
    let user_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: user_id,
            username: "ana".to_owned(),
            email: "ana@example.com".to_owned(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: "hash".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo.find_by_username("ana").await.unwrap().unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(user.email, "ana@example.com");
}

#[tokio::test]
async fn test_comments_for_post_map_through() {
    let post_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            comment::Model {
                id: uuid::Uuid::new_v4(),
                post_id,
                author_id: uuid::Uuid::new_v4(),
                text: "first".to_owned(),
                created_at: now.into(),
            },
            comment::Model {
                id: uuid::Uuid::new_v4(),
                post_id,
                author_id: uuid::Uuid::new_v4(),
                text: "second".to_owned(),
                created_at: now.into(),
            },
        ]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);

    let comments = repo.find_by_post(post_id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].text, "first");
    assert_eq!(comments[1].post_id, post_id);
}
