//! Post listing, detail and mutation handlers.
//!
//! Listing and detail apply the visibility rules; the mutation
//! handlers implement the author gate with its silent-redirect policy:
//! a non-author editing or deleting a post is sent back to the post's
//! detail page as if they had requested it, with nothing persisted and
//! no error surfaced.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use scribe_core::access::author_gate;
use scribe_core::domain::Post;
use scribe_core::pagination::{POSTS_PER_PAGE, paginate};
use scribe_core::ports::FeedFilter;
use scribe_core::validate;
use scribe_core::visibility::public_feed;
use scribe_shared::ApiResponse;
use scribe_shared::dto::{
    CommentResponse, PageResponse, PostDetailResponse, PostForm, PostResponse,
};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::{PageQuery, post_detail_path, profile_path, see_other};

/// GET / - the paginated public feed.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let items = state.posts.feed(FeedFilter::default()).await?;
    let feed = public_feed(items, Utc::now());
    let page = paginate(feed, query.page(), POSTS_PER_PAGE);

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PageResponse::<PostResponse>::from_page(page))))
}

/// GET /posts/{post_id}/ - detail plus comments, oldest comment first.
///
/// A hidden, future-dated or unpublished-category post answers 404 to
/// everyone but its author - not 403, the resource simply does not
/// exist for other viewers.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let item = state
        .posts
        .feed_item(post_id)
        .await?
        .ok_or_else(|| AppError::not_found("Post"))?;

    if !item.visible_to(viewer.user_id(), Utc::now()) {
        return Err(AppError::not_found("Post"));
    }

    let comments = state.comments.find_by_post(post_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostDetailResponse {
        post: item.into(),
        comments: comments.into_iter().map(CommentResponse::from).collect(),
    })))
}

/// GET /posts/create/ - the blank form.
pub async fn create_form(_identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostForm::default())))
}

/// POST /posts/create/ - create a post, redirect to own profile.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    validate_post_form(&state, &form).await?;

    let mut post = Post::new(
        identity.user_id,
        form.title,
        form.text,
        form.pub_date,
        form.category_id,
        form.location_id,
    );
    post.is_published = form.is_published;
    post.image = form.image;

    let saved = state.posts.insert(post).await?;
    tracing::debug!(post_id = %saved.id, author = %identity.username, "Post created");

    Ok(see_other(profile_path(&identity.username)))
}

/// GET /posts/{post_id}/edit/ - the prefilled form, author only.
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = find_post(&state, post_id).await?;

    if !author_gate(post.author_id, identity.user_id).is_granted() {
        return Ok(see_other(post_detail_path(post_id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostForm::from(&post))))
}

/// POST /posts/{post_id}/edit/ - persist changes, redirect to detail.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let mut post = find_post(&state, post_id).await?;

    if !author_gate(post.author_id, identity.user_id).is_granted() {
        return Ok(see_other(post_detail_path(post_id)));
    }

    let form = body.into_inner();
    validate_post_form(&state, &form).await?;

    post.title = form.title;
    post.text = form.text;
    post.pub_date = form.pub_date;
    post.category_id = form.category_id;
    post.location_id = form.location_id;
    post.image = form.image;
    post.is_published = form.is_published;

    state.posts.update(post).await?;

    Ok(see_other(post_detail_path(post_id)))
}

/// GET /posts/{post_id}/delete/ - confirmation view, author only.
pub async fn delete_form(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = find_post(&state, post_id).await?;

    if !author_gate(post.author_id, identity.user_id).is_granted() {
        return Ok(see_other(post_detail_path(post_id)));
    }

    // The confirmation page shows the form of the doomed post.
    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostForm::from(&post))))
}

/// POST /posts/{post_id}/delete/ - delete (comments cascade), redirect
/// to own profile.
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = find_post(&state, post_id).await?;

    if !author_gate(post.author_id, identity.user_id).is_granted() {
        return Ok(see_other(post_detail_path(post_id)));
    }

    state.posts.delete(post_id).await?;
    tracing::debug!(%post_id, author = %identity.username, "Post deleted");

    Ok(see_other(profile_path(&identity.username)))
}

async fn find_post(state: &AppState, post_id: Uuid) -> Result<Post, AppError> {
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::not_found("Post"))
}

/// Field checks plus referential checks: a submitted category or
/// location must exist.
async fn validate_post_form(state: &AppState, form: &PostForm) -> Result<(), AppError> {
    let errors = validate::post_input(&form.title, &form.text);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    if let Some(category_id) = form.category_id {
        if state.categories.find_by_id(category_id).await?.is_none() {
            return Err(AppError::Validation(vec![
                "category_id: unknown category".to_string(),
            ]));
        }
    }
    if let Some(location_id) = form.location_id {
        if state.locations.find_by_id(location_id).await?.is_none() {
            return Err(AppError::Validation(vec![
                "location_id: unknown location".to_string(),
            ]));
        }
    }

    Ok(())
}
