//! Comment mutation handlers.
//!
//! The author gate here differs from the post one on purpose: a
//! non-author editing or deleting a comment is answered with the
//! rendered (unchanged) comment, a no-op - not a redirect, not an
//! error. Failure is signaled only by nothing being persisted.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::access::author_gate;
use scribe_core::domain::Comment;
use scribe_core::validate;
use scribe_shared::ApiResponse;
use scribe_shared::dto::{CommentForm, CommentResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::{post_detail_path, see_other};

/// POST /posts/{post_id}/comment/ - add a comment, redirect to detail.
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    if state.posts.find_by_id(post_id).await?.is_none() {
        return Err(AppError::not_found("Post"));
    }

    let form = body.into_inner();
    let errors = validate::comment_input(&form.text);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let comment = Comment::new(post_id, identity.user_id, form.text);
    state.comments.insert(comment).await?;

    Ok(see_other(post_detail_path(post_id)))
}

/// GET /posts/{post_id}/edit_comment/{comment_id}/ - the rendered form.
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    let (_post_id, comment_id) = path.into_inner();
    let comment = find_comment(&state, comment_id).await?;

    Ok(render(comment))
}

/// POST /posts/{post_id}/edit_comment/{comment_id}/ - persist the edit
/// if the actor is the author, no-op render otherwise.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    identity: Identity,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let mut comment = find_comment(&state, comment_id).await?;

    if !author_gate(comment.author_id, identity.user_id).is_granted() {
        return Ok(render(comment));
    }

    let form = body.into_inner();
    let errors = validate::comment_input(&form.text);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    comment.text = form.text;
    state.comments.update(comment).await?;

    Ok(see_other(post_detail_path(post_id)))
}

/// GET /posts/{post_id}/delete_comment/{comment_id}/ - confirmation
/// view.
pub async fn delete_form(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    let (_post_id, comment_id) = path.into_inner();
    let comment = find_comment(&state, comment_id).await?;

    Ok(render(comment))
}

/// POST /posts/{post_id}/delete_comment/{comment_id}/ - delete if the
/// actor is the author, no-op render otherwise.
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = find_comment(&state, comment_id).await?;

    if !author_gate(comment.author_id, identity.user_id).is_granted() {
        return Ok(render(comment));
    }

    state.comments.delete(comment_id).await?;

    Ok(see_other(post_detail_path(post_id)))
}

async fn find_comment(state: &AppState, comment_id: Uuid) -> Result<Comment, AppError> {
    state
        .comments
        .find_by_id(comment_id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment"))
}

fn render(comment: Comment) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(CommentResponse::from(comment)))
}
