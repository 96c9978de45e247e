//! Profile pages and profile editing.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use scribe_core::pagination::{POSTS_PER_PAGE, paginate};
use scribe_core::ports::FeedFilter;
use scribe_core::validate;
use scribe_core::visibility::profile_feed;
use scribe_shared::ApiResponse;
use scribe_shared::dto::{PageResponse, PostResponse, ProfileForm, ProfilePageResponse};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::{PageQuery, profile_path, see_other};

/// GET /profile/{username}/ - the user's paginated feed. The owner
/// sees all of their posts, anyone else only the public-visible ones.
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let items = state.posts.feed(FeedFilter::by_author(user.id)).await?;
    let feed = profile_feed(items, user.id, viewer.user_id(), Utc::now());
    let page = paginate(feed, query.page(), POSTS_PER_PAGE);

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProfilePageResponse {
        profile: user.into(),
        page: PageResponse::<PostResponse>::from_page(page),
    })))
}

/// GET /profile/edit/ - own profile fields as a prefilled form.
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProfileForm {
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
    })))
}

/// POST /profile/edit/ - update own fields, redirect to the (possibly
/// renamed) profile.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProfileForm>,
) -> AppResult<HttpResponse> {
    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let form = body.into_inner();
    let errors = validate::profile_input(&form.username, &form.email);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    // Usernames are unique; a rename must not collide.
    if form.username != user.username
        && state.users.find_by_username(&form.username).await?.is_some()
    {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    user.username = form.username;
    user.email = form.email;
    user.first_name = form.first_name;
    user.last_name = form.last_name;
    user.updated_at = Utc::now();

    let saved = state.users.update(user).await?;

    Ok(see_other(profile_path(&saved.username)))
}
