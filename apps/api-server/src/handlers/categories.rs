//! Category feed handler.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use scribe_core::pagination::{POSTS_PER_PAGE, paginate};
use scribe_core::ports::FeedFilter;
use scribe_core::visibility::public_feed;
use scribe_shared::ApiResponse;
use scribe_shared::dto::{CategoryPageResponse, PageResponse, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::PageQuery;

/// GET /category/{slug}/ - the paginated public feed of one published
/// category. An unpublished category is 404, whatever it contains.
pub async fn category_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let category = state
        .categories
        .find_by_slug(&slug)
        .await?
        .filter(|c| c.is_published)
        .ok_or_else(|| AppError::not_found("Category"))?;

    let items = state.posts.feed(FeedFilter::by_category(category.id)).await?;
    let feed = public_feed(items, Utc::now());
    let page = paginate(feed, query.page(), POSTS_PER_PAGE);

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CategoryPageResponse {
        category: category.into(),
        page: PageResponse::<PostResponse>::from_page(page),
    })))
}
