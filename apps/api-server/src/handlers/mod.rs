//! HTTP handlers and route configuration.
//!
//! One explicit async fn per route; each mutation handler walks the
//! same ladder: authenticate (extractor) -> author gate -> validate ->
//! persist -> redirect.

mod auth;
mod categories;
mod comments;
mod health;
mod posts;
mod profiles;


use actix_web::{HttpResponse, http::header, web};
use serde::Deserialize;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login)),
        )
        .service(
            web::scope("/posts")
                .route("/create/", web::get().to(posts::create_form))
                .route("/create/", web::post().to(posts::create))
                .route("/{post_id}/", web::get().to(posts::detail))
                .route("/{post_id}/edit/", web::get().to(posts::edit_form))
                .route("/{post_id}/edit/", web::post().to(posts::update))
                .route("/{post_id}/delete/", web::get().to(posts::delete_form))
                .route("/{post_id}/delete/", web::post().to(posts::delete))
                .route("/{post_id}/comment/", web::post().to(comments::create))
                .route(
                    "/{post_id}/edit_comment/{comment_id}/",
                    web::get().to(comments::edit_form),
                )
                .route(
                    "/{post_id}/edit_comment/{comment_id}/",
                    web::post().to(comments::update),
                )
                .route(
                    "/{post_id}/delete_comment/{comment_id}/",
                    web::get().to(comments::delete_form),
                )
                .route(
                    "/{post_id}/delete_comment/{comment_id}/",
                    web::post().to(comments::delete),
                ),
        )
        .route("/category/{slug}/", web::get().to(categories::category_posts))
        .route("/profile/edit/", web::get().to(profiles::edit_form))
        .route("/profile/edit/", web::post().to(profiles::update))
        .route("/profile/{username}/", web::get().to(profiles::profile))
        .route("/", web::get().to(posts::index));
}

/// `?page=` on list endpoints. Garbage input behaves like page 1;
/// out-of-range numbers are clamped later by the paginator.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(1)
    }
}

/// The silent redirect: a plain 303 with a Location header and no body.
pub fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn post_detail_path(post_id: uuid::Uuid) -> String {
    format!("/posts/{post_id}/")
}

pub fn profile_path(username: &str) -> String {
    format!("/profile/{username}/")
}
