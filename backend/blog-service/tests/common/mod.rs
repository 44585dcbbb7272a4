//! Shared fixtures for the HTTP integration tests
//!
//! Every test gets its own in-memory SQLite database, so tests never see
//! each other's rows.

#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test;
use blog_service::db::user_repo;
use blog_service::middleware;
use blog_service::models::{PostForm, User};
use blog_service::security::password::hash_password;
use blog_service::services::{CommentService, PostService};
use blog_service::{AppState, Config};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const READER_EMAIL: &str = "reader@example.com";
pub const PASSWORD: &str = "correct horse battery staple";

/// Build an actix test service around `state` with every blog route
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.clone()))
                .configure(blog_service::configure_routes),
        )
        .await
    };
}

pub async fn test_state() -> AppState {
    AppState::build(&Config::default())
        .await
        .expect("test state should build")
}

pub async fn create_user(state: &AppState, name: &str, email: &str) -> User {
    let hash = hash_password(PASSWORD).expect("hash password");
    user_repo::create_user(&state.db, email, name, &hash)
        .await
        .expect("create user")
}

/// The first account created gets id 1 and is therefore the admin
pub async fn create_admin(state: &AppState) -> User {
    let admin = create_user(state, "Admin", ADMIN_EMAIL).await;
    assert_eq!(admin.id, state.admin_user_id);
    admin
}

pub async fn create_post(state: &AppState, author_id: i64, title: &str) -> i64 {
    PostService::new(state.db.clone())
        .create_post(author_id, &post_form(title))
        .await
        .expect("create post")
}

pub async fn create_comment(state: &AppState, post_id: i64, author_id: i64, text: &str) -> i64 {
    CommentService::new(state.db.clone())
        .create_comment(post_id, author_id, text)
        .await
        .expect("create comment")
        .id
}

pub fn post_form(title: &str) -> PostForm {
    PostForm {
        title: title.to_string(),
        subtitle: format!("{} subtitle", title),
        img_url: "https://images.example.com/cover.jpg".to_string(),
        body: format!("<p>{} body</p>", title),
    }
}

/// Session cookie for `user`, as issued on login
pub fn session_for(state: &AppState, user: &User) -> Cookie<'static> {
    middleware::session_cookie(state, user.id).expect("issue session")
}

pub fn cookie_named<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_string(resp: ServiceResponse) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
