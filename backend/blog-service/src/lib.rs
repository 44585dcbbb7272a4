/// Blog Service Library
///
/// A small personal blog: visitors register and log in, the admin writes,
/// edits and deletes posts, and logged-in visitors comment on posts.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Row and form types for users, posts, comments
/// - `services`: Business logic layer
/// - `db`: Connection pool, migrations and repositories
/// - `middleware`: Session and admin extractors
/// - `security`: Password hashing and session tokens
/// - `templates`: Tera rendering and shared page context
/// - `flash`: One-shot messages across redirects
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod security;
pub mod services;
pub mod templates;

pub use config::Config;
pub use error::{AppError, Result};

use actix_web::web;
use security::SessionKeys;
use sqlx::SqlitePool;
use templates::Templates;

/// Shared application state, registered as `web::Data<AppState>`
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub templates: Templates,
    pub sessions: SessionKeys,
    pub admin_user_id: i64,
}

impl AppState {
    /// Connect, migrate and load templates
    pub async fn build(config: &Config) -> anyhow::Result<Self> {
        let db = db::create_pool(&config.database).await?;
        db::run_migrations(&db).await?;
        let templates = Templates::load(&config.site.templates_dir)?;

        Ok(Self {
            db,
            templates,
            sessions: SessionKeys::new(&config.session),
            admin_user_id: config.site.admin_user_id,
        })
    }
}

/// Register every blog route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use handlers::*;

    cfg.route("/", web::get().to(index))
        .route("/about", web::get().to(about))
        .route("/contact", web::get().to(contact))
        .service(
            web::resource("/register")
                .route(web::get().to(register_form))
                .route(web::post().to(register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(login_form))
                .route(web::post().to(login)),
        )
        .route("/logout", web::get().to(logout))
        .service(
            web::resource("/post/{post_id}")
                .route(web::get().to(show_post))
                .route(web::post().to(add_comment)),
        )
        .service(
            web::resource("/new-post")
                .route(web::get().to(new_post_form))
                .route(web::post().to(create_post)),
        )
        .service(
            web::resource("/edit-post/{post_id}")
                .route(web::get().to(edit_post_form))
                .route(web::post().to(update_post)),
        )
        .service(
            web::resource("/delete/{post_id}")
                .route(web::get().to(delete_post))
                .route(web::post().to(delete_post)),
        )
        .service(
            web::resource(r"/{post_id:\d+}/delete-comment/{comment_id}")
                .route(web::get().to(delete_comment))
                .route(web::post().to(delete_comment)),
        )
        .service(
            web::scope("/api/v1/health")
                .route("", web::get().to(health_summary))
                .route("/live", web::get().to(liveness_check)),
        );
}
