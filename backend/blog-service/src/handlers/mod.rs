/// HTTP handlers for the blog
///
/// This module contains handlers for:
/// - Pages: home, about, contact and single post (with commenting)
/// - Auth: register, login, logout
/// - Posts: admin create, edit, delete
/// - Comments: admin delete
/// - Health: liveness and readiness probes
pub mod auth;
pub mod comments;
pub mod health;
pub mod pages;
pub mod posts;

// Re-export handler functions at module level
pub use auth::{login, login_form, logout, register, register_form};
pub use comments::delete_comment;
pub use health::{health_summary, liveness_check};
pub use pages::{about, add_comment, contact, index, show_post};
pub use posts::{create_post, delete_post, edit_post_form, new_post_form, update_post};
