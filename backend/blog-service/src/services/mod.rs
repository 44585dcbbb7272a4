/// Business logic layer for blog-service
///
/// This module provides high-level operations:
/// - Auth service: registration and credential checks
/// - Post service: listing, reading and admin management of posts
/// - Comment service: adding and moderating comments
pub mod auth;
pub mod comments;
pub mod posts;

pub use auth::{AuthService, LoginOutcome, RegisterOutcome};
pub use comments::CommentService;
pub use posts::PostService;
