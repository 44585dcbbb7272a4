/// Data models for blog-service
///
/// This module defines structures for:
/// - User: Registered accounts
/// - Post: Blog posts authored by the admin
/// - Comment: Remarks left by logged-in visitors on a post
///
/// Row types derive `sqlx::FromRow`; form types derive `validator::Validate`
/// and are deserialized from `application/x-www-form-urlencoded` bodies.
pub mod comment;
pub mod post;
pub mod user;

pub use comment::{Comment, CommentForm, CommentView};
pub use post::{Post, PostForm, PostSummary};
pub use user::{LoginForm, RegisterForm, User};

use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Per-field error messages handed to templates
pub type FormErrors = BTreeMap<String, Vec<String>>;

/// Flatten validator errors into `field -> messages`
pub fn form_errors(errors: &ValidationErrors) -> FormErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Single-field error, for checks done outside the validator (e.g. duplicate title)
pub fn field_error(field: &str, message: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.insert(field.to_string(), vec![message.to_string()]);
    errors
}
