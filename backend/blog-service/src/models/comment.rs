/// Comment model and the comment form
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub author_id: i64,
    pub post_id: i64,
    pub comment_text: String,
}

/// Comment joined with its author, as shown under a post
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentView {
    pub id: i64,
    pub post_id: i64,
    pub comment_text: String,
    pub author_name: String,
    pub author_email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CommentForm {
    #[validate(length(min = 1, message = "Please write a comment."))]
    pub comment: String,
}

impl CommentForm {
    pub fn normalized(mut self) -> Self {
        self.comment = self.comment.trim().to_string();
        self
    }
}
