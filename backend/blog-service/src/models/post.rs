/// Blog post model and the admin post form
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Display format of `blog_posts.date`, e.g. "October 19, 2026"
pub const POST_DATE_FORMAT: &str = "%B %d, %Y";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub author_id: Option<i64>,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    /// Admin-authored HTML
    pub body: String,
    pub img_url: String,
    /// Joined from `users.name`
    pub author_name: Option<String>,
}

/// Row used by the index page
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub author_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PostForm {
    #[validate(length(min = 1, message = "Please enter a title."))]
    pub title: String,
    #[validate(length(min = 1, message = "Please enter a subtitle."))]
    pub subtitle: String,
    #[validate(
        length(min = 1, message = "Please enter an image URL."),
        url(message = "Invalid URL.")
    )]
    pub img_url: String,
    #[validate(length(min = 1, message = "Please write some content."))]
    pub body: String,
}

impl PostForm {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.subtitle = self.subtitle.trim().to_string();
        self.img_url = self.img_url.trim().to_string();
        if self.body.trim().is_empty() {
            self.body.clear();
        }
        self
    }
}

impl From<&Post> for PostForm {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            img_url: post.img_url.clone(),
            body: post.body.clone(),
        }
    }
}
