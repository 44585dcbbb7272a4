/// Admin comment moderation
use crate::error::Result;
use crate::flash;
use crate::middleware::AdminUser;
use crate::services::CommentService;
use crate::AppState;
use actix_web::{web, HttpResponse};

/// Delete a comment and go back to its post
pub async fn delete_comment(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    CommentService::new(state.db.clone())
        .delete_comment(post_id, comment_id)
        .await?;

    Ok(flash::redirect(&format!("/post/{}", post_id)))
}
