/// Public pages and commenting
use crate::error::Result;
use crate::flash::{self, FlashMessage};
use crate::middleware::CurrentUser;
use crate::models::{form_errors, CommentForm, FormErrors};
use crate::services::{CommentService, PostService};
use crate::templates::Page;
use crate::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

pub const COMMENT_LOGIN_MESSAGE: &str = "You need to login or register to comment";

/// Home page: every post, newest first
pub async fn index(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: CurrentUser,
) -> Result<HttpResponse> {
    let posts = PostService::new(state.db.clone()).list_posts().await?;

    Page::new(&req, &viewer)
        .insert("all_posts", &posts)
        .respond(&state.templates, "index.html")
}

pub async fn about(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: CurrentUser,
) -> Result<HttpResponse> {
    Page::new(&req, &viewer).respond(&state.templates, "about.html")
}

pub async fn contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: CurrentUser,
) -> Result<HttpResponse> {
    Page::new(&req, &viewer).respond(&state.templates, "contact.html")
}

/// Single post with its comments and the comment form
pub async fn show_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: CurrentUser,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    render_post(
        &req,
        &state,
        &viewer,
        *post_id,
        &CommentForm::default(),
        &FormErrors::new(),
        StatusCode::OK,
    )
    .await
}

/// Add a comment to a post
pub async fn add_comment(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: CurrentUser,
    post_id: web::Path<i64>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();

    let Some(author) = viewer.user() else {
        return Ok(flash::redirect_with_flash(
            &req,
            "/login",
            FlashMessage::error(COMMENT_LOGIN_MESSAGE),
        ));
    };

    let form = form.into_inner().normalized();
    if let Err(errors) = form.validate() {
        return render_post(
            &req,
            &state,
            &viewer,
            post_id,
            &form,
            &form_errors(&errors),
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .await;
    }

    CommentService::new(state.db.clone())
        .create_comment(post_id, author.id, &form.comment)
        .await?;

    Ok(flash::redirect(&format!("/post/{}", post_id)))
}

async fn render_post(
    req: &HttpRequest,
    state: &AppState,
    viewer: &CurrentUser,
    post_id: i64,
    form: &CommentForm,
    errors: &FormErrors,
    status: StatusCode,
) -> Result<HttpResponse> {
    let post = PostService::new(state.db.clone()).get_post(post_id).await?;
    let comments = CommentService::new(state.db.clone())
        .get_post_comments(post_id)
        .await?;

    Page::new(req, viewer)
        .insert("post", &post)
        .insert("comments", &comments)
        .insert("form", form)
        .insert("errors", errors)
        .respond_with_status(&state.templates, "post.html", status)
}
