/// Admin post management
use crate::error::{AppError, Result};
use crate::flash;
use crate::middleware::{AdminUser, CurrentUser};
use crate::models::{field_error, form_errors, FormErrors, PostForm};
use crate::services::PostService;
use crate::templates::Page;
use crate::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

pub async fn new_post_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    admin: AdminUser,
) -> Result<HttpResponse> {
    render_editor(
        &req,
        &state,
        admin.viewer(),
        None,
        &PostForm::default(),
        &FormErrors::new(),
        StatusCode::OK,
    )
}

pub async fn create_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    admin: AdminUser,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner().normalized();
    if let Err(errors) = form.validate() {
        return render_editor(
            &req,
            &state,
            admin.viewer(),
            None,
            &form,
            &form_errors(&errors),
            StatusCode::UNPROCESSABLE_ENTITY,
        );
    }

    match PostService::new(state.db.clone())
        .create_post(admin.id(), &form)
        .await
    {
        Ok(_) => Ok(flash::redirect("/")),
        Err(AppError::Conflict(msg)) => render_editor(
            &req,
            &state,
            admin.viewer(),
            None,
            &form,
            &field_error("title", &msg),
            StatusCode::CONFLICT,
        ),
        Err(e) => Err(e),
    }
}

pub async fn edit_post_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    admin: AdminUser,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let post = PostService::new(state.db.clone()).get_post(*post_id).await?;

    render_editor(
        &req,
        &state,
        admin.viewer(),
        Some(post.id),
        &PostForm::from(&post),
        &FormErrors::new(),
        StatusCode::OK,
    )
}

pub async fn update_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    admin: AdminUser,
    post_id: web::Path<i64>,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();
    let form = form.into_inner().normalized();
    if let Err(errors) = form.validate() {
        return render_editor(
            &req,
            &state,
            admin.viewer(),
            Some(post_id),
            &form,
            &form_errors(&errors),
            StatusCode::UNPROCESSABLE_ENTITY,
        );
    }

    match PostService::new(state.db.clone())
        .update_post(post_id, &form)
        .await
    {
        Ok(()) => Ok(flash::redirect(&format!("/post/{}", post_id))),
        Err(AppError::Conflict(msg)) => render_editor(
            &req,
            &state,
            admin.viewer(),
            Some(post_id),
            &form,
            &field_error("title", &msg),
            StatusCode::CONFLICT,
        ),
        Err(e) => Err(e),
    }
}

pub async fn delete_post(
    state: web::Data<AppState>,
    _admin: AdminUser,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    PostService::new(state.db.clone())
        .delete_post(*post_id)
        .await?;

    Ok(flash::redirect("/"))
}

fn render_editor(
    req: &HttpRequest,
    state: &AppState,
    viewer: &CurrentUser,
    post_id: Option<i64>,
    form: &PostForm,
    errors: &FormErrors,
    status: StatusCode,
) -> Result<HttpResponse> {
    Page::new(req, viewer)
        .insert("is_edit", &post_id.is_some())
        .insert("post_id", &post_id)
        .insert("form", form)
        .insert("errors", errors)
        .respond_with_status(&state.templates, "make-post.html", status)
}
