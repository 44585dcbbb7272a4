/// Registration, login and logout
use crate::error::Result;
use crate::flash::{self, FlashMessage};
use crate::middleware::{self, AuthenticatedUser, CurrentUser};
use crate::models::{form_errors, FormErrors, LoginForm, RegisterForm};
use crate::services::{AuthService, LoginOutcome, RegisterOutcome};
use crate::templates::Page;
use crate::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Password does not match.";
pub const EMAIL_TAKEN_MESSAGE: &str = "You already signed up with this email. Login instead";
pub const UNKNOWN_EMAIL_MESSAGE: &str = "That email does not exist, please try again.";
pub const WRONG_PASSWORD_MESSAGE: &str = "Password incorrect, please try again.";

pub async fn register_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: CurrentUser,
) -> Result<HttpResponse> {
    Page::new(&req, &viewer)
        .insert("form", &RegisterForm::default())
        .insert("errors", &FormErrors::new())
        .respond(&state.templates, "register.html")
}

pub async fn register(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: CurrentUser,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner().normalized();
    if let Err(errors) = form.validate() {
        return Page::new(&req, &viewer)
            .insert("form", &form)
            .insert("errors", &form_errors(&errors))
            .respond_with_status(
                &state.templates,
                "register.html",
                StatusCode::UNPROCESSABLE_ENTITY,
            );
    }

    match AuthService::new(state.db.clone()).register(&form).await? {
        RegisterOutcome::PasswordMismatch => Ok(flash::redirect_with_flash(
            &req,
            "/register",
            FlashMessage::error(PASSWORD_MISMATCH_MESSAGE),
        )),
        RegisterOutcome::EmailTaken => Ok(flash::redirect_with_flash(
            &req,
            "/login",
            FlashMessage::error(EMAIL_TAKEN_MESSAGE),
        )),
        RegisterOutcome::Registered(user) => {
            let cookie = middleware::session_cookie(&state, user.id)?;
            Ok(middleware::redirect_with_cookie("/", cookie))
        }
    }
}

pub async fn login_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: CurrentUser,
) -> Result<HttpResponse> {
    Page::new(&req, &viewer)
        .insert("form", &LoginForm::default())
        .insert("errors", &FormErrors::new())
        .respond(&state.templates, "login.html")
}

pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: CurrentUser,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner().normalized();
    if let Err(errors) = form.validate() {
        return Page::new(&req, &viewer)
            .insert("form", &form)
            .insert("errors", &form_errors(&errors))
            .respond_with_status(&state.templates, "login.html", StatusCode::UNPROCESSABLE_ENTITY);
    }

    match AuthService::new(state.db.clone()).login(&form).await? {
        LoginOutcome::UnknownEmail => Ok(flash::redirect_with_flash(
            &req,
            "/login",
            FlashMessage::error(UNKNOWN_EMAIL_MESSAGE),
        )),
        LoginOutcome::WrongPassword => Ok(flash::redirect_with_flash(
            &req,
            "/login",
            FlashMessage::error(WRONG_PASSWORD_MESSAGE),
        )),
        LoginOutcome::LoggedIn(user) => {
            let cookie = middleware::session_cookie(&state, user.id)?;
            Ok(middleware::redirect_with_cookie("/", cookie))
        }
    }
}

pub async fn logout(user: AuthenticatedUser) -> HttpResponse {
    tracing::info!(user_id = user.0.id, "User logged out");
    middleware::redirect_with_cookie("/", middleware::session_removal_cookie())
}
