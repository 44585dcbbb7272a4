/// Request extractors for authentication and authorization
///
/// - `CurrentUser`: the visitor, logged in or not; never fails on a bad cookie
/// - `AuthenticatedUser`: requires a session, otherwise redirects to `/login`
/// - `AdminUser`: requires the admin account, otherwise answers 403
use crate::db::user_repo;
use crate::error::AppError;
use crate::flash::{self, FlashMessage};
use crate::models::User;
use crate::security::session::SESSION_COOKIE;
use crate::AppState;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::{header, StatusCode};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use futures::future::LocalBoxFuture;
use std::fmt;

/// The visitor behind a request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    user: Option<User>,
    admin_user_id: i64,
}

impl CurrentUser {
    pub fn anonymous(admin_user_id: i64) -> Self {
        Self {
            user: None,
            admin_user_id,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .map(|u| u.id == self.admin_user_id)
            .unwrap_or(false)
    }

    async fn load(req: HttpRequest) -> Result<Self, AppError> {
        let state = req
            .app_data::<web::Data<AppState>>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Application state not configured".to_string()))?;

        let mut viewer = Self::anonymous(state.admin_user_id);

        let Some(cookie) = req.cookie(SESSION_COOKIE) else {
            return Ok(viewer);
        };

        let user_id = match state.sessions.verify(cookie.value()) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session cookie");
                return Ok(viewer);
            }
        };

        viewer.user = user_repo::find_by_id(&state.db, user_id).await?;
        if viewer.user.is_none() {
            tracing::debug!(user_id, "Session refers to a missing user");
        }
        Ok(viewer)
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(Self::load(req))
    }
}

/// A logged-in user
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Raised when a page needs a session; answers with a redirect to the login page
#[derive(Debug)]
pub struct LoginRequired;

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access this page.";

impl fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "login required")
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        flash::redirect_with_messages("/login", &[FlashMessage::info(LOGIN_REQUIRED_MESSAGE)])
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let viewer = CurrentUser::load(req).await?;
            match viewer.user {
                Some(user) => Ok(AuthenticatedUser(user)),
                None => Err(LoginRequired.into()),
            }
        })
    }
}

/// The admin account; everyone else is refused with 403
#[derive(Debug, Clone)]
pub struct AdminUser {
    user: User,
    viewer: CurrentUser,
}

impl AdminUser {
    pub fn id(&self) -> i64 {
        self.user.id
    }

    /// The same visitor, for page rendering
    pub fn viewer(&self) -> &CurrentUser {
        &self.viewer
    }
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let path = req.path().to_string();
            let viewer = CurrentUser::load(req).await?;
            if viewer.is_admin() {
                if let Some(user) = viewer.user.clone() {
                    return Ok(AdminUser { user, viewer });
                }
            }

            tracing::warn!(
                user_id = viewer.user.as_ref().map(|u| u.id),
                path = %path,
                "Non-admin access to admin route refused"
            );
            Err(AppError::Forbidden(
                "You don't have permission to access this page.".to_string(),
            ))
        })
    }
}

/// Session cookie carrying a freshly issued token
pub fn session_cookie(state: &AppState, user_id: i64) -> Result<Cookie<'static>, AppError> {
    let token = state.sessions.issue(user_id)?;
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(state.sessions.secure());
    cookie.set_max_age(actix_web::cookie::time::Duration::seconds(
        state.sessions.ttl().num_seconds(),
    ));
    Ok(cookie)
}

/// Cookie that ends the session in the browser
pub fn session_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// 303 to `location` while setting `cookie`
pub fn redirect_with_cookie(location: &str, cookie: Cookie<'static>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .cookie(cookie)
        .finish()
}
