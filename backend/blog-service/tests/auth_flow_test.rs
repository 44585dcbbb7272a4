#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use blog_service::db::user_repo;
use blog_service::flash::FLASH_COOKIE_NAME;
use blog_service::handlers::auth::{
    EMAIL_TAKEN_MESSAGE, PASSWORD_MISMATCH_MESSAGE, UNKNOWN_EMAIL_MESSAGE, WRONG_PASSWORD_MESSAGE,
};
use blog_service::middleware::LOGIN_REQUIRED_MESSAGE;
use blog_service::security::session::SESSION_COOKIE;
use common::*;

fn register_form<'a>(
    name: &'a str,
    email: &'a str,
    password: &'a str,
    confirm: &'a str,
) -> Vec<(&'static str, &'a str)> {
    vec![
        ("name", name),
        ("email", email),
        ("password", password),
        ("confirm_password", confirm),
    ]
}

#[actix_web::test]
async fn test_register_logs_in_and_redirects_home() {
    let state = test_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form(register_form("Ada", " Ada@Example.com ", PASSWORD, PASSWORD))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let session = cookie_named(&resp, SESSION_COOKIE).expect("session cookie");
    assert!(session.http_only().unwrap_or(false));

    let stored = user_repo::find_by_email(&state.db, "ada@example.com")
        .await
        .unwrap()
        .expect("user stored with normalized email");
    assert_ne!(stored.password, PASSWORD);

    // The new session shows the logout link
    let req = test::TestRequest::get().uri("/").cookie(session).to_request();
    let body = body_string(test::call_service(&app, req).await).await;
    assert!(body.contains("Log Out"));
}

#[actix_web::test]
async fn test_register_password_mismatch() {
    let state = test_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form(register_form("Ada", "ada@example.com", PASSWORD, "different"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/register");
    assert!(cookie_named(&resp, SESSION_COOKIE).is_none());
    assert!(!user_repo::email_exists(&state.db, "ada@example.com").await.unwrap());

    let flash = cookie_named(&resp, FLASH_COOKIE_NAME).expect("flash cookie");
    let req = test::TestRequest::get().uri("/register").cookie(flash).to_request();
    let resp = test::call_service(&app, req).await;

    // Showing the message clears it
    let cleared = cookie_named(&resp, FLASH_COOKIE_NAME).expect("removal cookie");
    assert_eq!(cleared.value(), "");
    assert!(body_string(resp).await.contains(PASSWORD_MISMATCH_MESSAGE));
}

#[actix_web::test]
async fn test_register_duplicate_email_redirects_to_login() {
    let state = test_state().await;
    create_user(&state, "Reader", READER_EMAIL).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form(register_form("Other", "READER@example.com", PASSWORD, PASSWORD))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let flash = cookie_named(&resp, FLASH_COOKIE_NAME).expect("flash cookie");
    let req = test::TestRequest::get().uri("/login").cookie(flash).to_request();
    let body = body_string(test::call_service(&app, req).await).await;
    assert!(body.contains(EMAIL_TAKEN_MESSAGE));
}

#[actix_web::test]
async fn test_register_missing_fields_rerenders_form() {
    let state = test_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form(register_form("", "not-an-email", "", ""))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(resp).await;
    assert!(body.contains("Please enter your full name."));
    assert!(body.contains("Invalid email address."));
    assert!(body.contains("not-an-email"));
}

#[actix_web::test]
async fn test_login_success_and_failures() {
    let state = test_state().await;
    create_user(&state, "Reader", READER_EMAIL).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form(vec![("email", "nobody@example.com"), ("password", PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/login");
    let flash = cookie_named(&resp, FLASH_COOKIE_NAME).unwrap();
    let req = test::TestRequest::get().uri("/login").cookie(flash).to_request();
    let body = body_string(test::call_service(&app, req).await).await;
    assert!(body.contains(UNKNOWN_EMAIL_MESSAGE));

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form(vec![("email", READER_EMAIL), ("password", "wrong password")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/login");
    assert!(cookie_named(&resp, SESSION_COOKIE).is_none());
    let flash = cookie_named(&resp, FLASH_COOKIE_NAME).unwrap();
    let req = test::TestRequest::get().uri("/login").cookie(flash).to_request();
    let body = body_string(test::call_service(&app, req).await).await;
    assert!(body.contains(WRONG_PASSWORD_MESSAGE));

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form(vec![("email", "Reader@Example.com"), ("password", PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    assert!(cookie_named(&resp, SESSION_COOKIE).is_some());
}

#[actix_web::test]
async fn test_logout_clears_session() {
    let state = test_state().await;
    let reader = create_user(&state, "Reader", READER_EMAIL).await;
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/logout")
        .cookie(session_for(&state, &reader))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let removal = cookie_named(&resp, SESSION_COOKIE).expect("removal cookie");
    assert_eq!(removal.value(), "");
}

#[actix_web::test]
async fn test_logout_without_session_asks_for_login() {
    let state = test_state().await;
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let flash = cookie_named(&resp, FLASH_COOKIE_NAME).unwrap();
    let req = test::TestRequest::get().uri("/login").cookie(flash).to_request();
    let body = body_string(test::call_service(&app, req).await).await;
    assert!(body.contains(LOGIN_REQUIRED_MESSAGE));
}

#[actix_web::test]
async fn test_tampered_session_is_anonymous() {
    let state = test_state().await;
    let reader = create_user(&state, "Reader", READER_EMAIL).await;
    let app = init_app!(state);

    let mut cookie = session_for(&state, &reader);
    cookie.set_value(format!("{}x", cookie.value()));

    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Login"));
    assert!(!body.contains("Log Out"));
}
