/// Template rendering
///
/// Wraps a shared `tera::Tera` instance and builds the context every page
/// needs (viewer, admin flag, footer year, pending flash messages).
use crate::error::Result;
use crate::flash::{self, FlashMessage};
use crate::middleware::CurrentUser;
use crate::models::user::UserView;
use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpRequest, HttpResponse};
use chrono::{Datelike, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tera::{Context, Tera, Value};

const GRAVATAR_SIZE: u32 = 100;

#[derive(Clone)]
pub struct Templates {
    tera: Arc<Tera>,
}

impl Templates {
    /// Load every template under `dir`
    pub fn load(dir: &Path) -> std::result::Result<Self, tera::Error> {
        let pattern = format!("{}/**/*.html", dir.display());
        let mut tera = Tera::new(&pattern)?;
        tera.register_filter("gravatar", gravatar_filter);

        tracing::info!(
            templates = tera.get_template_names().count(),
            "Loaded templates from {}",
            dir.display()
        );

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render(&self, name: &str, ctx: &Context) -> Result<String> {
        Ok(self.tera.render(name, ctx)?)
    }
}

/// Context for one page render
///
/// Creating a `Page` consumes the pending flash messages; `respond` clears the
/// flash cookie when there were any.
pub struct Page {
    ctx: Context,
    consumed_flash: bool,
}

impl Page {
    pub fn new(req: &HttpRequest, viewer: &CurrentUser) -> Self {
        let flashes: Vec<FlashMessage> = flash::peek(req);
        let consumed_flash = !flashes.is_empty();

        let mut ctx = Context::new();
        ctx.insert("logged_in", &viewer.is_authenticated());
        ctx.insert("is_admin", &viewer.is_admin());
        ctx.insert("current_user", &viewer.user().map(UserView::from));
        ctx.insert("year", &Utc::now().year());
        ctx.insert("flashes", &flashes);

        Self {
            ctx,
            consumed_flash,
        }
    }

    pub fn insert<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.ctx.insert(key, value);
        self
    }

    pub fn respond(self, templates: &Templates, name: &str) -> Result<HttpResponse> {
        self.respond_with_status(templates, name, StatusCode::OK)
    }

    pub fn respond_with_status(
        self,
        templates: &Templates,
        name: &str,
        status: StatusCode,
    ) -> Result<HttpResponse> {
        let body = templates.render(name, &self.ctx)?;

        let mut builder = HttpResponse::build(status);
        builder.content_type(ContentType::html());
        if self.consumed_flash {
            builder.cookie(flash::removal_cookie());
        }
        Ok(builder.body(body))
    }
}

/// Gravatar image URL for an email address
pub fn gravatar_url(email: &str, size: u32) -> String {
    let digest = md5::compute(email.trim().to_lowercase().as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{:x}?s={}&d=retro&r=g",
        digest, size
    )
}

/// `{{ comment.author_email | gravatar }}` or `{{ email | gravatar(size=48) }}`
fn gravatar_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let email = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("gravatar filter expects a string"))?;
    let size = args
        .get("size")
        .and_then(Value::as_u64)
        .map(|s| s as u32)
        .unwrap_or(GRAVATAR_SIZE);

    Ok(Value::String(gravatar_url(email, size)))
}
