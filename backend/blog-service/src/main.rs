use actix_files::Files;
use actix_web::{web, App, HttpServer};
use blog_service::{configure_routes, AppState, Config};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Blog Service
///
/// Serves the personal blog: public pages, registration and login,
/// admin post management and comments.
///
/// # Routes
///
/// - `/`, `/about`, `/contact`, `/post/{id}` - public pages (POST on a post adds a comment)
/// - `/register`, `/login`, `/logout` - accounts and sessions
/// - `/new-post`, `/edit-post/{id}`, `/delete/{id}`, `/{post}/delete-comment/{id}` - admin only
/// - `/api/v1/health` - health probes
///
/// Runs on port 8000 by default (configurable via BLOG_SERVICE_PORT).
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Support container healthchecks via CLI subcommand: `healthcheck`
    if let Some(cmd) = std::env::args().nth(1) {
        if cmd == "healthcheck" || cmd == "healthcheck-http" {
            return healthcheck().await;
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let state = match AppState::build(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Application state initialization failed: {:#}", e);
            eprintln!("ERROR: Failed to initialize blog-service: {:#}", e);
            std::process::exit(1);
        }
    };

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let state = web::Data::new(state);
    let static_dir = config.site.static_dir.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .service(Files::new("/static", static_dir.clone()))
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    tracing::info!("blog-service shut down");
    Ok(())
}

async fn healthcheck() -> io::Result<()> {
    let port = std::env::var("BLOG_SERVICE_PORT").unwrap_or_else(|_| "8000".to_string());
    let url = format!("http://127.0.0.1:{}/api/v1/health", port);

    match reqwest::Client::new().get(&url).send().await {
        Ok(resp) if resp.status().is_success() => Ok(()),
        Ok(resp) => {
            eprintln!("healthcheck HTTP status: {}", resp.status());
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"))
        }
        Err(e) => {
            eprintln!("healthcheck HTTP error: {}", e);
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"))
        }
    }
}
