mod db;
mod handlers;
mod models;
mod scrape;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct AppState {
    pub db_pool: PgPool,
}

/// Areas scraped when the AREAS env var is unset: DC group study, DP group
/// study, DC single study. The Cambridge campus is omitted.
const DEFAULT_AREAS: &[u32] = &[2, 8, 7];

const DEFAULT_BASE_URL: &str = "https://bookings.lib.uwaterloo.ca";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomcast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set")?;

    // Set up database
    tracing::info!("Connecting to database");
    let db_pool = db::create_pool(&database_url).await
        .context("Failed to create database pool")?;

    // Run migrations
    tracing::info!("Running database migrations");
    db::run_migrations(&db_pool).await
        .context("Failed to run migrations")?;

    let mode = std::env::args().nth(1).unwrap_or_else(|| "serve".to_string());
    match mode.as_str() {
        "scrape" => run_scrape(db_pool).await,
        "serve" => run_server(db_pool).await,
        other => anyhow::bail!("Unknown mode: `{}`. Use `scrape` or `serve`.", other),
    }
}

/// One scrape run, intended for cron: 7 days x all configured areas, then
/// a single all-or-nothing upsert of the condensed batch. Storage failure
/// is the only fatal error; failed pairs are skipped inside the run.
async fn run_scrape(db_pool: PgPool) -> Result<()> {
    let base_url = std::env::var("BOOKING_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let areas = load_areas()?;

    let client = scrape::BookingClient::new(base_url);
    let today = chrono::Local::now().date_naive();

    tracing::info!("Starting scrape run for areas {:?} from {}", areas, today);
    let rooms = scrape::run(&client, &areas, today).await;

    if rooms.is_empty() {
        tracing::warn!("Scrape run produced no rooms, nothing to persist");
        return Ok(());
    }

    let repo = db::room::RoomRepository::new(db_pool);
    repo.upsert_all(&rooms).await
        .context("Failed to persist scraped rooms")?;

    tracing::info!("Scrape run complete, persisted {} rooms", rooms.len());
    Ok(())
}

/// Long-running read API over the stored room collection.
async fn run_server(db_pool: PgPool) -> Result<()> {
    let host = std::env::var("HOST")
        .unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .context("Invalid PORT")?;

    let state = Arc::new(AppState { db_pool });

    // Browsers hit this cross-origin; the collection is public read-only data
    let app = Router::new()
        .route("/", get(handlers::list_rooms))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Comma-separated AREAS env var, falling back to the default set.
fn load_areas() -> Result<Vec<u32>> {
    match std::env::var("AREAS") {
        Ok(raw) => {
            let mut areas = Vec::new();
            for part in raw.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                let area = part.parse::<u32>()
                    .with_context(|| format!("Invalid area id in AREAS: {:?}", part))?;
                areas.push(area);
            }
            if areas.is_empty() {
                anyhow::bail!("AREAS is set but contains no area ids");
            }
            Ok(areas)
        }
        Err(_) => Ok(DEFAULT_AREAS.to_vec()),
    }
}
