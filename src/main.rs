use anyhow::Context;
use axum::{
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

mod config;
mod dto;
mod error;
mod handlers;
mod models;
mod services;


use config::Config;
use services::insight_calculator::InsightCalculator;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub calculator: Arc<InsightCalculator>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let calculator = InsightCalculator::new(config.policy.clone());
        Self {
            config: Arc::new(config),
            calculator: Arc::new(calculator),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodmate_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env().context("Invalid insight policy configuration")?;
    let addr = config.listen_addr();

    tracing::info!(
        version = config.policy.version.as_str(),
        min_entries = config.policy.min_entries,
        positive_threshold = config.policy.strong_positive_threshold,
        negative_threshold = config.policy.strong_negative_threshold,
        "Insight policy loaded"
    );

    let app = build_router(AppState::new(config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    let api_routes = Router::new()
        .route("/api/v1/analyze_mood", post(handlers::analysis::analyze_mood))
        .route("/api/v1/analyze_entry", post(handlers::analysis::analyze_entry))
        .route("/api/v1/policy", get(handlers::analysis::get_policy));

    let public_routes = Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
            tracing::info_span!(
                "request",
                request_id = %Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri()
            )
        }))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    let allowed: Vec<axum::http::HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<axum::http::HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(allowed)
    }
}
