use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use crate_optimizer::manifest::{self, ManifestLine};
use crate_optimizer::solver::Solver;
use crate_optimizer::types::Crate;
use crate_optimizer::{Config, ManifestError};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct PackRequest {
    #[serde(default)]
    config: Config,
    items: Vec<ManifestLine>,
}

#[derive(Serialize)]
struct PackResponse {
    crates: Vec<Crate>,
    crate_count: usize,
    placed_count: usize,
    total_weight: f64,
    wood_usage: f64,
    board_count: u32,
    error: Option<String>,
}

async fn pack(Json(req): Json<PackRequest>) -> Result<Json<PackResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /pack"
    );

    req.config
        .validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    if req.items.is_empty() {
        return Err((StatusCode::BAD_REQUEST, ManifestError::Empty.to_string()));
    }
    for line in &req.items {
        line.validate().map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    }

    let solver = Solver::new(req.config, manifest::expand(&req.items));
    let solution = solver.solve();

    if let Some(e) = &solution.error {
        tracing::warn!(error = %e, crates = solution.crate_count(), "packing incomplete");
    }

    let response = PackResponse {
        crate_count: solution.crate_count(),
        placed_count: solution.placed_count(),
        total_weight: solution.total_weight(),
        wood_usage: solution.total_wood_usage(),
        board_count: solution.total_boards(),
        error: solution.error.as_ref().map(|e| e.to_string()),
        crates: solution.crates,
    };

    Ok(Json(response))
}

#[tokio::main]
async fn main() {
    let _sentry = sentry::init(sentry::ClientOptions {
        dsn: std::env::var("SENTRY_DSN").ok().and_then(|d| d.parse().ok()),
        release: sentry::release_name!(),
        ..Default::default()
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/pack", post(pack))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
