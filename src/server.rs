use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::api::{
    self, ExtractRequest, ExtractResponse, FeatureSetsResponse, SimulateRequest, SimulateResponse,
};
use clip_sim::config::SimConfig;
use clip_sim::error::SimError;
use clip_sim::features::FeatureSetRegistry;
use clip_sim::predictor::AnyPredictor;
use clip_sim::simulation::SimulationRunner;

#[derive(Clone)]
struct AppState {
    config: Arc<SimConfig>,
    registry: Arc<FeatureSetRegistry>,
    predictor: Arc<AnyPredictor>,
}

pub async fn serve(args: crate::ServeArgs, config: SimConfig) -> Result<(), String> {
    let predictor = AnyPredictor::from_config(&config.predictor, args.offline)
        .map_err(|err| err.to_string())?;
    let state = AppState {
        registry: Arc::new(FeatureSetRegistry::with_defaults(&config)),
        predictor: Arc::new(predictor),
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/feature-sets", get(feature_sets_handler))
        .route("/api/extract", post(extract_handler))
        .route("/api/simulate", post(simulate_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;
    info!(%addr, "listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

async fn feature_sets_handler(State(state): State<AppState>) -> Json<FeatureSetsResponse> {
    Json(FeatureSetsResponse {
        feature_sets: state.registry.list(),
    })
}

async fn extract_handler(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, (StatusCode, String)> {
    api::extract(&state.registry, request, &state.config.pipeline)
        .map(Json)
        .map_err(error_response)
}

async fn simulate_handler(
    State(state): State<AppState>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, (StatusCode, String)> {
    let seed = request.seed.unwrap_or(42);
    let runner = SimulationRunner::new(&state.config, state.predictor.as_ref());
    let report = runner
        .run(&request.content, &request.scenarios, request.trials, seed)
        .await
        .map_err(error_response)?;
    Ok(Json(SimulateResponse { report }))
}

fn error_response(err: SimError) -> (StatusCode, String) {
    let status = match err {
        SimError::Validation(_) | SimError::Configuration(_) => StatusCode::BAD_REQUEST,
        SimError::Predictor(_) | SimError::NoCompletedTrials { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}
