//! HTTP routes.
//!
//! | route                     | handler          |
//! |---------------------------|------------------|
//! | `GET /api/data`           | [`data`]         |
//! | `GET /api/system`         | [`system`]       |
//! | `POST /api/run-benchmark` | [`run_benchmark`]|
//! | anything else             | static files     |
//!
//! None of the API handlers return an error status: every failure is turned
//! into a default value where it happens.

mod response;
mod static_files;

pub use response::ApiJson;
pub use static_files::static_files;

use crate::benchmark::BenchmarkLauncher;
use crate::config::Config;
use crate::results;
use crate::types::{DashboardData, RunAck, RunRequest, SystemInfo};
use axum::Router;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use log::info;
use std::sync::Arc;

pub const DEFAULT_RUN_TYPE: &str = "baseline";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub launcher: BenchmarkLauncher,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let launcher = BenchmarkLauncher::new(&config.benchmark);
        Self {
            config: Arc::new(config),
            launcher,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/data", get(data).fallback(static_files))
        .route("/api/system", get(system).fallback(static_files))
        .route(
            "/api/run-benchmark",
            post(run_benchmark)
                .fallback(static_files)
                // Oversized bodies still get the default run, not a 413.
                .layer(DefaultBodyLimit::disable()),
        )
        .fallback(static_files)
        .with_state(state)
}

pub async fn data(State(state): State<AppState>) -> ApiJson<DashboardData> {
    ApiJson(results::load_dashboard_data(&state.config.results))
}

pub async fn system(State(state): State<AppState>) -> ApiJson<SystemInfo> {
    ApiJson(crate::system::system_info(&state.config.system.cpuinfo_path))
}

/// Body is parsed leniently: empty, non-JSON or type-less bodies all mean
/// `{"type": "baseline"}`.
pub async fn run_benchmark(State(state): State<AppState>, body: Bytes) -> ApiJson<RunAck> {
    let request: RunRequest = serde_json::from_slice(&body).unwrap_or_default();
    let kind = request
        .kind
        .unwrap_or_else(|| DEFAULT_RUN_TYPE.to_string());

    info!("[benchmark] {kind} run requested");
    // Detached: the handle is dropped and the run outlives this request.
    drop(state.launcher.trigger(&kind));

    ApiJson(RunAck::started(kind))
}
