//! HTTP server for the gateway API.
//!
//! # API Endpoints
//!
//! | Method | Path                    | Description                    |
//! |--------|-------------------------|--------------------------------|
//! | GET    | `/health`               | Health check                   |
//! | GET    | `/api/status`           | Storage nodes                  |
//! | GET    | `/api/files`            | Known files                    |
//! | GET    | `/api/files/{filename}` | Read one file                  |
//! | POST   | `/api/files`            | Write one file                 |
//! | GET    | `/api/logs`             | Operator log, oldest first     |

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, Method},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use super::types::{
    FilesResponse, LogsResponse, ReadResponse, StatusResponse, WriteRequest, WriteResponse,
};
use crate::cluster::ClusterClient;
use crate::error::{GatewayError, GatewayResult};
use crate::topology::Topology;

/// Shared gateway state.
pub type GatewayState = Arc<RwLock<ClusterClient>>;

/// Fresh state for `topology`, with the startup line already logged.
pub fn new_state(topology: Topology) -> GatewayState {
    let mut client = ClusterClient::new(topology);
    client.log("Web Client Started");
    Arc::new(RwLock::new(client))
}

/// Build the router over `state`.
pub fn router(state: GatewayState) -> Router {
    // Permissive CORS: the console is served from another origin in development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/status", get(status))
        .route("/api/files", get(list_files).post(write_file))
        .route("/api/files/{filename}", get(read_file))
        .route("/api/logs", get(logs))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(port: u16, topology: Topology) -> GatewayResult<()> {
    let app = router(new_state(topology));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 DFS gateway running on http://localhost:{}", port);
    println!("   GET  /api/status            - Storage nodes");
    println!("   GET  /api/files             - File list");
    println!("   GET  /api/files/{{filename}}  - Read file");
    println!("   POST /api/files             - Write file");
    println!("   GET  /api/logs              - Operator log");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "dfs-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn status(State(state): State<GatewayState>) -> Json<StatusResponse> {
    let client = state.read().await;
    Json(StatusResponse {
        status: "Online".to_string(),
        servers: client.topology().servers().to_vec(),
    })
}

async fn list_files(State(state): State<GatewayState>) -> Json<FilesResponse> {
    let client = state.read().await;
    Json(FilesResponse { files: client.topology().files() })
}

async fn read_file(
    State(state): State<GatewayState>,
    Path(filename): Path<String>,
) -> GatewayResult<Json<ReadResponse>> {
    let outcome = state.write().await.read(&filename)?;
    Ok(Json(ReadResponse::new(filename, outcome)))
}

async fn write_file(
    State(state): State<GatewayState>,
    body: Result<Json<WriteRequest>, JsonRejection>,
) -> GatewayResult<Json<WriteResponse>> {
    let Json(request) = body.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    state.write().await.write(&request.filename, &request.content)?;
    Ok(Json(WriteResponse::committed()))
}

async fn logs(State(state): State<GatewayState>) -> Json<LogsResponse> {
    let client = state.read().await;
    Json(LogsResponse { logs: client.logs() })
}
