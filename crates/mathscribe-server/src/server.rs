//! HTTP server exposing the recognition and solving endpoints.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use mathscribe_core::{
    Error, HealthResponse, RecognizeResponse, Result, SolveRequest,
};
use mathscribe_ocr::Recognizer;

use crate::solver;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Enable CORS.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:5000".parse().unwrap(),
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Creates a new server config builder.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    addr: Option<SocketAddr>,
    cors: Option<bool>,
}

impl ServerConfigBuilder {
    /// Sets the listen address.
    #[must_use]
    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    /// Sets whether CORS is enabled.
    #[must_use]
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors = Some(enabled);
        self
    }

    /// Builds the server config.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            addr: self
                .addr
                .unwrap_or_else(|| "0.0.0.0:5000".parse().unwrap()),
            cors: self.cors.unwrap_or(true),
        }
    }
}

/// Shared application state.
///
/// The recognizer is constructed once at startup and injected here;
/// request handlers only ever read through the shared handle.
pub struct AppState {
    /// The recognition engine.
    pub recognizer: Arc<dyn Recognizer>,
    /// Server configuration.
    pub config: ServerConfig,
    /// Server start time.
    pub start_time: Instant,
}

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Creates a new server around a loaded recognition engine.
    pub fn new(config: ServerConfig, recognizer: Arc<dyn Recognizer>) -> Self {
        let state = Arc::new(AppState {
            recognizer,
            config: config.clone(),
            start_time: Instant::now(),
        });
        Self { config, state }
    }

    /// Creates the router. Exposed so tests can drive the full HTTP
    /// surface in process.
    #[must_use]
    pub fn router(&self) -> Router {
        let mut router = Router::new()
            .route("/", get(index))
            .route("/predict", post(predict))
            .route("/solve", post(solve))
            .route("/health", get(health))
            .with_state(self.state.clone());

        router = router.layer(TraceLayer::new_for_http());

        if self.config.cors {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }

    /// Runs the server until ctrl-c or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot start.
    pub async fn run(self) -> Result<()> {
        let router = self.router();

        tracing::info!(addr = %self.config.addr, "Starting Mathscribe server");

        let listener = tokio::net::TcpListener::bind(self.config.addr)
            .await
            .map_err(Error::Io)?;

        let shutdown_signal = async {
            let ctrl_c = async {
                tokio::signal::ctrl_c()
                    .await
                    .expect("Failed to install Ctrl+C handler");
            };

            #[cfg(unix)]
            let terminate = async {
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("Failed to install signal handler")
                    .recv()
                    .await;
            };

            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                () = ctrl_c => {
                    tracing::info!("Received Ctrl+C, shutting down");
                },
                () = terminate => {
                    tracing::info!("Received SIGTERM, shutting down");
                },
            }
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| Error::internal(e.to_string()))?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

// === Error Response ===

/// The single error body shape: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// The underlying error message, verbatim.
    pub error: String,
}

/// Maps a tagged error to its response: missing input is the caller's
/// fault (400), everything else is a processing failure (500).
fn error_response(err: &Error) -> Response {
    let status = if err.is_user_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let body = Json(ErrorBody {
        error: err.to_string(),
    });
    (status, body).into_response()
}

// === Handlers ===

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn predict(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let request_id = format!("pred-{}", uuid::Uuid::new_v4());

    let mut image = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("image") {
                    match field.bytes().await {
                        Ok(bytes) => {
                            image = Some(bytes);
                            break;
                        }
                        Err(e) => {
                            return error_response(&Error::internal(e.to_string()));
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => return error_response(&Error::internal(e.to_string())),
        }
    }

    let Some(bytes) = image else {
        return error_response(&Error::missing_input("image"));
    };
    if bytes.is_empty() {
        return error_response(&Error::missing_input("image"));
    }

    match state.recognizer.recognize(&bytes) {
        Ok(latex) => {
            tracing::debug!(
                request_id = %request_id,
                bytes = bytes.len(),
                "Recognition finished"
            );
            Json(RecognizeResponse { latex }).into_response()
        }
        Err(e) => {
            tracing::debug!(request_id = %request_id, error = %e, "Recognition failed");
            error_response(&e)
        }
    }
}

/// Lenient `/solve` payload: a missing `equation` key behaves like an
/// empty string so the boundary reports it as missing input rather than
/// a deserialization failure.
#[derive(Debug, Deserialize)]
struct SolveBody {
    #[serde(default)]
    equation: String,
    #[serde(default)]
    variable: Option<String>,
}

async fn solve(Json(body): Json<SolveBody>) -> Response {
    let request_id = format!("solv-{}", uuid::Uuid::new_v4());

    let request = SolveRequest {
        equation: body.equation,
        variable: body.variable,
    };

    match solver::solve_equation(&request) {
        Ok(response) => {
            tracing::debug!(
                request_id = %request_id,
                equation = %response.input_equation,
                solutions = response.solutions_latex.len(),
                "Solve finished"
            );
            Json(response).into_response()
        }
        Err(e) => {
            tracing::debug!(request_id = %request_id, error = %e, "Solve failed");
            error_response(&e)
        }
    }
}
