//! HTTP chat endpoint.
//!
//! - `POST /api/chat` takes `{"message": "...", "session_id": "..."}` and
//!   answers `{"response": "...", "session_id": "..."}`. Omitting
//!   `session_id` starts a new conversation under a fresh UUID.
//! - `GET /health` answers `ok`.
//!
//! The engine is shared read-only; each conversation lives in its own
//! locked session inside the store. Idle sessions are evicted on every chat
//! request and on a background tick.

use std::any::Any;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Context;
use aphator::{Engine, SessionConfig, SessionError, SessionStore};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

/// How often the background task sweeps idle sessions.
const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

const EMPTY_MESSAGE: &str = "Empty message";
const PROCESSING_FAILED: &str = "Failed to process your message. Please try again.";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub sessions: SessionConfig,
}

pub struct AppState {
    engine: Arc<Engine>,
    sessions: Mutex<SessionStore<SmallRng>>,
}

impl AppState {
    pub fn new(engine: Arc<Engine>, sessions: SessionConfig) -> Self {
        let store = engine.session_store(sessions);
        AppState {
            engine,
            sessions: Mutex::new(store),
        }
    }
}

type SharedState = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    response: String,
    session_id: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Failures visible at the HTTP boundary. Details are logged, not returned.
#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("empty message")]
    EmptyMessage,
    #[error("malformed request body: {0}")]
    Malformed(#[from] JsonRejection),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("session store lock poisoned")]
    StorePoisoned,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::EmptyMessage => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: EMPTY_MESSAGE })).into_response()
            }
            ApiError::Malformed(rejection) => {
                warn!(error = %rejection, "rejected chat request body");
                internal_error()
            }
            other => {
                error!(error = %other, "chat request failed");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: PROCESSING_FAILED,
        }),
    )
        .into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "handler panicked");
    internal_error()
}

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

async fn chat(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::EmptyMessage);
    }

    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let session = {
        let mut store = state.sessions.lock().map_err(|_| ApiError::StorePoisoned)?;
        store.evict_idle(Instant::now());
        store.checkout(&session_id)
    };

    let response = match state.engine.respond_shared(&session, &session_id, message) {
        Ok(response) => response,
        Err(err) => {
            forget_session(&state, &session_id);
            return Err(err.into());
        }
    };
    Ok(Json(ChatResponse {
        response,
        session_id,
    }))
}

/// Drop a session whose turn failed so the next request starts afresh.
fn forget_session(state: &AppState, session_id: &str) {
    match state.sessions.lock() {
        Ok(mut store) => {
            if store.remove(session_id) {
                warn!(session_id, "discarded failed session");
            }
        }
        Err(_) => error!("session store lock poisoned; cannot discard session"),
    }
}

/// Periodically drop sessions idle past their timeout.
fn spawn_eviction(state: SharedState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(EVICTION_INTERVAL);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match state.sessions.lock() {
                Ok(mut store) => {
                    store.evict_idle(Instant::now());
                }
                Err(_) => {
                    error!("session store lock poisoned; stopping eviction");
                    break;
                }
            }
        }
    })
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn run_server(engine: Arc<Engine>, config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::new(config.host, config.port);
    let state = Arc::new(AppState::new(engine, config.sessions));
    let eviction = spawn_eviction(Arc::clone(&state));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind TCP listener to {addr}"))?;
    info!(%addr, "serving chat endpoint");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    eviction.abort();
    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("received SIGTERM, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aphator::{EngineConfig, ReferenceData, replies};
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn state() -> SharedState {
        let engine = Engine::new(
            &ReferenceData::default(),
            EngineConfig {
                engagement_skip_probability: 1.0,
                ..EngineConfig::default()
            },
        );
        Arc::new(AppState::new(
            Arc::new(engine),
            SessionConfig {
                seed: Some(7),
                ..SessionConfig::default()
            },
        ))
    }

    async fn post_chat(app: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_raw(content_type: Option<&str>, body: &'static str) -> (StatusCode, Value) {
        let mut request = Request::builder().method("POST").uri("/api/chat");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }
        let response = router(state())
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = router(state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn chat_answers_and_assigns_session() {
        let (status, body) = post_chat(
            router(state()),
            json!({"message": "How much does app development cost?"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["response"].as_str().unwrap().contains("$10,000"));
        let id = body["session_id"].as_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok(), "not a uuid: {id}");
    }

    #[tokio::test]
    async fn supplied_session_id_is_echoed() {
        let (status, body) =
            post_chat(router(state()), json!({"message": "hello", "session_id": "abc"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session_id"], "abc");
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        for message in ["", "   "] {
            let (status, body) = post_chat(router(state()), json!({"message": message})).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({"error": "Empty message"}));
        }
    }

    #[tokio::test]
    async fn missing_message_is_rejected() {
        let (status, body) = post_chat(router(state()), json!({"session_id": "abc"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Empty message");
    }

    #[tokio::test]
    async fn mistyped_message_gets_generic_error() {
        let (status, body) = post_raw(Some("application/json"), r#"{"message": 5}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": PROCESSING_FAILED}));
    }

    #[tokio::test]
    async fn unparseable_body_gets_generic_error() {
        let (status, body) = post_raw(Some("application/json"), "{not json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": PROCESSING_FAILED}));
    }

    #[tokio::test]
    async fn wrong_content_type_gets_generic_error() {
        for content_type in [None, Some("text/plain")] {
            let (status, body) = post_raw(content_type, r#"{"message": "hello"}"#).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({"error": PROCESSING_FAILED}));
        }
    }

    #[tokio::test]
    async fn sessions_keep_their_own_context() {
        let state = state();

        post_chat(
            router(Arc::clone(&state)),
            json!({"message": "blockchain blockchain", "session_id": "alice"}),
        )
        .await;
        let (_, alice) = post_chat(
            router(Arc::clone(&state)),
            json!({"message": "hello", "session_id": "alice"}),
        )
        .await;
        let (_, bob) = post_chat(
            router(Arc::clone(&state)),
            json!({"message": "hello", "session_id": "bob"}),
        )
        .await;

        let continuation = replies::greeting_continuation("blockchain");
        assert!(alice["response"].as_str().unwrap().ends_with(&continuation));
        assert!(replies::GREETINGS.contains(&bob["response"].as_str().unwrap()));
        assert_eq!(state.sessions.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn poisoned_session_is_an_internal_error() {
        let state = state();
        let session = state.sessions.lock().unwrap().checkout("broken");
        let _ = std::thread::spawn(move || {
            let _guard = session.lock().unwrap();
            panic!("turn failed");
        })
        .join();

        let (status, body) = post_chat(
            router(Arc::clone(&state)),
            json!({"message": "hello", "session_id": "broken"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], PROCESSING_FAILED);
        assert!(!state.sessions.lock().unwrap().contains("broken"));

        // Other sessions are unaffected.
        let (status, _) = post_chat(
            router(Arc::clone(&state)),
            json!({"message": "hello", "session_id": "fine"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // The failed id starts over on its next turn.
        let (status, body) = post_chat(
            router(state),
            json!({"message": "hello", "session_id": "broken"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session_id"], "broken");
        assert!(replies::GREETINGS.contains(&body["response"].as_str().unwrap()));
    }

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn panics_become_internal_errors() {
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));
        let response = app
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], PROCESSING_FAILED);
    }
}
