use crate::agent::ProfileAgent;
use crate::errors::AgentError;
use crate::models::chat::{ ChatRequest, ErrorBody };
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    routing::post,
    Router,
    Json,
    extract::State,
    extract::rejection::JsonRejection,
    response::{ IntoResponse, Response },
    http::{ header, HeaderName, Method, StatusCode },
};
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error };

#[derive(Clone)]
struct AppState {
    agent: Arc<ProfileAgent>,
}

pub async fn start_http_server(
    addr: &str,
    agent: Arc<ProfileAgent>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = addr.parse::<SocketAddr>()?;
    info!("Starting HTTP API server on: http://{}", addr);

    let app = router(agent);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Builds the application router. Split from the listener so tests can drive
/// it with `tower::ServiceExt::oneshot`.
pub fn router(agent: Arc<ProfileAgent>) -> Router {
    // Permissive cross-origin policy: any origin, the full method list the
    // browser clients negotiate, and a fixed request-header allow-list.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-requested-with"),
            header::ACCEPT,
            HeaderName::from_static("accept-version"),
            header::CONTENT_LENGTH,
            HeaderName::from_static("content-md5"),
            header::CONTENT_TYPE,
            header::DATE,
            HeaderName::from_static("x-api-version"),
        ]);

    Router::new()
        .route(
            "/api/chat",
            post(chat_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .layer(cors)
        .with_state(AppState { agent })
}

/// Bare OPTIONS acknowledgment, before any other processing. Browser
/// preflights that carry `Access-Control-Request-Method` are answered by the
/// CORS layer without reaching this handler.
async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed_handler() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed")),
    )
        .into_response()
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    // Undeserializable bodies (missing message, unknown role values, broken
    // JSON) get the same envelope as any other caller mistake.
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(&AgentError::Validation(rejection.body_text()));
        }
    };

    match state.agent.chat(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// Maps the error taxonomy onto HTTP envelopes. Bodies carry Display text
/// only; source chains and backtraces stay in the log.
fn error_response(err: &AgentError) -> Response {
    let (status, body) = match err {
        AgentError::Validation(reason) => {
            (StatusCode::BAD_REQUEST, ErrorBody::new(reason.clone()))
        }
        AgentError::MissingApiKey => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new("API key not configured"),
        ),
        AgentError::Upstream { status, details } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorBody::with_details("AI service error", details.clone()),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::with_message("Internal server error", other.to_string()),
        ),
    };

    if status.is_server_error() {
        error!("Chat API error: {}", err);
    }

    (status, Json(body)).into_response()
}
