//! services/web/src/web/middleware.rs
//!
//! Session-cookie middleware for the form pages.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::web::state::AppState;

pub const SESSION_COOKIE: &str = "writer_session";

/// Middleware that attaches a writer session to every request.
///
/// Reads the session id from the cookie; if it is missing, malformed or has
/// expired, a new session is started and its cookie is set on the response.
/// The resolved `SessionId` is inserted into the request extensions.
pub async fn ensure_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    // 1. Parse session ID from cookie, if any
    let candidate = session_id_from_headers(req.headers());

    // 2. Look it up, or start a new session
    let (session_id, created) = state.sessions.resolve(candidate);
    if created {
        info!(session_id = %session_id.0, "Started writer session");
    }

    // 3. Make it available to the handler
    req.extensions_mut().insert(session_id);
    let mut response = next.run(req).await;

    // 4. Hand the browser its cookie
    if created {
        let cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/",
            SESSION_COOKIE, session_id.0
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => error!("Failed to build session cookie: {:?}", e),
        }
    }

    response
}

fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| {
            c.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .and_then(|raw| Uuid::parse_str(raw).ok())
}
