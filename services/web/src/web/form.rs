//! services/web/src/web/form.rs
//!
//! Handlers behind the HTML form. Every post updates the browser's writer
//! session and redirects back to `/`, where the page is re-rendered.

use crate::web::{
    page::{render_page, PageView},
    protocol::{DescriptionForm, GenerateForm, SettingsForm},
    state::{AppState, SessionId, SessionStore},
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use property_writer_core::CompletionResult;
use std::sync::Arc;
use tracing::{error, info, warn};

fn back_to_page() -> Redirect {
    Redirect::to("/")
}

/// GET / - Render the form, the current description and any error.
pub async fn index_handler(
    State(state): State<Arc<AppState>>,
    Extension(session_id): Extension<SessionId>,
) -> Html<String> {
    let view = state
        .sessions
        .with_session(session_id, |s| PageView::from_session(s));
    match view {
        Some(view) => Html(render_page(&view)),
        None => Html(render_page(&PageView::from_session(&Default::default()))),
    }
}

/// POST /settings - Store or replace the API key for this session.
pub async fn settings_handler(
    State(state): State<Arc<AppState>>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<SettingsForm>,
) -> Redirect {
    state
        .sessions
        .with_session(session_id, |s| s.set_credential(form.api_key));
    back_to_page()
}

/// Marks a session's request as outstanding until its outcome is applied.
///
/// If the handler future is dropped first (the client went away), the result
/// is discarded and the session's busy flag is released on drop.
struct InFlightGeneration {
    sessions: Arc<SessionStore>,
    session_id: SessionId,
    settled: bool,
}

impl InFlightGeneration {
    /// Applies the outcome. False if the session expired in the meantime.
    fn settle(mut self, result: CompletionResult<String>) -> bool {
        self.settled = true;
        self.sessions
            .with_session(self.session_id, |s| s.finish_generation(result))
            .is_some()
    }
}

impl Drop for InFlightGeneration {
    fn drop(&mut self) {
        if !self.settled {
            warn!(session_id = %self.session_id.0, "Generation abandoned before it finished");
            self.sessions
                .with_session(self.session_id, |s| s.abandon_generation());
        }
    }
}

/// POST /generate - Save the submitted attributes and ask for a description.
///
/// The session is marked busy while the endpoint is called; the store lock is
/// released for the duration of the call.
pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<GenerateForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let kind = form.kind();
    let attributes = form
        .property
        .into_attributes()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    // 1. Record the form values and check preconditions
    let begun = state
        .sessions
        .with_session(session_id, |s| {
            if !s.is_busy() {
                s.attributes = attributes;
            }
            s.begin_generation(kind)
        });

    let pending = match begun {
        Some(Ok(pending)) => pending,
        Some(Err(e)) => {
            info!(session_id = %session_id.0, "Generation not started: {}", e);
            return Ok(back_to_page());
        }
        None => return Ok(back_to_page()),
    };

    let in_flight = InFlightGeneration {
        sessions: state.sessions.clone(),
        session_id,
        settled: false,
    };

    // 2. Call the completion endpoint without holding the session
    info!(session_id = %session_id.0, ?kind, "Requesting description");
    let result = state
        .completion
        .request_completion(pending.prompt(), pending.credential(), pending.temperature())
        .await;
    if let Err(e) = &result {
        error!(session_id = %session_id.0, "Completion request failed: {}", e);
    }

    // 3. Apply the outcome, unless the session expired in the meantime
    if !in_flight.settle(result) {
        warn!(session_id = %session_id.0, "Session expired before the description arrived");
    }

    Ok(back_to_page())
}

/// POST /description - Replace the description with the edited text.
pub async fn edit_description_handler(
    State(state): State<Arc<AppState>>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<DescriptionForm>,
) -> Redirect {
    state
        .sessions
        .with_session(session_id, |s| s.edit(form.description));
    back_to_page()
}

/// POST /description/clear
pub async fn clear_description_handler(
    State(state): State<Arc<AppState>>,
    Extension(session_id): Extension<SessionId>,
) -> Redirect {
    state.sessions.with_session(session_id, |s| s.clear());
    back_to_page()
}

/// POST /error/dismiss
pub async fn dismiss_error_handler(
    State(state): State<Arc<AppState>>,
    Extension(session_id): Extension<SessionId>,
) -> Redirect {
    state
        .sessions
        .with_session(session_id, |s| s.dismiss_error());
    back_to_page()
}

/// GET /description/download - The description as a plain-text attachment.
pub async fn download_handler(
    State(state): State<Arc<AppState>>,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    let export = state.sessions.with_session(session_id, |s| s.download());
    let Some(export) = export else {
        return back_to_page().into_response();
    };

    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    (
        [
            (header::CONTENT_TYPE, export.mime_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response()
}

/// GET /description/copy - The description as inline plain text, ready to copy.
pub async fn copy_handler(
    State(state): State<Arc<AppState>>,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    let text = state
        .sessions
        .with_session(session_id, |s| s.copy_text().to_string());
    match text {
        Some(text) => {
            ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
        }
        None => back_to_page().into_response(),
    }
}
