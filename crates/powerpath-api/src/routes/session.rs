//! Session resource routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use powerpath_assist::session::{self as assist, AssistedSession};
use powerpath_core::error::GuideError;
use powerpath_core::key::StepKey;
use powerpath_core::turn::Turn;
use powerpath_dialog::application::handlers;
use powerpath_dialog::domain::session::GuidedSession;

use crate::error::ApiError;
use crate::registry::SessionHandle;
use crate::state::AppState;

/// Returns the router for the sessions resource.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/{id}", get(get_session))
        .route("/{id}/choices", post(select_choice))
        .route("/{id}/messages", post(send_message))
        .route("/{id}/restart", post(restart_session))
}

/// Session mode requested at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Decision-graph traversal over the built-in guide.
    Guided,
    /// Free-text exchanges with the remote collaborator.
    Assisted,
}

/// Request body for session creation.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Session mode; guided by default.
    #[serde(default = "default_mode")]
    pub mode: SessionMode,
}

fn default_mode() -> SessionMode {
    SessionMode::Guided
}

/// Request body for a guided choice selection.
#[derive(Debug, Deserialize)]
pub struct SelectChoiceRequest {
    /// The selected choice's label.
    pub label: String,
    /// The selected choice's target step.
    pub next_step: StepKey,
}

/// Request body for an assisted free-text message.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// The user's utterance.
    pub text: String,
}

/// A selectable choice as shown to the renderer. Assisted sessions
/// suggest labels only; guided choices also carry their target.
#[derive(Debug, Serialize)]
pub struct ChoiceView {
    /// Label shown to the user.
    pub label: String,
    /// Target step key, for guided sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<StepKey>,
}

/// Ready-to-display session state.
#[derive(Debug, Serialize)]
pub struct SessionView {
    /// Session identifier.
    pub session_id: Uuid,
    /// Session mode.
    pub mode: SessionMode,
    /// Ordered turn history.
    pub transcript: Vec<Turn>,
    /// Live selectable choices; empty while a transition is pending and
    /// on terminal turns. Restart stays available out-of-band.
    pub choices: Vec<ChoiceView>,
}

fn guided_view(id: Uuid, session: &GuidedSession) -> SessionView {
    SessionView {
        session_id: id,
        mode: SessionMode::Guided,
        transcript: session.transcript().to_vec(),
        choices: session
            .current_choices()
            .iter()
            .map(|choice| ChoiceView {
                label: choice.label.clone(),
                next_step: Some(choice.next_step.clone()),
            })
            .collect(),
    }
}

fn assisted_view(id: Uuid, session: &AssistedSession) -> SessionView {
    SessionView {
        session_id: id,
        mode: SessionMode::Assisted,
        transcript: session.transcript().to_vec(),
        choices: session
            .current_options()
            .iter()
            .map(|label| ChoiceView {
                label: label.clone(),
                next_step: None,
            })
            .collect(),
    }
}

/// POST / — create a session and land its opening turn.
async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let id = Uuid::new_v4();
    tracing::info!(session_id = %id, mode = ?request.mode, "creating session");

    match request.mode {
        SessionMode::Guided => {
            let session = Arc::new(Mutex::new(GuidedSession::new(id, Arc::clone(&state.graph))));
            state
                .sessions
                .insert(id, SessionHandle::Guided(Arc::clone(&session)))
                .await;
            handlers::handle_initialize(&session, state.clock.as_ref(), state.typing_delay)
                .await?;
            let guard = session.lock().await;
            Ok((StatusCode::CREATED, Json(guided_view(id, &guard))))
        }
        SessionMode::Assisted => {
            if state.collaborator.is_none() {
                return Err(GuideError::Validation(
                    "assisted mode requires a configured collaborator".to_owned(),
                )
                .into());
            }
            let session = Arc::new(Mutex::new(AssistedSession::new(id)));
            state
                .sessions
                .insert(id, SessionHandle::Assisted(Arc::clone(&session)))
                .await;
            assist::handle_initialize(&session, state.clock.as_ref(), state.typing_delay).await;
            let guard = session.lock().await;
            Ok((StatusCode::CREATED, Json(assisted_view(id, &guard))))
        }
    }
}

/// GET /{id} — current session state.
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    match state.sessions.get(id).await? {
        SessionHandle::Guided(session) => {
            let guard = session.lock().await;
            Ok(Json(guided_view(id, &guard)))
        }
        SessionHandle::Assisted(session) => {
            let guard = session.lock().await;
            Ok(Json(assisted_view(id, &guard)))
        }
    }
}

/// POST /{id}/choices — apply a guided selection.
async fn select_choice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectChoiceRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let SessionHandle::Guided(session) = state.sessions.get(id).await? else {
        return Err(GuideError::Validation(
            "choices are only valid for guided sessions".to_owned(),
        )
        .into());
    };

    // HTTP callers are not the trusted in-process renderer, so the
    // submitted choice must match the live set.
    let choice = {
        let guard = session.lock().await;
        if guard.is_pending() {
            return Err(GuideError::TransitionPending.into());
        }
        guard
            .current_choices()
            .iter()
            .find(|choice| {
                choice.label == request.label && choice.next_step == request.next_step
            })
            .cloned()
            .ok_or_else(|| {
                GuideError::Validation(format!(
                    "choice `{}` is not currently offered",
                    request.label
                ))
            })?
    };

    handlers::handle_select(&session, &choice, state.clock.as_ref(), state.typing_delay).await?;

    let guard = session.lock().await;
    Ok(Json(guided_view(id, &guard)))
}

/// POST /{id}/messages — run one assisted exchange.
async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let SessionHandle::Assisted(session) = state.sessions.get(id).await? else {
        return Err(GuideError::Validation(
            "messages are only valid for assisted sessions".to_owned(),
        )
        .into());
    };
    let collaborator = state.collaborator.clone().ok_or_else(|| {
        GuideError::Validation("assisted mode requires a configured collaborator".to_owned())
    })?;

    let text = request.text.trim();
    if text.is_empty() {
        return Err(GuideError::Validation("message text must not be empty".to_owned()).into());
    }

    assist::handle_exchange(&session, text, collaborator.as_ref(), state.clock.as_ref())
        .await?;

    let guard = session.lock().await;
    Ok(Json(assisted_view(id, &guard)))
}

/// POST /{id}/restart — discard the transcript and begin fresh.
async fn restart_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    match state.sessions.get(id).await? {
        SessionHandle::Guided(session) => {
            handlers::handle_initialize(&session, state.clock.as_ref(), state.typing_delay)
                .await?;
            let guard = session.lock().await;
            Ok(Json(guided_view(id, &guard)))
        }
        SessionHandle::Assisted(session) => {
            assist::handle_initialize(&session, state.clock.as_ref(), state.typing_delay).await;
            let guard = session.lock().await;
            Ok(Json(assisted_view(id, &guard)))
        }
    }
}
