//! Client-server API handlers of the mock homeserver

use super::state::MockState;
use super::types::RecordedCall;
use crate::matrix::types::{
    CreateRoomResponse, LoginRequest, LoginResponse, MatrixErrorBody, PutStateResponse,
};
use crate::matrix::{CreateRoomRequest, StateEvent};
use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Matrix-style error response
pub struct MatrixApiError {
    status: StatusCode,
    body: MatrixErrorBody,
}

impl MatrixApiError {
    fn new(status: StatusCode, errcode: &str, error: &str) -> Self {
        Self {
            status,
            body: MatrixErrorBody {
                errcode: errcode.to_string(),
                error: error.to_string(),
            },
        }
    }
}

impl IntoResponse for MatrixApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, MatrixApiError>;

async fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), MatrixApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            MatrixApiError::new(StatusCode::UNAUTHORIZED, "M_MISSING_TOKEN", "Missing access token")
        })?;

    if state.is_valid_token(token).await {
        Ok(())
    } else {
        Err(MatrixApiError::new(
            StatusCode::UNAUTHORIZED,
            "M_UNKNOWN_TOKEN",
            "Unrecognised access token",
        ))
    }
}

/// POST /_matrix/client/v3/login
pub async fn login(
    State(state): State<Arc<MockState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    debug!(user = %req.identifier.user, "mock login");
    state
        .record(RecordedCall::Login {
            user: req.identifier.user.clone(),
        })
        .await;

    let behavior = state.behavior.read().await.clone();
    if behavior.reject_login || req.password != state.password {
        return Err(MatrixApiError::new(
            StatusCode::FORBIDDEN,
            "M_FORBIDDEN",
            "Invalid username or password",
        ));
    }

    let access_token = if behavior.omit_access_token {
        None
    } else {
        Some(state.issue_token().await)
    };

    Ok(Json(LoginResponse {
        user_id: Some(req.identifier.user),
        access_token,
        device_id: Some("MOCKDEVICE".to_string()),
    }))
}

/// POST /_matrix/client/v3/createRoom
pub async fn create_room(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(req): Json<CreateRoomRequest>,
) -> ApiResult<CreateRoomResponse> {
    authorize(&state, &headers).await?;
    state
        .record(RecordedCall::CreateRoom { request: req.clone() })
        .await;

    let should_fail = match &req.name {
        Some(name) => state.behavior.read().await.fail_create.contains(name),
        None => false,
    };
    if should_fail {
        return Err(MatrixApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "M_UNKNOWN",
            "Internal server error",
        ));
    }

    let room_id = state.add_room(req).await;
    debug!(room_id = %room_id, "mock room created");
    Ok(Json(CreateRoomResponse {
        room_id: Some(room_id),
    }))
}

/// PUT /_matrix/client/v3/rooms/:room_id/state/:event_type/:state_key
pub async fn put_state(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path((room_id, event_type, state_key)): Path<(String, String, String)>,
    Json(content): Json<Value>,
) -> ApiResult<PutStateResponse> {
    authorize(&state, &headers).await?;

    let event = StateEvent::new(&event_type, &state_key, content);
    state
        .record(RecordedCall::PutState {
            room_id: room_id.clone(),
            event: event.clone(),
        })
        .await;

    if !state.apply_state(&room_id, event).await {
        return Err(MatrixApiError::new(StatusCode::NOT_FOUND, "M_NOT_FOUND", "Unknown room"));
    }

    Ok(Json(PutStateResponse {
        event_id: Some(format!("${}", uuid::Uuid::new_v4().simple())),
    }))
}
