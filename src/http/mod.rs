// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plugin-facing HTTP surface.
//!
//! Figma plugins cannot accept connections, so the plugin registers once and then polls
//! `GET /plugin/poll/{file_id}/{plugin_id}` on a timer to pick up queued updates.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::model::{FileId, Id, IdError, Message, PluginId};
use crate::relay::{Relay, RelayError};

pub fn build_router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route("/plugin/healthcheck", post(healthcheck))
        .route("/plugin/poll/{file_id}/{plugin_id}", get(poll))
        // The plugin iframe has an opaque origin and calls into localhost.
        .layer(CorsLayer::permissive().allow_private_network(true))
        .with_state(relay)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthcheckRequest {
    #[serde(default)]
    pub plugin_id: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcheckResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollResponse {
    pub messages: Vec<Message>,
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("pluginId and fileId are required")]
    MissingIds,
    #[error("invalid {field}: {source}")]
    InvalidId {
        field: &'static str,
        source: IdError,
    },
    #[error(transparent)]
    Relay(#[from] RelayError),
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingIds | Self::InvalidId { .. } => StatusCode::BAD_REQUEST,
            Self::Relay(err) => {
                error!(error = %err, "relay operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ApiErrorBody { error: self.to_string() })).into_response()
    }
}

async fn healthcheck(
    State(relay): State<Arc<Relay>>,
    body: Result<Json<HealthcheckRequest>, JsonRejection>,
) -> ApiResult<HealthcheckResponse> {
    // Unreadable bodies (wrong content type, non-string ids, bad JSON) count as missing ids.
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "healthcheck rejected: unreadable body");
            return Err(ApiError::MissingIds);
        }
    };
    let (plugin_id, file_id) = match (non_empty(request.plugin_id), non_empty(request.file_id)) {
        (Some(plugin_id), Some(file_id)) => (plugin_id, file_id),
        _ => {
            warn!("healthcheck rejected: pluginId and fileId are required");
            return Err(ApiError::MissingIds);
        }
    };
    let plugin_id: PluginId = parse_id("pluginId", plugin_id)?;
    let file_id: FileId = parse_id("fileId", file_id)?;

    relay.register(file_id, plugin_id)?;
    Ok(Json(HealthcheckResponse { success: true }))
}

async fn poll(
    State(relay): State<Arc<Relay>>,
    Path((file_id, plugin_id)): Path<(String, String)>,
) -> ApiResult<PollResponse> {
    let file_id: FileId = parse_id("fileId", file_id)?;
    let plugin_id: PluginId = parse_id("pluginId", plugin_id)?;

    let messages = relay.poll(&file_id, &plugin_id)?;
    Ok(Json(PollResponse { messages }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn parse_id<T>(field: &'static str, value: String) -> Result<Id<T>, ApiError> {
    Id::new(value).map_err(|source| ApiError::InvalidId { field, source })
}

#[cfg(test)]
mod tests;
