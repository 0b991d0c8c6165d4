use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AppState;
use crate::error::Result;
use crate::gitlab::{
    is_known_hook, object_kind, translate_payload, Translation, GITLAB_EVENT_HEADER,
};

pub const NOT_CONFIGURED: &str = "Webhook Url Not configured";
pub const PROCESSED: &str = "Webhook processed successfully";
pub const SUPPRESSED: &str = "Notification suppressed";
pub const IGNORED: &str = "Event ignored";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub message: String,
}

fn respond(message: impl Into<String>) -> Json<WebhookResponse> {
    Json(WebhookResponse {
        message: message.into(),
    })
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn receive_default(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>> {
    handle_event(&state, None, &headers, &body).await
}

pub async fn receive_group(
    State(state): State<AppState>,
    Path(group): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>> {
    handle_event(&state, Some(&group), &headers, &body).await
}

async fn handle_event(
    state: &AppState,
    group: Option<&str>,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Json<WebhookResponse>> {
    // Invalid JSON answers with the same JSON error body as other bad payloads.
    let payload: Value = serde_json::from_slice(body)?;

    let Some(target) = state.targets.resolve(group) else {
        warn!("No webhook URL configured for group {group:?}");
        return Ok(respond(NOT_CONFIGURED));
    };
    debug!("Resolved target {target:?} for group {group:?}");

    let hook = headers
        .get(GITLAB_EVENT_HEADER)
        .map(|value| value.to_str().unwrap_or("<non-ascii>"));
    info!(
        "Received GitLab event {} for platform {}",
        hook.unwrap_or("<none>"),
        state.platform
    );
    debug!("Received body: {payload}");

    if let Some(hook) = hook.filter(|hook| !is_known_hook(hook)) {
        let message = format!("x-gitlab-event \"{hook}\" is not supported");
        error!("{message}");
        return Ok(respond(message));
    }

    match translate_payload(&payload)? {
        Translation::Deliver(message) => {
            debug!("Translated message: {}", message.content());
            state.client.send(target, &message).await?;
            Ok(respond(PROCESSED))
        }
        Translation::Suppressed => {
            info!("Pipeline still has unsettled builds, suppressing notification");
            Ok(respond(SUPPRESSED))
        }
        Translation::Ignored => {
            info!(
                "Ignoring event with object_kind {:?}",
                object_kind(&payload).unwrap_or_default()
            );
            Ok(respond(IGNORED))
        }
    }
}
