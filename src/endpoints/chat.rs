use axum::debug_handler;
use axum::extract::State;
use axum::response::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::gateway_util::{AppState, AppStateData, StructuredJson};
use crate::model::JsonMode;
use crate::prompts::{self, ChatTurn, PerformanceRecord};

/// The expected payload is a JSON object with the following fields:
#[derive(Debug, Deserialize)]
pub struct ChatParams {
    // the student's latest message
    #[serde(default)]
    message: String,
    // prior conversation turns; only the trailing window is used
    #[serde(default)]
    history: Vec<ChatTurn>,
    // recent quiz scores; only the trailing window is used
    #[serde(default)]
    performance: Vec<PerformanceRecord>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// A handler for the conversational coaching endpoint. The model's reply is
/// relayed as plain text; this is the one endpoint with no JSON extraction.
/// Upstream failures are reported with a deliberately generic message.
#[debug_handler(state = AppStateData)]
pub async fn chat_handler(
    State(state): AppState,
    StructuredJson(params): StructuredJson<ChatParams>,
) -> Result<Json<ChatResponse>, Error> {
    counter!("request_count", "endpoint" => "chat").increment(1);
    let model = state.model()?;

    if params.message.trim().is_empty() {
        return Err(Error::InvalidRequest {
            message: "No message provided".to_string(),
        });
    }

    let prompt = prompts::chat(&params.message, &params.history, &params.performance);
    let raw = model
        .generate(&state.http_client, &prompt, JsonMode::Off)
        .await
        .map_err(|e| Error::ChatService {
            source: Box::new(e),
        })?;

    Ok(Json(ChatResponse {
        response: raw.trim().to_string(),
    }))
}
