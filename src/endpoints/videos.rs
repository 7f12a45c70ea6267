use axum::debug_handler;
use axum::extract::State;
use axum::response::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::gateway_util::{AppState, AppStateData, StructuredJson};
use crate::model::JsonMode;
use crate::{output, prompts};

/// Number of search queries the model is asked for.
const SUGGESTION_COUNT: usize = 3;

#[derive(Debug, Deserialize)]
pub struct VideoSuggestionsParams {
    #[serde(default)]
    topic: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct VideoSuggestions {
    pub suggestions: Vec<String>,
}

impl VideoSuggestions {
    fn validate(&self) -> Result<(), Error> {
        if self.suggestions.len() != SUGGESTION_COUNT {
            return Err(Error::OutputValidation {
                message: format!(
                    "expected exactly {SUGGESTION_COUNT} suggestions, got {}",
                    self.suggestions.len()
                ),
            });
        }
        Ok(())
    }
}

/// A handler for the video-suggestion endpoint: 3 YouTube search queries for a
/// topic the student is struggling with.
#[debug_handler(state = AppStateData)]
pub async fn get_video_suggestions_handler(
    State(state): AppState,
    StructuredJson(params): StructuredJson<VideoSuggestionsParams>,
) -> Result<Json<VideoSuggestions>, Error> {
    counter!("request_count", "endpoint" => "get_video_suggestions").increment(1);
    let model = state.model()?;

    if params.topic.trim().is_empty() {
        return Err(Error::InvalidRequest {
            message: "Topic is required".to_string(),
        });
    }

    let prompt = prompts::video_suggestions(&params.topic);
    let raw = model
        .generate(&state.http_client, &prompt, JsonMode::On)
        .await?;
    let suggestions: VideoSuggestions = output::parse_model_output(&raw)?;
    suggestions.validate()?;
    Ok(Json(suggestions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_exactly_three() {
        let ok = VideoSuggestions {
            suggestions: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        };
        assert!(ok.validate().is_ok());

        let short = VideoSuggestions {
            suggestions: vec!["a".to_string()],
        };
        assert!(matches!(
            short.validate(),
            Err(Error::OutputValidation { .. })
        ));
    }
}
