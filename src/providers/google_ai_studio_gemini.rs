//! Implements the text-generation subset of the Google AI Studio Gemini API
//! as documented [here](https://ai.google.dev/gemini-api/docs/text-generation?lang=rest).

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;
use crate::model::JsonMode;

const PROVIDER_NAME: &str = "Google AI Studio Gemini";

#[derive(Debug)]
pub struct GoogleAIStudioGeminiProvider {
    model_name: String,
    request_url: Url,
    credentials: GoogleAIStudioCredentials,
}

impl GoogleAIStudioGeminiProvider {
    pub fn new(model_name: String, credentials: GoogleAIStudioCredentials) -> Result<Self, Error> {
        let request_url = Url::parse(&format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{model_name}:generateContent",
        ))
        .map_err(|e| Error::Config {
            message: format!("Failed to parse request URL: {e}"),
        })?;
        Ok(GoogleAIStudioGeminiProvider {
            model_name,
            request_url,
            credentials,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Non-streaming `generateContent` request: one user turn, one text reply.
    pub async fn generate(
        &self,
        http_client: &Client,
        prompt: &str,
        json_mode: JsonMode,
    ) -> Result<String, Error> {
        let api_key = self.credentials.get_api_key()?;
        let request_body = GeminiRequest::new(prompt, json_mode);
        let mut url = self.request_url.clone();
        url.query_pairs_mut()
            .append_pair("key", api_key.expose_secret());
        let res = http_client
            .post(url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::InferenceClient {
                message: format!("Error sending request to {PROVIDER_NAME}: {e}"),
            })?;

        if res.status().is_success() {
            let raw_response = res.text().await.map_err(|e| Error::GoogleAIStudioServer {
                message: format!("Error reading text response: {e}"),
            })?;
            let response: GeminiResponse =
                serde_json::from_str(&raw_response).map_err(|e| Error::GoogleAIStudioServer {
                    message: format!("Error parsing JSON response: {e}"),
                })?;
            response.into_text()
        } else {
            let response_code = res.status();
            let error_body = res.text().await.unwrap_or_default();
            Err(Error::GoogleAIStudioServer {
                message: format!("Request failed with status {response_code}: {error_body}"),
            })
        }
    }
}

#[derive(Debug)]
pub enum GoogleAIStudioCredentials {
    Static(SecretString),
    None,
}

impl GoogleAIStudioCredentials {
    pub fn get_api_key(&self) -> Result<&SecretString, Error> {
        match self {
            GoogleAIStudioCredentials::Static(api_key) => Ok(api_key),
            GoogleAIStudioCredentials::None => Err(Error::ApiKeyMissing {
                provider_name: PROVIDER_NAME.to_string(),
            }),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
enum GeminiRole {
    User,
}

#[derive(Debug, PartialEq, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, PartialEq, Serialize)]
struct GeminiContent<'a> {
    role: GeminiRole,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, PartialEq, Serialize)]
enum GeminiResponseMimeType {
    #[serde(rename = "application/json")]
    ApplicationJson,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<GeminiResponseMimeType>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

impl<'a> GeminiRequest<'a> {
    fn new(prompt: &'a str, json_mode: JsonMode) -> Self {
        let generation_config = match json_mode {
            JsonMode::On => Some(GeminiGenerationConfig {
                response_mime_type: Some(GeminiResponseMimeType::ApplicationJson),
            }),
            JsonMode::Off => None,
        };
        GeminiRequest {
            contents: vec![GeminiContent {
                role: GeminiRole::User,
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiResponseCandidate>,
}

impl GeminiResponse {
    /// Concatenates the text parts of the first candidate.
    fn into_text(self) -> Result<String, Error> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::GoogleAIStudioServer {
                message: "Response has no candidates".to_string(),
            })?;
        let content = candidate.content.ok_or_else(|| Error::GoogleAIStudioServer {
            message: "Response candidate has no content".to_string(),
        })?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        if text.is_empty() {
            return Err(Error::GoogleAIStudioServer {
                message: "Response candidate has no text parts".to_string(),
            });
        }
        Ok(text)
    }
}
