use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Json, Request};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::{self, Config};
use crate::error::Error;
use crate::model::GenerativeModel;
use crate::providers::google_ai_studio_gemini::{
    GoogleAIStudioCredentials, GoogleAIStudioGeminiProvider,
};

/// State for the API
#[derive(Clone)]
pub struct AppStateData {
    pub config: Arc<Config>,
    pub http_client: Client,
    /// `None` when no API key was configured at startup; model-dependent
    /// endpoints short-circuit with a 500 in that case.
    pub model: Option<Arc<GenerativeModel>>,
}
pub type AppState = axum::extract::State<AppStateData>;

impl AppStateData {
    pub fn new(config: Arc<Config>) -> Result<Self, Error> {
        let model = match config::load_gemini_credentials() {
            GoogleAIStudioCredentials::None => None,
            credentials => Some(Arc::new(GenerativeModel::GoogleAIStudioGemini(
                GoogleAIStudioGeminiProvider::new(config.model_name.clone(), credentials)
                    .map_err(|e| Error::AppState {
                        message: e.to_string(),
                    })?,
            ))),
        };
        Ok(Self::with_model(config, model))
    }

    /// Builds state around an explicit model handle (or none). Tests use this
    /// with the dummy provider.
    pub fn with_model(config: Arc<Config>, model: Option<Arc<GenerativeModel>>) -> Self {
        Self {
            config,
            http_client: Client::new(),
            model,
        }
    }

    pub fn model(&self) -> Result<&GenerativeModel, Error> {
        self.model.as_deref().ok_or(Error::ModelNotConfigured)
    }
}

/// Custom Axum extractor that validates the JSON body and deserializes it into a custom type
///
/// When this extractor is present, we don't check if the `Content-Type` header is `application/json`,
/// and instead simply assume that the request body is a JSON object.
pub struct StructuredJson<T>(pub T);

impl<S, T> FromRequest<S> for StructuredJson<T>
where
    S: Send + Sync,
    T: Send + Sync + DeserializeOwned,
{
    type Rejection = Error;

    #[instrument(skip_all, level = "trace", name = "StructuredJson::from_request")]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Retrieve the request body as Bytes before deserializing it
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| Error::JsonRequest {
                message: e.to_string(),
            })?;

        // Convert the entire body into `serde_json::Value`
        let value = Json::<serde_json::Value>::from_bytes(&bytes)
            .map_err(|e| Error::JsonRequest {
                message: e.to_string(),
            })?
            .0;

        // Now use `serde_path_to_error::deserialize` to attempt deserialization into `T`
        let deserialized: T =
            serde_path_to_error::deserialize(&value).map_err(|e| Error::JsonRequest {
                message: e.to_string(),
            })?;

        Ok(StructuredJson(deserialized))
    }
}
