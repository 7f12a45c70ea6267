use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

#[derive(Debug, PartialEq)]
pub enum Error {
    AppState {
        message: String,
    },
    ApiKeyMissing {
        provider_name: String,
    },
    ChatService {
        source: Box<Error>,
    },
    Config {
        message: String,
    },
    EmptyDocument {
        message: String,
    },
    GoogleAIStudioServer {
        message: String,
    },
    InferenceClient {
        message: String,
    },
    InvalidRequest {
        message: String,
    },
    JsonRequest {
        message: String,
    },
    MaterialSuggestions {
        source: Box<Error>,
    },
    MissingFile {
        field: &'static str,
    },
    ModelNotConfigured,
    Multipart {
        message: String,
    },
    Observability {
        message: String,
    },
    OutputParsing {
        message: String,
        raw_output: String,
    },
    OutputValidation {
        message: String,
    },
    RouteNotFound,
    Serialization {
        message: String,
    },
}

impl Error {
    /// Defines the error level for logging this error
    fn level(&self) -> tracing::Level {
        match self {
            Error::AppState { .. } => tracing::Level::ERROR,
            Error::ApiKeyMissing { .. } => tracing::Level::ERROR,
            Error::ChatService { .. } => tracing::Level::ERROR,
            Error::Config { .. } => tracing::Level::ERROR,
            Error::EmptyDocument { .. } => tracing::Level::WARN,
            Error::GoogleAIStudioServer { .. } => tracing::Level::ERROR,
            Error::InferenceClient { .. } => tracing::Level::ERROR,
            Error::InvalidRequest { .. } => tracing::Level::WARN,
            Error::JsonRequest { .. } => tracing::Level::WARN,
            Error::MaterialSuggestions { .. } => tracing::Level::ERROR,
            Error::MissingFile { .. } => tracing::Level::WARN,
            Error::ModelNotConfigured => tracing::Level::ERROR,
            Error::Multipart { .. } => tracing::Level::WARN,
            Error::Observability { .. } => tracing::Level::ERROR,
            Error::OutputParsing { .. } => tracing::Level::WARN,
            Error::OutputValidation { .. } => tracing::Level::WARN,
            Error::RouteNotFound => tracing::Level::WARN,
            Error::Serialization { .. } => tracing::Level::ERROR,
        }
    }

    /// Defines the HTTP status code for responses involving this error
    fn status_code(&self) -> StatusCode {
        match self {
            Error::AppState { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::ApiKeyMissing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::ChatService { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::EmptyDocument { .. } => StatusCode::BAD_REQUEST,
            Error::GoogleAIStudioServer { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InferenceClient { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Error::JsonRequest { .. } => StatusCode::BAD_REQUEST,
            Error::MaterialSuggestions { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::MissingFile { .. } => StatusCode::BAD_REQUEST,
            Error::ModelNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Multipart { .. } => StatusCode::BAD_REQUEST,
            Error::Observability { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::OutputParsing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::OutputValidation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::RouteNotFound => StatusCode::NOT_FOUND,
            Error::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the error using the `tracing` library.
    ///
    /// The intentionally generic variants (`ChatService`, `MaterialSuggestions`)
    /// log their underlying cause here; only the generic message reaches the client.
    pub fn log(&self) {
        let message = match self {
            Error::ChatService { source } => format!("{self} (cause: {source})"),
            Error::MaterialSuggestions { source } => format!("{self} (cause: {source})"),
            _ => self.to_string(),
        };
        match self.level() {
            tracing::Level::ERROR => tracing::error!("{message}"),
            tracing::Level::WARN => tracing::warn!("{message}"),
            tracing::Level::INFO => tracing::info!("{message}"),
            tracing::Level::DEBUG => tracing::debug!("{message}"),
            tracing::Level::TRACE => tracing::trace!("{message}"),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::AppState { message } => {
                write!(f, "Error initializing AppState: {message}")
            }
            Error::ApiKeyMissing { provider_name } => {
                write!(f, "API key missing for provider: {provider_name}")
            }
            Error::ChatService { .. } => {
                write!(f, "An error occurred in the chat service.")
            }
            Error::Config { message } => write!(f, "{message}"),
            Error::EmptyDocument { message } => write!(f, "{message}"),
            Error::GoogleAIStudioServer { message } => {
                write!(f, "Error from Google AI Studio server: {message}")
            }
            Error::InferenceClient { message } => write!(f, "{message}"),
            Error::InvalidRequest { message } => write!(f, "{message}"),
            Error::JsonRequest { message } => write!(f, "{message}"),
            Error::MaterialSuggestions { .. } => {
                write!(f, "Failed to generate suggestions. The AI might be unavailable.")
            }
            Error::MissingFile { field } => write!(f, "No file part: `{field}`"),
            Error::ModelNotConfigured => {
                write!(f, "Generative model is not configured. Check API key.")
            }
            Error::Multipart { message } => {
                write!(f, "Error reading multipart form: {message}")
            }
            Error::Observability { message } => write!(f, "{message}"),
            Error::OutputParsing {
                message,
                raw_output,
            } => {
                write!(
                    f,
                    "Error parsing model output as JSON with message: {message}: {raw_output}"
                )
            }
            Error::OutputValidation { message } => {
                write!(f, "Model output failed validation: {message}")
            }
            Error::RouteNotFound => write!(f, "Route not found"),
            Error::Serialization { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    /// Log the error and convert it into an Axum response
    fn into_response(self) -> Response {
        self.log();
        let body = json!({"error": self.to_string()});
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_400() {
        for error in [
            Error::InvalidRequest {
                message: "Topic is required".to_string(),
            },
            Error::MissingFile { field: "syllabus" },
            Error::EmptyDocument {
                message: "Could not extract text from PDF.".to_string(),
            },
            Error::JsonRequest {
                message: "missing field `message`".to_string(),
            },
        ] {
            assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_generic_variants_do_not_leak_cause() {
        let error = Error::ChatService {
            source: Box::new(Error::GoogleAIStudioServer {
                message: "quota exceeded for key abc123".to_string(),
            }),
        };
        assert_eq!(error.to_string(), "An error occurred in the chat service.");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let error = Error::MaterialSuggestions {
            source: Box::new(Error::OutputParsing {
                message: "expected value".to_string(),
                raw_output: "not json".to_string(),
            }),
        };
        assert_eq!(
            error.to_string(),
            "Failed to generate suggestions. The AI might be unavailable."
        );
    }
}
