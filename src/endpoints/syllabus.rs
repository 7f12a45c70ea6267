use axum::debug_handler;
use axum::extract::{Multipart, State};
use axum::response::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::gateway_util::{AppState, AppStateData};
use crate::model::JsonMode;
use crate::{output, pdf, prompts};

/// The shape the model is instructed to emit for syllabus parsing.
#[derive(Debug, Deserialize, Serialize)]
pub struct SyllabusTopics {
    pub topics: Vec<String>,
}

/// A handler for the syllabus-parsing endpoint: multipart upload of a PDF
/// under the `syllabus` field, topics extracted by the model.
#[debug_handler(state = AppStateData)]
pub async fn parse_syllabus_handler(
    State(state): AppState,
    multipart: Multipart,
) -> Result<Json<SyllabusTopics>, Error> {
    counter!("request_count", "endpoint" => "parse_syllabus").increment(1);
    let model = state.model()?;

    let syllabus_text = read_pdf_field(multipart, "syllabus").await?;
    let prompt = prompts::parse_syllabus(&syllabus_text);
    let raw = model
        .generate(&state.http_client, &prompt, JsonMode::On)
        .await?;
    let topics: SyllabusTopics = output::parse_model_output(&raw)?;
    Ok(Json(topics))
}

/// Reads the PDF uploaded under `field_name` and extracts its text.
///
/// Errors: missing field, empty filename, or a document with no extractable
/// text are all client errors (400).
pub async fn read_pdf_field(
    mut multipart: Multipart,
    field_name: &'static str,
) -> Result<String, Error> {
    let mut file_bytes = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| Error::Multipart {
        message: e.to_string(),
    })? {
        if field.name() == Some(field_name) {
            if field.file_name().is_none_or(str::is_empty) {
                return Err(Error::InvalidRequest {
                    message: "No selected file".to_string(),
                });
            }
            file_bytes = Some(field.bytes().await.map_err(|e| Error::Multipart {
                message: e.to_string(),
            })?);
        }
    }
    let bytes = file_bytes.ok_or(Error::MissingFile { field: field_name })?;
    let text = pdf::extract_text(&bytes);
    if text.trim().is_empty() {
        return Err(Error::EmptyDocument {
            message: "Could not extract text from PDF.".to_string(),
        });
    }
    Ok(text)
}
