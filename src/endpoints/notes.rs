use axum::debug_handler;
use axum::extract::{Multipart, State};
use axum::response::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::gateway_util::{AppState, AppStateData};
use crate::model::JsonMode;
use crate::{output, pdf, prompts};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum NotesAction {
    #[default]
    Summarize,
    Expand,
}

impl NotesAction {
    fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "summarize" => Ok(NotesAction::Summarize),
            "expand" => Ok(NotesAction::Expand),
            _ => Err(Error::InvalidRequest {
                message: "Invalid action specified.".to_string(),
            }),
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            NotesAction::Summarize => {
                "Summarize the following text into clear, concise key points. \
                 Focus on the main ideas and important details."
            }
            NotesAction::Expand => {
                "Expand on the following text. Elaborate on the key points, explain any \
                 abbreviations or jargon, and provide more detailed explanations to make the \
                 content easier to understand. The goal is to make the notes comprehensive for \
                 someone new to the topic."
            }
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProcessedNotes {
    pub processed_text: String,
}

/// A handler for the note-processing endpoint: multipart upload of a PDF under
/// `notes` plus an `action` form field (`summarize` or `expand`, defaulting to
/// `summarize`).
#[debug_handler(state = AppStateData)]
pub async fn process_notes_handler(
    State(state): AppState,
    mut multipart: Multipart,
) -> Result<Json<ProcessedNotes>, Error> {
    counter!("request_count", "endpoint" => "process_notes").increment(1);
    let model = state.model()?;

    let mut file_bytes = None;
    let mut action = NotesAction::default();
    while let Some(field) = multipart.next_field().await.map_err(|e| Error::Multipart {
        message: e.to_string(),
    })? {
        match field.name() {
            Some("notes") => {
                file_bytes = Some(field.bytes().await.map_err(|e| Error::Multipart {
                    message: e.to_string(),
                })?);
            }
            Some("action") => {
                let value = field.text().await.map_err(|e| Error::Multipart {
                    message: e.to_string(),
                })?;
                action = NotesAction::parse(&value)?;
            }
            _ => {}
        }
    }
    let bytes = file_bytes.ok_or(Error::MissingFile { field: "notes" })?;

    let notes_text = pdf::extract_text(&bytes);
    if notes_text.trim().is_empty() {
        return Err(Error::EmptyDocument {
            message: "Could not extract text from the provided notes PDF.".to_string(),
        });
    }

    let prompt = prompts::process_notes(action.instruction(), &notes_text);
    let raw = model
        .generate(&state.http_client, &prompt, JsonMode::On)
        .await?;
    let processed: ProcessedNotes = output::parse_model_output(&raw)?;
    Ok(Json(processed))
}
