use axum::debug_handler;
use axum::extract::{Multipart, State};
use axum::response::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::gateway_util::{AppState, AppStateData};
use crate::model::JsonMode;
use crate::{output, pdf, prompts};

#[derive(Debug, Deserialize, Serialize)]
pub struct StudyPlan {
    pub plan_text: String,
}

/// A handler for the study-plan endpoint: multipart upload of a syllabus PDF
/// under `syllabus` plus an `exam_date` form field (a date string the model
/// plans toward).
#[debug_handler(state = AppStateData)]
pub async fn generate_study_plan_handler(
    State(state): AppState,
    mut multipart: Multipart,
) -> Result<Json<StudyPlan>, Error> {
    counter!("request_count", "endpoint" => "generate_study_plan").increment(1);
    let model = state.model()?;

    let mut file_bytes = None;
    let mut exam_date = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| Error::Multipart {
        message: e.to_string(),
    })? {
        match field.name() {
            Some("syllabus") => {
                file_bytes = Some(field.bytes().await.map_err(|e| Error::Multipart {
                    message: e.to_string(),
                })?);
            }
            Some("exam_date") => {
                exam_date = Some(field.text().await.map_err(|e| Error::Multipart {
                    message: e.to_string(),
                })?);
            }
            _ => {}
        }
    }
    let bytes = file_bytes.ok_or(Error::MissingFile { field: "syllabus" })?;
    let exam_date = exam_date
        .filter(|date| !date.trim().is_empty())
        .ok_or_else(|| Error::InvalidRequest {
            message: "Exam date not provided".to_string(),
        })?;

    let syllabus_text = pdf::extract_text(&bytes);
    if syllabus_text.trim().is_empty() {
        return Err(Error::EmptyDocument {
            message: "Could not extract text from syllabus PDF.".to_string(),
        });
    }

    let current_date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let prompt = prompts::study_plan(&current_date, &exam_date, &syllabus_text);
    let raw = model
        .generate(&state.http_client, &prompt, JsonMode::On)
        .await?;
    let plan: StudyPlan = output::parse_model_output(&raw)?;
    Ok(Json(plan))
}
