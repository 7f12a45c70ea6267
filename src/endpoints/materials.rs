use axum::debug_handler;
use axum::extract::{Multipart, State};
use axum::response::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::gateway_util::{AppState, AppStateData};
use crate::model::{GenerativeModel, JsonMode};
use crate::{output, pdf, prompts};

/// Accepted range for the number of suggested materials.
const MATERIAL_COUNT_RANGE: std::ops::RangeInclusive<usize> = 3..=5;

#[derive(Debug, Deserialize, Serialize)]
pub struct Material {
    pub title: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Materials {
    pub materials: Vec<Material>,
}

impl Materials {
    fn validate(&self) -> Result<(), Error> {
        if !MATERIAL_COUNT_RANGE.contains(&self.materials.len()) {
            return Err(Error::OutputValidation {
                message: format!(
                    "expected 3 to 5 material suggestions, got {}",
                    self.materials.len()
                ),
            });
        }
        Ok(())
    }
}

/// A handler for the material-suggestion endpoint. The syllabus arrives either
/// as a PDF under `syllabus_file` or as plain text under `syllabus_text`.
/// Upstream failures are reported with a deliberately generic message.
#[debug_handler(state = AppStateData)]
pub async fn get_material_suggestions_handler(
    State(state): AppState,
    mut multipart: Multipart,
) -> Result<Json<Materials>, Error> {
    counter!("request_count", "endpoint" => "get_material_suggestions").increment(1);
    let model = state.model()?;

    let mut syllabus_text = String::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| Error::Multipart {
        message: e.to_string(),
    })? {
        match field.name() {
            Some("syllabus_file") => {
                if field.file_name().is_none_or(str::is_empty) {
                    continue;
                }
                let bytes = field.bytes().await.map_err(|e| Error::Multipart {
                    message: e.to_string(),
                })?;
                syllabus_text = pdf::extract_text(&bytes);
            }
            Some("syllabus_text") if syllabus_text.trim().is_empty() => {
                syllabus_text = field.text().await.map_err(|e| Error::Multipart {
                    message: e.to_string(),
                })?;
            }
            _ => {}
        }
    }

    if syllabus_text.trim().is_empty() {
        return Err(Error::InvalidRequest {
            message: "Syllabus content not provided or could not be read.".to_string(),
        });
    }

    suggest_materials(model, &state, &syllabus_text)
        .await
        .map(Json)
        .map_err(|e| Error::MaterialSuggestions {
            source: Box::new(e),
        })
}

async fn suggest_materials(
    model: &GenerativeModel,
    state: &AppStateData,
    syllabus_text: &str,
) -> Result<Materials, Error> {
    let prompt = prompts::material_suggestions(syllabus_text);
    let raw = model
        .generate(&state.http_client, &prompt, JsonMode::On)
        .await?;
    let materials: Materials = output::parse_model_output(&raw)?;
    materials.validate()?;
    Ok(materials)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn materials(count: usize) -> Materials {
        Materials {
            materials: (0..count)
                .map(|i| Material {
                    title: format!("title {i}"),
                    description: "desc".to_string(),
                    link: "https://example.com".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_validate_accepts_three_to_five() {
        for count in 3..=5 {
            assert!(materials(count).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        for count in [0, 1, 2, 6] {
            assert!(matches!(
                materials(count).validate(),
                Err(Error::OutputValidation { .. })
            ));
        }
    }
}
