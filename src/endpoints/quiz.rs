use axum::debug_handler;
use axum::extract::State;
use axum::response::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::gateway_util::{AppState, AppStateData, StructuredJson};
use crate::model::JsonMode;
use crate::prompts::{self, QuizResult};
use crate::output;

fn default_num_questions() -> u32 {
    5
}

fn default_difficulty() -> String {
    "medium".to_string()
}

/// The expected payload is a JSON object with the following fields:
#[derive(Debug, Deserialize)]
pub struct QuizParams {
    // single topic to quiz on (either this or `full_syllabus_topics` must be set)
    topic: Option<String>,
    #[serde(default = "default_num_questions")]
    num_questions: u32,
    #[serde(default = "default_difficulty")]
    difficulty: String,
    // quiz across the whole syllabus; takes precedence over `topic`
    #[serde(default)]
    full_syllabus_topics: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct QuizResponse {
    pub quiz: Vec<QuizQuestion>,
}

impl QuizResponse {
    /// The model is instructed to pick `correctAnswer` from `options`; reject
    /// output where it didn't.
    fn validate(&self) -> Result<(), Error> {
        for question in &self.quiz {
            if !question.options.contains(&question.correct_answer) {
                return Err(Error::OutputValidation {
                    message: format!(
                        "correctAnswer `{}` for question {} is not one of its options",
                        question.correct_answer, question.id
                    ),
                });
            }
        }
        Ok(())
    }
}

/// A handler for the quiz-generation endpoint
#[debug_handler(state = AppStateData)]
pub async fn generate_quiz_handler(
    State(state): AppState,
    StructuredJson(params): StructuredJson<QuizParams>,
) -> Result<Json<QuizResponse>, Error> {
    counter!("request_count", "endpoint" => "generate_quiz").increment(1);
    let model = state.model()?;

    if params.topic.is_none() && params.full_syllabus_topics.is_empty() {
        return Err(Error::InvalidRequest {
            message: "Topic or full syllabus topics are required.".to_string(),
        });
    }

    let prompt = prompts::generate_quiz(
        params.topic.as_deref(),
        &params.full_syllabus_topics,
        params.num_questions,
        &params.difficulty,
    );
    let raw = model
        .generate(&state.http_client, &prompt, JsonMode::On)
        .await?;
    let quiz: QuizResponse = output::parse_model_output(&raw)?;
    quiz.validate()?;
    Ok(Json(quiz))
}

#[derive(Debug, Deserialize)]
pub struct ReportSummaryParams {
    results: Vec<QuizResult>,
    topic: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReportSummary {
    pub summary: String,
}

/// A handler for the quiz report-summary endpoint
#[debug_handler(state = AppStateData)]
pub async fn generate_report_summary_handler(
    State(state): AppState,
    StructuredJson(params): StructuredJson<ReportSummaryParams>,
) -> Result<Json<ReportSummary>, Error> {
    counter!("request_count", "endpoint" => "generate_report_summary").increment(1);
    let model = state.model()?;

    let prompt = prompts::report_summary(&params.topic, &params.results);
    let raw = model
        .generate(&state.http_client, &prompt, JsonMode::On)
        .await?;
    let summary: ReportSummary = output::parse_model_output(&raw)?;
    Ok(Json(summary))
}
