//! A canned-response provider for tests. The `model_name` selects the
//! behavior, so router-level tests can exercise every endpoint without a
//! network call.

use crate::error::Error;
use crate::model::JsonMode;

#[derive(Debug, Default)]
pub struct DummyProvider {
    pub model_name: String,
}

impl DummyProvider {
    pub fn new(model_name: String) -> Self {
        DummyProvider { model_name }
    }
}

pub static DUMMY_TOPICS_RESPONSE_RAW: &str = r#"Here are the topics you asked for:
{"topics": ["Photosynthesis", "Cellular Respiration", "Mitosis"]}
Good luck with your studies!"#;

pub static DUMMY_QUIZ_RESPONSE_RAW: &str = r#"{"quiz": [
  {"id": 1, "question": "What pigment drives photosynthesis?", "options": ["Chlorophyll", "Hemoglobin", "Keratin", "Melanin"], "correctAnswer": "Chlorophyll"},
  {"id": 2, "question": "Where does the Calvin cycle occur?", "options": ["Stroma", "Thylakoid", "Matrix", "Cytosol"], "correctAnswer": "Stroma"},
  {"id": 3, "question": "What gas is released by photosynthesis?", "options": ["Oxygen", "Carbon dioxide", "Nitrogen", "Methane"], "correctAnswer": "Oxygen"}
]}"#;

// The correct answer is deliberately absent from the options list.
pub static DUMMY_BAD_QUIZ_RESPONSE_RAW: &str = r#"{"quiz": [
  {"id": 1, "question": "What pigment drives photosynthesis?", "options": ["Hemoglobin", "Keratin", "Melanin", "Actin"], "correctAnswer": "Chlorophyll"}
]}"#;

pub static DUMMY_SUMMARY_RESPONSE_RAW: &str =
    r#"{"summary": "Great work overall. You clearly understand the light reactions. Review the Calvin cycle once more. Keep it up!"}"#;

pub static DUMMY_SUGGESTIONS_RESPONSE_RAW: &str = r#"Sure thing:
{"suggestions": ["thermodynamics explained simply", "entropy intuition for beginners", "first law of thermodynamics worked examples"]}"#;

pub static DUMMY_PROCESSED_TEXT_RESPONSE_RAW: &str =
    r#"{"processed_text": "Key points: energy is conserved; entropy increases; heat flows from hot to cold."}"#;

pub static DUMMY_PLAN_RESPONSE_RAW: &str =
    r#"{"plan_text": "Day 1: Photosynthesis. Day 2: Cellular Respiration. Day 3: Revision. Day 4: Rest."}"#;

pub static DUMMY_MATERIALS_RESPONSE_RAW: &str = r#"{"materials": [
  {"title": "Campbell Biology", "description": "A comprehensive textbook.", "link": "https://example.com/campbell"},
  {"title": "Khan Academy Biology", "description": "Free video course.", "link": "https://example.com/khan"},
  {"title": "Nature Education", "description": "Authoritative articles.", "link": "https://example.com/nature"}
]}"#;

pub static DUMMY_CHAT_RESPONSE_CONTENT: &str =
    "You're doing great! Let's review entropy together, one small step at a time.";

pub static DUMMY_MALFORMED_RESPONSE_RAW: &str =
    "I'm sorry, I can't produce JSON for that request.";

impl DummyProvider {
    pub async fn generate(&self, prompt: &str, _json_mode: JsonMode) -> Result<String, Error> {
        match self.model_name.as_str() {
            "topics" => Ok(DUMMY_TOPICS_RESPONSE_RAW.to_string()),
            "quiz" => Ok(DUMMY_QUIZ_RESPONSE_RAW.to_string()),
            "bad_quiz" => Ok(DUMMY_BAD_QUIZ_RESPONSE_RAW.to_string()),
            "summary" => Ok(DUMMY_SUMMARY_RESPONSE_RAW.to_string()),
            "suggestions" => Ok(DUMMY_SUGGESTIONS_RESPONSE_RAW.to_string()),
            "processed_text" => Ok(DUMMY_PROCESSED_TEXT_RESPONSE_RAW.to_string()),
            "plan" => Ok(DUMMY_PLAN_RESPONSE_RAW.to_string()),
            "materials" => Ok(DUMMY_MATERIALS_RESPONSE_RAW.to_string()),
            "chat" => Ok(DUMMY_CHAT_RESPONSE_CONTENT.to_string()),
            // Echoes the assembled prompt back, for asserting on prompt contents.
            "echo" => Ok(prompt.to_string()),
            "malformed" => Ok(DUMMY_MALFORMED_RESPONSE_RAW.to_string()),
            "error" => Err(Error::GoogleAIStudioServer {
                message: "Dummy provider asked to fail".to_string(),
            }),
            _ => Ok(DUMMY_MALFORMED_RESPONSE_RAW.to_string()),
        }
    }
}
