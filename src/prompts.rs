//! Prompt assembly for each use case.
//!
//! Every template is a fixed instruction string with request fields
//! interpolated verbatim, and (except for chat) declares the exact JSON shape
//! the model must emit. Templates are stateless; chat receives a bounded
//! trailing window of prior turns and quiz-performance records supplied by the
//! caller.

use serde::Deserialize;
use serde_json::Value;

/// Number of trailing conversation turns included in the chat prompt.
pub const CHAT_HISTORY_WINDOW: usize = 6;
/// Number of trailing quiz-performance records included in the chat prompt.
pub const CHAT_PERFORMANCE_WINDOW: usize = 3;

/// One answered question from a completed quiz.
#[derive(Debug, Deserialize)]
pub struct QuizResult {
    pub question: String,
    #[serde(rename = "userAnswer")]
    pub user_answer: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

/// One prior turn of the coaching conversation.
#[derive(Debug, Deserialize)]
pub struct ChatTurn {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub text: String,
}

/// A recent quiz score for one topic. `score` is whatever scalar the client
/// recorded (a number or a string like "3/5") and is rendered verbatim.
#[derive(Debug, Deserialize)]
pub struct PerformanceRecord {
    pub topic: String,
    pub score: Value,
}

pub fn parse_syllabus(syllabus_text: &str) -> String {
    format!(
        "Analyze the following syllabus text and extract the main, distinct topics. \
         Return a JSON object with a single key \"topics\" which is a list of these topic strings. \
         Example: {{\"topics\": [\"Photosynthesis\", \"Cellular Respiration\", \"Mitosis\"]}} \
         Syllabus Text: --- {syllabus_text} ---"
    )
}

pub fn generate_quiz(
    topic: Option<&str>,
    full_syllabus_topics: &[String],
    num_questions: u32,
    difficulty: &str,
) -> String {
    let topic_clause = if full_syllabus_topics.is_empty() {
        format!("the topic of '{}'", topic.unwrap_or_default())
    } else {
        format!("the following topics: {}", full_syllabus_topics.join(", "))
    };
    format!(
        "Generate a JSON object for a quiz based on {topic_clause}. \
         Number of Questions: {num_questions}. Difficulty: \"{difficulty}\". \
         The JSON object must follow this exact structure: \
         {{\"quiz\": [{{\"id\": 1, \"question\": \"...\", \"options\": [\"A\", \"B\", \"C\", \"D\"], \"correctAnswer\": \"...\"}}]}}. \
         Ensure the 'correctAnswer' value is one of the strings from the 'options' array. \
         Do not include any text or explanations outside of the JSON object."
    )
}

pub fn report_summary(topic: &str, results: &[QuizResult]) -> String {
    let correct_count = results.iter().filter(|r| r.is_correct).count();
    let total_count = results.len();
    let mut results_text = String::new();
    for result in results {
        results_text.push_str(&format!(
            "- Question: {}\n  - Your Answer: {}\n  - Correct: {}\n",
            result.question, result.user_answer, result.is_correct
        ));
    }
    format!(
        "A student took a quiz on '{topic}' scoring {correct_count}/{total_count}. \
         Results: {results_text}. \
         Write a concise, encouraging 3-4 line summary. Identify strengths and areas for improvement. \
         Return JSON: {{\"summary\": \"Your summary here...\"}}"
    )
}

pub fn video_suggestions(topic: &str) -> String {
    format!(
        "Generate a JSON object with 3 effective YouTube search queries for a student struggling with \"{topic}\". \
         JSON structure: {{\"suggestions\": [\"Query 1\", \"Query 2\", \"Query 3\"]}}"
    )
}

pub fn process_notes(instruction: &str, notes_text: &str) -> String {
    format!(
        "Instruction: {instruction}. Text to process: --- {notes_text} --- \
         Return a JSON object with a single key \"processed_text\" containing the result."
    )
}

pub fn study_plan(current_date: &str, exam_date: &str, syllabus_text: &str) -> String {
    format!(
        "Act as an expert academic planner. Create a detailed, day-by-day study plan. \
         Current Date: {current_date}. Exam Date: {exam_date}. \
         Syllabus Topics: --- {syllabus_text} --- \
         Instructions: 1. Analyze days available. 2. Distribute topics logically. \
         3. Allocate revision days. 4. Include buffer/rest days. 5. Output a well-structured plan. \
         6. Return a JSON object with a single key \"plan_text\" containing the full study plan as a string."
    )
}

pub fn material_suggestions(syllabus_text: &str) -> String {
    format!(
        "Based on the following syllabus, suggest 3 to 5 relevant and high-quality study materials \
         like textbooks, online courses, or authoritative websites. For each suggestion, provide a \
         title, a short description, and a direct link.\n\n\
         Syllabus:\n---\n{syllabus_text}\n---\n\n\
         Return a JSON object with a single key \"materials\" which is a list of objects.\n\
         Each object in the list must have these three keys: \"title\", \"description\", and \"link\". \
         Ensure links are valid URLs.\n\
         Example format: {{\"materials\": [{{\"title\": \"Campbell Biology\", \"description\": \"A comprehensive textbook covering all major topics in biology.\", \"link\": \"https://www.amazon.com/Campbell-Biology-12th-Lisa-Urry/dp/0135188741\"}}]}}"
    )
}

pub fn chat(message: &str, history: &[ChatTurn], performance: &[PerformanceRecord]) -> String {
    let recent_performance =
        &performance[performance.len().saturating_sub(CHAT_PERFORMANCE_WINDOW)..];
    let performance_summary = if recent_performance.is_empty() {
        "No quiz data available yet.".to_string()
    } else {
        let mut summary = "Here is the student's recent quiz performance:\n".to_string();
        for record in recent_performance {
            summary.push_str(&format!(
                "- On the topic '{}', they scored {}.\n",
                record.topic,
                render_score(&record.score)
            ));
        }
        summary
    };

    let recent_history = &history[history.len().saturating_sub(CHAT_HISTORY_WINDOW)..];
    let history_formatted = recent_history
        .iter()
        .map(|turn| {
            let speaker = if turn.role == "user" { "Student" } else { "Coach" };
            format!("{speaker}: {}", turn.text)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a friendly, encouraging, and knowledgeable AI Study Coach. Your goal is to help a student succeed.\n\
         Keep your responses concise and conversational (2-4 sentences). Do not use markdown formatting.\n\n\
         **Student Context:**\n{performance_summary}\n\n\
         **Conversation History:**\n{history_formatted}\n\n\
         Now, respond to the student's latest message.\n\
         Student: {message}\n\
         Coach:"
    )
}

fn render_score(score: &Value) -> String {
    match score.as_str() {
        Some(s) => s.to_string(),
        None => score.to_string(),
    }
}
