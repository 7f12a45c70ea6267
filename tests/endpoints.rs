//! Router-level tests using the dummy provider, so every endpoint can be
//! exercised end to end without a network call.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use study_gateway::config::Config;
use study_gateway::gateway_util::AppStateData;
use study_gateway::model::GenerativeModel;
use study_gateway::providers::dummy::DummyProvider;
use study_gateway::routes::build_router;

const BOUNDARY: &str = "study-gateway-test-boundary";

fn router_with_dummy(model_name: &str) -> Router {
    let state = AppStateData::with_model(
        Arc::new(Config::default()),
        Some(Arc::new(GenerativeModel::Dummy(DummyProvider::new(
            model_name.to_string(),
        )))),
    );
    build_router(state)
}

fn router_without_model() -> Router {
    let state = AppStateData::with_model(Arc::new(Config::default()), None);
    build_router(state)
}

async fn response_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post_json(router: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    response_json(router.oneshot(request).await.unwrap()).await
}

/// Builds a multipart/form-data body from (field name, optional filename, content) parts.
fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_multipart(
    router: Router,
    path: &str,
    parts: &[(&str, Option<&str>, &[u8])],
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    response_json(router.oneshot(request).await.unwrap()).await
}

#[tokio::test]
async fn test_index_returns_liveness_string() {
    let router = router_without_model();
    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Study Gateway is running!");
}

#[tokio::test]
async fn test_unknown_route_returns_404_json() {
    let (status, body) = post_json(router_without_model(), "/no-such-route", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn test_generate_quiz_happy_path() {
    let (status, body) = post_json(
        router_with_dummy("quiz"),
        "/generate-quiz",
        json!({"topic": "Photosynthesis", "num_questions": 3, "difficulty": "easy"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let quiz = body["quiz"].as_array().unwrap();
    assert_eq!(quiz.len(), 3);
    for question in quiz {
        let options: Vec<&str> = question["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_str().unwrap())
            .collect();
        assert_eq!(options.len(), 4);
        let correct = question["correctAnswer"].as_str().unwrap();
        assert!(options.contains(&correct));
    }
}

#[tokio::test]
async fn test_generate_quiz_accepts_full_syllabus_topics() {
    let (status, _) = post_json(
        router_with_dummy("quiz"),
        "/generate-quiz",
        json!({"full_syllabus_topics": ["Mitosis", "Meiosis"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_generate_quiz_without_topic_is_400() {
    let (status, body) = post_json(router_with_dummy("quiz"), "/generate-quiz", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Topic or full syllabus topics are required.");
}

#[tokio::test]
async fn test_generate_quiz_without_configured_model_is_500() {
    let (status, body) = post_json(
        router_without_model(),
        "/generate-quiz",
        json!({"topic": "Photosynthesis"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_generate_quiz_rejects_answer_outside_options() {
    let (status, _) = post_json(
        router_with_dummy("bad_quiz"),
        "/generate-quiz",
        json!({"topic": "Photosynthesis"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_generate_quiz_with_non_json_model_output_is_500() {
    let (status, body) = post_json(
        router_with_dummy("malformed"),
        "/generate-quiz",
        json!({"topic": "Photosynthesis"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("JSON"));
}

#[tokio::test]
async fn test_generate_report_summary_happy_path() {
    let (status, body) = post_json(
        router_with_dummy("summary"),
        "/generate-report-summary",
        json!({
            "topic": "Photosynthesis",
            "results": [
                {"question": "Q1", "userAnswer": "Chlorophyll", "isCorrect": true},
                {"question": "Q2", "userAnswer": "Thylakoid", "isCorrect": false},
            ],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["summary"].as_str().unwrap().contains("Great work"));
}

#[tokio::test]
async fn test_video_suggestions_returns_exactly_three() {
    let (status, body) = post_json(
        router_with_dummy("suggestions"),
        "/get-video-suggestions",
        json!({"topic": "Thermodynamics"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 3);
    for suggestion in suggestions {
        assert!(suggestion.is_string());
    }
}

#[tokio::test]
async fn test_video_suggestions_without_topic_is_400() {
    let (status, body) = post_json(
        router_with_dummy("suggestions"),
        "/get-video-suggestions",
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Topic is required");
}

#[tokio::test]
async fn test_process_notes_with_unreadable_pdf_is_400_and_skips_model() {
    // The "error" dummy fails if generate is reached, so a 400 here proves the
    // model was never invoked.
    let (status, body) = post_multipart(
        router_with_dummy("error"),
        "/process-notes",
        &[
            ("notes", Some("notes.pdf"), b"this is not a pdf"),
            ("action", None, b"summarize"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Could not extract text"));
}

#[tokio::test]
async fn test_process_notes_with_invalid_action_is_400() {
    let (status, body) = post_multipart(
        router_with_dummy("processed_text"),
        "/process-notes",
        &[
            ("notes", Some("notes.pdf"), b"%PDF-1.4 pretend"),
            ("action", None, b"translate"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid action specified.");
}

#[tokio::test]
async fn test_process_notes_without_file_is_400() {
    let (status, body) = post_multipart(
        router_with_dummy("processed_text"),
        "/process-notes",
        &[("action", None, b"summarize")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("notes"));
}

#[tokio::test]
async fn test_parse_syllabus_without_file_is_400() {
    let (status, _) = post_multipart(
        router_with_dummy("topics"),
        "/parse-syllabus",
        &[("unrelated", None, b"x")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_parse_syllabus_with_empty_filename_is_400() {
    let (status, body) = post_multipart(
        router_with_dummy("topics"),
        "/parse-syllabus",
        &[("syllabus", Some(""), b"content")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No selected file");
}

#[tokio::test]
async fn test_study_plan_without_exam_date_is_400() {
    let (status, body) = post_multipart(
        router_with_dummy("plan"),
        "/generate-study-plan",
        &[("syllabus", Some("syllabus.pdf"), b"%PDF-1.4 pretend")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Exam date not provided");
}

#[tokio::test]
async fn test_material_suggestions_without_content_is_400() {
    let (status, body) = post_multipart(
        router_with_dummy("materials"),
        "/get-material-suggestions",
        &[("unrelated", None, b"x")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Syllabus content not provided or could not be read."
    );
}

#[tokio::test]
async fn test_material_suggestions_from_text_field() {
    let (status, body) = post_multipart(
        router_with_dummy("materials"),
        "/get-material-suggestions",
        &[("syllabus_text", None, b"Photosynthesis, Cellular Respiration")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let materials = body["materials"].as_array().unwrap();
    assert!((3..=5).contains(&materials.len()));
    for material in materials {
        assert!(material["title"].is_string());
        assert!(material["description"].is_string());
        assert!(material["link"].is_string());
    }
}

#[tokio::test]
async fn test_material_suggestions_failure_is_generic() {
    let (status, body) = post_multipart(
        router_with_dummy("error"),
        "/get-material-suggestions",
        &[("syllabus_text", None, b"Photosynthesis")],
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Failed to generate suggestions. The AI might be unavailable."
    );
}

#[tokio::test]
async fn test_chat_without_message_is_400() {
    let (status, body) = post_json(router_with_dummy("chat"), "/chat", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No message provided");
}

#[tokio::test]
async fn test_chat_happy_path() {
    let (status, body) = post_json(
        router_with_dummy("chat"),
        "/chat",
        json!({"message": "How should I study entropy?"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["response"].as_str().unwrap().contains("entropy"));
}

#[tokio::test]
async fn test_chat_failure_is_generic() {
    let (status, body) = post_json(
        router_with_dummy("error"),
        "/chat",
        json!({"message": "hello"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An error occurred in the chat service.");
}

#[tokio::test]
async fn test_chat_windows_history_and_performance() {
    // The "echo" dummy returns the assembled prompt, exposing exactly what
    // context the handler kept.
    let history: Vec<Value> = (0..10)
        .map(|i| json!({"role": if i % 2 == 0 { "user" } else { "model" }, "text": format!("turn {i}")}))
        .collect();
    let performance: Vec<Value> = (0..5)
        .map(|i| json!({"topic": format!("topic {i}"), "score": i}))
        .collect();
    let (status, body) = post_json(
        router_with_dummy("echo"),
        "/chat",
        json!({"message": "latest", "history": history, "performance": performance}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let prompt = body["response"].as_str().unwrap();
    for i in 0..4 {
        assert!(!prompt.contains(&format!("turn {i}")));
    }
    for i in 4..10 {
        assert!(prompt.contains(&format!("turn {i}")));
    }
    assert!(!prompt.contains("topic 0"));
    assert!(!prompt.contains("topic 1"));
    assert!(prompt.contains("topic 2"));
    assert!(prompt.contains("topic 4"));
}
