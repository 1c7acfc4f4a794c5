//! Wiremock integration tests for GeminiClassifier.
//!
//! These tests verify model discovery, request shape and error mapping
//! against a mocked Gemini endpoint.

use std::time::Duration;

use monkeycam_council::{
    CouncilError, DetectionCouncil, GeminiClassifier, ImagePayload, VisionClassifier,
    MONKEY_INSTRUCTION,
};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-pro-vision";
const TIMEOUT: Duration = Duration::from_secs(5);

fn answer(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

async fn mount_models(server: &MockServer, names: &[&str]) {
    let models: Vec<_> = names
        .iter()
        .map(|n| serde_json::json!({ "name": format!("models/{}", n) }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(header("x-goog-api-key", "test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "models": models })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_connect_finds_listed_model() {
    let server = MockServer::start().await;
    mount_models(&server, &["gemini-pro", MODEL]).await;

    let classifier = GeminiClassifier::connect("test_key", server.uri(), MODEL, TIMEOUT)
        .await
        .expect("model is listed");

    assert_eq!(classifier.model(), MODEL);
}

#[tokio::test]
async fn test_connect_rejects_missing_model() {
    let server = MockServer::start().await;
    mount_models(&server, &["gemini-pro", "gemini-1.5-flash"]).await;

    let result = GeminiClassifier::connect("test_key", server.uri(), MODEL, TIMEOUT).await;

    match result {
        Err(CouncilError::ModelUnavailable(name)) => assert_eq!(name, MODEL),
        Err(other) => panic!("expected ModelUnavailable, got {:?}", other),
        Ok(_) => panic!("expected ModelUnavailable, got a client"),
    }
}

#[tokio::test]
async fn test_model_listing_follows_page_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{ "name": "models/gemini-pro-vision" }]
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{ "name": "models/gemini-pro" }],
            "nextPageToken": "page-2"
        })))
        .with_priority(2)
        .mount(&server)
        .await;

    let classifier = GeminiClassifier::with_base_url("test_key", server.uri(), MODEL, TIMEOUT).unwrap();

    assert!(classifier.model_available().await.unwrap());
}

#[tokio::test]
async fn test_classify_sends_instruction_and_inline_image() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{}:generateContent", MODEL)))
        .and(header("x-goog-api-key", "test_key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{
                "parts": [
                    { "text": MONKEY_INSTRUCTION },
                    { "inline_data": { "mime_type": "image/jpeg", "data": "/9j/" } }
                ]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("True\n")))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = GeminiClassifier::with_base_url("test_key", server.uri(), MODEL, TIMEOUT).unwrap();
    let image = ImagePayload::jpeg(vec![0xFF, 0xD8, 0xFF]);

    let text = classifier.classify(&image, MONKEY_INSTRUCTION).await.unwrap();

    assert_eq!(text, "True\n");
}

#[tokio::test]
async fn test_classify_without_candidates_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{}:generateContent", MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let classifier = GeminiClassifier::with_base_url("test_key", server.uri(), MODEL, TIMEOUT).unwrap();
    let result = classifier
        .classify(&ImagePayload::jpeg(vec![1]), MONKEY_INSTRUCTION)
        .await;

    assert!(matches!(result, Err(CouncilError::EmptyResponse)));
}

#[tokio::test]
async fn test_classify_maps_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{}:generateContent", MODEL)))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let classifier = GeminiClassifier::with_base_url("bad_key", server.uri(), MODEL, TIMEOUT).unwrap();
    let result = classifier
        .classify(&ImagePayload::jpeg(vec![1]), MONKEY_INSTRUCTION)
        .await;

    assert!(matches!(result, Err(CouncilError::AuthenticationFailed)));
}

#[tokio::test]
async fn test_classify_maps_api_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{}:generateContent", MODEL)))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": { "code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED" }
        })))
        .mount(&server)
        .await;

    let classifier = GeminiClassifier::with_base_url("test_key", server.uri(), MODEL, TIMEOUT).unwrap();
    let result = classifier
        .classify(&ImagePayload::jpeg(vec![1]), MONKEY_INSTRUCTION)
        .await;

    match result {
        Err(CouncilError::Api { status, message }) => {
            assert_eq!(status, 429);
            assert_eq!(message, "Resource has been exhausted");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_council_over_gemini_makes_three_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{}:generateContent", MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(" True ")))
        .expect(3)
        .mount(&server)
        .await;

    let classifier = GeminiClassifier::with_base_url("test_key", server.uri(), MODEL, TIMEOUT).unwrap();
    let council = DetectionCouncil::new(&classifier);

    let outcome = council
        .evaluate(&ImagePayload::jpeg(vec![0xFF, 0xD8]))
        .await
        .unwrap();

    assert!(outcome.result.well_formed);
    assert!(outcome.result.monkeys_detected);
    assert_eq!(outcome.tally.trues, 3);
    assert_eq!(outcome.classifier, MODEL);
}
