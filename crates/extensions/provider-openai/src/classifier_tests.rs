use super::*;

use serde_json::json;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[test]
fn test_classifier_id() {
    assert_eq!(OpenAIClassifier::new("key").id(), "openai");
}

#[test]
fn test_defaults() {
    let classifier = OpenAIClassifier::new("key");
    assert_eq!(classifier.model(), DEFAULT_MODEL);
    assert_eq!(classifier.endpoint(), "https://api.openai.com/v1/chat/completions");
}

#[test]
fn test_endpoint_trims_trailing_slash() {
    let classifier = OpenAIClassifier::new("key").with_base_url("http://localhost:11434/v1/");
    assert_eq!(classifier.endpoint(), "http://localhost:11434/v1/chat/completions");
}

#[test]
fn test_build_request_json_mode() {
    let classifier = OpenAIClassifier::new("key").with_model("gpt-4o");
    let request = classifier.build_request("group these", ClassifyOptions::json());
    assert_eq!(request.model, "gpt-4o");
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[1].content, "group these");
    assert!(request.response_format.is_some());

    let request = classifier.build_request("group these", ClassifyOptions::default());
    assert!(request.response_format.is_none());
}

#[tokio::test]
async fn test_classify_success() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/chat/completions"))
        .and(matchers::header("Authorization", "Bearer test-key"))
        .and(matchers::body_partial_json(json!({
            "model": "gpt-4o-mini",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{\"groups\": []}")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let classifier = OpenAIClassifier::new("test-key").with_base_url(mock_server.uri());
    let content = classifier
        .classify("sort my tabs", ClassifyOptions::json())
        .await
        .unwrap();
    assert_eq!(content, "{\"groups\": []}");
}

#[tokio::test]
async fn test_classify_without_key_sends_no_auth_header() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .mount(&mock_server)
        .await;

    let classifier = OpenAIClassifier::new("").with_base_url(mock_server.uri());
    classifier
        .classify("prompt", ClassifyOptions::default())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("response_format").is_none());
}

#[tokio::test]
async fn test_classify_auth_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&mock_server)
        .await;

    let classifier = OpenAIClassifier::new("bad-key").with_base_url(mock_server.uri());
    let err = classifier
        .classify("prompt", ClassifyOptions::json())
        .await
        .unwrap_err();
    match err {
        ClassifierError::AuthenticationFailed(message) => {
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_classify_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let classifier = OpenAIClassifier::new("key").with_base_url(mock_server.uri());
    let err = classifier
        .classify("prompt", ClassifyOptions::json())
        .await
        .unwrap_err();
    match err {
        ClassifierError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_classify_malformed_body() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let classifier = OpenAIClassifier::new("key").with_base_url(mock_server.uri());
    let err = classifier
        .classify("prompt", ClassifyOptions::json())
        .await
        .unwrap_err();
    assert!(matches!(err, ClassifierError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_classify_no_choices() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&mock_server)
        .await;

    let classifier = OpenAIClassifier::new("key").with_base_url(mock_server.uri());
    let err = classifier
        .classify("prompt", ClassifyOptions::json())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no choices"));
}

#[tokio::test]
async fn test_classify_empty_content() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("   ")))
        .mount(&mock_server)
        .await;

    let classifier = OpenAIClassifier::new("key").with_base_url(mock_server.uri());
    let err = classifier
        .classify("prompt", ClassifyOptions::json())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no content"));
}

#[tokio::test]
async fn test_classify_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let classifier = OpenAIClassifier::new("key")
        .with_base_url(mock_server.uri())
        .with_timeout(Duration::from_millis(200));
    let err = classifier
        .classify("prompt", ClassifyOptions::json())
        .await
        .unwrap_err();
    assert!(matches!(err, ClassifierError::Timeout(_)));
}

#[tokio::test]
async fn test_classify_unreachable_server() {
    let classifier = OpenAIClassifier::new("key").with_base_url("http://127.0.0.1:1");
    let err = classifier
        .classify("prompt", ClassifyOptions::json())
        .await
        .unwrap_err();
    assert!(matches!(err, ClassifierError::Network(_)));
}
