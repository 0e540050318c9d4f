use blogsmith_engine::{
    GenerateError, ImageGenerator, OpenAiClient, OpenAiConfig, TextGenerator,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(OpenAiConfig::new(server.uri(), "test-key")).unwrap()
}

#[tokio::test]
async fn completion_returns_generated_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "text-davinci-003",
            "max_tokens": 1000,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"text": "A generated blog body."}]
        })))
        .mount(&server)
        .await;

    let text = client_for(&server)
        .generate_text("some prompt")
        .await
        .unwrap();
    assert_eq!(text, "A generated blog body.");
}

#[tokio::test]
async fn completion_http_error_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_text("some prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::HttpStatus(500)));
}

#[tokio::test]
async fn malformed_completion_payload_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_text("some prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::MalformedResponse(_)));
}

#[tokio::test]
async fn empty_completion_text_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"text": "   "}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_text("some prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::EmptyCompletion));
}

#[tokio::test]
async fn image_generation_returns_one_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_partial_json(serde_json::json!({
            "n": 1,
            "size": "256x256",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"url": "https://images.example/abc.png"}]
        })))
        .mount(&server)
        .await;

    let url = client_for(&server)
        .generate_image("Abstract anime image of X")
        .await
        .unwrap();
    assert_eq!(url, "https://images.example/abc.png");
}

#[tokio::test]
async fn image_generation_without_urls_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": []
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_image("prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::MalformedResponse(_)));
}
