//! End-to-end tests against a mock completion endpoint.

use prompt_composer::{
    CompletionClient, CompletionConfig, ComposerError, PromptComposer, Strategy,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CompletionClient {
    CompletionClient::new(CompletionConfig {
        api_base: server.uri(),
        api_key: "test-key".to_string(),
        ..Default::default()
    })
}

fn completion_body(text: &str) -> serde_json::Value {
    json!({
        "id": "cmpl-1",
        "object": "text_completion",
        "choices": [{ "text": text, "index": 0, "finish_reason": "stop" }],
        "usage": { "prompt_tokens": 5, "completion_tokens": 3, "total_tokens": 8 }
    })
}

#[tokio::test]
async fn submit_sends_fixed_parameters_and_records_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "text-davinci-002",
            "prompt": "Q",
            "max_tokens": 150,
            "n": 1,
            "stop": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("\n  A  \n")))
        .expect(1)
        .mount(&server)
        .await;

    let mut composer = PromptComposer::with_history(
        Strategy::InContext,
        client_for(&server),
        vec!["earlier".to_string()],
    );

    let response = composer.submit("Q").await.unwrap();

    assert_eq!(response, "A");
    assert_eq!(composer.transcript(), ["earlier", "[User]: Q", "[System]: A"]);
}

#[tokio::test]
async fn in_context_conversation_feeds_transcript_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .and(body_partial_json(json!({ "prompt": "What is 2+2?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("4")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .and(body_partial_json(json!({
            "prompt": "[User]: What is 2+2?\n[System]: 4\nDouble it."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("8")))
        .expect(1)
        .mount(&server)
        .await;

    let mut composer = PromptComposer::new(Strategy::InContext, client_for(&server));

    assert_eq!(composer.ask("What is 2+2?").await.unwrap().as_deref(), Some("4"));
    assert_eq!(composer.ask("Double it.").await.unwrap().as_deref(), Some("8"));
    assert_eq!(composer.transcript().len(), 4);
    assert_eq!(
        composer.transcript()[2],
        "[User]: [User]: What is 2+2?\n[System]: 4\nDouble it."
    );
}

#[tokio::test]
async fn ask_with_unmapped_strategy_skips_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let mut composer = PromptComposer::new(Strategy::from_id(0), client_for(&server));

    assert!(composer.ask("hello").await.unwrap().is_none());
    assert!(composer.transcript().is_empty());
}

#[tokio::test]
async fn api_error_propagates_and_leaves_transcript_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let mut composer = PromptComposer::new(Strategy::ChainOfThought, client_for(&server));

    let err = composer.submit("Q").await.unwrap_err();
    match err {
        ComposerError::Api(message) => assert!(message.contains("Incorrect API key")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(composer.transcript().is_empty());
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let mut composer = PromptComposer::new(Strategy::TreeOfThought, client_for(&server));

    assert!(matches!(
        composer.submit("Q").await,
        Err(ComposerError::EmptyResponse)
    ));
    assert!(composer.transcript().is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.complete("Q").await,
        Err(ComposerError::Parse(_))
    ));
}

#[tokio::test]
async fn test_connection_checks_for_hello() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(" Hello")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.test_connection().await.unwrap();

    let completion = client.complete("ping").await.unwrap();
    assert_eq!(completion.choices.len(), 1);
    assert_eq!(completion.usage.map(|u| u.total_tokens), Some(8));
}

#[tokio::test]
async fn choice_without_text_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "hi" } }]
        })))
        .mount(&server)
        .await;

    let mut composer = PromptComposer::new(Strategy::ChainOfThought, client_for(&server));

    assert!(matches!(
        composer.submit("Q").await,
        Err(ComposerError::Parse(_))
    ));
    assert!(composer.transcript().is_empty());
}

#[tokio::test]
async fn partial_usage_keeps_the_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "text": " A " }],
            "usage": { "total_tokens": 4 }
        })))
        .mount(&server)
        .await;

    let mut composer = PromptComposer::new(Strategy::InContext, client_for(&server));

    assert_eq!(composer.submit("Q").await.unwrap(), "A");
    assert_eq!(composer.transcript(), ["[User]: Q", "[System]: A"]);
}
