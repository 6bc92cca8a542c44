//! Wire-level tests for the Anthropic provider against a stubbed backend

use sidekick_providers::{
    AnthropicProvider, CompletionRequest, Provider, ProviderConfig, ProviderError,
};

#[test]
fn test_creation_empty_key_is_config_error() {
    let result = AnthropicProvider::new(ProviderConfig::new(
        "",
        "https://api.anthropic.com",
        "claude-3-5-sonnet-20241022",
    ));
    assert!(matches!(result, Err(ProviderError::ConfigError(_))));
}

#[tokio::test]
async fn test_completion_maps_usage_and_sums_total() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "sk-ant-test")
        .match_header("anthropic-version", "2023-06-01")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"content":[{"type":"text","text":"  return a + b  "}],
                "stop_reason":"end_turn",
                "usage":{"input_tokens":12,"output_tokens":4}}"#,
        )
        .create_async()
        .await;

    let provider = AnthropicProvider::new(ProviderConfig::new(
        "sk-ant-test",
        server.url(),
        "claude-3-5-sonnet-20241022",
    ))
    .unwrap();
    let response = provider
        .completion(CompletionRequest::new("def add(a, b):"))
        .await
        .unwrap();

    assert_eq!(response.text, "return a + b");
    let usage = response.usage.unwrap();
    assert_eq!(usage.prompt_tokens, 12);
    assert_eq!(usage.completion_tokens, 4);
    assert_eq!(usage.total_tokens, 16);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_completion_sends_system_as_top_level_field() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "claude-3-5-sonnet-20241022",
            "system": "You are terse.",
            "messages": [{"role": "user", "content": "fn main() {"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content":[{"type":"text","text":"}"}]}"#)
        .create_async()
        .await;

    let provider = AnthropicProvider::new(ProviderConfig::new(
        "sk-ant-test",
        server.url(),
        "claude-3-5-sonnet-20241022",
    ))
    .unwrap();
    let request = CompletionRequest {
        prompt: "fn main() {".to_string(),
        system_prompt: Some("You are terse.".to_string()),
        ..CompletionRequest::default()
    };
    provider.completion(request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_completion_error_carries_provider_name() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/messages")
        .with_status(429)
        .with_body("rate limited")
        .create_async()
        .await;

    let provider = AnthropicProvider::new(ProviderConfig::new(
        "sk-ant-test",
        server.url(),
        "claude-3-5-sonnet-20241022",
    ))
    .unwrap();
    let error = provider
        .completion(CompletionRequest::new("anything"))
        .await
        .unwrap_err();

    match error {
        ProviderError::Api { provider, status, .. } => {
            assert_eq!(provider, "Anthropic");
            assert_eq!(status, Some(429));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_unreachable_returns_false() {
    let provider = AnthropicProvider::new(ProviderConfig::new(
        "sk-ant-test",
        "http://127.0.0.1:1",
        "claude-3-5-sonnet-20241022",
    ))
    .unwrap();
    assert!(!provider.test_connection().await);
}
