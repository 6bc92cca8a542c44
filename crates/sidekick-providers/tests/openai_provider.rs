//! Wire-level tests for the OpenAI provider against a stubbed backend

use sidekick_providers::{
    CompletionRequest, OpenAiProvider, Provider, ProviderConfig, ProviderError,
};

fn provider_for(server: &mockito::Server) -> OpenAiProvider {
    OpenAiProvider::new(ProviderConfig::new("sk-test", server.url(), "gpt-4")).unwrap()
}

#[tokio::test]
async fn test_completion_normalizes_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices":[{"message":{"role":"assistant","content":" return a + b"}}],
                "usage":{"prompt_tokens":5,"completion_tokens":3,"total_tokens":8}}"#,
        )
        .create_async()
        .await;

    let provider = provider_for(&server);
    let response = provider
        .completion(CompletionRequest::new("def add(a, b):"))
        .await
        .unwrap();

    assert_eq!(response.text, "return a + b");
    let usage = response.usage.unwrap();
    assert_eq!(usage.prompt_tokens, 5);
    assert_eq!(usage.completion_tokens, 3);
    assert_eq!(usage.total_tokens, 8);
    assert!(response.response_time.is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_completion_sends_system_and_user_messages() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": "You are terse."},
                {"role": "user", "content": "fn main() {"}
            ],
            "max_tokens": 50,
            "temperature": 0.2
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"}"}}]}"#)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let request = CompletionRequest {
        prompt: "fn main() {".to_string(),
        model: Some("gpt-4o".to_string()),
        max_tokens: Some(50),
        temperature: Some(0.2),
        system_prompt: Some("You are terse.".to_string()),
    };
    provider.completion(request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_completion_missing_usage_is_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"done"}}]}"#)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let response = provider
        .completion(CompletionRequest::new("anything"))
        .await
        .unwrap();
    assert!(response.usage.is_none());
}

#[tokio::test]
async fn test_completion_error_status_carries_provider_and_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body("invalid api key")
        .create_async()
        .await;

    let provider = provider_for(&server);
    let error = provider
        .completion(CompletionRequest::new("anything"))
        .await
        .unwrap_err();

    match error {
        ProviderError::Api {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, "OpenAI");
            assert_eq!(status, Some(401));
            assert_eq!(message, "invalid api key");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_completion_malformed_body_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json")
        .create_async()
        .await;

    let provider = provider_for(&server);
    let error = provider
        .completion(CompletionRequest::new("anything"))
        .await
        .unwrap_err();
    assert!(matches!(error, ProviderError::Api { status: None, .. }));
}

#[tokio::test]
async fn test_connection_ok() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/models")
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .create_async()
        .await;

    let provider = provider_for(&server);
    assert!(provider.test_connection().await);
}

#[tokio::test]
async fn test_connection_unreachable_returns_false() {
    let provider =
        OpenAiProvider::new(ProviderConfig::new("sk-test", "http://127.0.0.1:1", "gpt-4")).unwrap();
    assert!(!provider.test_connection().await);
}
