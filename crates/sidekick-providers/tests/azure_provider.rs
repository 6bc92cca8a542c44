//! Wire-level tests for the Azure OpenAI provider against a stubbed backend

use sidekick_providers::{
    AzureOpenAiProvider, CompletionRequest, Provider, ProviderConfig, ProviderError,
};

#[test]
fn test_creation_requires_endpoint() {
    let result = AzureOpenAiProvider::new(ProviderConfig::new("az-key", "", "my-deployment"));
    assert!(matches!(result, Err(ProviderError::ConfigError(_))));
}

#[tokio::test]
async fn test_completion_addresses_deployment_with_api_version() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/deployments/my-deployment/chat/completions")
        .match_query(mockito::Matcher::UrlEncoded(
            "api-version".to_string(),
            "2024-02-15-preview".to_string(),
        ))
        .match_header("api-key", "az-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices":[{"message":{"role":"assistant","content":" return a + b"}}],
                "usage":{"prompt_tokens":5,"completion_tokens":3,"total_tokens":8}}"#,
        )
        .create_async()
        .await;

    let provider =
        AzureOpenAiProvider::new(ProviderConfig::new("az-key", server.url(), "my-deployment"))
            .unwrap();
    let response = provider
        .completion(CompletionRequest::new("def add(a, b):"))
        .await
        .unwrap();

    assert_eq!(response.text, "return a + b");
    assert_eq!(response.usage.unwrap().total_tokens, 8);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_model_overrides_deployment() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/deployments/other-deployment/chat/completions")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"ok"}}]}"#)
        .create_async()
        .await;

    let provider =
        AzureOpenAiProvider::new(ProviderConfig::new("az-key", server.url(), "my-deployment"))
            .unwrap();
    let request = CompletionRequest {
        prompt: "anything".to_string(),
        model: Some("other-deployment".to_string()),
        ..CompletionRequest::default()
    };
    provider.completion(request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_completion_error_carries_provider_name() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/openai/deployments/my-deployment/chat/completions")
        .match_query(mockito::Matcher::Any)
        .with_status(403)
        .with_body("forbidden")
        .create_async()
        .await;

    let provider =
        AzureOpenAiProvider::new(ProviderConfig::new("az-key", server.url(), "my-deployment"))
            .unwrap();
    let error = provider
        .completion(CompletionRequest::new("anything"))
        .await
        .unwrap_err();
    match error {
        ProviderError::Api { provider, status, .. } => {
            assert_eq!(provider, "Azure OpenAI");
            assert_eq!(status, Some(403));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_unreachable_returns_false() {
    let provider = AzureOpenAiProvider::new(ProviderConfig::new(
        "az-key",
        "http://127.0.0.1:1",
        "my-deployment",
    ))
    .unwrap();
    assert!(!provider.test_connection().await);
}
