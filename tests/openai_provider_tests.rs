use std::sync::{Arc, Mutex};

use notesai::client::prompts::SYSTEM_PROMPT;
use notesai::{
    ApiKey, ClientConfig, CompletionClient, CompletionProvider, CompletionRequest, Credential,
    GenerationConfig, InspectorConfig, LlmError, Message, OpenAiChatClient, OpenAiConfig,
    Provider, ResponseFormat, SearchableItem,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, Request as WiremockRequest, ResponseTemplate,
    matchers::{header, method, path},
};

const API_KEY: &str = "sk-test-0123456789abcdef";

fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_717_000_000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49 }
    })
}

fn client_for(server: &MockServer) -> CompletionClient {
    CompletionClient::with_config(
        ClientConfig::new(Provider::OpenAI)
            .with_api_key(ApiKey::Custom(API_KEY.to_string()))
            .with_base_url(format!("{}/v1", server.uri()))
            .with_model("gpt-4o-mini"),
    )
}

fn provider_for(server: &MockServer) -> OpenAiChatClient {
    let config = OpenAiConfig::new(Provider::OpenAI, Credential::new(API_KEY).unwrap())
        .with_base_url(format!("{}/v1", server.uri()));
    OpenAiChatClient::new(config).unwrap()
}

fn parse_body(request: &WiremockRequest) -> Value {
    serde_json::from_slice(&request.body).expect("request body should be JSON")
}

#[tokio::test]
async fn semantic_search_round_trip_against_chat_completions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", format!("Bearer {API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            r#"{"reasoning":"Mentions the trip.","results":[1,7]}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let notes = vec![
        SearchableItem::new("work/standup.md", "Blocked on review."),
        SearchableItem::new("travel/lisbon.md", "Flights booked for June."),
    ];

    let outcome = client_for(&server)
        .semantic_search("trip", &notes, 5)
        .await
        .expect("search should succeed");

    assert_eq!(outcome.results, vec![notes[1].clone()]);
    assert_eq!(outcome.reasoning, "Mentions the trip.");

    let requests = server.received_requests().await.expect("recorded requests");
    let body = parse_body(&requests[0]);
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["response_format"]["type"], "json_schema");
    assert_eq!(body["response_format"]["json_schema"]["name"], "note_ranking");
}

#[tokio::test]
async fn chat_sends_messages_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello again!")))
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .chat(&[Message::user("Hi"), Message::assistant("Hello!"), Message::user("Again")])
        .await
        .unwrap();
    assert_eq!(reply, "Hello again!");

    let requests = server.received_requests().await.unwrap();
    let roles: Vec<String> = parse_body(&requests[0])["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|message| message["role"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(roles, ["system", "user", "assistant", "user"]);
    assert!(parse_body(&requests[0]).get("response_format").is_none());
}

#[tokio::test]
async fn error_status_fails_once_without_retrying() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": { "message": "overloaded" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).summarize("note").await.unwrap_err();

    assert!(matches!(
        err,
        LlmError::UpstreamRequest {
            operation: "summarize",
            status_code: Some(500),
            ..
        }
    ));
    assert!(err.to_string().contains("overloaded"));
}

#[tokio::test]
async fn unauthorized_is_reported_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = client_for(&server).answer("q", "context").await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert!(err.to_string().contains("invalid api key"));
}

#[tokio::test]
async fn malformed_envelope_is_an_upstream_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).chat(&[]).await.unwrap_err();
    assert!(matches!(
        err,
        LlmError::UpstreamRequest {
            operation: "chat",
            ..
        }
    ));
    assert!(err.to_string().contains("<html>gateway</html>"));
}

#[tokio::test]
async fn empty_choices_fall_back_to_placeholder() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-empty",
            "model": "gpt-4o-mini",
            "choices": []
        })))
        .mount(&server)
        .await;

    let summary = client_for(&server).summarize("note").await.unwrap();
    assert_eq!(summary, notesai::client::prompts::NO_SUMMARY);
}

#[tokio::test]
async fn provider_reports_usage_and_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("pong")))
        .mount(&server)
        .await;

    let completion = provider_for(&server)
        .complete(CompletionRequest {
            messages: vec![Message::user("ping")],
            generation: GenerationConfig::new(0.0).with_max_tokens(5),
            response_format: ResponseFormat::Text,
        })
        .await
        .unwrap();

    assert_eq!(completion.text.as_deref(), Some("pong"));
    assert_eq!(completion.metadata.id, "chatcmpl-123");
    assert_eq!(completion.metadata.provider, Provider::OpenAI);
    assert_eq!(completion.usage.unwrap().total_tokens, 49);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(parse_body(&requests[0])["max_tokens"], 5);
}

#[tokio::test]
async fn inspectors_see_raw_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("done")))
        .mount(&server)
        .await;

    let sent = Arc::new(Mutex::new(Vec::<Value>::new()));
    let received = Arc::new(Mutex::new(Vec::<Value>::new()));
    let inspector = {
        let sent = sent.clone();
        let received = received.clone();
        InspectorConfig::default()
            .on_request(move |body| sent.lock().unwrap().push(body.clone()))
            .on_response(move |body| received.lock().unwrap().push(body.clone()))
    };

    let client = CompletionClient::with_config(
        ClientConfig::new(Provider::OpenRouter)
            .with_api_key(ApiKey::Custom(API_KEY.to_string()))
            .with_base_url(format!("{}/v1", server.uri()))
            .with_inspector(inspector),
    );

    client.summarize("note").await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["model"], "openai/gpt-4o-mini");
    assert_eq!(received.lock().unwrap()[0]["id"], "chatcmpl-123");
}
