//! End-to-end generation through the real HTTP adapter against a stubbed endpoint.

use property_writer_core::{GenerationKind, SessionError, WriterSession};
use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use web_lib::adapters::ChatCompletionAdapter;

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

fn adapter_for(server: &MockServer) -> ChatCompletionAdapter {
    ChatCompletionAdapter::new(
        reqwest::Client::new(),
        format!("{}{}", server.uri(), COMPLETIONS_PATH),
        "llama-3.3-70b-versatile".to_string(),
    )
}

fn ready_session() -> WriterSession {
    let mut session = WriterSession::new();
    session.set_credential("gsk_live_key");
    session.attributes.location = "Near Highway".to_string();
    session.attributes.area = "1000".to_string();
    session
}

async fn sent_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.body_json::<Value>().unwrap())
        .collect()
}

#[tokio::test]
async fn successful_completion_becomes_the_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer gsk_live_key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"choices":[{"message":{"content":"Sample description text."}}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    let adapter = adapter_for(&server);
    let mut session = ready_session();

    session.generate(&adapter, GenerationKind::Generate).await.unwrap();

    assert_eq!(session.description(), "Sample description text.");
    assert!(session.last_error().is_none());

    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies[0]["model"], "llama-3.3-70b-versatile");
    assert_eq!(bodies[0]["max_tokens"], 500);
    assert_eq!(bodies[0]["temperature"], 0.7);
    assert_eq!(bodies[0]["messages"][0]["role"], "user");
    let prompt = bodies[0]["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("Location: Near Highway"));
    assert!(prompt.contains("Area: 1000 sq ft"));
}

#[tokio::test]
async fn rejected_key_leaves_description_and_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;
    let adapter = adapter_for(&server);
    let mut session = ready_session();
    session.edit("Hand-written draft");

    let err = session.generate(&adapter, GenerationKind::Generate).await.unwrap_err();

    assert!(matches!(err, SessionError::Completion(_)));
    assert_eq!(session.description(), "Hand-written draft");
    let shown = session.last_error().unwrap().to_string();
    assert!(shown.contains("401"), "{shown}");
    assert!(shown.contains("invalid api key"), "{shown}");
}

#[tokio::test]
async fn regenerate_resends_same_prompt_hotter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"choices":[{"message":{"content":"A fresh take."}}]}"#,
        ))
        .expect(2)
        .mount(&server)
        .await;
    let adapter = adapter_for(&server);
    let mut session = ready_session();

    session.generate(&adapter, GenerationKind::Generate).await.unwrap();
    session.generate(&adapter, GenerationKind::Regenerate).await.unwrap();

    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["temperature"], 0.7);
    assert_eq!(bodies[1]["temperature"], 0.9);
    assert_eq!(bodies[0]["messages"], bodies[1]["messages"]);
}

#[tokio::test]
async fn blank_location_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let adapter = adapter_for(&server);
    let mut session = ready_session();
    session.attributes.location.clear();

    let err = session.generate(&adapter, GenerationKind::Generate).await.unwrap_err();

    assert!(matches!(err, SessionError::Validation(_)));
    assert!(sent_bodies(&server).await.is_empty());
}
