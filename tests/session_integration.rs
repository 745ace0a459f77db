mod common;

use serde_json::Value;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use careerbot::catalog::{build_intro_message, list_industries};
use careerbot::config::{ChatConfig, PartialReplyPolicy, ProviderConfig};
use careerbot::error::CareerbotError;
use careerbot::providers::{GroqProvider, Role};
use careerbot::session::{ChatSession, ReplyStatus, SessionState};

use common::{content_chunk, sse_body, streamed_reply};

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

const EXPECTED_INTRO: &str = "Here are 7 growing industries along with their estimated growth:\n\n\
1. **Technology** - Estimated Growth: 5-10% annually\n\
2. **Healthcare** - Estimated Growth: 7-10% annually\n\
3. **Renewable Energy** - Estimated Growth: 8-12% annually\n\
4. **E-commerce** - Estimated Growth: 6-9% annually\n\
5. **Finance & Fintech** - Estimated Growth: 6-8% annually\n\
6. **Education Technology (EdTech)** - Estimated Growth: 15% annually\n\
7. **Logistics & Supply Chain** - Estimated Growth: 4-8% annually\n";

fn groq_session(server: &MockServer, policy: PartialReplyPolicy) -> ChatSession {
    let provider = GroqProvider::new(ProviderConfig {
        api_base: server.uri(),
        api_key: Some("gsk_test".to_string()),
        ..ProviderConfig::default()
    })
    .unwrap();
    let chat = ChatConfig {
        partial_reply_policy: policy,
        ..ChatConfig::default()
    };
    ChatSession::new(provider, &chat)
}

#[test]
fn test_intro_for_fixed_catalog_is_exact() {
    assert_eq!(build_intro_message(list_industries()), EXPECTED_INTRO);
}

#[tokio::test]
async fn test_first_turn_sends_seeded_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(streamed_reply(&["Hel", "", "lo"]), "text/event-stream"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = groq_session(&server, PartialReplyPolicy::Keep);
    let mut state = SessionState::new();
    session.initialize(&mut state);

    let reply = session
        .submit(&mut state, "Which industry grows fastest?")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reply.text, "Hello");
    assert_eq!(reply.status, ReplyStatus::Complete);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "You are a helpful assistant.");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], EXPECTED_INTRO);
    assert_eq!(messages[2]["content"], "Which industry grows fastest?");

    let history = state.history().unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(state.transcript().len(), 2);
    assert_eq!(state.transcript().entries()[1].content(), "Hello");
}

#[tokio::test]
async fn test_second_turn_resends_whole_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(streamed_reply(&["Answer"]), "text/event-stream"),
        )
        .expect(2)
        .mount(&server)
        .await;

    let session = groq_session(&server, PartialReplyPolicy::Keep);
    let mut state = SessionState::new();

    session.submit(&mut state, "first").await.unwrap();
    session.submit(&mut state, "second").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let roles: Vec<&str> = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["role"].as_str().unwrap())
        .collect();
    assert_eq!(
        roles,
        vec!["system", "assistant", "user", "assistant", "user"]
    );
    assert_eq!(state.history().unwrap().len(), 6);
    assert_eq!(state.completed_turns(), 2);
}

#[tokio::test]
async fn test_service_error_keeps_user_message_and_session_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(streamed_reply(&["Recovered"]), "text/event-stream"),
        )
        .mount(&server)
        .await;

    let session = groq_session(&server, PartialReplyPolicy::Keep);
    let mut state = SessionState::new();

    let err = session.submit(&mut state, "first").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CareerbotError>(),
        Some(CareerbotError::ServiceUnavailable(_))
    ));
    let last = state.history().unwrap().last().unwrap();
    assert_eq!(last.role(), Role::User);
    assert_eq!(last.content(), "first");

    let reply = session.submit(&mut state, "again").await.unwrap().unwrap();
    assert_eq!(reply.text, "Recovered");
    assert_eq!(state.failed_turns(), 1);
    assert_eq!(state.completed_turns(), 1);
}

#[tokio::test]
async fn test_truncated_stream_kept_as_partial_reply() {
    let server = MockServer::start().await;
    let chunk = content_chunk("Consider ");
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(sse_body(&[chunk.as_str()]), "text/event-stream"),
        )
        .mount(&server)
        .await;

    let session = groq_session(&server, PartialReplyPolicy::Annotate);
    let mut state = SessionState::new();

    let reply = session.submit(&mut state, "advice?").await.unwrap().unwrap();

    assert_eq!(reply.text, "Consider  [reply incomplete]");
    assert!(matches!(reply.status, ReplyStatus::Partial { .. }));
    assert_eq!(
        state.history().unwrap().last().unwrap().content(),
        "Consider  [reply incomplete]"
    );
}
