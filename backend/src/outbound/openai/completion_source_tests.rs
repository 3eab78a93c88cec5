//! Tests for the chat-completion adapter against a local stub server.

use std::time::Duration;

use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{PromptBudget, reduce_comments};
use crate::settings::Secret;
use crate::test_support::upstream::{StubResponse, UpstreamStub, unreachable_base_url};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

fn source(server: Url) -> OpenAiCompletionSource {
    let api_base = server.join("v1").expect("versioned base");
    OpenAiCompletionSource::new(OpenAiConfig {
        api_base,
        api_key: Secret::new("sk-test"),
        model: "gpt-4o-mini".to_owned(),
        max_tokens: 500,
        temperature: 0.7,
        timeout: Duration::from_secs(5),
    })
    .expect("adapter builds")
}

fn prompt() -> PromptText {
    reduce_comments(&["Loves hiking".to_owned()], PromptBudget::default())
}

fn reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

#[actix_web::test]
async fn sends_chat_request_and_returns_first_choice() {
    let stub = UpstreamStub::start([(
        COMPLETIONS_PATH,
        StubResponse::json(200, reply("An outdoorsy optimist.")),
    )]);
    let prompt = prompt();

    let text = source(stub.base_url())
        .complete(&prompt)
        .await
        .expect("completion returned");

    assert_eq!(text, "An outdoorsy optimist.");
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].header("authorization"), Some("Bearer sk-test"));
    let body = requests[0].json();
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["max_tokens"], 500);
    assert_eq!(body["temperature"], 0.7);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], prompt.as_str());
    stub.stop().await;
}

#[rstest]
#[case(401)]
#[case(429)]
#[case(500)]
#[actix_web::test]
async fn non_success_status_is_reported(#[case] status: u16) {
    let stub = UpstreamStub::start([(
        COMPLETIONS_PATH,
        StubResponse::raw(status, r#"{"error":{"message":"nope"}}"#),
    )]);

    let error = source(stub.base_url())
        .complete(&prompt())
        .await
        .expect_err("status failure");

    assert_eq!(
        error,
        CompletionSourceError::status(status, r#"{"error":{"message":"nope"}}"#)
    );
    stub.stop().await;
}

#[rstest]
#[case::no_choices(json!({ "choices": [] }))]
#[case::no_message(json!({ "choices": [{ "index": 0 }] }))]
#[case::null_content(json!({
    "choices": [{ "message": { "role": "assistant", "content": null } }]
}))]
#[case::not_an_object(json!("busy"))]
#[actix_web::test]
async fn missing_completion_text_is_malformed(#[case] payload: Value) {
    let stub = UpstreamStub::start([(COMPLETIONS_PATH, StubResponse::json(200, payload))]);

    let error = source(stub.base_url())
        .complete(&prompt())
        .await
        .expect_err("malformed");

    assert_eq!(error.label(), "malformed");
    stub.stop().await;
}

#[actix_web::test]
async fn connection_failure_is_transport_error() {
    let error = source(unreachable_base_url())
        .complete(&prompt())
        .await
        .expect_err("nothing listening");

    assert_eq!(error.label(), "transport");
}
