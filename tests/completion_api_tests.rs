use serde_json::{Value, json};
use webpilot::{CompletionParams, CompletionProvider, LlmError, OpenAiClient, OpenAiConfig};
use wiremock::{
    Mock, MockServer, Request as WiremockRequest, ResponseTemplate,
    matchers::{header, method, path},
};

#[tokio::test]
async fn completion_returns_the_first_choice_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(completion_response(&[
            "CLICK 3",
            "SCROLL DOWN",
            "TYPESUBMIT 1 \"kettle\"",
        ]))
        .mount(&server)
        .await;

    let client = client_for(&server, CompletionParams::default());
    let text = client
        .complete("pick the next command", None)
        .await
        .expect("completion");
    assert_eq!(text, "CLICK 3");
}

#[tokio::test]
async fn requests_carry_the_full_parameter_set() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(completion_response(&["ok"]))
        .mount(&server)
        .await;

    let params = CompletionParams {
        temperature: 0.5,
        max_tokens: 50,
        ..CompletionParams::default()
    };
    let client = client_for(&server, params);
    client.complete("first", None).await.expect("completion");
    client.complete("second", None).await.expect("completion");

    let requests = server
        .received_requests()
        .await
        .expect("mock server should record requests");
    assert_eq!(requests.len(), 2);

    let first = parse_body(&requests[0]);
    let mut keys: Vec<&str> = first
        .as_object()
        .expect("json object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "best_of",
            "frequency_penalty",
            "max_tokens",
            "model",
            "n",
            "presence_penalty",
            "prompt",
            "temperature",
            "top_p",
        ]
    );

    assert_eq!(first["model"], "gpt-3.5-turbo-instruct");
    assert_eq!(first["prompt"], "first");
    assert_eq!(first["temperature"], 0.5);
    assert_eq!(first["max_tokens"], 50);
    assert_eq!(first["top_p"], 1.0);
    assert_eq!(first["frequency_penalty"], 0.0);
    assert_eq!(first["presence_penalty"], 0.0);
    assert_eq!(first["n"], 1);
    assert_eq!(first["best_of"], 1);

    // The same settings ride along on every call; only the prompt differs.
    let mut first = first;
    let mut second = parse_body(&requests[1]);
    assert_eq!(second["prompt"], "second");
    first.as_object_mut().expect("json object").remove("prompt");
    second.as_object_mut().expect("json object").remove("prompt");
    assert_eq!(first, second);
}

#[tokio::test]
async fn stop_sequences_are_forwarded_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(completion_response(&["ok"]))
        .mount(&server)
        .await;

    let client = client_for(&server, CompletionParams::default());
    let stop = vec!["\n".to_string(), "END".to_string()];
    client
        .complete("with stop", Some(&stop))
        .await
        .expect("completion");
    client
        .complete("without stop", None)
        .await
        .expect("completion");

    let requests = server
        .received_requests()
        .await
        .expect("mock server should record requests");
    let with_stop = parse_body(&requests[0]);
    assert_eq!(with_stop["stop"], json!(["\n", "END"]));
    let without_stop = parse_body(&requests[1]);
    assert!(without_stop.get("stop").is_none());
}

#[tokio::test]
async fn the_api_key_travels_as_a_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(completion_response(&["ok"]))
        .mount(&server)
        .await;

    let client = client_for(&server, CompletionParams::default());
    client
        .complete("authorized", None)
        .await
        .expect("completion");
}

#[tokio::test]
async fn error_statuses_surface_as_remote_call_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = client_for(&server, CompletionParams::default());
    let err = client
        .complete("boom", None)
        .await
        .expect_err("500 should fail");

    match err {
        LlmError::RemoteCall {
            message,
            status_code,
            ..
        } => {
            assert_eq!(status_code, Some(500));
            assert!(message.contains("upstream exploded"), "{message}");
        }
        other => panic!("expected RemoteCall, got {other:?}"),
    }
}

#[tokio::test]
async fn a_rejected_key_reports_the_auth_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, CompletionParams::default());
    let err = client
        .complete("who am i", None)
        .await
        .expect_err("401 should fail");

    match err {
        LlmError::RemoteCall { status_code, .. } => assert_eq!(status_code, Some(401)),
        other => panic!("expected RemoteCall, got {other:?}"),
    }
}

#[tokio::test]
async fn a_non_json_reply_is_a_response_format_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway timeout</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, CompletionParams::default());
    let err = client
        .complete("hello", None)
        .await
        .expect_err("html body should fail");

    match err {
        LlmError::ResponseFormat { .. } => {}
        other => panic!("expected ResponseFormat, got {other:?}"),
    }
}

#[tokio::test]
async fn an_empty_choice_list_is_a_response_format_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cmpl-empty",
            "object": "text_completion",
            "model": "gpt-3.5-turbo-instruct",
            "choices": [],
            "usage": usage_payload(),
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, CompletionParams::default());
    let err = client
        .complete("hello", None)
        .await
        .expect_err("empty choices should fail");

    match err {
        LlmError::ResponseFormat { message, .. } => {
            assert!(message.contains("no choices"), "{message}");
        }
        other => panic!("expected ResponseFormat, got {other:?}"),
    }
}

fn client_for(server: &MockServer, params: CompletionParams) -> OpenAiClient {
    let config = OpenAiConfig::new("test-key".to_string()).with_base_url(server.uri());
    OpenAiClient::new(config, params).expect("client")
}

fn completion_response(texts: &[&str]) -> ResponseTemplate {
    let choices: Vec<Value> = texts
        .iter()
        .enumerate()
        .map(|(index, text)| {
            json!({
                "text": text,
                "index": index,
                "logprobs": null,
                "finish_reason": "stop",
            })
        })
        .collect();
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "cmpl-mock",
        "object": "text_completion",
        "created": 1_700_000_000,
        "model": "gpt-3.5-turbo-instruct",
        "choices": choices,
        "usage": usage_payload(),
    }))
}

fn usage_payload() -> Value {
    json!({
        "prompt_tokens": 10,
        "completion_tokens": 5,
        "total_tokens": 15
    })
}

fn parse_body(request: &WiremockRequest) -> Value {
    serde_json::from_slice(&request.body).expect("request body should be valid json")
}
