//! Batch execution of the `whin` node against an in-memory host.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use whin_action::{
    ActionContext, ActionError, ExecutionId, HttpRequest, HttpTransport, InMemoryCredentials,
    InMemoryParameters, InputItem, ItemAction, NodeId, OutputItem, PairedItem, TransportError,
};
use whin_credential::ResolvedCredential;
use whin_node::WhinNode;
use whin_node::credentials::{BASE_URL, TOKEN, WHIN_API, WHIN_ENDPOINT};
use whin_node::description::{OPERATION, PAYLOAD, TIMEOUT_MS, TOKEN_OVERRIDE};
use whin_parameter::values::ParameterValues;

/// Records every request and replies from a script, then with `{"ok": true}`.
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    replies: Mutex<VecDeque<Result<Value, TransportError>>>,
}

impl RecordingTransport {
    fn replying(replies: impl IntoIterator<Item = Result<Value, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::default(),
            replies: Mutex::new(replies.into_iter().collect()),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"ok": true})))
    }
}

/// Never answers; only the node's own timeout ends the request.
struct StalledTransport;

#[async_trait]
impl HttpTransport for StalledTransport {
    async fn send(&self, _request: HttpRequest) -> Result<Value, TransportError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Value::Null)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("whin_node=debug"))
        .with_test_writer()
        .try_init();
}

fn credential(token: &str) -> ResolvedCredential {
    ResolvedCredential::new(WHIN_API).with_secret(TOKEN, token)
}

fn context(
    items: usize,
    parameters: InMemoryParameters,
    credential: ResolvedCredential,
    transport: Arc<dyn HttpTransport>,
) -> ActionContext {
    ActionContext::new(
        vec![InputItem::default(); items],
        Arc::new(parameters),
        Arc::new(InMemoryCredentials::new().with(credential)),
        transport,
    )
}

fn payload(value: Value) -> InMemoryParameters {
    InMemoryParameters::new(ParameterValues::new().with(PAYLOAD, value))
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[tokio::test]
async fn sends_text_message_with_credential_token() {
    init_tracing();
    let transport = RecordingTransport::replying([Ok(json!({"id": "wamid.1"}))]);
    let ctx = context(
        1,
        payload(json!({"type": "text", "text": {"body": "hi"}})),
        credential("abc"),
        transport.clone(),
    );

    let output = WhinNode::new().execute(&ctx).await.unwrap();
    assert_eq!(output, vec![OutputItem::new(object(json!({"id": "wamid.1"})))]);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method.as_str(), "POST");
    assert_eq!(request.url.as_str(), WHIN_ENDPOINT);
    assert_eq!(request.header("Authorization"), Some("Bearer abc"));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(
        request.body,
        Some(json!({"type": "text", "text": {"body": "hi"}, "token": "abc"}))
    );
    assert_eq!(request.timeout, Some(Duration::from_secs(10)));
}

#[tokio::test]
async fn strips_envelope_fields() {
    let transport = RecordingTransport::replying([]);
    let ctx = context(
        1,
        payload(json!({
            "to": "15551234567",
            "type": "text",
            "text": {"body": "hi"},
            "messaging_product": "whatsapp"
        })),
        credential("abc"),
        transport.clone(),
    );

    WhinNode::new().execute(&ctx).await.unwrap();

    let body = transport.requests()[0].body.clone().unwrap();
    assert_eq!(body, json!({"type": "text", "text": {"body": "hi"}, "token": "abc"}));
}

#[tokio::test]
async fn string_payload_is_parsed() {
    let transport = RecordingTransport::replying([]);
    let ctx = context(
        1,
        payload(json!(r#" {"type":"image","image":{"link":"https://x.example/a.png"}} "#)),
        credential("abc"),
        transport.clone(),
    );

    WhinNode::new().execute(&ctx).await.unwrap();

    let body = transport.requests()[0].body.clone().unwrap();
    assert_eq!(
        body,
        json!({"type": "image", "image": {"link": "https://x.example/a.png"}, "token": "abc"})
    );
}

#[tokio::test]
async fn token_override_replaces_credential_token() {
    let transport = RecordingTransport::replying([]);
    let params = InMemoryParameters::new(
        ParameterValues::new()
            .with(PAYLOAD, json!({"type": "text", "text": {"body": "hi"}, "token": "stale"}))
            .with(TOKEN_OVERRIDE, json!("item-token")),
    );
    let ctx = context(1, params, credential("abc"), transport.clone());

    WhinNode::new().execute(&ctx).await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.header("Authorization"), Some("Bearer item-token"));
    assert_eq!(request.body.as_ref().unwrap()["token"], "item-token");
}

#[tokio::test]
async fn token_override_can_differ_per_item() {
    let transport = RecordingTransport::replying([]);
    let params = payload(json!({"type": "text"}))
        .with_item(1, ParameterValues::new().with(TOKEN_OVERRIDE, json!("second")));
    let ctx = context(2, params, credential("abc"), transport.clone());

    WhinNode::new().execute(&ctx).await.unwrap();

    let tokens: Vec<_> = transport
        .requests()
        .iter()
        .map(|r| r.header("Authorization").unwrap_or_default().to_owned())
        .collect();
    assert_eq!(tokens, vec!["Bearer abc", "Bearer second"]);
}

#[tokio::test]
async fn missing_token_aborts_without_request() {
    let transport = RecordingTransport::replying([]);
    let ctx = context(1, payload(json!({"type": "text"})), credential(""), transport.clone());

    let err = WhinNode::new().execute(&ctx).await.unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("Missing token"));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn missing_token_is_recorded_when_tolerated() {
    let transport = RecordingTransport::replying([]);
    let ctx = context(1, payload(json!({"type": "text"})), credential(" "), transport.clone())
        .with_continue_on_fail(true);

    let output = WhinNode::new().execute(&ctx).await.unwrap();
    assert_eq!(
        output,
        vec![OutputItem::paired(object(json!({"message": "Missing token"})), 0)]
    );
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn unsupported_content_type_makes_no_request() {
    for bad in [json!({"text": {"body": "hi"}}), json!({"type": "poll"})] {
        let transport = RecordingTransport::replying([]);
        let ctx = context(1, payload(bad), credential("abc"), transport.clone());

        let err = WhinNode::new().execute(&ctx).await.unwrap_err();
        assert!(matches!(err, ActionError::Validation(ref m) if m.contains("text, template")));
        assert!(transport.requests().is_empty());
    }
}

#[tokio::test]
async fn invalid_json_aborts_batch() {
    let transport = RecordingTransport::replying([]);
    let ctx = context(2, payload(json!("not json")), credential("abc"), transport.clone());

    let err = WhinNode::new().execute(&ctx).await.unwrap_err();
    assert!(err.to_string().contains("valid JSON"));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn invalid_json_is_recorded_when_tolerated() {
    let transport = RecordingTransport::replying([]);
    let ctx = context(1, payload(json!("not json")), credential("abc"), transport)
        .with_continue_on_fail(true);

    let output = WhinNode::new().execute(&ctx).await.unwrap();
    assert_eq!(
        output,
        vec![OutputItem::paired(
            object(json!({"message": "payload must be valid JSON"})),
            0
        )]
    );
}

#[tokio::test]
async fn array_payload_is_rejected() {
    let ctx = context(
        1,
        payload(json!([{"type": "text"}])),
        credential("abc"),
        RecordingTransport::replying([]),
    )
    .with_continue_on_fail(true);

    let output = WhinNode::new().execute(&ctx).await.unwrap();
    assert_eq!(output[0].json["message"], "payload must be a JSON object");
}

#[tokio::test]
async fn null_payload_is_recorded_as_shape_error() {
    let transport = RecordingTransport::replying([]);
    let ctx = context(1, payload(Value::Null), credential("abc"), transport.clone())
        .with_continue_on_fail(true);

    let output = WhinNode::new().execute(&ctx).await.unwrap();
    assert_eq!(output.len(), 1);
    assert_eq!(output[0].json["message"], "payload must be a JSON object");
    assert_eq!(output[0].paired_item, Some(PairedItem { item: 0 }));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn stored_token_is_trimmed() {
    let transport = RecordingTransport::replying([]);
    let ctx = context(1, payload(json!({"type": "text"})), credential(" abc "), transport.clone());

    WhinNode::new().execute(&ctx).await.unwrap();
    let requests = transport.requests();
    assert_eq!(requests[0].header("Authorization"), Some("Bearer abc"));
    assert_eq!(requests[0].body, Some(json!({"type": "text", "token": "abc"})));
}

#[tokio::test]
async fn host_assigned_ids_are_kept() {
    let execution_id = ExecutionId::v4();
    let ctx = context(1, payload(json!({"type": "text"})), credential("abc"), RecordingTransport::replying([]))
        .with_ids(execution_id, NodeId::v4());

    assert_eq!(ctx.execution_id, execution_id);
    assert_eq!(WhinNode::new().execute(&ctx).await.unwrap().len(), 1);
}

fn unauthorized() -> TransportError {
    TransportError::new("unauthorized").with_response(401, json!({"error": "unauthorized"}))
}

#[tokio::test]
async fn backend_401_is_recorded_when_tolerated() {
    let transport = RecordingTransport::replying([Err(unauthorized())]);
    let ctx = context(1, payload(json!({"type": "text"})), credential("abc"), transport)
        .with_continue_on_fail(true);

    let output = WhinNode::new().execute(&ctx).await.unwrap();
    assert_eq!(
        output,
        vec![OutputItem::paired(
            object(json!({"message": "unauthorized", "statusCode": 401})),
            0
        )]
    );
}

#[tokio::test]
async fn backend_401_aborts_with_status_in_message() {
    let transport = RecordingTransport::replying([Err(unauthorized())]);
    let ctx = context(1, payload(json!({"type": "text"})), credential("abc"), transport);

    let err = WhinNode::new().execute(&ctx).await.unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("401"));
    assert_eq!(
        err.details(),
        Some(&json!({"message": "unauthorized", "statusCode": 401}))
    );
}

#[tokio::test]
async fn server_errors_are_retryable() {
    let failure = TransportError::new("upstream down")
        .with_status(503)
        .with_code("UPSTREAM");
    let transport = RecordingTransport::replying([Err(failure)]);
    let ctx = context(1, payload(json!({"type": "text"})), credential("abc"), transport);

    let err = WhinNode::new().execute(&ctx).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(
        err.details(),
        Some(&json!({"message": "upstream down", "statusCode": 503, "code": "UPSTREAM"}))
    );
}

#[tokio::test]
async fn tolerated_failures_keep_order() {
    init_tracing();
    let transport = RecordingTransport::replying([
        Ok(json!({"id": "first"})),
        Err(unauthorized()),
        Ok(json!({"id": "third"})),
    ]);
    let ctx = context(3, payload(json!({"type": "text"})), credential("abc"), transport.clone())
        .with_continue_on_fail(true);

    let output = WhinNode::new().execute(&ctx).await.unwrap();

    assert_eq!(output.len(), 3);
    assert_eq!(output[0], OutputItem::new(object(json!({"id": "first"}))));
    assert_eq!(output[1].paired_item, Some(PairedItem { item: 1 }));
    assert_eq!(output[1].json["statusCode"], 401);
    assert_eq!(output[2], OutputItem::new(object(json!({"id": "third"}))));
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn first_failure_stops_the_batch() {
    let transport = RecordingTransport::replying([Ok(json!({})), Err(unauthorized())]);
    let ctx = context(3, payload(json!({"type": "text"})), credential("abc"), transport.clone());

    assert!(WhinNode::new().execute(&ctx).await.is_err());
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn response_bodies_are_shaped() {
    let transport = RecordingTransport::replying([Ok(Value::Null), Ok(json!("queued"))]);
    let ctx = context(2, payload(json!({"type": "text"})), credential("abc"), transport);

    let output = WhinNode::new().execute(&ctx).await.unwrap();
    assert_eq!(
        output,
        vec![
            OutputItem::new(Map::new()),
            OutputItem::new(object(json!({"data": "queued"}))),
        ]
    );
}

#[tokio::test]
async fn credential_base_url_is_the_endpoint() {
    let transport = RecordingTransport::replying([]);
    let credential = credential("abc").with_field(BASE_URL, json!("https://whin.example/send"));
    let ctx = context(1, payload(json!({"type": "text"})), credential, transport.clone());

    WhinNode::new().execute(&ctx).await.unwrap();
    assert_eq!(transport.requests()[0].url.as_str(), "https://whin.example/send");
}

#[tokio::test]
async fn invalid_base_url_fails_item() {
    let credential = credential("abc").with_field(BASE_URL, json!("not a url"));
    let ctx = context(
        1,
        payload(json!({"type": "text"})),
        credential,
        RecordingTransport::replying([]),
    )
    .with_continue_on_fail(true);

    let output = WhinNode::new().execute(&ctx).await.unwrap();
    let message = output[0].json["message"].as_str().unwrap();
    assert!(message.starts_with("invalid endpoint `not a url`"));
}

#[tokio::test]
async fn unknown_operation_fails_item() {
    let params = InMemoryParameters::new(
        ParameterValues::new()
            .with(OPERATION, json!("broadcast"))
            .with(PAYLOAD, json!({"type": "text"})),
    );
    let transport = RecordingTransport::replying([]);
    let ctx = context(1, params, credential("abc"), transport.clone());

    let err = WhinNode::new().execute(&ctx).await.unwrap_err();
    assert!(err.to_string().contains("unknown operation `broadcast`"));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn timeout_below_minimum_fails_item() {
    let params = InMemoryParameters::new(
        ParameterValues::new()
            .with(PAYLOAD, json!({"type": "text"}))
            .with(TIMEOUT_MS, json!(200)),
    );
    let ctx = context(1, params, credential("abc"), RecordingTransport::replying([]))
        .with_continue_on_fail(true);

    let output = WhinNode::new().execute(&ctx).await.unwrap();
    let message = output[0].json["message"].as_str().unwrap();
    assert!(message.contains("timeoutMs"));
    assert!(message.contains("at least 1000"));
}

#[tokio::test(start_paused = true)]
async fn stalled_request_times_out() {
    let params = InMemoryParameters::new(
        ParameterValues::new()
            .with(PAYLOAD, json!({"type": "text"}))
            .with(TIMEOUT_MS, json!(1500)),
    );
    let ctx = context(1, params, credential("abc"), Arc::new(StalledTransport))
        .with_continue_on_fail(true);

    let output = WhinNode::new().execute(&ctx).await.unwrap();
    assert_eq!(
        output,
        vec![OutputItem::paired(
            object(json!({"message": "request timed out after 1500ms", "code": "ETIMEDOUT"})),
            0
        )]
    );
}

#[tokio::test]
async fn cancellation_aborts_even_when_tolerating() {
    let transport = RecordingTransport::replying([]);
    let ctx = context(2, payload(json!({"type": "text"})), credential("abc"), transport.clone())
        .with_continue_on_fail(true);
    ctx.cancellation.cancel();

    let err = WhinNode::new().execute(&ctx).await.unwrap_err();
    assert!(matches!(err, ActionError::Cancelled));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn missing_credential_aborts() {
    let ctx = ActionContext::new(
        vec![InputItem::default()],
        Arc::new(payload(json!({"type": "text"}))),
        Arc::new(InMemoryCredentials::new()),
        RecordingTransport::replying([]),
    )
    .with_continue_on_fail(true);

    let err = WhinNode::new().execute(&ctx).await.unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn empty_batch_produces_no_output() {
    let transport = RecordingTransport::replying([]);
    let ctx = context(0, payload(json!({"type": "text"})), credential("abc"), transport.clone());

    assert!(WhinNode::new().execute(&ctx).await.unwrap().is_empty());
    assert!(transport.requests().is_empty());
}
