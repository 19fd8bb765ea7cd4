//! Run the `whin` node over a small batch against an in-memory host.
//!
//! The transport echoes each request body back instead of calling the
//! backend, so nothing leaves the machine. Set `RUST_LOG=debug` to see the
//! per-item spans.
//!
//! ```sh
//! RUST_LOG=whin_node=debug cargo run -p whin-node --example send_message
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use whin_action::{
    ActionContext, HttpRequest, HttpTransport, InMemoryCredentials, InMemoryParameters, InputItem,
    Plugin, TransportError,
};
use whin_credential::ResolvedCredential;
use whin_node::WhinPlugin;
use whin_node::credentials::{TOKEN, whin_api};
use whin_node::description::{NODE_KEY, PAYLOAD, TOKEN_OVERRIDE};
use whin_parameter::values::ParameterValues;

struct EchoTransport;

#[async_trait]
impl HttpTransport for EchoTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let mut body = request.body.unwrap_or(Value::Null);
        if let Some(fields) = body.as_object_mut() {
            fields.remove("token");
        }
        Ok(json!({"accepted": body, "url": request.url.as_str()}))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let plugin = WhinPlugin::new()?;
    let components = plugin.components();
    let parameters = InMemoryParameters::new(ParameterValues::new().with(
        PAYLOAD,
        json!({"to": "15551234567", "type": "text", "text": {"body": "hello"}}),
    ))
    .with_item(
        1,
        ParameterValues::new()
            .with(PAYLOAD, json!(r#"{"type":"reaction","reaction":{"emoji":"👍"}}"#))
            .with(TOKEN_OVERRIDE, json!("per-item-token")),
    )
    .with_item(2, ParameterValues::new().with(PAYLOAD, json!("not json")));

    // Stored credential fields, split into plain and secret by the descriptor.
    let stored = ParameterValues::new().with(TOKEN, json!("demo-token"));
    let credentials =
        InMemoryCredentials::new().with(ResolvedCredential::from_values(&whin_api(), stored)?);

    let ctx = ActionContext::new(
        vec![InputItem::default(); 3],
        Arc::new(parameters),
        Arc::new(credentials),
        Arc::new(EchoTransport),
    )
    .with_continue_on_fail(true);

    let output = components.actions().execute(NODE_KEY, &ctx).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
