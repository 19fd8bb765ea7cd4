//! The `whin` node description.

use serde_json::json;
use whin_action::{ActionMetadata, CredentialRequirement, InputPort, OutputPort};
use whin_parameter::collection::ParameterCollection;
use whin_parameter::def::ParameterDef;
use whin_parameter::option::SelectOption;
use whin_parameter::types::{JsonParameter, NumberParameter, SelectParameter, TextParameter};

use crate::config::NodeConfig;
use crate::credentials::WHIN_API;
use crate::operation::Operation;

/// Node type key.
pub const NODE_KEY: &str = "whin";

/// Parameter: which operation to run.
pub const OPERATION: &str = "operation";
/// Parameter: per-item token override.
pub const TOKEN_OVERRIDE: &str = "token";
/// Parameter: the content payload.
pub const PAYLOAD: &str = "payload";
/// Parameter: per-item request timeout in milliseconds.
pub const TIMEOUT_MS: &str = "timeoutMs";

/// Payload shown in the editor for a fresh node.
pub const DEFAULT_PAYLOAD: &str = r#"{"type":"text","text":{"body":""}}"#;

/// Parameter schema, with timeout bounds taken from `config`.
pub fn parameters(config: &NodeConfig) -> ParameterCollection {
    let operation = SelectParameter::new(OPERATION, "Operation")
        .with_option(
            SelectOption::new("send", "Send", json!(Operation::Send.as_str()))
                .with_description("Send a WhatsApp message"),
        )
        .with_default(json!(Operation::Send.as_str()));

    ParameterCollection::new()
        .with(ParameterDef::from(operation).required().no_data_expression())
        .with(
            ParameterDef::from(TextParameter::new(TOKEN_OVERRIDE, "Token Override").with_default(""))
                .with_description("Override credential token for this item"),
        )
        .with(
            ParameterDef::from(JsonParameter::new(PAYLOAD, "Content Payload").with_default(DEFAULT_PAYLOAD))
                .required()
                .with_description(
                    "WhatsApp content object only (e.g. text/template/image/etc.). \
                     Do not include envelope fields like messaging_product or to.",
                ),
        )
        .with(
            ParameterDef::from(
                NumberParameter::new(TIMEOUT_MS, "Timeout (ms)")
                    .with_default(config.default_timeout_ms as f64)
                    .with_min(config.min_timeout_ms as f64),
            )
            .with_description("Abort the request if the backend takes longer than this"),
        )
}

/// Full node description.
pub fn metadata(config: &NodeConfig) -> ActionMetadata {
    ActionMetadata::new(NODE_KEY, "Whin: Send Message", "Send WhatsApp messages via Whin backend")
        .with_group("output")
        .with_version(1)
        .with_icon("file:whin.png")
        .with_subtitle(r#"={{$parameter["operation"]}}"#)
        .with_inputs(vec![InputPort::main()])
        .with_outputs(vec![OutputPort::main()])
        .with_parameters(parameters(config))
        .with_credential(CredentialRequirement::required(WHIN_API))
}
