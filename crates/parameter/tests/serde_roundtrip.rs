use pretty_assertions::assert_eq;
use serde_json::json;
use whin_parameter::collection::ParameterCollection;
use whin_parameter::def::ParameterDef;
use whin_parameter::option::SelectOption;
use whin_parameter::types::*;
use whin_parameter::values::ParameterValues;

#[test]
fn collection_survives_json() {
    let original = ParameterCollection::new()
        .with(
            ParameterDef::from(
                SelectParameter::new("operation", "Operation")
                    .with_option(
                        SelectOption::new("send", "Send", json!("send"))
                            .with_description("Send a WhatsApp message"),
                    )
                    .with_default(json!("send")),
            )
            .no_data_expression(),
        )
        .with(SecretParameter::new("token", "Token"))
        .with(JsonParameter::new("payload", "Payload").with_default(r#"{"type":"text"}"#))
        .with(NumberParameter::new("timeoutMs", "Timeout").with_min(1_000.0));

    let json = serde_json::to_string(&original).unwrap();
    let back: ParameterCollection = serde_json::from_str(&json).unwrap();
    assert_eq!(back, original);
}

#[test]
fn definitions_are_tagged_by_type() {
    let def = ParameterDef::from(SecretParameter::new("token", "Token")).required();
    let json = serde_json::to_value(&def).unwrap();

    assert_eq!(json["type"], "secret");
    assert_eq!(json["key"], "token");
    assert_eq!(json["required"], true);
    assert_eq!(json["sensitive"], true);
}

#[test]
fn host_schema_deserializes() {
    let def: ParameterDef = serde_json::from_value(json!({
        "type": "text",
        "key": "baseUrl",
        "name": "Base URL",
        "required": true,
        "default": "https://api.inutil.info/wh2/n8n/wspout"
    }))
    .unwrap();

    assert_eq!(def.key(), "baseUrl");
    assert!(def.is_required());
    assert_eq!(
        def.default_value(),
        Some(json!("https://api.inutil.info/wh2/n8n/wspout"))
    );
}

#[test]
fn values_serialize_flat() {
    let values = ParameterValues::new().with("token", json!("")).with("timeoutMs", json!(1500));
    let json = serde_json::to_value(&values).unwrap();
    assert_eq!(json, json!({"token": "", "timeoutMs": 1500}));
}
