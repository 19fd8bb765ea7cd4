use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One unit of data routed through a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputItem {
    /// The item's JSON data.
    pub json: Map<String, Value>,
}

impl InputItem {
    /// Wrap a JSON object as an item.
    pub fn new(json: Map<String, Value>) -> Self {
        Self { json }
    }
}

/// Points an output item back at the input item it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    /// Index of the input item.
    pub item: usize,
}

/// One result produced by a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputItem {
    /// The result data.
    pub json: Map<String, Value>,
    /// Source item, set on tolerated failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<PairedItem>,
}

impl OutputItem {
    /// A successful result.
    pub fn new(json: Map<String, Value>) -> Self {
        Self {
            json,
            paired_item: None,
        }
    }

    /// A result tied to input item `index`.
    pub fn paired(json: Map<String, Value>, index: usize) -> Self {
        Self {
            json,
            paired_item: Some(PairedItem { item: index }),
        }
    }
}
