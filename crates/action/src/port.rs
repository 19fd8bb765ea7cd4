//! Connection points a node exposes to the workflow graph.
//!
//! Ports only describe topology. Items arriving on the main input are what
//! [`ActionContext::items`](crate::ActionContext::items) holds at execution
//! time; tolerated failures leave on the main output as paired error items.

use serde::{Deserialize, Serialize};

/// Type alias for port keys (e.g. `"main"`, `"error"`).
pub type PortKey = String;

/// Discriminant for flow output ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Primary data output.
    Main,
    /// Error output (appears when on-error handling is enabled).
    Error,
}

/// An input port declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputPort {
    /// Port key.
    pub key: PortKey,
}

impl InputPort {
    /// Create a flow input port.
    #[must_use]
    pub fn flow(key: impl Into<PortKey>) -> Self {
        Self { key: key.into() }
    }

    /// The single main input every node has.
    #[must_use]
    pub fn main() -> Self {
        Self::flow("main")
    }
}

/// An output port declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPort {
    /// Port key.
    pub key: PortKey,
    /// Whether this carries main data or error data.
    pub kind: FlowKind,
}

impl OutputPort {
    /// Create a main flow output port.
    #[must_use]
    pub fn flow(key: impl Into<PortKey>) -> Self {
        Self {
            key: key.into(),
            kind: FlowKind::Main,
        }
    }

    /// Create an error flow output port.
    #[must_use]
    pub fn error(key: impl Into<PortKey>) -> Self {
        Self {
            key: key.into(),
            kind: FlowKind::Error,
        }
    }

    /// The single main output every node has.
    #[must_use]
    pub fn main() -> Self {
        Self::flow("main")
    }

    /// Returns `true` if this port carries error items.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == FlowKind::Error
    }
}
