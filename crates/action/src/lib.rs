//! # Whin Action
//!
//! Contract between a workflow host and the nodes it runs.
//!
//! The host owns item iteration, expression evaluation, credential storage
//! and the HTTP primitive. A node sees those only through the ports in this
//! crate, bundled into an [`ActionContext`]:
//!
//! - [`ParameterAccessor`]: per-item parameter values, after expression evaluation
//! - [`CredentialProvider`]: resolved credentials by type key
//! - [`HttpTransport`]: one request in, parsed JSON body or [`TransportError`] out
//! - a `continue_on_fail` flag and a cancellation token
//!
//! ## Core Types
//!
//! - [`Action`]: identity and static metadata
//! - [`ItemAction`]: batch execution producing one [`OutputItem`] per input
//! - [`ActionMetadata`]: node description: parameters, ports, credentials
//! - [`ActionError`]: retryable vs fatal failures surfaced to the host
//! - [`ActionRegistry`]: key → action lookup
//! - [`Plugin`] / [`PluginComponents`]: packaging unit registered with a host

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Base action traits.
pub mod action;
/// Runtime context provided to actions during execution.
pub mod context;
/// Error types distinguishing retryable from fatal failures.
pub mod error;
/// Strongly typed execution identifiers.
pub mod id;
/// Input and output items exchanged with the host.
pub mod item;
/// Static node description.
pub mod metadata;
/// Plugin packaging: metadata and registered components.
pub mod plugin;
/// Port definitions describing action input/output connection points.
pub mod port;
/// Host port traits for parameters and credentials, plus in-memory adapters.
pub mod provider;
/// Action registry for type-erased discovery and lookup.
pub mod registry;
/// Outbound HTTP port.
pub mod transport;

// ── Public re-exports ───────────────────────────────────────────────────────

pub use action::{Action, ItemAction};
pub use context::ActionContext;
pub use error::ActionError;
pub use id::{ExecutionId, NodeId};
pub use item::{InputItem, OutputItem, PairedItem};
pub use metadata::{ActionMetadata, CredentialRequirement};
pub use plugin::{Plugin, PluginComponents, PluginError, PluginMetadata, PluginMetadataBuilder};
pub use port::{FlowKind, InputPort, OutputPort};
pub use provider::{CredentialProvider, InMemoryCredentials, InMemoryParameters, ParameterAccessor};
pub use registry::ActionRegistry;
pub use transport::{ErrorResponse, HttpRequest, HttpTransport, TransportError};

// Re-export parameter types so action authors can define parameters without
// depending on `whin-parameter` directly.
pub use whin_parameter::collection::ParameterCollection;
pub use whin_parameter::def::ParameterDef;
