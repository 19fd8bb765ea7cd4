//! # Whin
//!
//! Workflow node that sends WhatsApp messages through the Whin backend.
//!
//! - [`credentials::whin_api`] declares the `whinApi` credential (token and
//!   base URL).
//! - [`WhinNode`] is the `whin` node. For every input item it resolves the
//!   token, normalizes the content payload, strips envelope fields, checks
//!   the content type and posts the result with a bearer token.
//! - [`ReqwestTransport`] is a ready-made [`HttpTransport`](whin_action::HttpTransport)
//!   for hosts that do not bring their own.
//! - [`WhinPlugin`] packages both for registration with a host.
//!
//! Items are sent one at a time, in order. With continue-on-fail a failed
//! item yields an error record paired with its index; otherwise the first
//! failure aborts the batch.

#![forbid(unsafe_code)]

pub mod config;
pub mod credentials;
pub mod description;
pub mod error;
pub mod node;
pub mod operation;
pub mod params;
pub mod payload;
pub mod plugin;
pub mod request;
pub mod token;
pub mod transport;

pub use config::{ConfigError, NodeConfig};
pub use error::{ErrorRecord, SendError};
pub use node::WhinNode;
pub use operation::Operation;
pub use payload::{ContentPayload, ContentType, RawPayload, normalize};
pub use plugin::WhinPlugin;
pub use transport::ReqwestTransport;
