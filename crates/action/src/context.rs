use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use whin_credential::ResolvedCredential;

use crate::error::ActionError;
use crate::id::{ExecutionId, NodeId};
use crate::item::InputItem;
use crate::provider::{CredentialProvider, ParameterAccessor};
use crate::transport::HttpTransport;

/// Runtime context provided to every action during execution.
///
/// Constructed by the host before invoking an action. Carries identity
/// (which execution and node this is), the input batch, the host ports and
/// a cancellation token.
///
/// Actions **must** call [`check_cancelled`](Self::check_cancelled) between
/// items to support cooperative cancellation.
#[non_exhaustive]
pub struct ActionContext {
    /// Unique execution run identifier.
    pub execution_id: ExecutionId,
    /// Node in the workflow graph being executed.
    pub node_id: NodeId,
    /// Input items, in the order the host received them.
    pub items: Vec<InputItem>,
    /// Tolerate per-item failures instead of aborting the batch.
    pub continue_on_fail: bool,
    /// Cancellation signal, checked cooperatively by actions.
    pub cancellation: CancellationToken,
    parameters: Arc<dyn ParameterAccessor>,
    credentials: Arc<dyn CredentialProvider>,
    transport: Arc<dyn HttpTransport>,
}

impl ActionContext {
    /// Create a context with fresh identifiers and a new cancellation token.
    pub fn new(
        items: Vec<InputItem>,
        parameters: Arc<dyn ParameterAccessor>,
        credentials: Arc<dyn CredentialProvider>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            execution_id: ExecutionId::v4(),
            node_id: NodeId::v4(),
            items,
            continue_on_fail: false,
            cancellation: CancellationToken::new(),
            parameters,
            credentials,
            transport,
        }
    }

    /// Set identifiers assigned by the host.
    pub fn with_ids(mut self, execution_id: ExecutionId, node_id: NodeId) -> Self {
        self.execution_id = execution_id;
        self.node_id = node_id;
        self
    }

    /// Set the tolerate-failure flag.
    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }

    /// Use a pre-existing cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Parameter `key` as evaluated for item `item_index`.
    pub fn parameter(&self, key: &str, item_index: usize) -> Result<Option<Value>, ActionError> {
        self.parameters.parameter(key, item_index)
    }

    /// Resolve a credential by type key.
    pub async fn credential(&self, type_key: &str) -> Result<ResolvedCredential, ActionError> {
        self.credentials.credential(type_key).await
    }

    /// The host HTTP transport.
    pub fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    /// Check whether execution has been cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Cancelled`] if the token has been triggered.
    pub fn check_cancelled(&self) -> Result<(), ActionError> {
        if self.cancellation.is_cancelled() {
            Err(ActionError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionContext")
            .field("execution_id", &self.execution_id)
            .field("node_id", &self.node_id)
            .field("items", &self.items.len())
            .field("continue_on_fail", &self.continue_on_fail)
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish_non_exhaustive()
    }
}
