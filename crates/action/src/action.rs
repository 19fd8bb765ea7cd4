use async_trait::async_trait;

use crate::context::ActionContext;
use crate::error::ActionError;
use crate::item::OutputItem;
use crate::metadata::ActionMetadata;

/// Base trait for all action types.
///
/// Provides identity and metadata. The host uses this to render the node,
/// match credentials, and resolve parameters. Execution logic lives in
/// [`ItemAction`].
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn Action`.
pub trait Action: Send + Sync + 'static {
    /// Static metadata describing this action type.
    fn metadata(&self) -> &ActionMetadata;

    /// Shorthand for `self.metadata().key`.
    fn key(&self) -> &str {
        &self.metadata().key
    }
}

/// An action that processes a batch of input items.
///
/// Implementations must return exactly one [`OutputItem`] per input item, in
/// input order, or fail the whole batch with an [`ActionError`].
#[async_trait]
pub trait ItemAction: Action {
    /// Run the action over `ctx.items`.
    async fn execute(&self, ctx: &ActionContext) -> Result<Vec<OutputItem>, ActionError>;
}
