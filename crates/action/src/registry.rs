use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::action::ItemAction;
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::item::OutputItem;
use crate::metadata::ActionMetadata;

/// Actions installed by plugins, keyed by node key.
///
/// The host resolves the node key stored in a workflow definition to the
/// action that runs it. Keys iterate in sorted order.
#[derive(Default, Clone)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Arc<dyn ItemAction>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an action, returning the one previously held under its key.
    pub fn register(&mut self, action: Arc<dyn ItemAction>) -> Option<Arc<dyn ItemAction>> {
        let key = action.key().to_owned();
        self.actions.insert(key, action)
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn ItemAction>> {
        self.actions.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.actions.contains_key(key)
    }

    /// Metadata of every installed action, sorted by key.
    pub fn list(&self) -> Vec<&ActionMetadata> {
        self.actions.values().map(|a| a.metadata()).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run the action registered under `key` over the context's items.
    ///
    /// An unknown key is a fatal error: retrying cannot install the node.
    pub async fn execute(
        &self,
        key: &str,
        ctx: &ActionContext,
    ) -> Result<Vec<OutputItem>, ActionError> {
        let action = self
            .get(key)
            .ok_or_else(|| ActionError::fatal(format!("no action registered for node `{key}`")))?;
        action.execute(ctx).await
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("keys", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Map, json};

    use crate::action::Action;
    use crate::item::InputItem;
    use crate::provider::{InMemoryCredentials, InMemoryParameters};
    use crate::transport::{HttpRequest, HttpTransport, TransportError};

    /// Emits one `{"node": key}` object per input item.
    struct EchoKey(ActionMetadata);

    impl Action for EchoKey {
        fn metadata(&self) -> &ActionMetadata {
            &self.0
        }
    }

    #[async_trait]
    impl ItemAction for EchoKey {
        async fn execute(&self, ctx: &ActionContext) -> Result<Vec<OutputItem>, ActionError> {
            Ok(ctx
                .items
                .iter()
                .map(|_| {
                    let mut json = Map::new();
                    json.insert("node".into(), json!(self.0.key));
                    OutputItem::new(json)
                })
                .collect())
        }
    }

    struct NoTransport;

    #[async_trait]
    impl HttpTransport for NoTransport {
        async fn send(&self, _request: HttpRequest) -> Result<serde_json::Value, TransportError> {
            Err(TransportError::new("offline"))
        }
    }

    fn action(key: &str, name: &str) -> Arc<dyn ItemAction> {
        Arc::new(EchoKey(ActionMetadata::new(key, name, "test")))
    }

    fn context(items: usize) -> ActionContext {
        ActionContext::new(
            vec![InputItem::default(); items],
            Arc::new(InMemoryParameters::default()),
            Arc::new(InMemoryCredentials::new()),
            Arc::new(NoTransport),
        )
    }

    #[test]
    fn empty_registry() {
        let reg = ActionRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.get("whin").is_none());
    }

    #[test]
    fn register_replaces_same_key() {
        let mut reg = ActionRegistry::new();
        assert!(reg.register(action("whin", "Version 1")).is_none());
        let previous = reg.register(action("whin", "Version 2")).unwrap();

        assert_eq!(previous.metadata().name, "Version 1");
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("whin").unwrap().metadata().name, "Version 2");
    }

    #[test]
    fn list_is_sorted_by_key() {
        let mut reg = ActionRegistry::new();
        reg.register(action("whin", "Whin"));
        reg.register(action("http", "HTTP"));

        let keys: Vec<_> = reg.list().iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["http", "whin"]);
        assert!(format!("{reg:?}").contains("whin"));
    }

    #[tokio::test]
    async fn execute_dispatches_by_key() {
        let mut reg = ActionRegistry::new();
        reg.register(action("whin", "Whin"));

        let output = reg.execute("whin", &context(2)).await.unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].json["node"], "whin");
    }

    #[tokio::test]
    async fn execute_unknown_key_is_fatal() {
        let err = ActionRegistry::new()
            .execute("whin", &context(1))
            .await
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("whin"));
    }
}
