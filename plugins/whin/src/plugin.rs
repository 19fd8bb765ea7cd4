use std::sync::Arc;

use whin_action::{Plugin, PluginComponents, PluginError, PluginMetadata};

use crate::credentials::{WHIN_ENDPOINT, whin_api};
use crate::node::WhinNode;

/// Installs the `whin` node and the `whinApi` credential.
#[derive(Debug)]
pub struct WhinPlugin {
    metadata: PluginMetadata,
    node: Arc<WhinNode>,
}

impl WhinPlugin {
    /// Plugin around a default-configured node.
    pub fn new() -> Result<Self, PluginError> {
        Self::with_node(WhinNode::new())
    }

    /// Plugin around a pre-configured node.
    pub fn with_node(node: WhinNode) -> Result<Self, PluginError> {
        let metadata = PluginMetadata::builder("whin", "Whin")
            .description("Send WhatsApp messages through the Whin backend")
            .group(vec!["output".into()])
            .icon("file:whin.png")
            .documentation_url(WHIN_ENDPOINT)
            .build()?;
        Ok(Self {
            metadata,
            node: Arc::new(node),
        })
    }
}

impl Plugin for WhinPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn register(&self, components: &mut PluginComponents) {
        components
            .action(self.node.clone())
            .credential(whin_api());
    }
}
