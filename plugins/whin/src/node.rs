use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{Instrument, debug, debug_span, error, info_span, warn};
use whin_action::{
    Action, ActionContext, ActionError, ActionMetadata, HttpTransport, ItemAction, OutputItem,
    TransportError,
};
use whin_credential::ResolvedCredential;
use whin_parameter::values::ParameterValues;

use crate::config::{ConfigError, NodeConfig};
use crate::credentials::WHIN_API;
use crate::description;
use crate::error::SendError;
use crate::operation::Operation;
use crate::params::ItemParameters;
use crate::payload::normalize;
use crate::request::{build_request, resolve_endpoint};
use crate::token::resolve_token;

/// The `whin` node: posts one content payload per input item.
#[derive(Debug, Clone)]
pub struct WhinNode {
    config: NodeConfig,
    metadata: ActionMetadata,
    defaults: ParameterValues,
}

impl WhinNode {
    /// Node with the default configuration.
    pub fn new() -> Self {
        Self::build(NodeConfig::default())
    }

    /// Node with a custom configuration.
    pub fn with_config(config: NodeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: NodeConfig) -> Self {
        let metadata = description::metadata(&config);
        let defaults = metadata.parameters.defaults();
        Self {
            config,
            metadata,
            defaults,
        }
    }

    /// The configuration this node was built with.
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Parameter values for one item, declared defaults filled in.
    ///
    /// Host failures here abort the batch; they are not item errors.
    fn read_parameters(
        &self,
        ctx: &ActionContext,
        index: usize,
    ) -> Result<ParameterValues, ActionError> {
        let mut values = self.defaults.clone();
        for key in self.metadata.parameters.keys() {
            if let Some(value) = ctx.parameter(key, index)? {
                values.set(key, value);
            }
        }
        Ok(values)
    }

    async fn execute_batch(&self, ctx: &ActionContext) -> Result<Vec<OutputItem>, ActionError> {
        let credential = ctx.credential(WHIN_API).await?;
        let mut output = Vec::with_capacity(ctx.items.len());

        for index in 0..ctx.items.len() {
            ctx.check_cancelled()?;
            let values = self.read_parameters(ctx, index)?;

            let outcome = self
                .run_item(ctx.transport(), &credential, &values)
                .instrument(debug_span!("whin.item", index))
                .await;

            match outcome {
                Ok(body) => output.push(OutputItem::new(shape_response(body))),
                Err(err) if ctx.continue_on_fail => {
                    warn!(index, error = %err, status = ?err.status_code(), "item failed, continuing");
                    output.push(OutputItem::paired(err.record().into_json(), index));
                }
                Err(err) => {
                    error!(index, error = %err, status = ?err.status_code(), "item failed, aborting batch");
                    return Err(err.into());
                }
            }
        }

        Ok(output)
    }

    async fn run_item(
        &self,
        transport: &dyn HttpTransport,
        credential: &ResolvedCredential,
        values: &ParameterValues,
    ) -> Result<Value, SendError> {
        let params = ItemParameters::resolve(&self.metadata.parameters, values)?;
        match params.operation {
            Operation::Send => self.send(transport, credential, params).await,
        }
    }

    async fn send(
        &self,
        transport: &dyn HttpTransport,
        credential: &ResolvedCredential,
        params: ItemParameters,
    ) -> Result<Value, SendError> {
        let token = resolve_token(params.token_override.as_ref(), credential)?;
        let content = normalize(params.payload)?;
        let endpoint = resolve_endpoint(credential, &self.config)?;
        let timeout = params
            .timeout
            .unwrap_or_else(|| self.config.default_timeout());
        let content_type = content.content_type();

        let request = build_request(
            endpoint,
            &token,
            content,
            timeout,
            self.config.user_agent.as_deref(),
        );
        debug!(
            url = %request.url,
            %content_type,
            timeout_ms = timeout.as_millis() as u64,
            "dispatching message"
        );

        match tokio::time::timeout(timeout, transport.send(request)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(TransportError::timed_out(timeout).into()),
        }
    }
}

impl Default for WhinNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Output JSON for a response body.
///
/// Objects pass through, `null` becomes `{}`, anything else is wrapped as
/// `{"data": value}`.
pub fn shape_response(body: Value) -> Map<String, Value> {
    match body {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("data".to_owned(), other);
            map
        }
    }
}

impl Action for WhinNode {
    fn metadata(&self) -> &ActionMetadata {
        &self.metadata
    }
}

#[async_trait]
impl ItemAction for WhinNode {
    async fn execute(&self, ctx: &ActionContext) -> Result<Vec<OutputItem>, ActionError> {
        let span = info_span!(
            "whin.execute",
            execution_id = ?ctx.execution_id,
            items = ctx.items.len(),
            continue_on_fail = ctx.continue_on_fail,
        );
        self.execute_batch(ctx).instrument(span).await
    }
}
