use std::fmt;
use std::time::Duration;

use serde_json::Value;
use whin_credential::SecretString;
use whin_parameter::collection::ParameterCollection;
use whin_parameter::values::ParameterValues;

use crate::description::{OPERATION, PAYLOAD, TIMEOUT_MS, TOKEN_OVERRIDE};
use crate::error::SendError;
use crate::operation::Operation;
use crate::payload::RawPayload;

/// Parameters for one item, checked against their definitions.
pub struct ItemParameters {
    pub operation: Operation,
    pub token_override: Option<SecretString>,
    pub payload: RawPayload,
    pub timeout: Option<Duration>,
}

impl ItemParameters {
    /// Interpret `values` (defaults already applied) against `definitions`.
    ///
    /// The operation name is checked first so an unknown one reads as
    /// [`SendError::UnknownOperation`] rather than a select mismatch.
    pub fn resolve(
        definitions: &ParameterCollection,
        values: &ParameterValues,
    ) -> Result<Self, SendError> {
        let operation = match values.get_string(OPERATION) {
            Some(name) => name.parse()?,
            None => {
                definitions.validate_value(OPERATION, values.get(OPERATION))?;
                Operation::default()
            }
        };
        // A present `null` payload reaches `normalize`, which reports its shape.
        let payload_present = values.contains(PAYLOAD);
        definitions
            .iter()
            .filter(|def| !(payload_present && def.key() == PAYLOAD))
            .try_for_each(|def| def.validate(values.get(def.key())))?;

        Ok(Self {
            operation,
            token_override: values.get_string(TOKEN_OVERRIDE).map(SecretString::from),
            payload: values.get(PAYLOAD).cloned().unwrap_or(Value::Null).into(),
            timeout: values
                .get_f64(TIMEOUT_MS)
                .map(|ms| Duration::from_millis(ms as u64)),
        })
    }
}

impl fmt::Debug for ItemParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemParameters")
            .field("operation", &self.operation)
            .field("token_override", &self.token_override.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
