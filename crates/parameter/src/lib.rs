//! # Whin Parameter
//!
//! Declarative parameter definitions for workflow nodes and credential
//! types. A definition describes one form field the host renders (label,
//! kind, default, constraints); [`ParameterValues`](values::ParameterValues)
//! carries the resolved values for one item.

#![forbid(unsafe_code)]

pub mod collection;
pub mod def;
pub mod error;
pub mod kind;
pub mod metadata;
pub mod option;
pub mod types;
pub mod values;

pub mod prelude {
    pub use crate::collection::ParameterCollection;
    pub use crate::def::ParameterDef;
    pub use crate::error::ParameterError;
    pub use crate::kind::ParameterKind;
    pub use crate::metadata::ParameterMetadata;
    pub use crate::option::SelectOption;
    pub use crate::values::ParameterValues;

    pub use crate::types::*;
}
