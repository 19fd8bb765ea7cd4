//! Whin Credential - credential type descriptions and resolved secrets
//!
//! A credential *type* is pure configuration: the fields a host must prompt
//! for, store, and inject at execution time. The host owns persistence and
//! encryption; nodes only ever see a read-only [`ResolvedCredential`].
//!
//! Secret values are wrapped in [`SecretString`], which redacts itself in
//! `Debug`, `Display` and `Serialize` output and zeroizes on drop.
#![forbid(unsafe_code)]

/// Core types: descriptions, resolved credentials, errors
pub mod core;
/// Secret handling utilities
pub mod utils;

pub use crate::core::{
    CredentialDescription, CredentialDescriptionBuilder, CredentialError, ResolvedCredential,
};
pub use crate::utils::SecretString;

/// Commonly used types
pub mod prelude {
    pub use crate::core::{CredentialDescription, CredentialError, ResolvedCredential};
    pub use crate::utils::SecretString;
}
