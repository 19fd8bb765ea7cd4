mod description;
mod error;
mod resolved;

pub use description::{CredentialDescription, CredentialDescriptionBuilder};
pub use error::CredentialError;
pub use resolved::ResolvedCredential;
