//! The `whinApi` credential type.

use whin_credential::CredentialDescription;
use whin_parameter::collection::ParameterCollection;
use whin_parameter::def::ParameterDef;
use whin_parameter::types::{SecretParameter, TextParameter};

/// Credential type key.
pub const WHIN_API: &str = "whinApi";

/// The Whin backend endpoint messages are posted to.
pub const WHIN_ENDPOINT: &str = "https://api.inutil.info/wh2/n8n/wspout";

/// Field holding the backend endpoint.
pub const BASE_URL: &str = "baseUrl";

/// Field holding the bearer token.
pub const TOKEN: &str = "token";

/// Schema the host renders, stores and injects for `whinApi`.
///
/// Nothing is validated here; whether the token is usable is only known
/// when a request is made.
pub fn whin_api() -> CredentialDescription {
    let properties = ParameterCollection::new()
        .with(
            ParameterDef::from(TextParameter::new(BASE_URL, "Base URL").with_default(WHIN_ENDPOINT))
                .required()
                .with_description("Whin backend endpoint to send messages"),
        )
        .with(
            ParameterDef::from(SecretParameter::new(TOKEN, "Token"))
                .required()
                .with_description("Whin token. Can be overridden per item via node parameter"),
        );

    CredentialDescription {
        key: WHIN_API.to_owned(),
        name: "Whin API".to_owned(),
        description: "Token for the Whin WhatsApp messaging backend".to_owned(),
        icon: None,
        documentation_url: Some(WHIN_ENDPOINT.to_owned()),
        properties,
    }
}
