mod json;
mod number;
mod secret;
mod select;
mod text;

pub use json::JsonParameter;
pub use number::{NumberOptions, NumberParameter};
pub use secret::SecretParameter;
pub use select::SelectParameter;
pub use text::TextParameter;
