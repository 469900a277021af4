//! Credential models and the bypass allow-list consulted before any network call.

pub mod bypass;
pub mod credentials;
pub mod secret;

pub use bypass::*;
pub use credentials::*;
pub use secret::*;
