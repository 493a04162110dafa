//! Auth-domain vocabulary: authentication methods, credential values, and secret wrappers.

pub mod credentials;
pub mod method;
pub mod secret;

pub use credentials::*;
pub use method::*;
pub use secret::*;
