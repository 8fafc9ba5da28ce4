//! Authentication module
//!
//! API key credentials and the pool they are rotated through.
//!
//! The `Authenticator` places a credential on a request; the
//! `CredentialPool` decides which credential that is.

mod authenticator;
mod pool;
mod types;

pub use authenticator::{Authenticator, DEFAULT_API_KEY_HEADER};
pub use pool::CredentialPool;
pub use types::Credential;
