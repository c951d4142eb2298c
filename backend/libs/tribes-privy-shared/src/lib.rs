/// Tribes Privy Shared Library
///
/// Thin client for the Privy identity platform as used by the auth relay:
/// passwordless email codes, user lookup/import, and server-side wallet
/// creation. Privy owns all user and wallet state; nothing is cached here.

pub mod client;
pub mod errors;
pub mod models;
pub mod provider;

pub use client::{PrivyClient, DEFAULT_PRIVY_API_URL};
pub use errors::PrivyError;
pub use models::{LinkedAccount, PrivyCredentials, PrivyUser};
pub use provider::IdentityProvider;
