mod cache;
mod credentials;
mod envelope;
mod fetch;
mod policy;

pub use cache::TokenCache;
pub use credentials::Credentials;
pub use envelope::{Token, TokenEnvelope};
pub use fetch::TokenFetcher;
pub use policy::{REFRESH_SKEW_SECONDS, RefreshPolicy};
