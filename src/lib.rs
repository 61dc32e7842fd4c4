//! OAuth2 client-credentials token handling for the Incognia API.
//!
//! [`TokenCache`] fetches a bearer token on construction, keeps it in memory and
//! transparently fetches a new one shortly before the current one expires.

pub mod clock;
pub mod config;
pub mod endpoints;
pub mod errors;
pub mod telemetry;
pub mod token;

pub use config::Config;
pub use errors::{Error, HttpError};
pub use token::{Token, TokenCache};

#[cfg(test)]
mod tests;
