//! Client for the Oracle Compute Cloud REST control-plane API.
//!
//! A [`Client`] is built once from a validated [`Config`], authenticates
//! once with [`Client::authenticate`] and then attaches the provider's
//! session cookie to every resource call. Resource names go in and come
//! back undecorated; the `/Compute-<identity>/<user>/` container prefix the
//! provider uses is added and stripped by the client.
//!
//! The session cookie expires after 30 minutes on the provider side. The
//! client never retries: when a call fails with
//! [`ApiError::is_unauthorized`], call [`Client::clear_session`] and
//! authenticate again.

pub mod compute;
pub mod config;
pub mod response;

pub use compute::auth::SessionToken;
pub use compute::client::Client;
pub use compute::error::{ApiError, ConfigError};
pub use compute::orchestration::OrchestrationAction;
pub use config::Config;
