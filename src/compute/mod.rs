//! Oracle Compute API interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Validated account configuration, URL and name helpers
//! - [`auth`] - Session cookie acquisition and state
//! - [`http`] - The single request primitive every operation goes through
//! - [`error`] - Configuration and API error types
//! - [`seclist`], [`instance`], [`orchestration`] - Resource operations
//!
//! # Example
//!
//! ```ignore
//! use oracle_compute::{Client, Config};
//!
//! async fn example() -> Result<(), oracle_compute::ApiError> {
//!     let mut client = Client::new(Config::load())?;
//!     client.authenticate().await?;
//!     let lists = client.all_sec_lists().await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod instance;
pub mod orchestration;
pub mod seclist;
