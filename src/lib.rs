//! amplience-mgmt: Amplience Dynamic Content management API client
//!
//! A library for talking to the Amplience content management API with
//! OAuth2 client credentials, and for managing webhooks and their filters.
//!
//! - [`client`]: token acquisition, authenticated dispatch, response
//!   classification and deadline-bounded retries
//! - [`filter`]: the polymorphic webhook filter argument codec
//! - [`webhook`]: webhook model, validation and CRUD operations
//! - [`config`]: CLI and TOML configuration for the binary

pub mod client;
pub mod config;
pub mod filter;
pub mod resource_id;
pub mod time;
pub mod webhook;

pub use filter::string_in_slice;
