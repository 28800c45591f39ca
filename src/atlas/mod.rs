//! Atlas Admin API interaction module
//!
//! This module provides the transport the resource handlers use to talk to
//! MongoDB Atlas, plus the request/response shapes of the endpoints involved.
//!
//! # Module Structure
//!
//! - [`auth`] - Bearer tokens from a static token or a service account
//! - [`client`] - Main Atlas client and endpoint layout
//! - [`http`] - HTTP utilities for REST API calls
//! - [`error`] - Typed API errors recovered by the handlers
//! - [`cluster`], [`search_index`], [`restore_job`] - API shapes
//!
//! # Example
//!
//! ```ignore
//! use atlas_cfn::atlas::client::AtlasClient;
//! use atlas_cfn::config::Config;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let profile = Config::load().resolve_profile(None);
//!     let client = AtlasClient::new(&profile)?;
//!     let cluster = client.get_cluster("5f1a...", "Cluster0").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod cluster;
pub mod error;
pub mod http;
pub mod restore_job;
pub mod search_index;
