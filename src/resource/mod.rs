//! Resource layer
//!
//! Each CloudFormation resource type lives in its own module with a typed
//! model, pure model <-> Atlas mappings and async handlers.
//!
//! # Architecture
//!
//! - [`registry`] - Resource type definitions loaded from embedded JSON
//! - [`dispatch`] - Routes untyped model documents to typed mappers and handlers
//! - [`progress`] - Handler results (`ProgressEvent`) and error codes
//! - [`cluster`], [`search_index`], [`restore_job`] - The resource types
//!
//! # Example
//!
//! ```ignore
//! use atlas_cfn::resource::{dispatch, ResourceKind};
//!
//! let request = dispatch::expand(ResourceKind::Cluster, &model)?;
//! ```

pub mod cluster;
pub mod dispatch;
pub mod progress;
pub mod registry;
pub mod restore_job;
pub mod search_index;
pub mod util;

pub use progress::{CallbackContext, HandlerErrorCode, OperationStatus, ProgressEvent};
pub use registry::{get_all_resource_keys, get_resource, Action, ResourceDef, ResourceKind};
