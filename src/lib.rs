//! Model <-> MongoDB Atlas mapping layer for CloudFormation resource providers

pub mod atlas;
pub mod config;
pub mod resource;

/// Version injected at compile time via ATLAS_CFN_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("ATLAS_CFN_VERSION") {
    Some(v) => v,
    None => "dev",
};
