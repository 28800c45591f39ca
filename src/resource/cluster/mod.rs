//! `MongoDB::Atlas::Cluster`

pub mod handler;
pub mod mappings;
pub mod model;

pub use model::ClusterModel;
