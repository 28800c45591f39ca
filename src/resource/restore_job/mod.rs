//! `MongoDB::Atlas::CloudBackUpRestoreJobs`

pub mod handler;
pub mod mappings;
pub mod model;

pub use model::RestoreJobModel;
