//! `MongoDB::Atlas::SearchIndex`

pub mod handler;
pub mod mappings;
pub mod model;

pub use model::SearchIndexModel;
