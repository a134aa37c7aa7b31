//! Glue between the CLI and the screening library.

pub(crate) mod cache_manager;
pub(crate) mod universe_source;
