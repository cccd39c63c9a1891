//! Product Handlers

pub(crate) mod fetch;
pub(crate) mod get;
pub(crate) mod index;
