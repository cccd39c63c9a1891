//! User Handlers

pub(crate) mod profile;
