//! Products

mod errors;
mod handlers;
pub(crate) mod responses;

pub(crate) use handlers::*;
