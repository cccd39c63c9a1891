//! Users

pub(crate) mod cart;
mod errors;
mod handlers;
pub(crate) mod wishlist;

pub(crate) use handlers::*;
