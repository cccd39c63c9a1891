//! Wishlists

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::WishlistsServiceError;
pub(crate) use repository::PgWishlistsRepository;
pub use service::*;
