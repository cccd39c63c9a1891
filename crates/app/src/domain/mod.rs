//! Bazaar Domain Concerns

pub mod carts;
pub mod money;
pub mod orders;
pub mod products;
pub mod users;
pub mod wishlists;
