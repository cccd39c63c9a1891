//! App Router

use salvo::Router;

use crate::{auth, orders, products, users};

/// Catalog routes are public; everything under `users` and `orders` needs a bearer token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("fetch").post(products::fetch::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("users")
                        .push(Router::with_path("profile").get(users::profile::handler))
                        .push(
                            Router::with_path("cart")
                                .get(users::cart::get::handler)
                                .post(users::cart::upsert::handler)
                                .delete(users::cart::clear::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .delete(users::cart::remove::handler),
                                ),
                        )
                        .push(
                            Router::with_path("wishlist")
                                .get(users::wishlist::get::handler)
                                .post(users::wishlist::add::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .delete(users::wishlist::remove::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(
                            Router::with_path("{order}/status").put(orders::status::handler),
                        ),
                ),
        )
}
