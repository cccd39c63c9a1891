//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use bazaar_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartLineRecord, CartRecord},
        },
        orders::{
            MockOrdersService,
            records::{
                OrderLineRecord, OrderRecord, OrderStatus, OrderUuid, PaymentMethod,
                ShippingAddress, ShippingMethod,
            },
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::{MockUsersService, records::UserUuid},
        wishlists::{
            MockWishlistsService,
            records::{WishlistItemRecord, WishlistRecord},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service; anything a test does not configure must never be called.
pub(crate) struct TestServices {
    pub(crate) users: MockUsersService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) wishlists: MockWishlistsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl Default for TestServices {
    fn default() -> Self {
        Self {
            users: strict_users_mock(),
            products: strict_products_mock(),
            carts: strict_carts_mock(),
            wishlists: strict_wishlists_mock(),
            orders: strict_orders_mock(),
            auth: strict_auth_mock(),
        }
    }
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            wishlists: Arc::new(self.wishlists),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` as the authenticated [`TEST_USER_UUID`].
    pub(crate) fn authenticated(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
    }

    pub(crate) fn anonymous(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();

    users
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_get_products().never();
    products.expect_create_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_upsert_cart_line().never();
    carts.expect_remove_cart_line().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_wishlists_mock() -> MockWishlistsService {
    let mut wishlists = MockWishlistsService::new();

    wishlists.expect_get_wishlist().never();
    wishlists.expect_add_to_wishlist().never();
    wishlists.expect_remove_from_wishlist().never();

    wishlists
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_list_orders().never();
    orders.expect_create_order().never();
    orders.expect_update_order_status().never();

    orders
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    TestServices {
        auth,
        ..TestServices::default()
    }
    .into_state()
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    TestServices {
        users,
        ..TestServices::default()
    }
    .authenticated(route)
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    TestServices {
        products,
        ..TestServices::default()
    }
    .anonymous(route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    TestServices {
        carts,
        ..TestServices::default()
    }
    .authenticated(route)
}

pub(crate) fn wishlists_service(wishlists: MockWishlistsService, route: Router) -> Service {
    TestServices {
        wishlists,
        ..TestServices::default()
    }
    .authenticated(route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    TestServices {
        orders,
        ..TestServices::default()
    }
    .authenticated(route)
}

pub(crate) fn make_product(uuid: ProductUuid, price: Decimal) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Mirrorless Camera".to_string(),
        description: "24MP full-frame body".to_string(),
        images: vec!["https://img.example.com/camera.jpg".to_string()],
        price,
        stock: 4,
        category: "Cameras".to_string(),
        brand: "Lumen".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_line(
    product: ProductUuid,
    price: Decimal,
    quantity: u32,
) -> CartLineRecord {
    CartLineRecord {
        product_uuid: product,
        product_name: "Mirrorless Camera".to_string(),
        product_image: "https://img.example.com/camera.jpg".to_string(),
        quantity,
        price,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(version: i64, lines: Vec<CartLineRecord>) -> CartRecord {
    CartRecord {
        user_uuid: TEST_USER_UUID,
        version,
        lines,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_wishlist(products: &[ProductUuid]) -> WishlistRecord {
    WishlistRecord {
        user_uuid: TEST_USER_UUID,
        items: products
            .iter()
            .map(|product| WishlistItemRecord {
                product_uuid: *product,
                created_at: Timestamp::UNIX_EPOCH,
            })
            .collect(),
    }
}

pub(crate) fn make_order(uuid: OrderUuid, status: OrderStatus) -> OrderRecord {
    let product = ProductUuid::from_uuid(Uuid::max());

    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        email: "ada@example.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        lines: vec![OrderLineRecord {
            product_uuid: product,
            product_name: "Mirrorless Camera".to_string(),
            product_image: "https://img.example.com/camera.jpg".to_string(),
            quantity: 2,
            price: Decimal::new(10, 0),
        }],
        total_price: Decimal::new(20, 0),
        status,
        shipping_address: ShippingAddress {
            street_address: "12 Analytical Row".to_string(),
            apartment: None,
            city: "London".to_string(),
            state: "Greater London".to_string(),
            postal_code: "N1 9GU".to_string(),
            country: "GB".to_string(),
        },
        payment_method: PaymentMethod::CreditCard,
        shipping_method: ShippingMethod::Domestic,
        use_shipping_as_billing: true,
        newsletter_subscribed: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
