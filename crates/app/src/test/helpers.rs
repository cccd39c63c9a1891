//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::UserUuid,
        },
    },
    test::TestContext,
};

pub(crate) fn new_product(name: &str, price: Decimal, stock: u32) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        description: format!("{name} description"),
        images: vec![format!("https://img.example.com/{}.png", name.to_lowercase())],
        price,
        stock,
        category: "accessories".to_string(),
        brand: "Bazaar".to_string(),
    }
}

/// A product with ten units in stock.
pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(new_product(name, price, 10))
        .await
}

/// A user with a unique email and an empty cart.
pub(crate) async fn create_user(ctx: &TestContext) -> Result<UserUuid, UsersServiceError> {
    let uuid = UserUuid::new();

    ctx.users
        .create_user(NewUser {
            uuid,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: format!("{}@example.com", uuid.into_uuid().simple()),
        })
        .await
        .map(|user| user.uuid)
}
