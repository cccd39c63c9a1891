use bazaar_app::domain::products::{
    PgProductsService, ProductsService, data::NewProduct, records::ProductUuid,
};
use clap::Args;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::cli::args::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Unit price, e.g. 19.99
    #[arg(long)]
    price: Decimal,

    #[arg(long, default_value_t = 0)]
    stock: u32,

    #[arg(long, default_value = "")]
    category: String,

    #[arg(long, default_value = "")]
    brand: String,

    /// Image URL; repeat for several, the first is the main image
    #[arg(long = "image")]
    images: Vec<String>,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let service = PgProductsService::new(args.database.db().await?);

    let product = service
        .create_product(NewProduct {
            uuid: args
                .product_uuid
                .map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: args.name,
            description: args.description,
            images: args.images,
            price: args.price,
            stock: args.stock,
            category: args.category,
            brand: args.brand,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price: {}", product.price);

    Ok(())
}
