//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{MAX_BATCH_SIZE, NewProduct, ProductPage, ProductQuery},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<ProductPage, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let total = self.repository.count_products(&mut tx, &query).await?;
        let products = self.repository.list_products(&mut tx, &query).await?;

        tx.commit().await?;

        Ok(ProductPage {
            products,
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .repository
            .get_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_products(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        if products.len() > MAX_BATCH_SIZE {
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let found = self.repository.get_products(&mut tx, products).await?;

        tx.commit().await?;

        if found.is_empty() {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(found)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.name.trim().is_empty() || product.price.is_sign_negative() {
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
/// Catalog read and seeding operations.
pub trait ProductsService: Send + Sync {
    /// Retrieves one page of products matching the query.
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<ProductPage, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Batch lookup. Unknown ids are skipped; finding none at all is `NotFound`.
    async fn get_products(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Adds a product to the catalog.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
