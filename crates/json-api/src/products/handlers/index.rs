//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::products::data::ProductQuery;

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductResponse},
    state::State,
};

/// One page of the catalog.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductsResponse {
    /// Products on this page
    pub products: Vec<ProductResponse>,

    /// Number of pages for the current filters
    pub total_pages: u64,

    /// The page that was returned, starting at 1
    pub current_page: u32,
}

/// Product Index Handler
///
/// Lists products with optional name and stock filters.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Products page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    name: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let in_stock = parse_in_stock(req.query::<String>("inStock"))?;

    let query = ProductQuery::new(
        page.into_inner(),
        limit.into_inner(),
        name.into_inner(),
        in_stock,
    );

    let page = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    let total_pages = page.total_pages();

    Ok(Json(ProductsResponse {
        total_pages,
        current_page: page.page,
        products: page.products.into_iter().map(Into::into).collect(),
    }))
}

fn parse_in_stock(raw: Option<String>) -> Result<Option<bool>, StatusError> {
    raw.map(|value| value.parse::<bool>())
        .transpose()
        .map_err(|_ignored| StatusError::bad_request().brief("inStock must be true or false"))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::products::{
        MockProductsService, ProductsServiceError, data::ProductPage, records::ProductUuid,
    };
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_page() -> TestResult {
        let mut repo = MockProductsService::new();
        let product = make_product(ProductUuid::new(), Decimal::new(49_999, 2));
        let uuid = product.uuid;

        repo.expect_list_products()
            .once()
            .withf(|query| *query == ProductQuery::default())
            .return_once(move |query| {
                Ok(ProductPage {
                    products: vec![product],
                    total: 11,
                    page: query.page,
                    limit: query.limit,
                })
            });

        repo.expect_get_product().never();
        repo.expect_get_products().never();
        repo.expect_create_product().never();

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductsResponse = res.take_json().await?;

        assert_eq!(body.total_pages, 2);
        assert_eq!(body.current_page, 1);
        assert_eq!(body.products.len(), 1);
        assert_eq!(
            body.products.first().map(|product| (product.id, product.price.as_str())),
            Some((uuid.into_uuid(), "499.99"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_filters() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .withf(|query| {
                query.page == 3
                    && query.limit == 5
                    && query.name.as_deref() == Some("lens")
                    && query.in_stock == Some(true)
            })
            .return_once(|query| {
                Ok(ProductPage {
                    products: Vec::new(),
                    total: 0,
                    page: query.page,
                    limit: query.limit,
                })
            });

        repo.expect_get_product().never();
        repo.expect_get_products().never();
        repo.expect_create_product().never();

        let mut res = TestClient::get(
            "http://example.com/products?page=3&limit=5&name=lens&inStock=true",
        )
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductsResponse = res.take_json().await?;

        assert_eq!(body.current_page, 3);
        assert_eq!(body.total_pages, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_invalid_page_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products().never();
        repo.expect_get_product().never();
        repo.expect_get_products().never();
        repo.expect_create_product().never();

        let res = TestClient::get("http://example.com/products?page=first")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_failure_returns_500() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        repo.expect_get_product().never();
        repo.expect_get_products().never();
        repo.expect_create_product().never();

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[test]
    fn in_stock_accepts_booleans_only() {
        assert_eq!(parse_in_stock(None).ok(), Some(None));
        assert_eq!(parse_in_stock(Some("false".to_string())).ok(), Some(Some(false)));
        assert!(
            parse_in_stock(Some("yes".to_string())).is_err(),
            "non-boolean stock filter should be rejected"
        );
    }
}
