//! Fetch Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::products::{ProductsServiceError, records::ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductResponse},
    state::State,
};

/// Fetch Products Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FetchProductsRequest {
    pub product_ids: Vec<Uuid>,
}

/// Products found by id, in request order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FetchProductsResponse {
    pub products: Vec<ProductResponse>,
}

/// Fetch Products Handler
///
/// Looks up several products at once, e.g. to render a wishlist. Unknown ids
/// are left out of the response.
#[endpoint(
    tags("products"),
    summary = "Fetch Products by Id",
    responses(
        (status_code = StatusCode::OK, description = "Products found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "No products found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.fetch",
    skip(json, depot),
    fields(requested = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<FetchProductsRequest>,
    depot: &mut Depot,
) -> Result<Json<FetchProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products: Vec<ProductUuid> = json
        .into_inner()
        .product_ids
        .into_iter()
        .map(ProductUuid::from_uuid)
        .collect();

    tracing::Span::current().record("requested", products.len());

    let found = state
        .app
        .products
        .get_products(&products)
        .await
        .map_err(|error| match error {
            ProductsServiceError::NotFound => StatusError::not_found().brief("No products found"),
            other => into_status_error(other),
        })?;

    Ok(Json(FetchProductsResponse {
        products: found.into_iter().map(Into::into).collect(),
    }))
}
