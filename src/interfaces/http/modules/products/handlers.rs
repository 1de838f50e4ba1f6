//! Product API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::application::ProductService;
use crate::domain::{NewProduct, ProductChanges};
use crate::interfaces::http::common::{
    ApiError, ApiPath, ApiQuery, Envelope, ListContent, ResponseAssembler, SingleContent,
    ValidatedJson,
};

use super::dto::{
    expand, CreateProductRequest, MessageEnvelope, ListProductsParams, ProductDto, ProductEnvelope,
    ProductListEnvelope, UpdateProductRequest,
};

pub const LIST_MESSAGE: &str = "Products retrieved successfully.";
pub const RETRIEVE_MESSAGE: &str = "Product retrieved successfully.";
pub const CREATE_MESSAGE: &str = "Product created successfully.";
pub const UPDATE_MESSAGE: &str = "Product updated successfully.";
pub const DELETE_MESSAGE: &str = "Product deleted successfully.";

#[derive(Clone)]
pub struct ProductState {
    pub service: Arc<ProductService>,
}

type ListResponse = Json<Envelope<ListContent<ProductDto>>>;
type SingleResponse = Json<Envelope<SingleContent<ProductDto>>>;

#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Page of products", body = ProductListEnvelope),
        (status = 400, description = "Filter of the wrong type", body = MessageEnvelope),
        (status = 500, description = "Storage failure", body = MessageEnvelope)
    )
)]
pub async fn list_products(
    State(state): State<ProductState>,
    ApiQuery(params): ApiQuery<ListProductsParams>,
) -> Result<ListResponse, ApiError> {
    let request = state.service.paginator().request(params.limit, params.offset);
    let page = state
        .service
        .list(&params.filter(), request)
        .await?
        .map(expand);

    Ok(Json(ResponseAssembler::assemble_list(
        page.items,
        page.metadata,
        LIST_MESSAGE,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product, or null when the id is unknown", body = ProductEnvelope)
    )
)]
pub async fn get_product(
    State(state): State<ProductState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<SingleResponse, ApiError> {
    let product = state.service.get(id).await?.map(expand);
    Ok(Json(ResponseAssembler::assemble_single(
        product,
        RETRIEVE_MESSAGE,
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Created", body = ProductEnvelope),
        (status = 400, description = "Malformed JSON", body = MessageEnvelope),
        (status = 422, description = "Invalid data or duplicate SKU", body = MessageEnvelope)
    )
)]
pub async fn create_product(
    State(state): State<ProductState>,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, SingleResponse), ApiError> {
    let new = NewProduct::try_from(req)?;
    let created = state.service.create(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(ResponseAssembler::assemble_single(
            Some(expand(created)),
            CREATE_MESSAGE,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated", body = ProductEnvelope),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 422, description = "Invalid data or duplicate SKU", body = MessageEnvelope)
    )
)]
pub async fn update_product(
    State(state): State<ProductState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> Result<SingleResponse, ApiError> {
    let changes = ProductChanges::try_from(req)?;
    let updated = state.service.update(id, changes).await?;
    Ok(Json(ResponseAssembler::assemble_single(
        Some(expand(updated)),
        UPDATE_MESSAGE,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageEnvelope),
        (status = 404, description = "Not found", body = MessageEnvelope)
    )
)]
pub async fn delete_product(
    State(state): State<ProductState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Envelope<()>>, ApiError> {
    state.service.delete(id).await?;
    Ok(Json(Envelope {
        success: true,
        message: DELETE_MESSAGE.to_string(),
        content: None,
    }))
}
