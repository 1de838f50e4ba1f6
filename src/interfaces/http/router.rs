//! API Router with Swagger UI

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::ProductService;
use crate::shared::pagination::PageMetadata;

use super::modules::health::{self, HealthState};
use super::modules::products::{dto, handlers as products, ProductState};
use super::modules::request_id::request_id_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Products
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
    ),
    components(
        schemas(
            // Common
            PageMetadata,
            dto::MessageEnvelope,
            // Health
            health::handlers::HealthResponse,
            health::handlers::ComponentHealth,
            // Products
            dto::ProductDto,
            dto::ReviewDto,
            dto::ImageDto,
            dto::PricingDto,
            dto::AttributeDto,
            dto::ProductListContent,
            dto::ProductListEnvelope,
            dto::ProductContent,
            dto::ProductEnvelope,
            dto::CreateProductRequest,
            dto::UpdateProductRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Products", description = "Product catalog: paginated listing, retrieval and maintenance"),
    ),
    info(
        title = "Product Catalog API",
        version = "1.0.0",
        description = "REST API over a product catalog with nested reviews, images, pricing and attributes",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `db` is only used by `/health`; pass `None` when the service runs on
/// in-memory storage.
pub fn create_api_router(service: Arc<ProductService>, db: Option<DatabaseConnection>) -> Router {
    let product_state = ProductState { service };

    let product_routes = Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .with_state(product_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState::new(db));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .merge(health_routes)
        // Products
        .nest("/api/v1/products", product_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
