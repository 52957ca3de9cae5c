use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::product::{
            CreateProductRequest, LowStockQuery, PriceRangeQuery, StockAdjustQuery,
            UpdateProductRequest,
        },
        response::product::{ProductResponse, StockStatusResponse},
    },
    middleware::validate::ValidatedJson,
    model::StockAdjustment,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/productos",
    tag = "Product",
    responses(
        (status = 200, description = "Every product in insertion order", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/productos/low_stock",
    tag = "Product",
    params(LowStockQuery),
    responses(
        (status = 200, description = "Products at or below the threshold", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_low_stock(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<LowStockQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_low_stock(params.threshold).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/productos/buscar/nombre/{name}",
    tag = "Product",
    params(("name" = String, Path, description = "Product name, compared without case")),
    responses(
        (status = 200, description = "First product with that name", body = ProductResponse),
        (status = 404, description = "No product with that name", body = ErrorResponse)
    )
)]
pub async fn get_product_by_name(
    Extension(service): Extension<DynProductQueryService>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service
        .find_by_exact_name(&name)
        .await?
        .ok_or_else(|| HttpError::NotFound(format!("Product '{name}' not found")))?;

    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    get,
    path = "/productos/categoria/{category}",
    tag = "Product",
    params(("category" = String, Path, description = "Category, compared without case")),
    responses(
        (status = 200, description = "Products in the category", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products_by_category(
    Extension(service): Extension<DynProductQueryService>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_category(&category).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/productos/rango_precio",
    tag = "Product",
    params(PriceRangeQuery),
    responses(
        (status = 200, description = "Products priced within the inclusive range", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products_by_price_range(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<PriceRangeQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .find_by_price_range(params.min_price, params.max_price)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/productos/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service
        .find_by_id(id)
        .await?
        .ok_or_else(|| HttpError::NotFound(format!("Product with id {id} not found")))?;

    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    get,
    path = "/productos/{id}/stock",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Current stock and availability", body = StockStatusResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product_stock(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let status = service
        .stock_status(id)
        .await?
        .ok_or_else(|| HttpError::NotFound(format!("Product with id {id} not found")))?;

    Ok((StatusCode::OK, Json(status)))
}

#[utoipa::path(
    post,
    path = "/productos",
    tag = "Product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "A product with that id already exists", body = ErrorResponse),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    ValidatedJson(body): ValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_product(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/productos/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product replaced", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service
        .replace_product(id, &body)
        .await?
        .ok_or_else(|| HttpError::NotFound(format!("Product with id {id} not found")))?;

    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    delete,
    path = "/productos/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    if service.delete_product(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(HttpError::NotFound(format!(
            "Product with id {id} not found"
        )))
    }
}

#[utoipa::path(
    patch,
    path = "/productos/{id}/actualizar_stock",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID"), StockAdjustQuery),
    responses(
        (status = 200, description = "Stock adjusted", body = ProductResponse),
        (status = 400, description = "Product missing or stock would go negative", body = ErrorResponse)
    )
)]
pub async fn adjust_product_stock(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
    Query(params): Query<StockAdjustQuery>,
) -> Result<impl IntoResponse, HttpError> {
    match service.adjust_stock(id, params.quantity).await? {
        StockAdjustment::Applied(product) => Ok((StatusCode::OK, Json(product))),
        StockAdjustment::NotFound => Err(HttpError::BadRequest(format!(
            "Product with id {id} not found"
        ))),
        StockAdjustment::Rejected(reason) => Err(HttpError::BadRequest(format!(
            "Insufficient stock: {reason}"
        ))),
    }
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/productos", get(get_products).post(create_product))
        .route("/productos/low_stock", get(get_low_stock))
        .route("/productos/buscar/nombre/{name}", get(get_product_by_name))
        .route(
            "/productos/categoria/{category}",
            get(get_products_by_category),
        )
        .route("/productos/rango_precio", get(get_products_by_price_range))
        .route(
            "/productos/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/productos/{id}/stock", get(get_product_stock))
        .route(
            "/productos/{id}/actualizar_stock",
            patch(adjust_product_stock),
        )
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
}
