use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ApiQuery, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestPathResponse, BadRequestQueryResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemInput, MessageResponse, NameQuery, PriceQuery, ServiceStatus};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// Version reported by the status endpoint.
pub const API_VERSION: &str = "1.0.0";

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        status,
        list_items,
        create_item,
        get_item,
        update_item,
        delete_item,
        search_items,
        items_by_price,
    ),
    components(
        schemas(Item, ItemInput, ServiceStatus, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestPathResponse,
            BadRequestQueryResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Items", description = "Item management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the items router; mount it under `/api`.
///
/// `/items/` (status) and `/items` (list) are distinct routes.
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/items/", get(status))
        .route("/items", get(list_items).post(create_item))
        .route("/items/search", get(search_items))
        .route("/items/price", get(items_by_price))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .with_state(shared_service)
}

/// Service status
#[utoipa::path(
    get,
    path = "/items/",
    tag = "Items",
    responses(
        (status = 200, description = "Service is up", body = ServiceStatus)
    )
)]
async fn status() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "UP".to_string(),
        message: "CRUD Application is running successfully!".to_string(),
        version: API_VERSION.to_string(),
    })
}

/// List all items
#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    responses(
        (status = 200, description = "List of items", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.list_items().await?;
    Ok(Json(items))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    request_body = ItemInput,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedJson(input): ValidatedJson<ItemInput>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<Item>> {
    service
        .get_item(id)
        .await?
        .map(Json)
        .ok_or(ItemError::NotFound(id))
}

/// Replace an item
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = ItemInput,
    responses(
        (status = 200, description = "Item updated successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ItemInput>,
) -> ItemResult<Json<Item>> {
    let item = service.update_item(id, input).await?;
    Ok(Json(item))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<MessageResponse>> {
    service.delete_item(id).await?;
    Ok(Json(MessageResponse {
        message: "Item deleted successfully".to_string(),
    }))
}

/// Search items by name (case-insensitive substring)
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "Items",
    params(NameQuery),
    responses(
        (status = 200, description = "Matching items", body = Vec<Item>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ApiQuery(query): ApiQuery<NameQuery>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.search_by_name(&query.name).await?;
    Ok(Json(items))
}

/// Items priced at or below `max`
#[utoipa::path(
    get,
    path = "/items/price",
    tag = "Items",
    params(PriceQuery),
    responses(
        (status = 200, description = "Matching items", body = Vec<Item>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn items_by_price<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ApiQuery(query): ApiQuery<PriceQuery>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.items_by_max_price(query.max).await?;
    Ok(Json(items))
}
