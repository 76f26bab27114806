//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Items API",
        version = "1.0.0",
        description = "CRUD service for items with name search and price filtering",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_items::ApiDoc)
    ),
    tags(
        (name = "Items", description = "Item management endpoints")
    )
)]
pub struct ApiDoc;
