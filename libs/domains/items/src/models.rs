use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// A persisted item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Identifier assigned by the store on creation
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Widget")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 9.99)]
    pub price: f64,
    #[schema(example = 3)]
    pub quantity: i32,
}

/// Request body for both create and update.
///
/// An `id` sent by the client is ignored; the store assigns it on create
/// and the path decides it on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ItemInput {
    #[validate(
        length(min = 1, max = 255, message = "name must be 1 to 255 characters"),
        custom(function = "not_blank")
    )]
    #[schema(example = "Widget")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    #[schema(example = 9.99)]
    pub price: f64,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    #[schema(example = 3)]
    pub quantity: i32,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("name must not be blank".into());
        return Err(err);
    }
    Ok(())
}

impl Item {
    /// Build the stored value for `id` from a validated input.
    pub fn from_input(id: i64, input: ItemInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
        }
    }
}

/// Query for `GET /api/items/search`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Case-insensitive substring of the item name
    pub name: String,
}

/// Query for `GET /api/items/price`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceQuery {
    /// Inclusive upper bound on price
    pub max: f64,
}

/// Body of `GET /api/items/`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceStatus {
    #[schema(example = "UP")]
    pub status: String,
    pub message: String,
    #[schema(example = "1.0.0")]
    pub version: String,
}

/// Body of a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Item deleted successfully")]
    pub message: String,
}
