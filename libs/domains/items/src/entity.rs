use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Item, ItemInput};

/// Sea-ORM Entity for the items table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Idempotent bootstrap DDL; the CHECK constraints mirror `ItemInput` validation.
pub const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
    quantity INTEGER NOT NULL CHECK (quantity >= 0)
)"#;

impl From<Model> for Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            quantity: model.quantity,
        }
    }
}

impl ActiveModel {
    /// Insert (`id == None`, the database assigns it) or full replacement of row `id`.
    pub fn from_input(id: Option<i64>, input: ItemInput) -> Self {
        Self {
            id: id.map_or(NotSet, Set),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            quantity: Set(input.quantity),
        }
    }
}
