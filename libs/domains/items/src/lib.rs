//! Items Domain
//!
//! CRUD, name search and price filtering for a single `Item` entity, with
//! an in-memory store for development and a PostgreSQL store for real use.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints under /api/items
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, NotFound checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + in-memory and PostgreSQL implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item, ItemInput, SeaORM entity
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use domain_items::{InMemoryItemRepository, ItemService, handlers};
//!
//! let service = ItemService::new(InMemoryItemRepository::new());
//! let app: Router = Router::new().nest("/api", handlers::router(service));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{Item, ItemInput};
pub use postgres::PgItemRepository;
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
