use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Statement,
};
use tracing::instrument;

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{Item, ItemInput},
    repository::ItemRepository,
};

const SEARCH_BY_NAME_SQL: &str = r#"SELECT "id", "name", "description", "price", "quantity"
FROM "items"
WHERE LOWER("name") LIKE $1 ESCAPE '\'
ORDER BY "id""#;

/// PostgreSQL-backed store over the `items` table.
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the `items` table if it does not exist yet.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> ItemResult<()> {
        let stmt = Statement::from_string(DbBackend::Postgres, entity::CREATE_TABLE_SQL.to_owned());
        self.db.execute_raw(stmt).await?;
        tracing::info!("Items table ready");
        Ok(())
    }
}

/// Escape LIKE metacharacters so user input only ever matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    async fn get(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Item::from))
    }

    #[instrument(skip(self, input))]
    async fn save(&self, id: Option<i64>, input: ItemInput) -> ItemResult<Item> {
        let active_model = entity::ActiveModel::from_input(id, input);

        let model = match id {
            None => active_model.insert(&self.db).await?,
            Some(id) => match active_model.update(&self.db).await {
                Ok(model) => model,
                Err(DbErr::RecordNotUpdated) => return Err(ItemError::NotFound(id)),
                Err(e) => return Err(e.into()),
            },
        };

        tracing::debug!(item_id = model.id, "Saved item row");
        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> ItemResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(ItemError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_name_contains(&self, substring: &str) -> ItemResult<Vec<Item>> {
        let pattern = format!("%{}%", escape_like(&substring.to_lowercase()));
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            SEARCH_BY_NAME_SQL,
            [pattern.into()],
        );

        let models = entity::Entity::find()
            .from_raw_sql(stmt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    async fn find_by_max_price(&self, max: f64) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Price.lte(max))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i64, name: &str, price: f64) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            description: None,
            price,
            quantity: 1,
        }
    }

    fn input(name: &str, price: f64) -> ItemInput {
        ItemInput {
            name: name.to_string(),
            description: Some("desc".to_string()),
            price,
            quantity: 1,
        }
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\dir"), "c:\\\\dir");
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "a", 1.0), model(2, "b", 2.0)]])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let items = repo.list().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[1].name, "b");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgItemRepository::new(db);

        assert_eq!(repo.get(9).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_returns_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![entity::Model {
                description: Some("desc".to_string()),
                ..model(7, "Widget", 9.99)
            }]])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let item = repo.save(None, input("Widget", 9.99)).await.unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.description.as_deref(), Some("desc"));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let err = repo.save(Some(3), input("x", 1.0)).await.unwrap_err();
        assert!(matches!(err, ItemError::NotFound(3)));
    }

    #[tokio::test]
    async fn test_delete_without_rows_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let err = repo.delete(4).await.unwrap_err();
        assert!(matches!(err, ItemError::NotFound(4)));
    }

    #[tokio::test]
    async fn test_delete_existing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PgItemRepository::new(db);

        assert!(repo.delete(4).await.is_ok());
    }

    #[tokio::test]
    async fn test_search_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Item", 1.0), model(2, "ITEM SPECIAL", 2.0)]])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let items = repo.find_by_name_contains("item").await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_query_error_becomes_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("relation does not exist".to_string())])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let err = repo.find_by_max_price(10.0).await.unwrap_err();
        assert!(matches!(err, ItemError::Database(_)));
    }
}
