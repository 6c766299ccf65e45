//! Generic repository contract.
//!
//! Every persisted entity implements [`Entity`], which describes its table and
//! exposes its column values. [`Repository`] is the CRUD contract shared by all
//! entities; implementations wrap store failures into [`AppError`] instead of
//! panicking, with the status code the failure should report as.

use async_trait::async_trait;

use crate::domain::value_objects::{Filter, Value};
use crate::shared::error::AppError;

/// A persisted record with a Snowflake primary key named `id`.
pub trait Entity: Clone + Send + Sync + Unpin + 'static {
    /// Table the entity is stored in.
    const TABLE: &'static str;

    /// Human-readable name used in messages ("Client", "Status", ...).
    const NAME: &'static str;

    /// Every column, `id` first, in the order [`Entity::values`] yields them.
    const COLUMNS: &'static [&'static str];

    /// Column of the default ordering for `get_all`.
    const ORDER_BY: &'static str;

    fn id(&self) -> i64;

    /// Column values for every column except `id`.
    fn values(&self) -> Vec<(&'static str, Value)>;

    /// Value of a single column, `None` if the entity has no such column.
    fn value(&self, column: &str) -> Option<Value> {
        if column == "id" {
            return Some(Value::Int(Some(self.id())));
        }
        self.values()
            .into_iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }
}

/// CRUD and predicate-based lookup for one entity type.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// All rows, ordered by [`Entity::ORDER_BY`].
    async fn get_all(&self) -> Result<Vec<T>, AppError>;

    /// All rows matching the filter, in default order.
    async fn find_all(&self, filter: &Filter) -> Result<Vec<T>, AppError>;

    /// A row by id; [`AppError::NotFound`] if absent.
    async fn get_by_id(&self, id: i64) -> Result<T, AppError>;

    /// First row matching the filter.
    async fn find(&self, filter: &Filter) -> Result<Option<T>, AppError>;

    /// Whether any row matches the filter.
    async fn exists(&self, filter: &Filter) -> Result<bool, AppError>;

    /// Insert and return the stored row.
    async fn add(&self, entity: &T) -> Result<T, AppError>;

    /// Overwrite every column of an existing row; [`AppError::NotFound`] if absent.
    async fn update(&self, entity: &T) -> Result<T, AppError>;

    /// Delete by id; [`AppError::NotFound`] if absent.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
