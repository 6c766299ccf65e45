//! Generic PostgreSQL Repository
//!
//! One implementation of [`Repository`] for every [`Entity`]. SQL is assembled
//! with [`QueryBuilder`] from the entity's table and column list; filter values
//! are always bound as parameters and filter column names are checked against
//! [`Entity::COLUMNS`] before they reach the query text.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::domain::{Entity, Filter, Repository, Value};
use crate::infrastructure::database::map_db_error;
use crate::shared::error::AppError;

/// PostgreSQL repository for entity `T`.
pub struct PgRepository<T> {
    pool: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for PgRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> PgRepository<T> {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// The connection pool this repository runs on.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn select() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new(format!("SELECT {} FROM {}", T::COLUMNS.join(", "), T::TABLE))
    }

    fn push_where(qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter) -> Result<(), AppError> {
        if let Some(column) = filter.columns().into_iter().find(|c| !T::COLUMNS.contains(c)) {
            return Err(AppError::Internal(format!(
                "unknown column '{}' in filter on {}",
                column,
                T::TABLE
            )));
        }
        qb.push(" WHERE ");
        push_filter(qb, filter);
        Ok(())
    }

    fn push_order(qb: &mut QueryBuilder<'static, Postgres>) {
        qb.push(format!(" ORDER BY {}, id", T::ORDER_BY));
    }

    fn push_returning(qb: &mut QueryBuilder<'static, Postgres>) {
        qb.push(" RETURNING ");
        qb.push(T::COLUMNS.join(", "));
    }

    /// `INSERT` of every column, id first, returning the stored row.
    fn insert(entity: &T) -> QueryBuilder<'static, Postgres> {
        let values = entity.values();

        let mut qb = QueryBuilder::new(format!("INSERT INTO {} (id", T::TABLE));
        for (column, _) in &values {
            qb.push(", ");
            qb.push(*column);
        }
        qb.push(") VALUES (");
        qb.push_bind(entity.id());
        for (_, value) in &values {
            qb.push(", ");
            push_value(&mut qb, value);
        }
        qb.push(")");
        Self::push_returning(&mut qb);
        qb
    }

    /// `UPDATE` of every column but id, keyed by id.
    fn update_by_id(entity: &T) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", T::TABLE));
        for (i, (column, value)) in entity.values().iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(*column);
            qb.push(" = ");
            push_value(&mut qb, value);
        }
        qb.push(" WHERE id = ");
        qb.push_bind(entity.id());
        Self::push_returning(&mut qb);
        qb
    }
}

#[async_trait]
impl<T> Repository<T> for PgRepository<T>
where
    T: Entity + for<'r> FromRow<'r, PgRow>,
{
    async fn get_all(&self) -> Result<Vec<T>, AppError> {
        let mut qb = Self::select();
        Self::push_order(&mut qb);

        qb.build_query_as::<T>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error(T::NAME, e))
    }

    async fn find_all(&self, filter: &Filter) -> Result<Vec<T>, AppError> {
        let mut qb = Self::select();
        Self::push_where(&mut qb, filter)?;
        Self::push_order(&mut qb);

        qb.build_query_as::<T>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error(T::NAME, e))
    }

    async fn get_by_id(&self, id: i64) -> Result<T, AppError> {
        self.find(&Filter::eq("id", id))
            .await?
            .ok_or_else(|| AppError::not_found(T::NAME, id))
    }

    async fn find(&self, filter: &Filter) -> Result<Option<T>, AppError> {
        let mut qb = Self::select();
        Self::push_where(&mut qb, filter)?;
        Self::push_order(&mut qb);
        qb.push(" LIMIT 1");

        qb.build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(T::NAME, e))
    }

    async fn exists(&self, filter: &Filter) -> Result<bool, AppError> {
        let mut qb = QueryBuilder::new(format!("SELECT EXISTS (SELECT 1 FROM {}", T::TABLE));
        Self::push_where(&mut qb, filter)?;
        qb.push(")");

        qb.build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error(T::NAME, e))
    }

    async fn add(&self, entity: &T) -> Result<T, AppError> {
        let mut qb = Self::insert(entity);

        tracing::debug!(table = T::TABLE, id = entity.id(), "insert");

        qb.build_query_as::<T>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error(T::NAME, e))
    }

    async fn update(&self, entity: &T) -> Result<T, AppError> {
        let mut qb = Self::update_by_id(entity);

        tracing::debug!(table = T::TABLE, id = entity.id(), "update");

        qb.build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(T::NAME, e))?
            .ok_or_else(|| AppError::not_found(T::NAME, entity.id()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", T::TABLE))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(T::NAME, e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(T::NAME, id));
        }

        tracing::debug!(table = T::TABLE, id, "delete");
        Ok(())
    }
}

/// Render a filter as SQL, binding every value.
pub(crate) fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter) {
    match filter {
        Filter::Eq(column, value) if value.is_null() => {
            qb.push(format!("{} IS NULL", column));
        }
        Filter::Eq(column, value) => {
            qb.push(format!("{} = ", column));
            push_value(qb, value);
        }
        Filter::NotEq(column, value) if value.is_null() => {
            qb.push(format!("{} IS NOT NULL", column));
        }
        Filter::NotEq(column, value) => {
            qb.push(format!("{} <> ", column));
            push_value(qb, value);
        }
        Filter::EqIgnoreCase(column, value) => {
            qb.push(format!("LOWER({}) = LOWER(", column));
            qb.push_bind(value.clone());
            qb.push(")");
        }
        Filter::In(_, values) if values.is_empty() => {
            qb.push("FALSE");
        }
        Filter::In(column, values) => {
            qb.push(format!("{} IN (", column));
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                push_value(qb, value);
            }
            qb.push(")");
        }
        Filter::And(filters) => push_group(qb, filters, " AND ", "TRUE"),
        Filter::Or(filters) => push_group(qb, filters, " OR ", "FALSE"),
    }
}

fn push_group(
    qb: &mut QueryBuilder<'static, Postgres>,
    filters: &[Filter],
    separator: &str,
    when_empty: &str,
) {
    if filters.is_empty() {
        qb.push(when_empty);
        return;
    }
    qb.push("(");
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        push_filter(qb, filter);
    }
    qb.push(")");
}

fn push_value(qb: &mut QueryBuilder<'static, Postgres>, value: &Value) {
    match value {
        Value::Int(v) => qb.push_bind(*v),
        Value::Text(v) => qb.push_bind(v.clone()),
        Value::Date(v) => qb.push_bind(*v),
        Value::Timestamp(v) => qb.push_bind(*v),
    };
}
