//! Dialect-aware SELECT builder.
//!
//! A [`Query`] describes the statement; a [`Builder`] renders it for one
//! [`Dialect`], producing the SQL string and the flattened params in clause
//! order.
//!
//! ## Design
//!
//! - Query descriptions are values; builder methods never mutate a shared one.
//! - Placeholders are numbered contiguously across all WHERE conditions.
//! - Struct column lists are computed once per (shape, dialect) and cached.
//!
//! ```ignore
//! use tagsql::{Builder, Columns, Query, Sqlite, order_by, params};
//!
//! #[derive(Columns)]
//! struct User { id: i64, name: String, age: i32 }
//!
//! let builder = Builder::new(Sqlite);
//! let built = builder.build(
//!     &Query::of::<User>("users")
//!         .where_("age > %s", params![18])
//!         .order_by(order_by("name").desc())
//!         .limit(10),
//! )?;
//! assert_eq!(
//!     built.sql(),
//!     "SELECT `id`, `name`, `age` FROM users WHERE age > ? ORDER BY name DESC LIMIT 10"
//! );
//! ```

pub mod order_by;
pub mod select;
pub mod select_cache;
pub mod where_builder;

pub use order_by::{OrderBy, order_by};
pub use select::{Query, Select};
pub use select_cache::SelectListCache;
pub use where_builder::{Condition, Conditions, where_, where_if};

use crate::dialect::{Dialect, Driver};
use crate::error::OrmResult;
use crate::value::Value;
use std::fmt::{self, Write};
use std::sync::Arc;

/// Renders [`Query`] descriptions for one dialect.
///
/// Cloning is cheap and clones share the select-list cache.
#[derive(Clone)]
pub struct Builder {
    dialect: Arc<dyn Dialect>,
    cache: Arc<SelectListCache>,
}

impl Builder {
    /// Builder with its own, empty select-list cache.
    pub fn new<D: Dialect + 'static>(dialect: D) -> Self {
        Self::with_cache(Arc::new(dialect), Arc::new(SelectListCache::new()))
    }

    /// Builder sharing `cache` with other builders.
    ///
    /// The cache keys on the dialect name, so builders for different dialects
    /// can share one cache.
    pub fn with_cache(dialect: Arc<dyn Dialect>, cache: Arc<SelectListCache>) -> Self {
        Self { dialect, cache }
    }

    /// Builder for a built-in driver.
    pub fn from_driver(driver: Driver) -> Self {
        Self::with_cache(driver.dialect(), Arc::new(SelectListCache::new()))
    }

    /// Builder for a driver name such as `"postgres"` or `"sqlite3"`.
    pub fn for_driver(driver: &str) -> OrmResult<Self> {
        Ok(Self::from_driver(driver.parse()?))
    }

    pub fn dialect(&self) -> &dyn Dialect {
        &*self.dialect
    }

    pub fn cache(&self) -> &Arc<SelectListCache> {
        &self.cache
    }

    /// Render `query` as `SELECT .. FROM .. [WHERE ..] [ORDER BY ..] [LIMIT n] [OFFSET n]`.
    pub fn build(&self, query: &Query) -> OrmResult<BuiltQuery> {
        let mut sql = String::from("SELECT ");
        match &query.select {
            Select::Raw(columns) => sql.push_str(columns),
            Select::Shape(shape) => {
                let columns = self.cache.get_or_build(shape, &*self.dialect)?;
                sql.push_str(&columns);
            }
        }

        sql.push_str(" FROM ");
        sql.push_str(&query.from);

        let mut params = Vec::with_capacity(query.conditions.param_count());
        if !query.conditions.is_empty() {
            sql.push_str(" WHERE ");
            query
                .conditions
                .render_into(&*self.dialect, &mut sql, &mut params)?;
        }

        if let Some(order) = &query.order_by {
            order.write_sql(&mut sql);
        }
        if let Some(limit) = query.limit {
            let _ = write!(sql, " LIMIT {limit}");
        }
        if let Some(offset) = query.offset {
            let _ = write!(sql, " OFFSET {offset}");
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "tagsql.build",
            dialect = self.dialect.name(),
            params = params.len(),
            sql = %sql,
            "built query"
        );

        Ok(BuiltQuery { sql, params })
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("dialect", &self.dialect.name())
            .field("cached_shapes", &self.cache.len())
            .finish()
    }
}

/// Rendered SQL and its params.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    sql: String,
    params: Vec<Value>,
}

impl BuiltQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    /// Parameter refs compatible with `tokio-postgres`.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        self.params
            .iter()
            .map(|v| v as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect()
    }
}
