//! # tagsql
//!
//! Dialect-aware SELECT building driven by struct column mappings, plus a
//! registry of named attribute modifiers.
//!
//! ## Features
//!
//! - **Struct-driven SELECT**: `#[derive(Columns)]` describes a struct's columns
//!   at compile time; the escaped column list is cached per (struct, dialect)
//! - **Composable WHERE**: immutable condition lists with `%s` slots, rendered
//!   with placeholders numbered across the whole clause
//! - **Dialects**: PostgreSQL, SQLite, MySQL and SQL Server built in; custom
//!   ones implement [`Dialect`]
//! - **Attribute modifiers**: named field hooks (`json`, `timeNowUTC`, ...) looked
//!   up at runtime by persistence code
//!
//! ## Query Builder
//!
//! ```ignore
//! use tagsql::prelude::*;
//!
//! #[derive(Columns)]
//! struct User {
//!     id: i64,
//!     name: String,
//!     age: i32,
//! }
//!
//! let builder = Builder::for_driver("postgres")?;
//! let built = builder.build(
//!     &Query::of::<User>("users")
//!         .where_("age > %s", params![18])
//!         .where_if("name = %s", name_filter)
//!         .order_by(order_by("name").desc())
//!         .limit(10),
//! )?;
//! // SELECT "id", "name", "age" FROM users WHERE age > $1 ORDER BY name DESC LIMIT 10
//! ```
//!
//! ## Modifiers
//!
//! ```ignore
//! use tagsql::{AttrModifier, Method, OpInfo, load_modifier};
//!
//! let json = load_modifier("json")?;
//! let stored = json.apply_value(&OpInfo::new("postgres", Method::Insert), value)?;
//! ```

pub mod builder;
pub mod dialect;
pub mod error;
pub mod modifiers;
pub mod prelude;
pub mod shape;
pub mod value;

pub use builder::{
    Builder, BuiltQuery, Condition, Conditions, OrderBy, Query, Select, SelectListCache, order_by,
    where_, where_if,
};
pub use dialect::{Dialect, Driver, MySql, Postgres, SqlServer, Sqlite};
pub use error::{OrmError, OrmResult};
pub use modifiers::{
    AttrModifier, Method, ModifierHook, ModifierRegistration, ModifierRegistry, OpInfo,
    load_modifier, register_modifier,
};
pub use shape::{FieldInfo, HasColumnMapping, ShapeRef};
pub use value::Value;

#[cfg(feature = "derive")]
pub use tagsql_derive::Columns;

// Re-export inventory for link-time modifier registration
pub use inventory;
