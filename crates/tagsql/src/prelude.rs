//! Convenient imports for typical `tagsql` usage.
//!
//! ```ignore
//! use tagsql::prelude::*;
//! ```

pub use crate::{
    Builder, Conditions, HasColumnMapping, OrderBy, OrmError, OrmResult, Query, Select, Value,
    order_by, params, where_, where_if,
};

#[cfg(feature = "derive")]
pub use crate::Columns;
