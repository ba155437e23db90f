//! SELECT query description.

use super::order_by::OrderBy;
use super::where_builder::Conditions;
use crate::shape::{HasColumnMapping, ShapeRef};
use crate::value::Value;

/// Source of the SELECT column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Select {
    /// Column list used verbatim.
    Raw(String),
    /// Escaped columns of a struct shape.
    Shape(ShapeRef),
}

impl Select {
    pub fn raw(columns: impl Into<String>) -> Self {
        Select::Raw(columns.into())
    }

    pub fn shape<T: HasColumnMapping + ?Sized>() -> Self {
        Select::Shape(ShapeRef::of::<T>())
    }
}

impl From<&str> for Select {
    fn from(columns: &str) -> Self {
        Select::Raw(columns.to_string())
    }
}

impl From<String> for Select {
    fn from(columns: String) -> Self {
        Select::Raw(columns)
    }
}

impl From<ShapeRef> for Select {
    fn from(shape: ShapeRef) -> Self {
        Select::Shape(shape)
    }
}

/// A SELECT statement description, rendered by [`Builder::build`](super::Builder::build).
///
/// Every method consumes the query and returns the extended one; clone a
/// query to fork it.
///
/// `from` and the raw forms of `select` and `order_by` are trusted SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub(crate) select: Select,
    pub(crate) from: String,
    pub(crate) conditions: Conditions,
    pub(crate) order_by: Option<OrderBy>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
}

impl Query {
    pub fn new(select: impl Into<Select>, from: impl Into<String>) -> Self {
        Self {
            select: select.into(),
            from: from.into(),
            conditions: Conditions::new(),
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    /// Select the columns of the shape `T`.
    pub fn of<T: HasColumnMapping + ?Sized>(from: impl Into<String>) -> Self {
        Self::new(Select::shape::<T>(), from)
    }

    /// Append a condition.
    pub fn where_(
        mut self,
        template: impl Into<String>,
        params: impl IntoIterator<Item = Value>,
    ) -> Self {
        self.conditions = self.conditions.where_(template, params);
        self
    }

    /// Append a condition unless `param` is `None`.
    pub fn where_if<T: Into<Value>>(mut self, template: impl Into<String>, param: Option<T>) -> Self {
        self.conditions = self.conditions.where_if(template, param);
        self
    }

    /// Append every condition of `conditions`.
    pub fn filter(mut self, conditions: &Conditions) -> Self {
        self.conditions = self.conditions.and(conditions);
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Render `LIMIT n`. `limit(0)` renders `LIMIT 0`.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Render `OFFSET n`. `offset(0)` renders `OFFSET 0`.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    pub fn select(&self) -> &Select {
        &self.select
    }

    pub fn from_clause(&self) -> &str {
        &self.from
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }
}
