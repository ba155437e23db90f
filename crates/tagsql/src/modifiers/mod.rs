//! Named attribute modifiers.
//!
//! A modifier transforms a struct field's value on its way to the database
//! (value hook) and back (scan hook), and can exclude the field from INSERT or
//! UPDATE statements. Fields reference modifiers by key with
//! `#[orm(modifier = "key")]`; persistence code resolves them through a
//! [`ModifierRegistry`].
//!
//! Built-in keys: `json`, `timeNowUTC`, `timeNowUTC/skipUpdates`,
//! `skipUpdates`, `skipInserts`.
//!
//! # Registering
//!
//! Either at startup:
//!
//! ```ignore
//! tagsql::register_modifier("lower", AttrModifier::new().with_value(|_, v| Ok(v)))
//!     .expect("modifier keys are unique");
//! ```
//!
//! or at link time, picked up when the global registry is first used:
//!
//! ```ignore
//! tagsql::inventory::submit! {
//!     tagsql::ModifierRegistration::new("lower", lower_modifier)
//! }
//! ```

mod builtins;
mod registry;


pub use builtins::{JSON, SKIP_INSERTS, SKIP_UPDATES, TIME_NOW_UTC, TIME_NOW_UTC_SKIP_UPDATES};
pub use registry::{ModifierRegistration, ModifierRegistry, load_modifier, register_modifier};

use crate::error::OrmResult;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// The persistence operation a modifier runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Insert,
    Update,
    Patch,
    Delete,
    Query,
    QueryOne,
    QueryChunks,
}

impl Method {
    /// Whether this operation writes an UPDATE statement.
    pub fn is_update(self) -> bool {
        matches!(self, Method::Update | Method::Patch)
    }
}

/// Context passed to modifier hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    /// Driver name, e.g. `"postgres"`.
    pub driver: &'static str,
    pub method: Method,
}

impl OpInfo {
    pub fn new(driver: &'static str, method: Method) -> Self {
        Self { driver, method }
    }
}

/// Hook signature shared by value and scan hooks.
pub type ModifierHook = Arc<dyn Fn(&OpInfo, Value) -> OrmResult<Value> + Send + Sync>;

/// A named field transformation.
#[derive(Clone, Default)]
pub struct AttrModifier {
    /// Leave the field out of INSERT statements.
    pub skip_on_insert: bool,
    /// Leave the field out of UPDATE statements.
    pub skip_on_update: bool,
    value: Option<ModifierHook>,
    scan: Option<ModifierHook>,
}

impl AttrModifier {
    /// A modifier that passes values through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_on_insert(mut self) -> Self {
        self.skip_on_insert = true;
        self
    }

    pub fn skip_on_update(mut self) -> Self {
        self.skip_on_update = true;
        self
    }

    /// Hook run on the attribute before it is written.
    pub fn with_value<F>(mut self, hook: F) -> Self
    where
        F: Fn(&OpInfo, Value) -> OrmResult<Value> + Send + Sync + 'static,
    {
        self.value = Some(Arc::new(hook));
        self
    }

    /// Hook run on the database value before it is stored in the attribute.
    pub fn with_scan<F>(mut self, hook: F) -> Self
    where
        F: Fn(&OpInfo, Value) -> OrmResult<Value> + Send + Sync + 'static,
    {
        self.scan = Some(Arc::new(hook));
        self
    }

    pub fn has_value_hook(&self) -> bool {
        self.value.is_some()
    }

    pub fn has_scan_hook(&self) -> bool {
        self.scan.is_some()
    }

    /// Whether the field is excluded from the statement written by `method`.
    pub fn skips(&self, method: Method) -> bool {
        match method {
            Method::Insert => self.skip_on_insert,
            m if m.is_update() => self.skip_on_update,
            _ => false,
        }
    }

    /// Transform an attribute value for writing.
    ///
    /// Returns `Ok(None)` when the field is skipped for `op.method`.
    pub fn apply_value(&self, op: &OpInfo, value: Value) -> OrmResult<Option<Value>> {
        if self.skips(op.method) {
            return Ok(None);
        }
        match &self.value {
            Some(hook) => hook(op, value).map(Some),
            None => Ok(Some(value)),
        }
    }

    /// Transform a database value before it is assigned to the attribute.
    pub fn apply_scan(&self, op: &OpInfo, value: Value) -> OrmResult<Value> {
        match &self.scan {
            Some(hook) => hook(op, value),
            None => Ok(value),
        }
    }
}

impl fmt::Debug for AttrModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttrModifier")
            .field("skip_on_insert", &self.skip_on_insert)
            .field("skip_on_update", &self.skip_on_update)
            .field("value", &self.value.is_some())
            .field("scan", &self.scan.is_some())
            .finish()
    }
}
