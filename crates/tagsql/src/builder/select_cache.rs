use crate::dialect::Dialect;
use crate::error::{OrmError, OrmResult};
use crate::shape::ShapeRef;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

type CacheKey = (TypeId, &'static str);

/// Escaped SELECT column lists, keyed by shape and dialect name.
///
/// Safe to share between threads. Two threads missing on the same key may both
/// run the introspector; the first stored list wins and both are equal.
#[derive(Debug, Default)]
pub struct SelectListCache {
    entries: RwLock<HashMap<CacheKey, Arc<str>>>,
}

impl SelectListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached column list for `shape` under `dialect`, computing it on a miss.
    ///
    /// No lock is held while the introspector or the dialect run.
    pub fn get_or_build(&self, shape: &ShapeRef, dialect: &dyn Dialect) -> OrmResult<Arc<str>> {
        let key = (shape.type_id(), dialect.name());

        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(list) = cached {
            return Ok(list);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "tagsql.select_cache",
            shape = shape.type_name(),
            dialect = dialect.name(),
            "select list cache miss"
        );

        let list: Arc<str> = build_select_list(shape, dialect)?.into();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.entry(key).or_insert(list).clone())
    }

    pub fn contains(&self, shape: &ShapeRef, dialect: &dyn Dialect) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&(shape.type_id(), dialect.name()))
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached list.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

fn build_select_list(shape: &ShapeRef, dialect: &dyn Dialect) -> OrmResult<String> {
    let type_name = shape.type_name();
    let fields = shape
        .fields()
        .map_err(|e| OrmError::ShapeIntrospection {
            type_name,
            source: Box::new(e),
        })?;

    if fields.is_empty() {
        return Err(OrmError::invalid_shape(type_name, "no mapped columns"));
    }

    let mut escaped = Vec::with_capacity(fields.len());
    for field in &fields {
        if field.column.is_empty() {
            return Err(OrmError::invalid_shape(
                type_name,
                format!("field `{}` maps to an empty column name", field.field),
            ));
        }
        escaped.push(dialect.escape(field.column));
    }
    Ok(escaped.join(", "))
}
