//! Struct shapes and their column mappings.
//!
//! A struct shape is any type implementing [`HasColumnMapping`], usually via
//! `#[derive(Columns)]`:
//!
//! ```ignore
//! use tagsql::Columns;
//!
//! #[derive(Columns)]
//! struct User {
//!     id: i64,
//!     #[orm(column = "user_name")]
//!     name: String,
//!     #[orm(modifier = "timeNowUTC")]
//!     updated_at: chrono::DateTime<chrono::Utc>,
//! }
//! ```

use crate::error::OrmResult;
use crate::modifiers::{AttrModifier, ModifierRegistry};
use std::any::TypeId;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Mapping of one struct field to its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Position of the field in the struct.
    pub index: usize,
    /// Rust field name.
    pub field: &'static str,
    /// Canonical column name.
    pub column: &'static str,
    /// Key of the attribute modifier applied to this field, if any.
    pub modifier: Option<&'static str>,
}

impl FieldInfo {
    pub const fn new(index: usize, field: &'static str, column: &'static str) -> Self {
        Self {
            index,
            field,
            column,
            modifier: None,
        }
    }

    pub const fn with_modifier(mut self, key: &'static str) -> Self {
        self.modifier = Some(key);
        self
    }

    /// Resolve this field's modifier in `registry`.
    ///
    /// Returns `Ok(None)` for fields without a modifier and
    /// [`OrmError::ModifierNotFound`](crate::OrmError::ModifierNotFound) when the
    /// key is not registered.
    pub fn load_modifier(&self, registry: &ModifierRegistry) -> OrmResult<Option<AttrModifier>> {
        self.modifier.map(|key| registry.load(key)).transpose()
    }
}

/// Compile-time column mapping of a struct shape.
///
/// Implemented by `#[derive(Columns)]`. Implementations must return the same
/// fields, in the same order, on every call: the result is cached per
/// `(Shape, dialect)` for the life of a [`SelectListCache`](crate::SelectListCache).
pub trait HasColumnMapping {
    /// The struct that owns the columns; `Self` for plain structs.
    type Shape: ?Sized + 'static;

    /// Ordered field descriptors of the shape.
    fn column_mapping() -> OrmResult<Vec<FieldInfo>>;
}

macro_rules! forward_column_mapping {
    ($($ptr:ty),*) => {
        $(
            impl<T: HasColumnMapping + ?Sized> HasColumnMapping for $ptr {
                type Shape = T::Shape;

                fn column_mapping() -> OrmResult<Vec<FieldInfo>> {
                    T::column_mapping()
                }
            }
        )*
    };
}

forward_column_mapping!(&T, Box<T>, Arc<T>, Rc<T>);

/// Type-erased handle to a [`HasColumnMapping`] implementation.
#[derive(Clone, Copy)]
pub struct ShapeRef {
    type_id: TypeId,
    type_name: &'static str,
    introspect: fn() -> OrmResult<Vec<FieldInfo>>,
}

impl ShapeRef {
    /// Handle for the shape `T`. Pointer-like wrappers resolve to their target.
    pub fn of<T: HasColumnMapping + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T::Shape>(),
            type_name: std::any::type_name::<T::Shape>(),
            introspect: T::column_mapping,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Run the shape's introspector.
    pub fn fields(&self) -> OrmResult<Vec<FieldInfo>> {
        (self.introspect)()
    }
}

impl fmt::Debug for ShapeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapeRef").field(&self.type_name).finish()
    }
}

impl PartialEq for ShapeRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ShapeRef {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Account;

    impl HasColumnMapping for Account {
        type Shape = Self;

        fn column_mapping() -> OrmResult<Vec<FieldInfo>> {
            Ok(vec![
                FieldInfo::new(0, "id", "id"),
                FieldInfo::new(1, "meta", "meta").with_modifier("json"),
            ])
        }
    }

    #[test]
    fn pointer_wrappers_resolve_to_target() {
        let direct = ShapeRef::of::<Account>();
        assert_eq!(ShapeRef::of::<&Account>(), direct);
        assert_eq!(ShapeRef::of::<Box<Account>>(), direct);
        assert_eq!(ShapeRef::of::<Arc<Account>>(), direct);
        assert!(ShapeRef::of::<Rc<Account>>().type_name().ends_with("Account"));
    }

    #[test]
    fn fields_in_declaration_order() {
        let fields = ShapeRef::of::<Account>().fields().unwrap();
        let cols: Vec<_> = fields.iter().map(|f| f.column).collect();
        assert_eq!(cols, ["id", "meta"]);
        assert_eq!(fields[1].modifier, Some("json"));
    }

    #[test]
    fn load_modifier_for_field() {
        let registry = ModifierRegistry::with_builtins();
        let fields = Account::column_mapping().unwrap();
        assert!(fields[0].load_modifier(&registry).unwrap().is_none());
        assert!(fields[1].load_modifier(&registry).unwrap().is_some());

        let missing = FieldInfo::new(2, "x", "x").with_modifier("nope");
        assert!(missing.load_modifier(&registry).unwrap_err().is_not_found());
    }
}
