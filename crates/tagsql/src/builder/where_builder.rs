//! WHERE clause conditions.
//!
//! Conditions are immutable values: every `where_*` call returns a new list and
//! leaves the receiver untouched, so a partial chain can be shared and forked.
//!
//! Templates mark each bound value with `%s`. `%%` renders a literal `%`; any
//! other `%` sequence is copied as-is.
//!
//! ```ignore
//! use tagsql::{params, where_, where_if};
//!
//! let base = where_("tenant_id = %s", params![tenant]);
//! let conds = base
//!     .where_if("status = %s", status)        // skipped when `status` is None
//!     .where_("created_at > %s", params![since]);
//! ```

use crate::dialect::Dialect;
use crate::error::{OrmError, OrmResult};
use crate::value::Value;

enum Piece<'a> {
    Lit(&'a str),
    Slot,
}

fn for_each_piece<'a>(template: &'a str, mut f: impl FnMut(Piece<'a>)) {
    let mut rest = template;
    while let Some(pos) = rest.find('%') {
        f(Piece::Lit(&rest[..pos]));
        let after = &rest[pos + 1..];
        if let Some(tail) = after.strip_prefix('s') {
            f(Piece::Slot);
            rest = tail;
        } else if let Some(tail) = after.strip_prefix('%') {
            f(Piece::Lit("%"));
            rest = tail;
        } else {
            f(Piece::Lit("%"));
            rest = after;
        }
    }
    f(Piece::Lit(rest));
}

/// One WHERE fragment and its positional params.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    template: String,
    params: Vec<Value>,
}

impl Condition {
    pub fn new(template: impl Into<String>, params: impl IntoIterator<Item = Value>) -> Self {
        Self {
            template: template.into(),
            params: params.into_iter().collect(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Number of `%s` slots in the template.
    pub fn slot_count(&self) -> usize {
        let mut n = 0;
        for_each_piece(&self.template, |p| {
            if let Piece::Slot = p {
                n += 1;
            }
        });
        n
    }

    /// Render into `out`, numbering placeholders from `params.len()` and
    /// appending this condition's params to `params`.
    fn render_into(
        &self,
        dialect: &dyn Dialect,
        out: &mut String,
        params: &mut Vec<Value>,
    ) -> OrmResult<()> {
        let expected = self.slot_count();
        if expected != self.params.len() {
            return Err(OrmError::ParamCountMismatch {
                condition: self.template.clone(),
                expected,
                got: self.params.len(),
            });
        }

        let mut index = params.len();
        for_each_piece(&self.template, |p| match p {
            Piece::Lit(s) => out.push_str(s),
            Piece::Slot => {
                out.push_str(&dialect.placeholder(index));
                index += 1;
            }
        });
        params.extend(self.params.iter().cloned());
        Ok(())
    }
}

/// An ordered list of conditions joined with `AND`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions(Vec<Condition>);

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this list with one more condition.
    pub fn where_(
        &self,
        template: impl Into<String>,
        params: impl IntoIterator<Item = Value>,
    ) -> Self {
        let mut next = self.clone();
        next.0.push(Condition::new(template, params));
        next
    }

    /// Like [`where_`](Self::where_) with a single param, skipped when `param`
    /// is `None`.
    pub fn where_if<T: Into<Value>>(&self, template: impl Into<String>, param: Option<T>) -> Self {
        match param {
            Some(v) => self.where_(template, [v.into()]),
            None => self.clone(),
        }
    }

    /// Return a copy of this list followed by every condition of `other`.
    pub fn and(&self, other: &Conditions) -> Self {
        let mut next = self.clone();
        next.0.extend(other.0.iter().cloned());
        next
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Condition> {
        self.0.iter()
    }

    /// Total number of bound params across all conditions.
    pub fn param_count(&self) -> usize {
        self.0.iter().map(|c| c.params.len()).sum()
    }

    /// Render the clause body (without `WHERE`), numbering placeholders
    /// contiguously across conditions starting at `params.len()`.
    pub(crate) fn render_into(
        &self,
        dialect: &dyn Dialect,
        out: &mut String,
        params: &mut Vec<Value>,
    ) -> OrmResult<()> {
        for (i, cond) in self.0.iter().enumerate() {
            if i > 0 {
                out.push_str(" AND ");
            }
            cond.render_into(dialect, out, params)?;
        }
        Ok(())
    }

    /// Render the clause body and its params with a fresh placeholder count.
    pub fn render(&self, dialect: &dyn Dialect) -> OrmResult<(String, Vec<Value>)> {
        let mut out = String::new();
        let mut params = Vec::with_capacity(self.param_count());
        self.render_into(dialect, &mut out, &mut params)?;
        Ok((out, params))
    }
}

impl<'a> IntoIterator for &'a Conditions {
    type Item = &'a Condition;
    type IntoIter = std::slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Condition> for Conditions {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Start a condition list.
pub fn where_(template: impl Into<String>, params: impl IntoIterator<Item = Value>) -> Conditions {
    Conditions::new().where_(template, params)
}

/// Start a condition list, empty when `param` is `None`.
pub fn where_if<T: Into<Value>>(template: impl Into<String>, param: Option<T>) -> Conditions {
    Conditions::new().where_if(template, param)
}
