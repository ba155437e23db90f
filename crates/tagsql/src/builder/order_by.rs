/// ORDER BY clause: raw field list plus direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    fields: String,
    desc: bool,
}

impl OrderBy {
    /// Ascending order on `fields` (e.g. `"name"` or `"last_name, first_name"`).
    ///
    /// The field list is copied verbatim into the SQL.
    pub fn new(fields: impl Into<String>) -> Self {
        Self {
            fields: fields.into(),
            desc: false,
        }
    }

    /// The same ordering, descending.
    pub fn desc(self) -> Self {
        Self { desc: true, ..self }
    }

    pub fn fields(&self) -> &str {
        &self.fields
    }

    pub fn is_desc(&self) -> bool {
        self.desc
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        if self.fields.is_empty() {
            return;
        }
        out.push_str(" ORDER BY ");
        out.push_str(&self.fields);
        if self.desc {
            out.push_str(" DESC");
        }
    }
}

/// Shorthand for [`OrderBy::new`].
pub fn order_by(fields: impl Into<String>) -> OrderBy {
    OrderBy::new(fields)
}
