//! Per-backend placeholder syntax and identifier escaping.
//!
//! A [`Dialect`] renders the `index`-th bound parameter (zero-based) and escapes
//! column names. The built-in dialects are reachable through [`Driver`], which
//! can be parsed from a driver name or deserialized from application config.
//!
//! ```ignore
//! use tagsql::Driver;
//!
//! let dialect = "postgres".parse::<Driver>()?.dialect();
//! assert_eq!(dialect.placeholder(0), "$1");
//! assert_eq!(dialect.escape("name"), "\"name\"");
//! ```

use crate::error::{OrmError, OrmResult};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Placeholder and escaping policy of a database backend.
///
/// Implementations must be deterministic: the select-list cache keys on
/// [`Dialect::name`] and assumes equal names escape identically.
pub trait Dialect: Send + Sync {
    /// Stable identifier of the dialect (e.g. the driver name).
    fn name(&self) -> &'static str;

    /// Placeholder for the zero-based parameter `index`.
    fn placeholder(&self, index: usize) -> String;

    /// Escape a column or table identifier.
    fn escape(&self, ident: &str) -> String;
}

/// PostgreSQL: `$1, $2, ...` and `"ident"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index + 1)
    }

    fn escape(&self, ident: &str) -> String {
        quote_with(ident, '"', '"')
    }
}

/// SQLite: `?` and `` `ident` ``.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite3"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn escape(&self, ident: &str) -> String {
        quote_with(ident, '`', '`')
    }
}

/// MySQL: `?` and `` `ident` ``.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn escape(&self, ident: &str) -> String {
        quote_with(ident, '`', '`')
    }
}

/// SQL Server: `@p1, @p2, ...` and `[ident]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServer;

impl Dialect for SqlServer {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("@p{}", index + 1)
    }

    fn escape(&self, ident: &str) -> String {
        quote_with(ident, '[', ']')
    }
}

// Doubles any closing quote inside the identifier.
fn quote_with(ident: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(ident.len() + 2);
    out.push(open);
    for ch in ident.chars() {
        if ch == close {
            out.push(close);
        }
        out.push(ch);
    }
    out.push(close);
    out
}

/// Built-in database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Postgres,
    #[serde(alias = "sqlite")]
    Sqlite3,
    Mysql,
    Sqlserver,
}

impl Driver {
    /// Driver name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Driver::Postgres => "postgres",
            Driver::Sqlite3 => "sqlite3",
            Driver::Mysql => "mysql",
            Driver::Sqlserver => "sqlserver",
        }
    }

    /// The dialect used by this driver.
    pub fn dialect(self) -> Arc<dyn Dialect> {
        match self {
            Driver::Postgres => Arc::new(Postgres),
            Driver::Sqlite3 => Arc::new(Sqlite),
            Driver::Mysql => Arc::new(MySql),
            Driver::Sqlserver => Arc::new(SqlServer),
        }
    }
}

impl FromStr for Driver {
    type Err = OrmError;

    fn from_str(s: &str) -> OrmResult<Self> {
        match s {
            "postgres" | "pgx" => Ok(Driver::Postgres),
            "sqlite3" | "sqlite" => Ok(Driver::Sqlite3),
            "mysql" => Ok(Driver::Mysql),
            "sqlserver" => Ok(Driver::Sqlserver),
            other => Err(OrmError::UnsupportedDriver(other.to_string())),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgres_placeholders_are_one_based() {
        assert_eq!(Postgres.placeholder(0), "$1");
        assert_eq!(Postgres.placeholder(9), "$10");
    }

    #[test]
    fn sqlserver_placeholders() {
        assert_eq!(SqlServer.placeholder(1), "@p2");
        assert_eq!(SqlServer.escape("order"), "[order]");
    }

    #[test]
    fn escape_doubles_embedded_quotes() {
        assert_eq!(Postgres.escape(r#"we"ird"#), r#""we""ird""#);
        assert_eq!(Sqlite.escape("a`b"), "`a``b`");
        assert_eq!(SqlServer.escape("a]b"), "[a]]b]");
    }

    #[test]
    fn driver_from_str() {
        assert_eq!("postgres".parse::<Driver>().unwrap(), Driver::Postgres);
        assert_eq!("sqlite".parse::<Driver>().unwrap(), Driver::Sqlite3);
        let err = "oracle".parse::<Driver>().unwrap_err();
        assert!(matches!(err, OrmError::UnsupportedDriver(ref d) if d == "oracle"));
    }

    #[test]
    fn driver_dialect_names_match() {
        for driver in [
            Driver::Postgres,
            Driver::Sqlite3,
            Driver::Mysql,
            Driver::Sqlserver,
        ] {
            assert_eq!(driver.dialect().name(), driver.as_str());
        }
    }

    #[test]
    fn driver_deserializes_lowercase() {
        let d: Driver = serde_json::from_str("\"mysql\"").unwrap();
        assert_eq!(d, Driver::Mysql);
        let d: Driver = serde_json::from_str("\"sqlite\"").unwrap();
        assert_eq!(d, Driver::Sqlite3);
    }
}
