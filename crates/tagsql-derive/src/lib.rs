//! Derive macros for tagsql
//!
//! Provides `#[derive(Columns)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod columns;

/// Derive `HasColumnMapping` for a struct.
///
/// # Example
///
/// ```ignore
/// use tagsql::Columns;
///
/// #[derive(Columns)]
/// #[orm(rename_all = "camelCase")]
/// struct User {
///     id: i64,
///     #[orm(column = "user_name")]
///     name: String,
///     #[orm(modifier = "json")]
///     settings: serde_json::Value,
///     #[orm(skip)]
///     cached_score: f64,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(rename_all = "...")]` - Column naming for fields without `column`:
///   `snake_case`, `camelCase`, `PascalCase`, `SCREAMING_SNAKE_CASE`,
///   `kebab-case`, `lowercase`
/// - `#[orm(column = "name")]` - Map field to a different column name
/// - `#[orm(modifier = "key")]` - Attribute modifier applied to the field
/// - `#[orm(skip)]` - Leave the field out of the mapping
#[proc_macro_derive(Columns, attributes(orm))]
pub fn derive_columns(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    columns::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
