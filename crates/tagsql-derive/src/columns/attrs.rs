//! Attribute parsing for the Columns derive macro.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use syn::{Attribute, Error, LitStr, Result};

/// Struct-level column naming rule.
#[derive(Debug, Clone, Copy, Default)]
pub(super) enum RenameAll {
    /// Field name as written.
    #[default]
    Verbatim,
    Snake,
    LowerCamel,
    UpperCamel,
    ShoutySnake,
    Kebab,
    Lower,
}

impl RenameAll {
    fn parse(lit: &LitStr) -> Result<Self> {
        Ok(match lit.value().as_str() {
            "snake_case" => Self::Snake,
            "camelCase" => Self::LowerCamel,
            "PascalCase" => Self::UpperCamel,
            "SCREAMING_SNAKE_CASE" => Self::ShoutySnake,
            "kebab-case" => Self::Kebab,
            "lowercase" => Self::Lower,
            other => {
                return Err(Error::new(
                    lit.span(),
                    format!("unknown rename_all rule '{other}'"),
                ));
            }
        })
    }

    pub(super) fn apply(self, field: &str) -> String {
        match self {
            Self::Verbatim => field.to_string(),
            Self::Snake => field.to_snake_case(),
            Self::LowerCamel => field.to_lower_camel_case(),
            Self::UpperCamel => field.to_upper_camel_case(),
            Self::ShoutySnake => field.to_shouty_snake_case(),
            Self::Kebab => field.to_kebab_case(),
            Self::Lower => field.to_lowercase(),
        }
    }
}

/// Parse `#[orm(rename_all = "...")]` from the struct attributes.
pub(super) fn get_rename_all(attrs: &[Attribute]) -> Result<RenameAll> {
    let mut rule = RenameAll::default();
    for attr in attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                rule = RenameAll::parse(&meta.value()?.parse()?)?;
                Ok(())
            } else {
                Err(meta.error("unsupported struct attribute, expected `rename_all`"))
            }
        })?;
    }
    Ok(rule)
}

/// Parsed field-level `#[orm(...)]` attributes.
#[derive(Default)]
pub(super) struct FieldAttr {
    pub column: Option<LitStr>,
    pub modifier: Option<LitStr>,
    pub skip: bool,
}

pub(super) fn get_field_attr(attrs: &[Attribute]) -> Result<FieldAttr> {
    let mut out = FieldAttr::default();
    for attr in attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("column") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().trim().is_empty() {
                    return Err(Error::new(lit.span(), "column must not be empty"));
                }
                out.column = Some(lit);
            } else if meta.path.is_ident("modifier") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(Error::new(lit.span(), "modifier key must not be empty"));
                }
                out.modifier = Some(lit);
            } else if meta.path.is_ident("skip") {
                out.skip = true;
            } else {
                return Err(meta.error(
                    "unsupported field attribute, expected `column`, `modifier` or `skip`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(out)
}
