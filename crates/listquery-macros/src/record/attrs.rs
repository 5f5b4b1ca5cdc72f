//! Attribute parsing for the Record derive macro.
//!
//! Field names come from `#[query(...)]` first and `#[serde(...)]` second, so
//! a type already shaped for JSON resolves filter paths by the same names
//! clients see.

use proc_macro2::Span;
use syn::{meta::ParseNestedMeta, spanned::Spanned, Attribute, Error, LitStr, Result, Token};

/// A `rename_all` case convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    /// Parses a serde-style rule name.
    pub fn from_str(s: &str, span: Span) -> Result<Self> {
        match s {
            "lowercase" => Ok(RenameRule::Lower),
            "UPPERCASE" => Ok(RenameRule::Upper),
            "PascalCase" => Ok(RenameRule::Pascal),
            "camelCase" => Ok(RenameRule::Camel),
            "snake_case" => Ok(RenameRule::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(RenameRule::ScreamingSnake),
            "kebab-case" => Ok(RenameRule::Kebab),
            "SCREAMING-KEBAB-CASE" => Ok(RenameRule::ScreamingKebab),
            other => Err(Error::new(
                span,
                format!(
                    "unknown rename rule: '{}'. Expected one of: lowercase, UPPERCASE, PascalCase, camelCase, snake_case, SCREAMING_SNAKE_CASE, kebab-case, SCREAMING-KEBAB-CASE",
                    other
                ),
            )),
        }
    }

    /// Applies the rule to a snake_case field identifier.
    pub fn apply(self, field: &str) -> String {
        match self {
            RenameRule::Lower | RenameRule::Snake => field.to_string(),
            RenameRule::Upper | RenameRule::ScreamingSnake => field.to_ascii_uppercase(),
            RenameRule::Kebab => field.replace('_', "-"),
            RenameRule::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
            RenameRule::Pascal => {
                let mut out = String::with_capacity(field.len());
                let mut capitalize = true;
                for c in field.chars() {
                    if c == '_' {
                        capitalize = true;
                    } else if capitalize {
                        out.push(c.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        out.push(c);
                    }
                }
                out
            }
            RenameRule::Camel => {
                let pascal = RenameRule::Pascal.apply(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => pascal,
                }
            }
        }
    }
}

/// Container-level attributes.
#[derive(Debug, Clone, Default)]
pub struct ContainerAttr {
    /// Rule applied to fields without an explicit rename.
    pub rename_all: Option<RenameRule>,
}

/// Field-level attributes.
#[derive(Debug, Clone)]
pub struct FieldAttr {
    /// Leave this field out of the field table.
    pub skip: bool,
    /// External name matched before the identifier.
    pub rename: Option<String>,
    /// Search this field's own fields from the parent.
    pub flatten: bool,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for FieldAttr {
    fn default() -> Self {
        FieldAttr {
            skip: false,
            rename: None,
            flatten: false,
            span: Span::call_site(),
        }
    }
}

/// Reads `rename_all` from `#[query(...)]` and `#[serde(...)]` on the type.
///
/// `#[query]` wins when both are present.
pub fn parse_container_attrs(attrs: &[Attribute]) -> Result<ContainerAttr> {
    let mut query_rule = None;
    let mut serde_rule = None;

    for attr in attrs {
        if attr.path().is_ident("query") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    let lit: LitStr = meta.value()?.parse()?;
                    query_rule = Some(RenameRule::from_str(&lit.value(), lit.span())?);
                    Ok(())
                } else {
                    Err(meta.error("unknown query attribute. Expected: rename_all = \"...\""))
                }
            })?;
        } else if attr.path().is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    if let Some(name) = serialize_name(&meta)? {
                        serde_rule = Some(RenameRule::from_str(&name.value(), name.span())?);
                    }
                    Ok(())
                } else {
                    skip_meta(meta)
                }
            })?;
        }
    }

    Ok(ContainerAttr {
        rename_all: query_rule.or(serde_rule),
    })
}

/// Reads field attributes from `#[query(...)]` and `#[serde(...)]`.
///
/// `#[query(rename)]` takes precedence over `#[serde(rename)]`; `flatten`
/// from either source counts. Unrelated serde options are ignored.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    let mut field = FieldAttr::default();
    let mut serde_rename = None;

    for attr in attrs {
        if attr.path().is_ident("query") {
            field.span = attr.span();
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    field.skip = true;
                    Ok(())
                } else if meta.path.is_ident("flatten") {
                    field.flatten = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    field.rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error(
                        "unknown query attribute. Expected: skip, flatten, or rename = \"...\"",
                    ))
                }
            })?;
        } else if attr.path().is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(name) = serialize_name(&meta)? {
                        serde_rename = Some(name.value());
                    }
                    Ok(())
                } else if meta.path.is_ident("flatten") {
                    field.flatten = true;
                    Ok(())
                } else {
                    skip_meta(meta)
                }
            })?;
        }
    }

    if field.rename.is_none() {
        field.rename = serde_rename;
    }
    if field.skip && field.flatten {
        return Err(Error::new(field.span, "a field cannot be both skipped and flattened"));
    }
    Ok(field)
}

/// The serialize-side name of `rename = "..."` or
/// `rename(serialize = "...", deserialize = "...")`.
fn serialize_name(meta: &ParseNestedMeta) -> Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }

    let mut name = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            name = Some(inner.value()?.parse()?);
            Ok(())
        } else {
            skip_meta(inner)
        }
    })?;
    Ok(name)
}

/// Consumes a meta item this macro has no interest in.
fn skip_meta(meta: ParseNestedMeta) -> Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(skip_meta)?;
    }
    Ok(())
}
