//! Theme fragments, the deep-merge that combines them, and the style-variable
//! rendering of the result.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{error::DomainError, value_objects::FragmentCategory};

/// A named partial theme document (`colors`, `fonts`, `geometry` subtrees).
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeFragment {
    pub category: FragmentCategory,
    pub name: Option<String>,
    document: Map<String, Value>,
}

impl ThemeFragment {
    /// Wrap a loaded document. Fails unless the document is an object.
    pub fn new(
        category: FragmentCategory,
        name: impl Into<String>,
        document: Value,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        match document {
            Value::Object(document) => Ok(Self {
                category,
                name: Some(name),
                document,
            }),
            _ => Err(DomainError::MalformedFragment {
                category: category.to_string(),
                name,
            }),
        }
    }

    /// Stand-in for a preset the draft did not name.
    pub fn empty(category: FragmentCategory) -> Self {
        Self {
            category,
            name: None,
            document: Map::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }
}

/// Merge `overlay` into `target`.
///
/// Objects merge key by key, arrays and scalars replace the earlier value,
/// and a `null` in the overlay leaves the earlier value untouched so a later
/// source can never delete a key.
pub fn deep_merge(target: &mut Value, overlay: &Value) {
    match (target, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(over)) => {
            for (key, value) in over {
                match base.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None if value.is_null() => {}
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}

/// A merged theme that passed schema validation.
///
/// Only constructed by the assembler after validation succeeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AssembledTheme(Value);

impl AssembledTheme {
    pub(crate) fn validated(document: Value) -> Self {
        Self(document)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    /// Render a `:root { ... }` block with one CSS custom property per leaf.
    ///
    /// Keys are emitted in sorted order and camelCase segments become
    /// kebab-case, so the output is byte-stable for a given theme.
    pub fn render_style_block(&self) -> String {
        let mut vars = Vec::new();
        collect_vars(&self.0, &mut Vec::new(), &mut vars);
        vars.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = String::from(":root {\n");
        for (name, value) in vars {
            out.push_str(&format!("  --{name}: {value};\n"));
        }
        out.push_str("}\n");
        out
    }
}

fn collect_vars(value: &Value, path: &mut Vec<String>, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                path.push(kebab_case(key));
                collect_vars(child, path, out);
                path.pop();
            }
        }
        Value::Null => {}
        _ if path.is_empty() => {}
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(css_scalar)
                .collect::<Vec<_>>()
                .join(", ");
            out.push((path.join("-"), joined));
        }
        scalar => out.push((path.join("-"), css_scalar(scalar))),
    }
}

fn css_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '_' || c == ' ' {
            out.push('-');
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_overwrite_and_objects_merge() {
        let mut base = json!({ "colors": { "primary": "#000", "background": "#fff" } });
        deep_merge(&mut base, &json!({ "colors": { "primary": "#f06" } }));
        assert_eq!(
            base,
            json!({ "colors": { "primary": "#f06", "background": "#fff" } })
        );
    }

    #[test]
    fn arrays_are_replaced_wholesale() {
        let mut base = json!({ "fonts": { "stack": ["Inter", "sans-serif"] } });
        deep_merge(&mut base, &json!({ "fonts": { "stack": ["Lora"] } }));
        assert_eq!(base, json!({ "fonts": { "stack": ["Lora"] } }));
    }

    #[test]
    fn null_never_deletes() {
        let mut base = json!({ "geometry": { "radius": "4px" } });
        deep_merge(&mut base, &json!({ "geometry": { "radius": null }, "extra": null }));
        assert_eq!(base, json!({ "geometry": { "radius": "4px" } }));
    }

    #[test]
    fn object_replaces_scalar() {
        let mut base = json!({ "geometry": "square" });
        deep_merge(&mut base, &json!({ "geometry": { "radius": "0" } }));
        assert_eq!(base, json!({ "geometry": { "radius": "0" } }));
    }

    #[test]
    fn fragment_must_be_object() {
        assert!(ThemeFragment::new(FragmentCategory::Colors, "dark", json!([1, 2])).is_err());
        let ok = ThemeFragment::new(FragmentCategory::Colors, "dark", json!({})).unwrap();
        assert!(ok.is_empty());
        assert_eq!(ok.name.as_deref(), Some("dark"));
    }

    #[test]
    fn style_block_is_sorted_and_kebab_cased() {
        let theme = AssembledTheme::validated(json!({
            "fonts": { "body": ["Inter", "sans-serif"] },
            "colors": { "primaryForeground": "#fff", "background": "#000" },
            "geometry": { "radius": "8px", "borderWidth": 1 }
        }));
        let css = theme.render_style_block();
        assert_eq!(
            css,
            ":root {\n\
             \x20 --colors-background: #000;\n\
             \x20 --colors-primary-foreground: #fff;\n\
             \x20 --fonts-body: Inter, sans-serif;\n\
             \x20 --geometry-border-width: 1;\n\
             \x20 --geometry-radius: 8px;\n\
             }\n"
        );
    }

    #[test]
    fn style_block_is_deterministic() {
        let theme = AssembledTheme::validated(json!({ "b": { "y": 1, "x": 2 }, "a": "z" }));
        assert_eq!(theme.render_style_block(), theme.clone().render_style_block());
    }
}
