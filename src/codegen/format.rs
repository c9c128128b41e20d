//! Deterministic literal-value pretty-printer for node parameters.
//!
//! Renders a node's params (plus `ref` and `custom`) as an object-literal
//! expression in the emitted language. Identical input always yields
//! byte-identical output; there is no state here at all.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::kinds::NodeKind;
use crate::node::TreeNode;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Reserved words of the emitted language; keys matching one are quoted.
const RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "export",
    "extends", "finally", "for", "function", "if", "implements", "import",
    "in", "instanceof", "interface", "let", "new", "package", "private",
    "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Object-literal text for a node's call arguments: `params` first (minus
/// the discriminant key already encoded in the method name), then `ref`,
/// then `custom`. Empty renders as `{}`.
pub fn render_params(node: &TreeNode) -> String {
    let elide = match node.kind {
        NodeKind::Structure => Some("type"),
        NodeKind::Primitive => Some("kind"),
        _ => None,
    };

    let ref_value = node.ref_.as_ref().map(|r| Value::String(r.clone()));
    let custom_value = node.custom.as_ref().map(|custom| {
        Value::Object(custom.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    });

    let mut entries: Vec<(&str, &Value)> = node
        .params
        .iter()
        .filter(|(key, _)| Some(key.as_str()) != elide)
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    if let Some(value) = ref_value.as_ref() {
        entries.push(("ref", value));
    }
    if let Some(value) = custom_value.as_ref() {
        entries.push(("custom", value));
    }

    if entries.is_empty() {
        return "{}".to_string();
    }
    format_entries(&entries, 0)
}

fn format_value(value: &Value, depth: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => format_array(items, depth),
        Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            let entries: Vec<(&str, &Value)> =
                map.iter().map(|(k, v)| (k.as_str(), v)).collect();
            format_entries(&entries, depth)
        }
    }
}

fn format_array(items: &[Value], depth: usize) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }

    let scalar_only = items
        .iter()
        .all(|item| !matches!(item, Value::Array(_) | Value::Object(_)));
    if items.len() <= 3 || scalar_only {
        let rendered: Vec<String> =
            items.iter().map(|item| format_value(item, depth + 1)).collect();
        return format!("[{}]", rendered.join(", "));
    }

    let indent = "  ".repeat(depth + 1);
    let rendered: Vec<String> = items
        .iter()
        .map(|item| format!("{indent}{}", format_value(item, depth + 1)))
        .collect();
    format!("[\n{}\n{}]", rendered.join(",\n"), "  ".repeat(depth))
}

fn format_entries(entries: &[(&str, &Value)], depth: usize) -> String {
    let inline = entries.len() <= 2
        && entries.iter().all(|(_, value)| match value {
            Value::Object(_) => false,
            Value::Array(items) => items.len() <= 3,
            _ => true,
        });
    if inline {
        let rendered: Vec<String> = entries
            .iter()
            .map(|(key, value)| format!("{}: {}", format_key(key), format_value(value, depth + 1)))
            .collect();
        return format!("{{ {} }}", rendered.join(", "));
    }

    let indent = "  ".repeat(depth + 1);
    let rendered: Vec<String> = entries
        .iter()
        .map(|(key, value)| {
            format!("{indent}{}: {}", format_key(key), format_value(value, depth + 1))
        })
        .collect();
    format!("{{\n{}\n{}}}", rendered.join(",\n"), "  ".repeat(depth))
}

fn format_key(key: &str) -> String {
    if IDENTIFIER.is_match(key) && !RESERVED.contains(&key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}
