//! Builds the typed AST from untrusted nested data.
//!
//! Validation is structural only: node shapes and the closed kind registry.
//! Parameter values pass through verbatim. Construction is all-or-nothing;
//! every failure carries the full ancestor path to the offending fragment.

use serde_json::{Map, Value};

use crate::error::{CompileError, NodePath};
use crate::kinds::NodeKind;
use crate::node::{Params, TreeNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// ISO-8601; regenerated when the input carries none.
    pub timestamp: String,
}

/// Validated tree plus document metadata. The root's own params/ref/custom
/// are ignored by the generator; only its children are walked.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub root: TreeNode,
    pub metadata: Metadata,
}

/// Parse `text` and delegate to [`from_value`]. Syntax errors surface as
/// [`CompileError::Parse`], never as a raw parser panic.
pub fn from_json(text: &str) -> Result<Ast, CompileError> {
    let data: Value = serde_json::from_str(text)?;
    from_value(&data)
}

/// Validate and convert a raw document into an [`Ast`]. Pure: no I/O, no
/// state retained between calls.
pub fn from_value(data: &Value) -> Result<Ast, CompileError> {
    let Some(doc) = data.as_object() else {
        return Err(structure("input must be an object", data, NodePath::default()));
    };

    if doc.get("kind").and_then(Value::as_str) == Some("multiple") {
        return Err(CompileError::Unsupported(
            "multi-state documents are not supported".to_string(),
        ));
    }

    let raw_root = match doc.get("root") {
        None | Some(Value::Null) => {
            return Err(structure("missing root node", data, NodePath::default()));
        }
        Some(value) => value,
    };

    let root = convert_node(raw_root, NodePath::root())?;
    if !root.is(NodeKind::Root) {
        return Err(CompileError::RootKind { found: root.kind });
    }

    Ok(Ast { root, metadata: extract_metadata(doc.get("metadata")) })
}

fn extract_metadata(metadata: Option<&Value>) -> Metadata {
    let timestamp = metadata
        .and_then(Value::as_object)
        .and_then(|meta| meta.get("timestamp"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
    Metadata { timestamp }
}

fn convert_node(raw: &Value, path: NodePath) -> Result<TreeNode, CompileError> {
    let Some(fields) = raw.as_object() else {
        return Err(structure("node must be an object", raw, path));
    };

    let kind_tag = match fields.get("kind") {
        Some(Value::String(tag)) => tag.as_str(),
        _ => return Err(structure("node kind must be a string", raw, path)),
    };
    let Some(kind) = NodeKind::from_tag(kind_tag) else {
        return Err(CompileError::UnknownKind {
            kind: kind_tag.to_string(),
            fragment: raw.clone(),
            path,
        });
    };

    let params = object_field(fields, "params", raw, &path)?.unwrap_or_default();
    let custom = object_field(fields, "custom", raw, &path)?;

    let ref_ = match fields.get("ref") {
        None => None,
        Some(Value::String(r)) if !r.is_empty() => Some(r.clone()),
        Some(Value::String(_)) => {
            return Err(structure("`ref` must not be empty", raw, path));
        }
        Some(_) => return Err(structure("`ref` must be a string", raw, path)),
    };

    let raw_children = match fields.get("children") {
        None => &[] as &[Value],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => return Err(structure("`children` must be an array", raw, path)),
    };
    let mut children = Vec::with_capacity(raw_children.len());
    for (index, child) in raw_children.iter().enumerate() {
        children.push(convert_node(child, path.child(kind, index))?);
    }

    Ok(TreeNode::new(kind, params, children, ref_, custom))
}

/// `params`/`custom` must be object-shaped when present; never an array,
/// primitive or null.
fn object_field(
    fields: &Map<String, Value>,
    key: &str,
    raw: &Value,
    path: &NodePath,
) -> Result<Option<Params>, CompileError> {
    match fields.get(key) {
        None => Ok(None),
        Some(Value::Object(entries)) => Ok(Some(
            entries.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        )),
        Some(_) => Err(structure(&format!("`{key}` must be an object"), raw, path.clone())),
    }
}

fn structure(detail: &str, fragment: &Value, path: NodePath) -> CompileError {
    CompileError::Structure {
        detail: detail.to_string(),
        fragment: fragment.clone(),
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_minimal_document() {
        let ast = from_value(&json!({
            "root": { "kind": "root", "params": {}, "children": [] },
            "metadata": { "timestamp": "2024-01-01T00:00:00Z" }
        }))
        .unwrap();

        assert!(ast.root.is(NodeKind::Root));
        assert!(!ast.root.has_children());
        assert_eq!(ast.metadata.timestamp, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn params_and_children_default_when_absent() {
        let ast = from_value(&json!({
            "root": { "kind": "root", "children": [{ "kind": "download" }] }
        }))
        .unwrap();

        let download = &ast.root.children[0];
        assert!(download.params.is_empty());
        assert!(!download.has_children());
    }

    #[test]
    fn regenerates_missing_metadata() {
        let ast = from_value(&json!({ "root": { "kind": "root", "children": [] } })).unwrap();
        // chrono's RFC 3339 form always carries a date/time separator
        assert!(ast.metadata.timestamp.contains('T'));

        let malformed = from_value(&json!({
            "root": { "kind": "root", "children": [] },
            "metadata": { "timestamp": 12345 }
        }))
        .unwrap();
        assert!(malformed.metadata.timestamp.contains('T'));
    }

    #[test]
    fn preserves_ref_and_custom() {
        let ast = from_value(&json!({
            "root": {
                "kind": "root",
                "children": [{
                    "kind": "download",
                    "params": { "url": "a.cif" },
                    "ref": "main",
                    "custom": { "source": "pdb" }
                }]
            }
        }))
        .unwrap();

        let download = &ast.root.children[0];
        assert_eq!(download.ref_.as_deref(), Some("main"));
        assert_eq!(
            download.custom.as_ref().and_then(|c| c.get("source")),
            Some(&json!("pdb"))
        );
    }

    #[test]
    fn rejects_non_object_input() {
        for bad in [json!(null), json!(42), json!("root"), json!([])] {
            assert!(matches!(
                from_value(&bad),
                Err(CompileError::Structure { .. })
            ));
        }
    }

    #[test]
    fn rejects_multi_state_documents() {
        let err = from_value(&json!({ "kind": "multiple", "states": [] })).unwrap_err();
        assert!(matches!(err, CompileError::Unsupported(_)));
    }

    #[test]
    fn rejects_missing_or_null_root() {
        assert!(matches!(
            from_value(&json!({ "metadata": {} })),
            Err(CompileError::Structure { .. })
        ));
        assert!(matches!(
            from_value(&json!({ "root": null })),
            Err(CompileError::Structure { .. })
        ));
    }

    #[test]
    fn rejects_wrong_root_kind() {
        let err = from_value(&json!({
            "root": { "kind": "download", "params": {}, "children": [] }
        }))
        .unwrap_err();
        assert!(matches!(err, CompileError::RootKind { found: NodeKind::Download }));
    }

    #[test]
    fn rejects_unknown_kind_with_path() {
        let err = from_value(&json!({
            "root": {
                "kind": "root",
                "children": [{ "kind": "teleport", "children": [] }]
            }
        }))
        .unwrap_err();

        match err {
            CompileError::UnknownKind { kind, path, .. } => {
                assert_eq!(kind, "teleport");
                assert_eq!(path.to_string(), "root.root.children[0]");
            }
            other => panic!("expected UnknownKind, got {other}"),
        }
    }

    #[test]
    fn deep_failure_carries_every_ancestor_kind() {
        let err = from_value(&json!({
            "root": {
                "kind": "root",
                "children": [{
                    "kind": "download",
                    "params": { "url": "a.cif" },
                    "children": [{
                        "kind": "parse",
                        "params": { "format": "mmcif" },
                        "children": [{ "kind": 42 }]
                    }]
                }]
            }
        }))
        .unwrap_err();

        match err {
            CompileError::Structure { detail, path, .. } => {
                assert_eq!(detail, "node kind must be a string");
                let download = path.0.iter().position(|s| s == "download").unwrap();
                let parse = path.0.iter().position(|s| s == "parse").unwrap();
                assert!(download < parse);
                assert!(path.len() > 2);
            }
            other => panic!("expected Structure, got {other}"),
        }
    }

    #[test]
    fn rejects_malformed_shapes() {
        let children_not_array = from_value(&json!({
            "root": { "kind": "root", "children": { "kind": "download" } }
        }))
        .unwrap_err();
        assert!(matches!(children_not_array, CompileError::Structure { .. }));

        let params_not_object = from_value(&json!({
            "root": { "kind": "root", "children": [
                { "kind": "download", "params": [1, 2, 3] }
            ]}
        }))
        .unwrap_err();
        assert!(matches!(params_not_object, CompileError::Structure { .. }));

        let null_custom = from_value(&json!({
            "root": { "kind": "root", "children": [
                { "kind": "download", "custom": null }
            ]}
        }))
        .unwrap_err();
        assert!(matches!(null_custom, CompileError::Structure { .. }));

        let numeric_ref = from_value(&json!({
            "root": { "kind": "root", "children": [
                { "kind": "download", "ref": 7 }
            ]}
        }))
        .unwrap_err();
        assert!(matches!(numeric_ref, CompileError::Structure { .. }));

        let empty_ref = from_value(&json!({
            "root": { "kind": "root", "children": [
                { "kind": "download", "ref": "" }
            ]}
        }))
        .unwrap_err();
        assert!(matches!(empty_ref, CompileError::Structure { .. }));
    }

    #[test]
    fn from_json_wraps_syntax_errors() {
        assert!(matches!(from_json("{ not json"), Err(CompileError::Parse(_))));
        assert!(matches!(from_json(""), Err(CompileError::Parse(_))));

        let ast = from_json(r#"{ "root": { "kind": "root", "children": [] } }"#).unwrap();
        assert!(ast.root.is(NodeKind::Root));
    }

    #[test]
    fn plain_data_round_trips() {
        let source = json!({
            "root": {
                "kind": "root",
                "params": {},
                "children": [{
                    "kind": "download",
                    "params": { "url": "a.cif" },
                    "ref": "main",
                    "children": [{
                        "kind": "parse",
                        "params": { "format": "mmcif" },
                        "custom": { "note": "kept" },
                        "children": []
                    }]
                }]
            }
        });

        let first = from_value(&source).unwrap();
        let rebuilt = from_value(&json!({ "root": first.root.to_plain_data() })).unwrap();
        assert_eq!(first.root, rebuilt.root);
    }
}
