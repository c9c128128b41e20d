//! Immutable scene-tree node and its query surface.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::kinds::NodeKind;

/// Insertion-ordered parameter map. Order is preserved end to end so that
/// generation stays byte-deterministic.
pub type Params = IndexMap<String, Value>;

/// One node of a scene tree. Built once by the factory and never mutated;
/// edits produce new trees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub kind: NodeKind,
    pub params: Params,
    pub children: Vec<TreeNode>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<Params>,
}

impl TreeNode {
    pub fn new(
        kind: NodeKind,
        params: Params,
        children: Vec<TreeNode>,
        ref_: Option<String>,
        custom: Option<Params>,
    ) -> Self {
        TreeNode { kind, params, children, ref_, custom }
    }

    /// Children of the given kind, document order preserved.
    pub fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &TreeNode> {
        self.children.iter().filter(move |child| child.kind == kind)
    }

    pub fn first_child(&self, kind: NodeKind) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.kind == kind)
    }

    /// The stored value verbatim, including falsy values like `0`, `false`
    /// and `""`. `None` only when the key is absent.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn param_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.param(key).unwrap_or(default)
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.param(key).and_then(Value::as_str)
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind == kind
    }

    pub fn is_one_of(&self, kinds: &[NodeKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Lossless plain-data form. `ref` and `custom` are omitted entirely when
    /// absent; `params` and `children` are always present.
    pub fn to_plain_data(&self) -> Value {
        serde_json::to_value(self).expect("tree nodes are valid JSON")
    }

    /// Multi-line diagnostic dump: kind, inline params when non-empty, a
    /// `[ref=...]` suffix when set, two-space indent per depth.
    pub fn to_display_string(&self, indent: usize) -> String {
        let spaces = "  ".repeat(indent);
        let params = if self.params.is_empty() {
            String::new()
        } else {
            format!(" {}", serde_json::to_string(&self.params).expect("params are valid JSON"))
        };
        let ref_suffix = match &self.ref_ {
            Some(r) => format!(" [ref={r}]"),
            None => String::new(),
        };

        let mut out = format!("{spaces}{}{params}{ref_suffix}\n", self.kind);
        for child in &self.children {
            out.push_str(&child.to_display_string(indent + 1));
        }
        out
    }
}
