//! Typed failure taxonomy shared by the AST factory and the generator,
//! plus the non-fatal diagnostics surfaced on the side channel.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::kinds::NodeKind;

/// Ancestor trail to an offending node: the `root` field, then alternating
/// `<kind>` / `children[i]` segments, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(pub Vec<String>);

impl NodePath {
    /// Trail for the document's `root` field.
    pub fn root() -> Self {
        NodePath(vec!["root".to_string()])
    }

    /// Trail for child `index` of a node of `kind` located at `self`.
    pub fn child(&self, kind: NodeKind, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(kind.as_tag().to_string());
        segments.push(format!("children[{index}]"));
        NodePath(segments)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(".");
        }
        f.write_str(&self.0.join("."))
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    /// Raw input violates the node shape contract. Carries the offending
    /// fragment verbatim for programmatic inspection.
    #[error("invalid node structure at `{path}`: {detail}")]
    Structure {
        detail: String,
        fragment: Value,
        path: NodePath,
    },

    #[error("unknown node kind `{kind}` at `{path}`")]
    UnknownKind {
        kind: String,
        fragment: Value,
        path: NodePath,
    },

    #[error("root node must have kind `root`, found `{found}`")]
    RootKind { found: NodeKind },

    #[error("unsupported document: {0}")]
    Unsupported(String),

    #[error("failed to parse input: {0}")]
    Parse(#[from] serde_json::Error),

    /// Registry/mapper drift; unreachable after validation. Always fatal.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

/// Non-fatal findings collected during generation. These never fail a run;
/// the caller decides how to present them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownStructureType { found: Option<String> },
    UnknownPrimitiveKind { found: Option<String> },
    DuplicateRef { requested: String, assigned: String },
    SkippedChildren { kind: NodeKind, count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownStructureType { found: Some(ty) } => {
                write!(f, "unknown structure type `{ty}`, defaulting to modelStructure")
            }
            Diagnostic::UnknownStructureType { found: None } => {
                write!(f, "missing structure type, defaulting to modelStructure")
            }
            Diagnostic::UnknownPrimitiveKind { found: Some(kind) } => {
                write!(f, "unknown primitive kind `{kind}`, defaulting to mesh")
            }
            Diagnostic::UnknownPrimitiveKind { found: None } => {
                write!(f, "missing primitive kind, defaulting to mesh")
            }
            Diagnostic::DuplicateRef { requested, assigned } => {
                write!(f, "duplicate ref `{requested}` assigned variable `{assigned}`")
            }
            Diagnostic::SkippedChildren { kind, count } => {
                write!(f, "`{kind}` does not open a scope; skipped {count} child node(s)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_displays_dotted() {
        let path = NodePath::root()
            .child(NodeKind::Root, 0)
            .child(NodeKind::Download, 0);
        assert_eq!(path.to_string(), "root.root.children[0].download.children[0]");
    }

    #[test]
    fn empty_path_displays_as_top_level() {
        assert_eq!(NodePath::default().to_string(), ".");
    }

    #[test]
    fn errors_format_with_path() {
        let err = CompileError::UnknownKind {
            kind: "nonsense".to_string(),
            fragment: serde_json::json!({ "kind": "nonsense" }),
            path: NodePath::root(),
        };
        assert_eq!(err.to_string(), "unknown node kind `nonsense` at `root`");
    }
}
