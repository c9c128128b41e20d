//! Depth-first emission of builder calls from a validated AST.
//!
//! Single pre-order pass. Scope-opening nodes bind fresh variables through
//! the run-scoped [`context::Context`], chain calls go through the current
//! receiver, and parameter literals come from [`format`]. Output is a pure
//! function of `(Ast, GeneratorOptions)`; the only side channel is the list
//! of non-fatal diagnostics returned with the text.

pub mod context;
pub mod format;
pub mod mapping;

use serde_json::Value;

use crate::ast::Ast;
use crate::error::{CompileError, Diagnostic};
use crate::kinds::NodeKind;
use crate::node::TreeNode;

use context::Context;
use mapping::Role;

const BANNER: &str = "// ============================================";

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Wrap the output in start/end banner comments.
    pub include_section_markers: bool,
    /// Identifier of the in-scope receiver the top-level calls are made against.
    pub receiver_name: String,
    /// Emit a descriptive comment before each scope-opening statement.
    pub include_comments: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            include_section_markers: true,
            receiver_name: "builder".to_string(),
            include_comments: false,
        }
    }
}

/// Generated text plus the non-fatal findings collected along the way.
#[derive(Debug)]
pub struct Generated {
    pub code: String,
    pub warnings: Vec<Diagnostic>,
}

pub fn generate(ast: &Ast, options: &GeneratorOptions) -> Result<Generated, CompileError> {
    Generator::new(options.clone()).generate(ast)
}

pub struct Generator {
    options: GeneratorOptions,
    output: Vec<String>,
    warnings: Vec<Diagnostic>,
    context: Context,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Generator {
            options,
            output: Vec::new(),
            warnings: Vec::new(),
            context: Context::new(),
        }
    }

    /// Runs the full pass and consumes the generator; the context never
    /// outlives the run.
    pub fn generate(mut self, ast: &Ast) -> Result<Generated, CompileError> {
        if self.options.include_section_markers {
            self.emit(BANNER);
            self.emit("// Start of generated section");
            self.emit(BANNER);
            self.emit("");
        }

        let receiver = self.options.receiver_name.clone();
        self.generate_node(&ast.root, &receiver)?;

        if self.options.include_section_markers {
            self.emit("");
            self.emit(BANNER);
            self.emit("// End of generated section");
            self.emit(BANNER);
        }

        Ok(Generated {
            code: self.output.join("\n"),
            warnings: self.warnings,
        })
    }

    fn generate_node(&mut self, node: &TreeNode, receiver: &str) -> Result<(), CompileError> {
        // The root is never emitted; its children run against the caller's
        // receiver directly.
        if node.kind == NodeKind::Root {
            if self.options.include_comments && node.has_children() {
                self.emit("// Root-level setup");
            }
            for child in &node.children {
                self.generate_node(child, receiver)?;
            }
            return Ok(());
        }

        let binding = mapping::resolve(node)?;
        if let Some(warning) = binding.warning {
            self.warnings.push(warning);
        }
        let params = format::render_params(node);

        match binding.role {
            Role::Chain => {
                self.emit(&format!("{receiver}.{}({params});", binding.method));
                // Chain calls return the parent receiver; children here have
                // no scope to attach to and are skipped, loudly.
                if node.has_children() {
                    self.warnings.push(Diagnostic::SkippedChildren {
                        kind: node.kind,
                        count: node.children.len(),
                    });
                }
            }
            Role::Terminal => {
                self.emit(&format!("{receiver}.{}({params});", binding.method));
            }
            Role::Scoped => {
                if self.options.include_comments {
                    self.emit(&format!("// {}", describe(node)));
                }
                let var = self.context.next_var(node.kind.as_tag(), node.ref_.as_deref());
                if var.renamed {
                    self.warnings.push(Diagnostic::DuplicateRef {
                        requested: node.ref_.clone().unwrap_or_default(),
                        assigned: var.name.clone(),
                    });
                }
                self.emit(&format!(
                    "const {} = {receiver}.{}({params});",
                    var.name, binding.method
                ));
                if node.has_children() {
                    if self.options.include_comments {
                        self.emit("");
                    }
                    for child in &node.children {
                        self.generate_node(child, &var.name)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn emit(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}

/// One-line description used for scope-opening comments.
fn describe(node: &TreeNode) -> String {
    match node.kind {
        NodeKind::Download => format!("Download: {}", display_param(node, "url")),
        NodeKind::Parse => format!("Parse as {}", display_param(node, "format")),
        NodeKind::Structure => format!("Structure: {}", display_param(node, "type")),
        NodeKind::Component => "Component".to_string(),
        NodeKind::Representation => format!("Representation: {}", display_param(node, "type")),
        NodeKind::Volume => "Volume data".to_string(),
        NodeKind::Primitives => "Primitives group".to_string(),
        other => other.to_string(),
    }
}

fn display_param(node: &TreeNode, key: &str) -> String {
    match node.param(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "?".to_string(),
    }
}
