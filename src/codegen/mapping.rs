//! Per-kind method resolution and scope/chain roles.
//!
//! Two lookup axes: the builder method a kind maps to (with discriminant
//! dispatch for `structure` and `primitive`), and the structural role that
//! decides whether the emitted call binds a new receiver.

use crate::error::{CompileError, Diagnostic};
use crate::kinds::NodeKind;
use crate::node::TreeNode;

/// How an emitted call relates to its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Mutates or annotates the receiver; binds nothing, children are not visited.
    Chain,
    /// Binds a new variable that becomes the receiver for the node's children.
    Scoped,
    /// Bare call with no special child handling.
    Terminal,
}

/// Resolution result for one node.
#[derive(Debug)]
pub struct Binding {
    pub method: &'static str,
    pub role: Role,
    /// Non-fatal discriminant fallback, if one was taken.
    pub warning: Option<Diagnostic>,
}

pub fn resolve(node: &TreeNode) -> Result<Binding, CompileError> {
    let role = role_of(node.kind)?;
    let mut warning = None;
    let method = method_of(node, &mut warning)?;
    Ok(Binding { method, role, warning })
}

fn method_of(
    node: &TreeNode,
    warning: &mut Option<Diagnostic>,
) -> Result<&'static str, CompileError> {
    use NodeKind::*;
    Ok(match node.kind {
        Structure => structure_method(node, warning),
        Primitive => primitive_method(node, warning),

        Component => "component",
        ComponentFromUri => "componentFromUri",
        ComponentFromSource => "componentFromSource",

        Color => "color",
        ColorFromUri => "colorFromUri",
        ColorFromSource => "colorFromSource",

        Label => "label",
        LabelFromUri => "labelFromUri",
        LabelFromSource => "labelFromSource",

        Tooltip => "tooltip",
        TooltipFromUri => "tooltipFromUri",
        TooltipFromSource => "tooltipFromSource",

        Primitives => "primitives",
        PrimitivesFromUri => "primitivesFromUri",

        Volume => "volume",
        VolumeRepresentation => "representation",

        Download => "download",
        Parse => "parse",
        Coordinates => "coordinates",
        Representation => "representation",
        Transform => "transform",
        Instance => "instance",
        Opacity => "opacity",
        Clip => "clip",
        Focus => "focus",
        Camera => "camera",
        Canvas => "canvas",

        Root => return Err(unmapped(node.kind)),
    })
}

fn role_of(kind: NodeKind) -> Result<Role, CompileError> {
    use NodeKind::*;
    Ok(match kind {
        // Mutate/annotate the current receiver.
        Camera | Canvas | Focus | Transform | Instance | Color | ColorFromUri
        | ColorFromSource | Opacity | Clip | Label | LabelFromUri | LabelFromSource
        | Tooltip | TooltipFromUri | TooltipFromSource => Role::Chain,

        // Introduce a named value that receives their children.
        Download | Parse | Coordinates | Structure | Component | ComponentFromUri
        | ComponentFromSource | Representation | Volume | VolumeRepresentation
        | Primitives | PrimitivesFromUri => Role::Scoped,

        Primitive => Role::Terminal,

        Root => return Err(unmapped(kind)),
    })
}

fn unmapped(kind: NodeKind) -> CompileError {
    CompileError::InternalInvariant(format!(
        "no emission rule for node kind `{kind}`"
    ))
}

fn structure_method(node: &TreeNode, warning: &mut Option<Diagnostic>) -> &'static str {
    match node.param_str("type") {
        Some("model") => "modelStructure",
        Some("assembly") => "assemblyStructure",
        Some("symmetry") => "symmetryStructure",
        Some("symmetry_mates") => "symmetryMatesStructure",
        other => {
            *warning = Some(Diagnostic::UnknownStructureType {
                found: other.map(str::to_owned),
            });
            "modelStructure"
        }
    }
}

fn primitive_method(node: &TreeNode, warning: &mut Option<Diagnostic>) -> &'static str {
    match node.param_str("kind") {
        Some("mesh") => "mesh",
        Some("lines") => "lines",
        Some("tube") => "tube",
        Some("arrow") => "arrow",
        Some("distance_measurement") => "distance",
        Some("angle_measurement") => "angle",
        Some("label") => "label",
        Some("ellipse") => "ellipse",
        Some("ellipsoid") => "ellipsoid",
        Some("box") => "box",
        other => {
            *warning = Some(Diagnostic::UnknownPrimitiveKind {
                found: other.map(str::to_owned),
            });
            "mesh"
        }
    }
}
