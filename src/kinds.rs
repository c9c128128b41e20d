//! Closed registry of scene-node kinds.

use serde::Serialize;

/// Every node tag the builder API can express. `Root` is legal only at the
/// top of a tree; the factory enforces that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Download,
    Parse,
    Coordinates,
    Structure,
    Transform,
    Instance,
    Component,
    ComponentFromUri,
    ComponentFromSource,
    Representation,
    Color,
    ColorFromUri,
    ColorFromSource,
    Opacity,
    Clip,
    Volume,
    VolumeRepresentation,
    Label,
    LabelFromUri,
    LabelFromSource,
    Tooltip,
    TooltipFromUri,
    TooltipFromSource,
    Focus,
    Camera,
    Canvas,
    Primitives,
    PrimitivesFromUri,
    Primitive,
}

impl NodeKind {
    pub const ALL: &'static [NodeKind] = &[
        NodeKind::Root,
        NodeKind::Download,
        NodeKind::Parse,
        NodeKind::Coordinates,
        NodeKind::Structure,
        NodeKind::Transform,
        NodeKind::Instance,
        NodeKind::Component,
        NodeKind::ComponentFromUri,
        NodeKind::ComponentFromSource,
        NodeKind::Representation,
        NodeKind::Color,
        NodeKind::ColorFromUri,
        NodeKind::ColorFromSource,
        NodeKind::Opacity,
        NodeKind::Clip,
        NodeKind::Volume,
        NodeKind::VolumeRepresentation,
        NodeKind::Label,
        NodeKind::LabelFromUri,
        NodeKind::LabelFromSource,
        NodeKind::Tooltip,
        NodeKind::TooltipFromUri,
        NodeKind::TooltipFromSource,
        NodeKind::Focus,
        NodeKind::Camera,
        NodeKind::Canvas,
        NodeKind::Primitives,
        NodeKind::PrimitivesFromUri,
        NodeKind::Primitive,
    ];

    /// Wire tag exactly as it appears in input documents.
    pub fn as_tag(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Download => "download",
            NodeKind::Parse => "parse",
            NodeKind::Coordinates => "coordinates",
            NodeKind::Structure => "structure",
            NodeKind::Transform => "transform",
            NodeKind::Instance => "instance",
            NodeKind::Component => "component",
            NodeKind::ComponentFromUri => "component_from_uri",
            NodeKind::ComponentFromSource => "component_from_source",
            NodeKind::Representation => "representation",
            NodeKind::Color => "color",
            NodeKind::ColorFromUri => "color_from_uri",
            NodeKind::ColorFromSource => "color_from_source",
            NodeKind::Opacity => "opacity",
            NodeKind::Clip => "clip",
            NodeKind::Volume => "volume",
            NodeKind::VolumeRepresentation => "volume_representation",
            NodeKind::Label => "label",
            NodeKind::LabelFromUri => "label_from_uri",
            NodeKind::LabelFromSource => "label_from_source",
            NodeKind::Tooltip => "tooltip",
            NodeKind::TooltipFromUri => "tooltip_from_uri",
            NodeKind::TooltipFromSource => "tooltip_from_source",
            NodeKind::Focus => "focus",
            NodeKind::Camera => "camera",
            NodeKind::Canvas => "canvas",
            NodeKind::Primitives => "primitives",
            NodeKind::PrimitivesFromUri => "primitives_from_uri",
            NodeKind::Primitive => "primitive",
        }
    }

    pub fn from_tag(tag: &str) -> Option<NodeKind> {
        NodeKind::ALL.iter().copied().find(|kind| kind.as_tag() == tag)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}
