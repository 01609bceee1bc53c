//! # Capability traits
//!
//! Shared behavior of the node family, factored by what a node *has*:
//!
//! | Trait               | Layer          | Adds                                         |
//! |---------------------|----------------|----------------------------------------------|
//! | [`HasStyle`]        | Node           | style, background                            |
//! | [`HasChildren`]     | Container      | ordered document children                    |
//! | [`HasCanvas`]       | Canvas         | width, height, coordinates, alt, border, primitives |
//! | [`HasInputBinding`] | Input / Field  | submission name, enable condition, field style |
//!
//! The free functions below emit each layer's shared attributes. Concrete
//! nodes call them in a fixed order that is part of the output format. Most
//! put the input/canvas layer first, own attributes next and the common
//! style attributes last; paragraphs and fences lead with their style, and
//! tables and graphs interleave it with their own attributes.

use std::fmt;

use crate::node::{CanvasBase, DocNode, EnableCondition, FieldStyle, InputBase, NodeBase};
use crate::primitive::Primitive;
use crate::style::ObjectStyle;
use crate::xml::{ToXml, XmlMode, XmlWriter};

// =============================================================================
// Traits
// =============================================================================

/// A node with an optional style and background color.
pub trait HasStyle {
    /// The shared node layer.
    fn node_base(&self) -> &NodeBase;

    /// Style, or `None` to inherit from the nearest styled ancestor.
    fn style(&self) -> Option<&ObjectStyle> {
        self.node_base().style()
    }

    /// Background color name.
    fn background(&self) -> Option<&str> {
        self.node_base().background()
    }
}

/// A node holding an ordered sequence of document children.
pub trait HasChildren: HasStyle {
    /// Read-only view of the children.
    fn children(&self) -> &[DocNode];

    fn num_children(&self) -> usize {
        self.children().len()
    }
}

/// A node owning a drawing canvas of primitives.
pub trait HasCanvas: HasStyle {
    /// The shared canvas layer.
    fn canvas(&self) -> &CanvasBase;

    fn width(&self) -> u32 {
        self.canvas().width()
    }

    fn height(&self) -> u32 {
        self.canvas().height()
    }

    fn primitives(&self) -> &[Primitive] {
        self.canvas().primitives()
    }
}

/// An interactive control whose value is submitted under a name.
pub trait HasInputBinding: HasStyle {
    /// The shared input layer.
    fn input(&self) -> &InputBase;

    fn name(&self) -> &str {
        self.input().name()
    }

    fn enabled_when(&self) -> Option<&EnableCondition> {
        self.input().enabled_when()
    }

    /// Box style, for field-style inputs only.
    fn field_style(&self) -> Option<FieldStyle> {
        None
    }
}

// =============================================================================
// Layered attribute emission
// =============================================================================

/// Node layer: style attributes, then `bgcolor`.
pub fn append_common_xml_attributes(node: &dyn HasStyle, xml: &mut XmlWriter) {
    append_style_xml_attributes(node, xml);
    append_background_xml_attribute(node, xml);
}

/// Node layer, style half: `color`, `fontname`, `fontsize`, `fontstyle`.
///
/// For elements whose markup places the style and the background apart.
pub fn append_style_xml_attributes(node: &dyn HasStyle, xml: &mut XmlWriter) {
    if let Some(style) = node.style() {
        style.append_xml_attributes(xml);
    }
}

/// Node layer, background half: `bgcolor`.
pub fn append_background_xml_attribute(node: &dyn HasStyle, xml: &mut XmlWriter) {
    xml.write_opt_attr("bgcolor", node.background());
}

/// Node layer: ` [style] [bg=...]` for diagnostics.
pub fn append_style_diagnostic(node: &dyn HasStyle, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(style) = node.style().filter(|s| !s.is_empty()) {
        write!(f, " [{style}]")?;
    }
    if let Some(bg) = node.background() {
        write!(f, " [bg={bg}]")?;
    }
    Ok(())
}

/// Container layer: every child in order, at `indent + 1` when indented.
pub fn emit_children_xml(node: &dyn HasChildren, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
    let child_indent = match mode {
        XmlMode::Inline => indent,
        XmlMode::Indented => indent + 1,
    };
    for child in node.children() {
        child.emit_xml(xml, mode, child_indent);
    }
}

/// Canvas layer: `width`, `height`, `coordinates`, `alt`, then the border stroke.
pub fn append_canvas_xml_attributes(node: &dyn HasCanvas, xml: &mut XmlWriter) {
    let canvas = node.canvas();
    xml.write_int_attr("width", i64::from(canvas.width()));
    xml.write_int_attr("height", i64::from(canvas.height()));
    if !canvas.coordinates().is_pixel() {
        xml.write_attr("coordinates", canvas.coordinates().as_str());
    }
    xml.write_opt_attr("alt", canvas.alt());
    if let Some(border) = canvas.border() {
        border.append_xml_attributes(xml, "border-");
    }
}

/// Canvas layer: every primitive in order, at `indent + 1` when indented.
pub fn emit_primitives_xml(node: &dyn HasCanvas, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
    let child_indent = match mode {
        XmlMode::Inline => indent,
        XmlMode::Indented => indent + 1,
    };
    for primitive in node.primitives() {
        primitive.emit_xml(xml, mode, child_indent);
    }
}

/// Input layer: `name`, then the enable condition.
pub fn append_input_xml_attributes(node: &dyn HasInputBinding, xml: &mut XmlWriter) {
    xml.write_attr("name", node.name());
    if let Some(cond) = node.enabled_when() {
        xml.write_attr("enabled-var-name", cond.var_name());
        xml.write_int_attr("enabled-var-value", cond.var_value());
    }
}

/// Field layer: input attributes, then `style` when not the default box.
pub fn append_input_field_xml_attributes(node: &dyn HasInputBinding, xml: &mut XmlWriter) {
    append_input_xml_attributes(node, xml);
    if let Some(style) = node.field_style().filter(|s| *s != FieldStyle::Box) {
        xml.write_attr("style", style.as_str());
    }
}
