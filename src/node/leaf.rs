//! Leaf document nodes: text, spacing, alignment marks and images.

use std::fmt;

use compact_str::CompactString;

use super::NodeBase;
use super::base::delegate_style;
use crate::capability::{append_common_xml_attributes, append_style_diagnostic};
use crate::error::{BuildResult, require_text};
use crate::hash::impl_exact_eq;
use crate::xml::{ToXml, XmlMode, XmlWriter};

/// Clamp a width/height/position to a finite, non-negative value.
fn clamp_extent(value: f64) -> f64 {
    if !value.is_finite() {
        crate::log::debug!(value, "non-finite extent clamped to zero");
        return 0.0;
    }
    if value > 0.0 { value } else { 0.0 }
}

/// `<tag own... common.../>`
fn emit_empty_element(
    xml: &mut XmlWriter,
    mode: XmlMode,
    indent: usize,
    tag: &str,
    base: &NodeBase,
    own: impl FnOnce(&mut XmlWriter),
) {
    xml.empty_element(mode, indent, tag, |xml| {
        own(xml);
        append_common_xml_attributes(base, xml);
    });
}

// =============================================================================
// PrimaryBaseline
// =============================================================================

/// Which line of a node aligns with the surrounding text baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PrimaryBaseline {
    /// The typographic baseline
    #[default]
    Typographic,
    /// The vertical center line
    Centerline,
}

impl PrimaryBaseline {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Typographic => "typographic",
            Self::Centerline => "centerline",
        }
    }
}

// =============================================================================
// Text
// =============================================================================

/// A run of literal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text {
    base: NodeBase,
    text: CompactString,
}

impl Text {
    pub fn new(base: NodeBase, text: impl Into<CompactString>) -> Self {
        Self {
            base,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl ToXml for Text {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.open_line(mode, indent);
        if self.base.is_plain() {
            xml.write_text_escaped(&self.text);
        } else {
            // Styled text carries its attributes on a one-run span.
            xml.start_tag("span");
            append_common_xml_attributes(&self.base, xml);
            xml.write_char('>');
            xml.write_text_escaped(&self.text);
            xml.end_tag("span");
        }
        xml.end_line(mode);
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text{{{:?}}}", self.text.as_str())?;
        append_style_diagnostic(&self.base, f)
    }
}

// =============================================================================
// Whitespace
// =============================================================================

/// A single breakable space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Whitespace {
    base: NodeBase,
}

impl Whitespace {
    pub fn new(base: NodeBase) -> Self {
        Self { base }
    }
}

impl ToXml for Whitespace {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_empty_element(xml, mode, indent, "ws", &self.base, |_| {});
    }
}

impl fmt::Display for Whitespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Whitespace")?;
        append_style_diagnostic(&self.base, f)
    }
}

// =============================================================================
// HSpace / VSpace / HAlign
// =============================================================================

/// Fixed horizontal space.
#[derive(Debug, Clone)]
pub struct HSpace {
    base: NodeBase,
    width: f64,
}

impl_exact_eq!(HSpace; eq: [base]; exact: [width]);

impl HSpace {
    /// Negative and non-finite widths become `0.0`.
    pub fn new(base: NodeBase, width: f64) -> Self {
        Self {
            base,
            width: clamp_extent(width),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

impl ToXml for HSpace {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_empty_element(xml, mode, indent, "h-space", &self.base, |xml| {
            xml.write_real_attr("width", self.width);
        });
    }
}

impl fmt::Display for HSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HSpace{{width={}}}", self.width)?;
        append_style_diagnostic(&self.base, f)
    }
}

/// Fixed vertical space.
#[derive(Debug, Clone)]
pub struct VSpace {
    base: NodeBase,
    height: f64,
}

impl_exact_eq!(VSpace; eq: [base]; exact: [height]);

impl VSpace {
    /// Negative and non-finite heights become `0.0`.
    pub fn new(base: NodeBase, height: f64) -> Self {
        Self {
            base,
            height: clamp_extent(height),
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl ToXml for VSpace {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_empty_element(xml, mode, indent, "v-space", &self.base, |xml| {
            xml.write_real_attr("height", self.height);
        });
    }
}

impl fmt::Display for VSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VSpace{{height={}}}", self.height)?;
        append_style_diagnostic(&self.base, f)
    }
}

/// Advance to a fixed horizontal position on the current line.
#[derive(Debug, Clone)]
pub struct HAlign {
    base: NodeBase,
    position: f64,
}

impl_exact_eq!(HAlign; eq: [base]; exact: [position]);

impl HAlign {
    /// Negative and non-finite positions become `0.0`.
    pub fn new(base: NodeBase, position: f64) -> Self {
        Self {
            base,
            position: clamp_extent(position),
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }
}

impl ToXml for HAlign {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_empty_element(xml, mode, indent, "h-align", &self.base, |xml| {
            xml.write_real_attr("position", self.position);
        });
    }
}

impl fmt::Display for HAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HAlign{{position={}}}", self.position)?;
        append_style_diagnostic(&self.base, f)
    }
}

// =============================================================================
// AlignMark
// =============================================================================

/// Marks the point that lines up across consecutive lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AlignMark {
    base: NodeBase,
}

impl AlignMark {
    pub fn new(base: NodeBase) -> Self {
        Self { base }
    }
}

impl ToXml for AlignMark {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_empty_element(xml, mode, indent, "align-mark", &self.base, |_| {});
    }
}

impl fmt::Display for AlignMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AlignMark")?;
        append_style_diagnostic(&self.base, f)
    }
}

// =============================================================================
// Image
// =============================================================================

/// An image referenced by URL.
///
/// Width and height are stored as given; sizing problems surface at render time.
#[derive(Debug, Clone)]
pub struct Image {
    base: NodeBase,
    source: CompactString,
    baseline: PrimaryBaseline,
    alt: Option<CompactString>,
    width: f64,
    height: f64,
}

impl_exact_eq!(Image; eq: [base, source, baseline, alt]; exact: [width, height]);

impl Image {
    pub fn new(
        base: NodeBase,
        source: impl Into<CompactString>,
        width: f64,
        height: f64,
        baseline: PrimaryBaseline,
    ) -> BuildResult<Self> {
        let source = source.into();
        require_text("image", "source", &source)?;
        Ok(Self {
            base,
            source,
            baseline,
            alt: None,
            width,
            height,
        })
    }

    pub fn with_alt(mut self, alt: impl Into<CompactString>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn baseline(&self) -> PrimaryBaseline {
        self.baseline
    }

    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }
}

impl ToXml for Image {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_empty_element(xml, mode, indent, "image", &self.base, |xml| {
            xml.write_real_attr("width", self.width);
            xml.write_real_attr("height", self.height);
            xml.write_attr("src", &self.source);
            xml.write_opt_attr("alt", self.alt());
            if self.baseline != PrimaryBaseline::Typographic {
                xml.write_attr("baseline", self.baseline.as_str());
            }
        });
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Image{{src={}, width={}, height={}, baseline={}}}",
            self.source,
            self.width,
            self.height,
            self.baseline.as_str()
        )?;
        append_style_diagnostic(&self.base, f)
    }
}

delegate_style! {
    Text => base;
    Whitespace => base;
    HSpace => base;
    VSpace => base;
    HAlign => base;
    AlignMark => base;
    Image => base;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::hash::stable_hash;
    use crate::style::ObjectStyle;

    #[test]
    fn test_h_space_inline() {
        let space = HSpace::new(NodeBase::plain(), 2.5);
        assert_eq!(space.to_xml(XmlMode::Inline), "<h-space width=\"2.5\"/>");
    }

    #[test]
    fn test_width_before_style_attributes() {
        let base = NodeBase::new(Some(ObjectStyle::new().with_color("red")), Some("gray"));
        let space = HSpace::new(base, 4.0);
        assert_eq!(
            space.to_xml(XmlMode::Inline),
            "<h-space width=\"4.0\" color=\"red\" bgcolor=\"gray\"/>"
        );
    }

    #[test]
    fn test_space_clamping() {
        for bad in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0] {
            assert_eq!(HSpace::new(NodeBase::plain(), bad).width().to_bits(), 0.0f64.to_bits());
            assert_eq!(VSpace::new(NodeBase::plain(), bad).height().to_bits(), 0.0f64.to_bits());
            assert_eq!(HAlign::new(NodeBase::plain(), bad).position().to_bits(), 0.0f64.to_bits());
        }
        assert_eq!(VSpace::new(NodeBase::plain(), 7.25).height(), 7.25);
    }

    #[test]
    fn test_clamped_nodes_are_equal() {
        let a = HSpace::new(NodeBase::plain(), f64::NAN);
        let b = HSpace::new(NodeBase::plain(), -5.0);
        assert_eq!(a, b);
        assert_eq!(stable_hash(&a), stable_hash(&b));
    }

    #[test]
    fn test_indented_leaf() {
        let space = VSpace::new(NodeBase::plain(), 1.0);
        let mut xml = XmlWriter::new();
        space.emit_xml(&mut xml, XmlMode::Indented, 2);
        assert_eq!(xml.as_str(), "    <v-space height=\"1.0\"/>\n");
    }

    #[test]
    fn test_text_escaping_and_styling() {
        let plain = Text::new(NodeBase::plain(), "x < y");
        assert_eq!(plain.to_xml(XmlMode::Inline), "x &lt; y");

        let styled = Text::new(NodeBase::styled(ObjectStyle::new().with_font_name("Arial")), "A&B");
        assert_eq!(
            styled.to_xml(XmlMode::Inline),
            "<span fontname=\"Arial\">A&amp;B</span>"
        );
    }

    #[test]
    fn test_whitespace_and_align_mark() {
        assert_eq!(Whitespace::new(NodeBase::plain()).to_xml(XmlMode::Inline), "<ws/>");
        assert_eq!(AlignMark::new(NodeBase::plain()).to_xml(XmlMode::Inline), "<align-mark/>");
        assert_eq!(
            Whitespace::new(NodeBase::new(None, Some("red"))).to_xml(XmlMode::Inline),
            "<ws bgcolor=\"red\"/>"
        );
    }

    #[test]
    fn test_image() {
        let image = Image::new(NodeBase::plain(), "/img/a.png", 40.0, -3.0, PrimaryBaseline::Centerline)
            .unwrap()
            .with_alt("a \"graph\"");
        assert_eq!(image.height(), -3.0);
        assert_eq!(
            image.to_xml(XmlMode::Inline),
            "<image width=\"40.0\" height=\"-3.0\" src=\"/img/a.png\" alt=\"a &quot;graph&quot;\" \
             baseline=\"centerline\"/>"
        );
    }

    #[test]
    fn test_image_size_before_source() {
        let image = Image::new(NodeBase::plain(), "a.png", 1.0, 2.0, PrimaryBaseline::Typographic).unwrap();
        assert_eq!(
            image.to_xml(XmlMode::Inline),
            "<image width=\"1.0\" height=\"2.0\" src=\"a.png\"/>"
        );
    }

    #[test]
    fn test_image_requires_source() {
        let err = Image::new(NodeBase::plain(), "", 1.0, 1.0, PrimaryBaseline::Typographic).unwrap_err();
        assert_eq!(err, BuildError::missing("image", "source"));
    }

    #[test]
    fn test_display() {
        assert_eq!(HSpace::new(NodeBase::plain(), 2.5).to_string(), "HSpace{width=2.5}");
        assert_eq!(
            Text::new(NodeBase::new(None, Some("white")), "hi").to_string(),
            "Text{\"hi\"} [bg=white]"
        );
    }
}
