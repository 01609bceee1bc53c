//! Point-anchored primitives: protractors, text, and embedded spans.

use std::fmt;

use compact_str::CompactString;

use crate::error::{BuildError, BuildResult, require_text};
use crate::hash::impl_exact_eq;
use crate::node::NonwrappingSpan;
use crate::style::ObjectStyle;
use crate::xml::{ToXml, XmlMode, XmlWriter};

/// Which point of a label's bounding box sits at its (x, y) position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    N,
    NE,
    E,
    SE,
    S,
    #[default]
    SW,
    W,
    NW,
    C,
}

impl TextAnchor {
    /// Markup name: the compass point in upper case (`NW`), `C` for center.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
            Self::C => "C",
        }
    }
}

/// `x`, `y`, then `anchor` unless it is the default.
fn append_anchor_attributes(xml: &mut XmlWriter, x: f64, y: f64, anchor: TextAnchor) {
    xml.write_real_attr("x", x);
    xml.write_real_attr("y", y);
    if anchor != TextAnchor::SW {
        xml.write_attr("anchor", anchor.as_str());
    }
}

// =============================================================================
// Protractor
// =============================================================================

/// Units printed on a protractor's scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AngleUnits {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnits {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Degrees => "deg",
            Self::Radians => "rad",
        }
    }
}

/// A protractor drawn over one to four quadrants.
#[derive(Debug, Clone)]
pub struct Protractor {
    cx: f64,
    cy: f64,
    r: f64,
    /// Rotation of the zero mark, in degrees
    orientation: f64,
    units: AngleUnits,
    quadrants: u8,
    color: CompactString,
    text_color: CompactString,
    alpha: f64,
}

impl_exact_eq!(Protractor; eq: [units, quadrants, color, text_color]; exact: [cx, cy, r, orientation, alpha]);

impl Protractor {
    /// `quadrants` must be in `1..=4`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cx: f64,
        cy: f64,
        r: f64,
        orientation: f64,
        units: AngleUnits,
        quadrants: u8,
        color: impl Into<CompactString>,
        text_color: impl Into<CompactString>,
    ) -> BuildResult<Self> {
        if !(1..=4).contains(&quadrants) {
            let err = BuildError::OutOfRange {
                node: "protractor",
                field: "quadrants",
                value: i64::from(quadrants),
            };
            crate::log::debug!(%err, "rejected protractor");
            return Err(err);
        }
        let color = color.into();
        let text_color = text_color.into();
        require_text("protractor", "color", &color)?;
        require_text("protractor", "text color", &text_color)?;
        Ok(Self {
            cx,
            cy,
            r,
            orientation,
            units,
            quadrants,
            color,
            text_color,
            alpha: 1.0,
        })
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn center(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    pub fn radius(&self) -> f64 {
        self.r
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn units(&self) -> AngleUnits {
        self.units
    }

    pub fn quadrants(&self) -> u8 {
        self.quadrants
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl ToXml for Protractor {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.empty_element(mode, indent, "protractor", |xml| {
            xml.write_real_attr("cx", self.cx);
            xml.write_real_attr("cy", self.cy);
            xml.write_real_attr("r", self.r);
            xml.write_real_attr("orientation", self.orientation);
            xml.write_attr("units", self.units.as_str());
            xml.write_int_attr("quadrants", i64::from(self.quadrants));
            xml.write_attr("color", &self.color);
            xml.write_attr("text-color", &self.text_color);
            xml.write_alpha_attr("alpha", self.alpha);
        });
    }
}

impl fmt::Display for Protractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Protractor{{c=({},{}), r={}, orientation={}, {}, quadrants={}}}",
            self.cx,
            self.cy,
            self.r,
            self.orientation,
            self.units.as_str(),
            self.quadrants
        )
    }
}

// =============================================================================
// Text
// =============================================================================

/// A literal string drawn at a point, in its own style.
#[derive(Debug, Clone)]
pub struct PrimitiveText {
    x: f64,
    y: f64,
    text: CompactString,
    anchor: TextAnchor,
    style: Option<ObjectStyle>,
    alpha: f64,
}

impl_exact_eq!(PrimitiveText; eq: [text, anchor, style]; exact: [x, y, alpha]);

impl PrimitiveText {
    pub fn new(x: f64, y: f64, text: impl Into<CompactString>, anchor: TextAnchor) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            anchor,
            style: None,
            alpha: 1.0,
        }
    }

    pub fn with_style(mut self, style: ObjectStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn style(&self) -> Option<&ObjectStyle> {
        self.style.as_ref()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl ToXml for PrimitiveText {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        // The color precedes the value; the font attributes follow it.
        let style = self.style.as_ref();
        xml.empty_element(mode, indent, "text", |xml| {
            append_anchor_attributes(xml, self.x, self.y, self.anchor);
            xml.write_opt_attr("color", style.and_then(ObjectStyle::color_name));
            xml.write_attr("value", &self.text);
            if let Some(style) = style {
                xml.write_opt_attr("fontname", style.font_name());
                if let Some(size) = style.font_size() {
                    xml.write_real_attr("fontsize", size);
                }
                if let Some(font_style) = style.font_style() {
                    xml.write_attr("fontstyle", &font_style.to_string());
                }
            }
            xml.write_alpha_attr("alpha", self.alpha);
        });
    }
}

impl fmt::Display for PrimitiveText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text{{({},{}) {:?}", self.x, self.y, self.text.as_str())?;
        if let Some(style) = self.style.as_ref().filter(|s| !s.is_empty()) {
            write!(f, " [{style}]")?;
        }
        f.write_str("}")
    }
}

// =============================================================================
// Span
// =============================================================================

/// Formatted document content drawn at a point.
#[derive(Debug, Clone)]
pub struct PrimitiveSpan {
    x: f64,
    y: f64,
    anchor: TextAnchor,
    span: NonwrappingSpan,
    background: Option<CompactString>,
    alpha: f64,
}

impl_exact_eq!(PrimitiveSpan; eq: [anchor, span, background]; exact: [x, y, alpha]);

impl PrimitiveSpan {
    pub fn new(x: f64, y: f64, anchor: TextAnchor, span: NonwrappingSpan) -> Self {
        Self {
            x,
            y,
            anchor,
            span,
            background: None,
            alpha: 1.0,
        }
    }

    pub fn with_background(mut self, color: impl Into<CompactString>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn span(&self) -> &NonwrappingSpan {
        &self.span
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl ToXml for PrimitiveSpan {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.inline_element(
            mode,
            indent,
            "span",
            |xml| {
                append_anchor_attributes(xml, self.x, self.y, self.anchor);
                xml.write_opt_attr("bgcolor", self.background.as_deref());
                xml.write_alpha_attr("alpha", self.alpha);
            },
            |xml| self.span.emit_xml(xml, XmlMode::Inline, indent),
        );
    }
}

impl fmt::Display for PrimitiveSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span{{({},{}) {}}}", self.x, self.y, self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeBase, Text};
    use crate::style::FontStyle;

    #[test]
    fn test_protractor_xml() {
        let p = Protractor::new(10.0, 20.0, 50.0, 0.0, AngleUnits::Degrees, 2, "black", "blue").unwrap();
        assert_eq!(
            p.to_xml(XmlMode::Inline),
            "<protractor cx=\"10.0\" cy=\"20.0\" r=\"50.0\" orientation=\"0.0\" units=\"deg\" \
             quadrants=\"2\" color=\"black\" text-color=\"blue\"/>"
        );
    }

    #[test]
    fn test_protractor_quadrant_range() {
        for bad in [0, 5] {
            let err = Protractor::new(0.0, 0.0, 1.0, 0.0, AngleUnits::Radians, bad, "a", "b").unwrap_err();
            assert_eq!(
                err,
                BuildError::OutOfRange {
                    node: "protractor",
                    field: "quadrants",
                    value: i64::from(bad)
                }
            );
        }
        assert!(Protractor::new(0.0, 0.0, 1.0, 0.0, AngleUnits::Radians, 4, "a", "b").is_ok());
    }

    #[test]
    fn test_text_anchor_default_omitted() {
        let text = PrimitiveText::new(1.0, 2.0, "A<B", TextAnchor::SW);
        assert_eq!(
            text.to_xml(XmlMode::Inline),
            "<text x=\"1.0\" y=\"2.0\" value=\"A&lt;B\"/>"
        );
        let styled = PrimitiveText::new(1.0, 2.0, "P", TextAnchor::C)
            .with_alpha(0.5)
            .with_style(ObjectStyle::new().with_font_style(FontStyle::BOLD));
        assert_eq!(
            styled.to_xml(XmlMode::Inline),
            "<text x=\"1.0\" y=\"2.0\" anchor=\"C\" value=\"P\" fontstyle=\"bold\" alpha=\"0.5\"/>"
        );
    }

    #[test]
    fn test_text_color_before_value() {
        let style = ObjectStyle::new()
            .with_color("red")
            .with_font_name("Arial")
            .with_font_size(12.0);
        let text = PrimitiveText::new(0.0, 0.0, "a", TextAnchor::NW).with_style(style);
        assert_eq!(
            text.to_xml(XmlMode::Inline),
            "<text x=\"0.0\" y=\"0.0\" anchor=\"NW\" color=\"red\" value=\"a\" fontname=\"Arial\" \
             fontsize=\"12.0\"/>"
        );
    }

    #[test]
    fn test_span_wraps_nonwrap_inline() {
        let content = NonwrappingSpan::new(NodeBase::plain(), vec![Text::new(NodeBase::plain(), "x").into()]);
        let span = PrimitiveSpan::new(3.0, 4.0, TextAnchor::N, content).with_background("white");
        assert_eq!(
            span.to_xml(XmlMode::Indented),
            "<span x=\"3.0\" y=\"4.0\" anchor=\"N\" bgcolor=\"white\"><nonwrap>x</nonwrap></span>\n"
        );
    }
}
