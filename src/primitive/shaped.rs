//! Primitives positioned by a [`RectangleShape`].

use std::fmt;

use compact_str::CompactString;

use crate::error::{BuildResult, require_text};
use crate::hash::impl_exact_eq;
use crate::style::{FillStyle, RectangleShape, StrokeStyle};
use crate::xml::{ToXml, XmlMode, XmlWriter};

/// Optional stroke then optional fill.
fn append_paint(xml: &mut XmlWriter, stroke: Option<&StrokeStyle>, fill: Option<&FillStyle>) {
    if let Some(stroke) = stroke {
        stroke.append_xml_attributes(xml, "stroke-");
    }
    if let Some(fill) = fill {
        fill.append_xml_attributes(xml);
    }
}

fn write_paint_diagnostic(
    f: &mut fmt::Formatter<'_>,
    stroke: Option<&StrokeStyle>,
    fill: Option<&FillStyle>,
) -> fmt::Result {
    if let Some(stroke) = stroke {
        write!(f, ", {stroke}")?;
    }
    if let Some(fill) = fill {
        write!(f, ", {fill}")?;
    }
    Ok(())
}

// =============================================================================
// Line
// =============================================================================

/// A line segment between two corners of a shape.
///
/// Without a stroke the renderer draws it in the canvas defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    shape: RectangleShape,
    stroke: Option<StrokeStyle>,
}

impl Line {
    pub fn new(shape: RectangleShape, stroke: Option<StrokeStyle>) -> Self {
        Self { shape, stroke }
    }

    pub fn shape(&self) -> &RectangleShape {
        &self.shape
    }

    pub fn stroke(&self) -> Option<&StrokeStyle> {
        self.stroke.as_ref()
    }
}

impl ToXml for Line {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.empty_element(mode, indent, "line", |xml| {
            self.shape.append_xml_attributes(xml);
            append_paint(xml, self.stroke.as_ref(), None);
        });
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line{{{}", self.shape)?;
        write_paint_diagnostic(f, self.stroke.as_ref(), None)?;
        f.write_str("}")
    }
}

// =============================================================================
// Rectangle / Oval
// =============================================================================

/// An axis-aligned rectangle, stroked and/or filled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rectangle {
    shape: RectangleShape,
    stroke: Option<StrokeStyle>,
    fill: Option<FillStyle>,
}

impl Rectangle {
    pub fn new(shape: RectangleShape, stroke: Option<StrokeStyle>, fill: Option<FillStyle>) -> Self {
        Self { shape, stroke, fill }
    }

    pub fn shape(&self) -> &RectangleShape {
        &self.shape
    }

    pub fn stroke(&self) -> Option<&StrokeStyle> {
        self.stroke.as_ref()
    }

    pub fn fill(&self) -> Option<&FillStyle> {
        self.fill.as_ref()
    }
}

impl ToXml for Rectangle {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.empty_element(mode, indent, "rectangle", |xml| {
            self.shape.append_xml_attributes(xml);
            append_paint(xml, self.stroke.as_ref(), self.fill.as_ref());
        });
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rectangle{{{}", self.shape)?;
        write_paint_diagnostic(f, self.stroke.as_ref(), self.fill.as_ref())?;
        f.write_str("}")
    }
}

/// An ellipse inscribed in a shape's bounding rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oval {
    shape: RectangleShape,
    stroke: Option<StrokeStyle>,
    fill: Option<FillStyle>,
}

impl Oval {
    pub fn new(shape: RectangleShape, stroke: Option<StrokeStyle>, fill: Option<FillStyle>) -> Self {
        Self { shape, stroke, fill }
    }

    pub fn shape(&self) -> &RectangleShape {
        &self.shape
    }

    pub fn stroke(&self) -> Option<&StrokeStyle> {
        self.stroke.as_ref()
    }

    pub fn fill(&self) -> Option<&FillStyle> {
        self.fill.as_ref()
    }
}

impl ToXml for Oval {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.empty_element(mode, indent, "oval", |xml| {
            self.shape.append_xml_attributes(xml);
            append_paint(xml, self.stroke.as_ref(), self.fill.as_ref());
        });
    }
}

impl fmt::Display for Oval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oval{{{}", self.shape)?;
        write_paint_diagnostic(f, self.stroke.as_ref(), self.fill.as_ref())?;
        f.write_str("}")
    }
}

// =============================================================================
// Arc
// =============================================================================

/// How the area of an arc is closed when filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArcFill {
    /// Not closed
    Open,
    /// Closed by the chord between the endpoints
    #[default]
    Chord,
    /// Closed through the center
    Pie,
}

impl ArcFill {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Chord => "chord",
            Self::Pie => "pie",
        }
    }
}

/// Part of an oval's outline. Angles are in degrees.
#[derive(Debug, Clone)]
pub struct CircularArc {
    shape: RectangleShape,
    start_angle: f64,
    arc_angle: f64,
    arc_fill: ArcFill,
    stroke: Option<StrokeStyle>,
    fill: Option<FillStyle>,
}

impl_exact_eq!(CircularArc; eq: [shape, arc_fill, stroke, fill]; exact: [start_angle, arc_angle]);

impl CircularArc {
    pub fn new(shape: RectangleShape, start_angle: f64, arc_angle: f64) -> Self {
        Self {
            shape,
            start_angle,
            arc_angle,
            arc_fill: ArcFill::Chord,
            stroke: None,
            fill: None,
        }
    }

    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_fill(mut self, fill: FillStyle, arc_fill: ArcFill) -> Self {
        self.fill = Some(fill);
        self.arc_fill = arc_fill;
        self
    }

    pub fn shape(&self) -> &RectangleShape {
        &self.shape
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn arc_angle(&self) -> f64 {
        self.arc_angle
    }

    pub fn arc_fill(&self) -> ArcFill {
        self.arc_fill
    }

    pub fn stroke(&self) -> Option<&StrokeStyle> {
        self.stroke.as_ref()
    }

    pub fn fill(&self) -> Option<&FillStyle> {
        self.fill.as_ref()
    }
}

impl ToXml for CircularArc {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.empty_element(mode, indent, "arc", |xml| {
            self.shape.append_xml_attributes(xml);
            xml.write_real_attr("start-angle", self.start_angle);
            xml.write_real_attr("arc-angle", self.arc_angle);
            if self.arc_fill != ArcFill::Chord {
                xml.write_attr("arc-fill", self.arc_fill.as_str());
            }
            append_paint(xml, self.stroke.as_ref(), self.fill.as_ref());
        });
    }
}

impl fmt::Display for CircularArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arc{{{}, start={}, arc={}, {}",
            self.shape,
            self.start_angle,
            self.arc_angle,
            self.arc_fill.as_str()
        )?;
        write_paint_diagnostic(f, self.stroke.as_ref(), self.fill.as_ref())?;
        f.write_str("}")
    }
}

// =============================================================================
// Raster
// =============================================================================

/// A bitmap image scaled into a shape.
#[derive(Debug, Clone)]
pub struct Raster {
    shape: RectangleShape,
    source: CompactString,
    alpha: f64,
}

impl_exact_eq!(Raster; eq: [shape, source]; exact: [alpha]);

impl Raster {
    pub fn new(shape: RectangleShape, source: impl Into<CompactString>) -> BuildResult<Self> {
        let source = source.into();
        require_text("raster", "source", &source)?;
        Ok(Self {
            shape,
            source,
            alpha: 1.0,
        })
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn shape(&self) -> &RectangleShape {
        &self.shape
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl ToXml for Raster {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.empty_element(mode, indent, "raster", |xml| {
            self.shape.append_xml_attributes(xml);
            xml.write_attr("src", &self.source);
            xml.write_alpha_attr("alpha", self.alpha);
        });
    }
}

impl fmt::Display for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Raster{{{}, src={}, alpha={}}}", self.shape, self.source, self.alpha)
    }
}
