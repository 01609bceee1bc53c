//! Drawing canvases: document nodes whose children are primitives.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

use super::NodeBase;
use super::base::delegate_style;
use crate::capability::{
    HasCanvas, HasStyle, append_background_xml_attribute, append_canvas_xml_attributes,
    append_common_xml_attributes, append_style_diagnostic, append_style_xml_attributes, emit_primitives_xml,
};
use crate::hash::impl_exact_eq;
use crate::primitive::Primitive;
use crate::style::StrokeStyle;
use crate::xml::{ToXml, XmlMode, XmlWriter};

// =============================================================================
// CanvasBase
// =============================================================================

/// Which space primitive geometry is expressed in by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CoordinateSpace {
    #[default]
    Pixel,
    Graph,
}

impl CoordinateSpace {
    pub const fn is_pixel(self) -> bool {
        matches!(self, Self::Pixel)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pixel => "pixel",
            Self::Graph => "graph",
        }
    }
}

/// Node layer plus canvas size, coordinate space, alt text, border, and
/// primitives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanvasBase {
    base: NodeBase,
    width: u32,
    height: u32,
    coordinates: CoordinateSpace,
    alt: Option<CompactString>,
    border: Option<StrokeStyle>,
    primitives: Arc<[Primitive]>,
}

impl CanvasBase {
    pub fn new(base: NodeBase, width: u32, height: u32, primitives: Vec<Primitive>) -> Self {
        Self {
            base,
            width,
            height,
            coordinates: CoordinateSpace::Pixel,
            alt: None,
            border: None,
            primitives: Arc::from(primitives),
        }
    }

    pub fn with_coordinates(mut self, coordinates: CoordinateSpace) -> Self {
        self.coordinates = coordinates;
        self
    }

    pub fn with_alt(mut self, alt: impl Into<CompactString>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn with_border(mut self, border: StrokeStyle) -> Self {
        self.border = Some(border);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn coordinates(&self) -> CoordinateSpace {
        self.coordinates
    }

    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }

    pub fn border(&self) -> Option<&StrokeStyle> {
        self.border.as_ref()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    fn write_diagnostic(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)?;
        if !self.coordinates.is_pixel() {
            write!(f, " {}", self.coordinates.as_str())?;
        }
        for primitive in self.primitives.iter() {
            write!(f, ", {primitive}")?;
        }
        Ok(())
    }
}

impl HasStyle for CanvasBase {
    fn node_base(&self) -> &NodeBase {
        &self.base
    }
}

impl HasCanvas for CanvasBase {
    fn canvas(&self) -> &CanvasBase {
        self
    }
}

/// Block element: canvas attributes, `own`, common attributes, then the
/// primitives one level deeper.
fn emit_canvas(
    node: &impl HasCanvas,
    tag: &str,
    xml: &mut XmlWriter,
    mode: XmlMode,
    indent: usize,
    own: impl FnOnce(&mut XmlWriter),
) {
    xml.block_element(
        mode,
        indent,
        tag,
        |xml| {
            append_canvas_xml_attributes(node, xml);
            own(xml);
            append_common_xml_attributes(node, xml);
        },
        |xml| emit_primitives_xml(node, xml, mode, indent),
    );
}

// =============================================================================
// Drawing
// =============================================================================

/// A free-form drawing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Drawing {
    canvas: CanvasBase,
}

impl Drawing {
    pub fn new(canvas: CanvasBase) -> Self {
        Self { canvas }
    }
}

impl HasCanvas for Drawing {
    fn canvas(&self) -> &CanvasBase {
        &self.canvas
    }
}

impl ToXml for Drawing {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_canvas(self, "drawing", xml, mode, indent, |_| {});
    }
}

impl fmt::Display for Drawing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Drawing{")?;
        self.canvas.write_diagnostic(f)?;
        f.write_str("}")?;
        append_style_diagnostic(self, f)
    }
}

// =============================================================================
// GraphXY
// =============================================================================

/// The graph-space window shown by a graph: lower-left corner plus extent.
#[derive(Debug, Clone, Copy)]
pub struct BoundingRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl_exact_eq!(BoundingRect; eq: []; exact: [x, y, width, height]);

impl BoundingRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

/// Grid lines drawn at every tick.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridSpec {
    pub stroke: StrokeStyle,
}

/// Tick marks along one axis.
#[derive(Debug, Clone)]
pub struct AxisTicksSpec {
    pub width: f64,
    /// Length on the positive side of the axis
    pub pos_len: f64,
    /// Length on the negative side of the axis
    pub neg_len: f64,
    pub color: CompactString,
    /// Graph-space distance between ticks
    pub interval: f64,
    pub label_size: Option<f64>,
    pub label_color: Option<CompactString>,
}

impl_exact_eq!(AxisTicksSpec; eq: [color, label_color]; exact: [width, pos_len, neg_len, interval, label_size]);

impl AxisTicksSpec {
    /// Total tick length as one number: the positive length alone for
    /// one-sided ticks, else both lengths plus the one-pixel axis line.
    pub fn size(&self) -> f64 {
        if self.neg_len == 0.0 {
            self.pos_len
        } else {
            self.pos_len + self.neg_len + 1.0
        }
    }
}

/// One axis line with optional label and ticks.
#[derive(Debug, Clone)]
pub struct AxisSpec {
    pub stroke: StrokeStyle,
    pub label: Option<CompactString>,
    pub label_size: Option<f64>,
    pub label_color: Option<CompactString>,
    pub ticks: Option<AxisTicksSpec>,
}

impl_exact_eq!(AxisSpec; eq: [stroke, label, label_color, ticks]; exact: [label_size]);

impl AxisSpec {
    pub fn new(stroke: StrokeStyle) -> Self {
        Self {
            stroke,
            label: None,
            label_size: None,
            label_color: None,
            ticks: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<CompactString>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_ticks(mut self, ticks: AxisTicksSpec) -> Self {
        self.ticks = Some(ticks);
        self
    }
}

/// A Cartesian graph over a graph-space window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphXY {
    canvas: CanvasBase,
    window: BoundingRect,
    grid: Option<GridSpec>,
    x_axis: Option<AxisSpec>,
    y_axis: Option<AxisSpec>,
}

impl GraphXY {
    pub fn new(canvas: CanvasBase, window: BoundingRect) -> Self {
        Self {
            canvas,
            window,
            grid: None,
            x_axis: None,
            y_axis: None,
        }
    }

    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_x_axis(mut self, axis: AxisSpec) -> Self {
        self.x_axis = Some(axis);
        self
    }

    pub fn with_y_axis(mut self, axis: AxisSpec) -> Self {
        self.y_axis = Some(axis);
        self
    }

    pub fn window(&self) -> &BoundingRect {
        &self.window
    }

    pub fn grid(&self) -> Option<&GridSpec> {
        self.grid.as_ref()
    }

    pub fn x_axis(&self) -> Option<&AxisSpec> {
        self.x_axis.as_ref()
    }

    pub fn y_axis(&self) -> Option<&AxisSpec> {
        self.y_axis.as_ref()
    }

    /// Tick marks shared by both axes in the markup: the x axis's, else
    /// the y axis's.
    fn ticks(&self) -> Option<&AxisTicksSpec> {
        [&self.x_axis, &self.y_axis]
            .into_iter()
            .flatten()
            .find_map(|axis| axis.ticks.as_ref())
    }

    /// Size, style, window, then the decoration attributes. Widths and sizes
    /// are written only when they differ from their defaults.
    fn append_xml_attributes(&self, xml: &mut XmlWriter) {
        let canvas = &self.canvas;
        xml.write_int_attr("height", i64::from(canvas.height()));
        xml.write_int_attr("width", i64::from(canvas.width()));
        append_style_xml_attributes(self, xml);

        xml.write_real_attr("minx", self.window.min_x());
        xml.write_real_attr("miny", self.window.min_y());
        xml.write_real_attr("maxx", self.window.max_x());
        xml.write_real_attr("maxy", self.window.max_y());
        for (name, axis) in [("xtickinterval", &self.x_axis), ("ytickinterval", &self.y_axis)] {
            if let Some(ticks) = axis.as_ref().and_then(|a| a.ticks.as_ref()) {
                xml.write_real_attr(name, ticks.interval);
            }
        }
        append_background_xml_attribute(self, xml);

        let axis = self.x_axis.as_ref().or(self.y_axis.as_ref());
        let ticks = self.ticks();
        xml.write_opt_attr("bordercolor", canvas.border().map(StrokeStyle::color_name));
        xml.write_opt_attr("gridcolor", self.grid.as_ref().map(|g| g.stroke.color_name()));
        xml.write_opt_attr("tickcolor", ticks.map(|t| t.color.as_str()));
        xml.write_opt_attr("axiscolor", axis.map(|a| a.stroke.color_name()));

        let border_width = canvas.border().map_or(0.0, StrokeStyle::width);
        write_unless(xml, "borderwidth", border_width, DEFAULT_GRAPH_LINE_WIDTH);
        if let Some(grid) = &self.grid {
            write_unless(xml, "gridwidth", grid.stroke.width(), DEFAULT_GRAPH_LINE_WIDTH);
        }
        if let Some(ticks) = ticks {
            write_unless(xml, "tickwidth", ticks.width, DEFAULT_GRAPH_LINE_WIDTH);
            write_unless(xml, "ticksize", ticks.size(), DEFAULT_TICK_SIZE);
        }
        if let Some(axis) = axis {
            write_unless(xml, "axiswidth", axis.stroke.width(), DEFAULT_GRAPH_LINE_WIDTH);
            if let Some(size) = axis.label_size {
                write_unless(xml, "axislabelfontsize", size, DEFAULT_AXIS_LABEL_SIZE);
            }
        }
        if let Some(size) = ticks.and_then(|t| t.label_size) {
            write_unless(xml, "ticklabelfontsize", size, DEFAULT_TICK_LABEL_SIZE);
        }

        for (name, axis, default) in [("xaxislabel", &self.x_axis, "x"), ("yaxislabel", &self.y_axis, "y")] {
            let label = axis.as_ref().and_then(|a| a.label.as_deref());
            if let Some(label) = label.filter(|l| *l != default) {
                xml.write_attr(name, label);
            }
        }
        xml.write_opt_attr("alt", canvas.alt());
    }
}

/// Line width assumed for graph borders, grids, axes and ticks.
pub const DEFAULT_GRAPH_LINE_WIDTH: f64 = 1.0;
/// Total tick length assumed when the markup names none.
pub const DEFAULT_TICK_SIZE: f64 = 5.0;
/// Axis label font size assumed when the markup names none.
pub const DEFAULT_AXIS_LABEL_SIZE: f64 = 20.0;
/// Tick label font size assumed when the markup names none.
pub const DEFAULT_TICK_LABEL_SIZE: f64 = 15.0;

fn write_unless(xml: &mut XmlWriter, name: &str, value: f64, default: f64) {
    if value.to_bits() != default.to_bits() {
        xml.write_pixels_attr(name, value);
    }
}

impl HasCanvas for GraphXY {
    fn canvas(&self) -> &CanvasBase {
        &self.canvas
    }
}

impl ToXml for GraphXY {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.block_element(
            mode,
            indent,
            "graphxy",
            |xml| self.append_xml_attributes(xml),
            |xml| emit_primitives_xml(self, xml, mode, indent),
        );
    }
}

impl fmt::Display for GraphXY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = &self.window;
        f.write_str("GraphXY{")?;
        self.canvas.write_diagnostic(f)?;
        write!(f, ", window=[{},{}]x[{},{}]}}", w.min_x(), w.max_x(), w.min_y(), w.max_y())?;
        append_style_diagnostic(self, f)
    }
}

delegate_style! {
    Drawing => canvas;
    GraphXY => canvas;
}
