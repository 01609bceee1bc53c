//! Primitives given by parallel x/y coordinate lists.

use std::fmt;
use std::sync::Arc;

use crate::error::{BuildError, BuildResult};
use crate::hash::impl_exact_eq;
use crate::style::{FillStyle, StrokeStyle};
use crate::xml::{ToXml, XmlMode, XmlWriter};

/// Vertex lists shared by polygons and polylines.
#[derive(Debug, Clone)]
struct Vertices {
    xs: Arc<[f64]>,
    ys: Arc<[f64]>,
}

impl_exact_eq!(Vertices; eq: []; exact: [xs, ys]);

impl Vertices {
    fn new(node: &'static str, xs: &[f64], ys: &[f64]) -> BuildResult<Self> {
        let err = if xs.len() != ys.len() {
            BuildError::LengthMismatch {
                node,
                left: xs.len(),
                right: ys.len(),
            }
        } else if xs.is_empty() {
            BuildError::empty(node, "coordinates")
        } else {
            return Ok(Self {
                xs: Arc::from(xs),
                ys: Arc::from(ys),
            });
        };
        crate::log::debug!(%err, "rejected path");
        Err(err)
    }

    fn append_xml_attributes(&self, xml: &mut XmlWriter) {
        xml.write_real_list_attr("x-list", &self.xs);
        xml.write_real_list_attr("y-list", &self.ys);
    }

    fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

impl fmt::Display for Vertices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (x, y)) in self.points().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "({x},{y})")?;
        }
        Ok(())
    }
}

// =============================================================================
// Polygon
// =============================================================================

/// A closed path through the given vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polygon {
    vertices: Vertices,
    stroke: Option<StrokeStyle>,
    fill: Option<FillStyle>,
}

impl Polygon {
    /// `xs` and `ys` must be the same, non-zero length.
    pub fn new(
        xs: &[f64],
        ys: &[f64],
        stroke: Option<StrokeStyle>,
        fill: Option<FillStyle>,
    ) -> BuildResult<Self> {
        Ok(Self {
            vertices: Vertices::new("polygon", xs, ys)?,
            stroke,
            fill,
        })
    }

    pub fn x_coordinates(&self) -> &[f64] {
        &self.vertices.xs
    }

    pub fn y_coordinates(&self) -> &[f64] {
        &self.vertices.ys
    }

    pub fn num_points(&self) -> usize {
        self.vertices.xs.len()
    }

    pub fn stroke(&self) -> Option<&StrokeStyle> {
        self.stroke.as_ref()
    }

    pub fn fill(&self) -> Option<&FillStyle> {
        self.fill.as_ref()
    }
}

impl ToXml for Polygon {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.empty_element(mode, indent, "polygon", |xml| {
            self.vertices.append_xml_attributes(xml);
            if let Some(stroke) = &self.stroke {
                stroke.append_xml_attributes(xml, "stroke-");
            }
            if let Some(fill) = &self.fill {
                fill.append_xml_attributes(xml);
            }
        });
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon{{{}", self.vertices)?;
        if let Some(stroke) = &self.stroke {
            write!(f, ", {stroke}")?;
        }
        if let Some(fill) = &self.fill {
            write!(f, ", {fill}")?;
        }
        f.write_str("}")
    }
}

// =============================================================================
// Polyline
// =============================================================================

/// An open path through the given vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polyline {
    vertices: Vertices,
    stroke: Option<StrokeStyle>,
}

impl Polyline {
    /// `xs` and `ys` must be the same, non-zero length.
    pub fn new(xs: &[f64], ys: &[f64], stroke: Option<StrokeStyle>) -> BuildResult<Self> {
        Ok(Self {
            vertices: Vertices::new("polyline", xs, ys)?,
            stroke,
        })
    }

    pub fn x_coordinates(&self) -> &[f64] {
        &self.vertices.xs
    }

    pub fn y_coordinates(&self) -> &[f64] {
        &self.vertices.ys
    }

    pub fn num_points(&self) -> usize {
        self.vertices.xs.len()
    }

    pub fn stroke(&self) -> Option<&StrokeStyle> {
        self.stroke.as_ref()
    }
}

impl ToXml for Polyline {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.empty_element(mode, indent, "polyline", |xml| {
            self.vertices.append_xml_attributes(xml);
            if let Some(stroke) = &self.stroke {
                stroke.append_xml_attributes(xml, "stroke-");
            }
        });
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polyline{{{}", self.vertices)?;
        if let Some(stroke) = &self.stroke {
            write!(f, ", {stroke}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::stable_hash;

    fn stroke() -> StrokeStyle {
        StrokeStyle::new(1.0, "black").unwrap()
    }

    #[test]
    fn test_polygon_xml() {
        let polygon = Polygon::new(
            &[0.0, 4.0, 2.0],
            &[0.0, 0.0, 3.5],
            None,
            Some(FillStyle::new("green", 1.0).unwrap()),
        )
        .unwrap();
        assert_eq!(
            polygon.to_xml(XmlMode::Inline),
            "<polygon x-list=\"0.0,4.0,2.0\" y-list=\"0.0,0.0,3.5\" fill-color=\"green\"/>"
        );
        assert_eq!(polygon.num_points(), 3);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = Polyline::new(&[0.0, 1.0], &[0.0], Some(stroke())).unwrap_err();
        assert_eq!(
            err,
            BuildError::LengthMismatch {
                node: "polyline",
                left: 2,
                right: 1
            }
        );
    }

    #[test]
    fn test_empty_rejected() {
        let err = Polygon::new(&[], &[], Some(stroke()), None).unwrap_err();
        assert_eq!(err, BuildError::empty("polygon", "coordinates"));
    }

    #[test]
    fn test_input_copy_is_independent() {
        let mut xs = vec![0.0, 1.0];
        let ys = vec![2.0, 3.0];
        let line = Polyline::new(&xs, &ys, Some(stroke())).unwrap();
        xs[0] = 99.0;
        assert_eq!(line.x_coordinates(), &[0.0, 1.0]);

        let mut out = line.x_coordinates().to_vec();
        out.push(5.0);
        assert_eq!(line.x_coordinates().len(), 2);
    }

    #[test]
    fn test_equal_by_value() {
        let a = Polyline::new(&[0.0, 1.0], &[2.0, 3.0], Some(stroke())).unwrap();
        let b = Polyline::new(&vec![0.0, 1.0], &vec![2.0, 3.0], Some(stroke())).unwrap();
        assert_eq!(a, b);
        assert_eq!(stable_hash(&a), stable_hash(&b));
        assert_eq!(a.to_string(), "Polyline{(0,2) (1,3), Stroke{width=1, color=black, alpha=1, cap=butt, join=miter, miter-limit=10}}");
    }

    #[test]
    fn test_polyline_without_stroke() {
        let line = Polyline::new(&[0.0, 1.0], &[2.0, 3.0], None).unwrap();
        assert_eq!(
            line.to_xml(XmlMode::Inline),
            "<polyline x-list=\"0.0,1.0\" y-list=\"2.0,3.0\"/>"
        );
        assert_eq!(line.to_string(), "Polyline{(0,2) (1,3)}");
        assert!(line.stroke().is_none());
    }
}
