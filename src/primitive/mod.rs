//! Drawing primitives
//!
//! Leaf vector-graphics instructions owned by [`Drawing`](crate::node::Drawing)
//! and [`GraphXY`](crate::node::GraphXY) canvases. Primitives sit outside the
//! document node layers: each one compares and hashes its own fields, floats
//! bit-exactly.

mod formula;
mod label;
mod path;
mod shaped;

pub use formula::{DEFAULT_DOMAIN_VAR, Formula, FormulaPrimitive, FormulaStyle};
pub use label::{AngleUnits, PrimitiveSpan, PrimitiveText, Protractor, TextAnchor};
pub use path::{Polygon, Polyline};
pub use shaped::{ArcFill, CircularArc, Line, Oval, Raster, Rectangle};

use crate::hash::stable_hash;
use crate::macros::node_enum;

node_enum! {
    /// Any drawing primitive.
    pub enum Primitive {
        line => Line(Line),
        rectangle => Rectangle(Rectangle),
        oval => Oval(Oval),
        arc => Arc(CircularArc),
        polygon => Polygon(Polygon),
        polyline => Polyline(Polyline),
        protractor => Protractor(Protractor),
        raster => Raster(Raster),
        span => Span(PrimitiveSpan),
        text => Text(PrimitiveText),
        formula => Formula(FormulaPrimitive),
    }
}

impl Primitive {
    /// Process-independent hash of the full primitive.
    pub fn structural_hash(&self) -> u64 {
        stable_hash(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{RectangleShape, StrokeStyle};
    use crate::xml::{ToXml, XmlMode};

    fn line() -> Primitive {
        Line::new(
            RectangleShape::pixel_rect(0.0, 0.0, 1.0, 1.0),
            Some(StrokeStyle::new(1.0, "black").unwrap()),
        )
        .into()
    }

    #[test]
    fn test_accessors() {
        let p = line();
        assert!(p.is_line());
        assert!(!p.is_arc());
        assert!(p.as_line().is_some());
        assert!(p.as_polygon().is_none());
        assert_eq!(p.kind_name(), "Line");
    }

    #[test]
    fn test_dispatch_matches_variant() {
        let p = line();
        let inner = p.as_line().unwrap();
        assert_eq!(p.to_xml(XmlMode::Inline), inner.to_xml(XmlMode::Inline));
        assert_eq!(p.to_string(), inner.to_string());
    }

    #[test]
    fn test_structural_hash_tracks_equality() {
        let a = line();
        let b = line();
        assert_eq!(a, b);
        assert_eq!(a.structural_hash(), b.structural_hash());

        let c: Primitive = Polyline::new(&[0.0, 1.0], &[0.0, 1.0], Some(StrokeStyle::new(1.0, "black").unwrap()))
            .unwrap()
            .into();
        assert_ne!(a, c);
        assert_ne!(a.structural_hash(), c.structural_hash());
    }
}
