//! Rectangle geometry with flexible attribute kinds.
//!
//! A [`RectangleShape`] records the attributes a rectangle was specified
//! with, not a resolved pixel rectangle. Attribute kinds prefixed with `g`
//! are in graph space; the rest are in pixel space. Reconciling the two is
//! left to the renderer.

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::error::{BuildError, BuildResult};
use crate::hash::ExactEq;
use crate::xml::XmlWriter;

// =============================================================================
// ShapeAttr
// =============================================================================

/// Attribute kinds a rectangle can be specified with.
///
/// Declaration order is emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeAttr {
    X,
    X1,
    X2,
    Cx,
    Width,
    Gx,
    Gx1,
    Gx2,
    Gcx,
    Gwidth,
    Y,
    Y1,
    Y2,
    Cy,
    Height,
    Gy,
    Gy1,
    Gy2,
    Gcy,
    Gheight,
    R,
    Gr,
    Rx,
    Grx,
    Ry,
    Gry,
}

impl ShapeAttr {
    /// XML attribute name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::X1 => "x1",
            Self::X2 => "x2",
            Self::Cx => "cx",
            Self::Width => "width",
            Self::Gx => "gx",
            Self::Gx1 => "gx1",
            Self::Gx2 => "gx2",
            Self::Gcx => "gcx",
            Self::Gwidth => "gwidth",
            Self::Y => "y",
            Self::Y1 => "y1",
            Self::Y2 => "y2",
            Self::Cy => "cy",
            Self::Height => "height",
            Self::Gy => "gy",
            Self::Gy1 => "gy1",
            Self::Gy2 => "gy2",
            Self::Gcy => "gcy",
            Self::Gheight => "gheight",
            Self::R => "r",
            Self::Gr => "gr",
            Self::Rx => "rx",
            Self::Grx => "grx",
            Self::Ry => "ry",
            Self::Gry => "gry",
        }
    }

    /// Whether the value is in graph space.
    pub const fn is_graph_space(self) -> bool {
        matches!(
            self,
            Self::Gx
                | Self::Gx1
                | Self::Gx2
                | Self::Gcx
                | Self::Gwidth
                | Self::Gy
                | Self::Gy1
                | Self::Gy2
                | Self::Gcy
                | Self::Gheight
                | Self::Gr
                | Self::Grx
                | Self::Gry
        )
    }
}

impl fmt::Display for ShapeAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Legal kinds per role
// ─────────────────────────────────────────────────────────────────────────────

struct Role {
    name: &'static str,
    legal: &'static [ShapeAttr],
}

const FIRST_X: Role = Role {
    name: "X coordinate of first corner",
    legal: &[ShapeAttr::X, ShapeAttr::X1, ShapeAttr::Gx, ShapeAttr::Gx1],
};
const SECOND_X: Role = Role {
    name: "X coordinate of second corner",
    legal: &[ShapeAttr::Width, ShapeAttr::X2, ShapeAttr::Gwidth, ShapeAttr::Gx2],
};
const FIRST_Y: Role = Role {
    name: "Y coordinate of first corner",
    legal: &[ShapeAttr::Y, ShapeAttr::Y1, ShapeAttr::Gy, ShapeAttr::Gy1],
};
const SECOND_Y: Role = Role {
    name: "Y coordinate of second corner",
    legal: &[ShapeAttr::Height, ShapeAttr::Y2, ShapeAttr::Gheight, ShapeAttr::Gy2],
};
const CENTER_X: Role = Role {
    name: "center X coordinate",
    legal: &[ShapeAttr::Cx, ShapeAttr::Gcx],
};
const CENTER_Y: Role = Role {
    name: "center Y coordinate",
    legal: &[ShapeAttr::Cy, ShapeAttr::Gcy],
};
const RADIUS: Role = Role {
    name: "radius",
    legal: &[
        ShapeAttr::R,
        ShapeAttr::Gr,
        ShapeAttr::Width,
        ShapeAttr::Gwidth,
        ShapeAttr::Height,
        ShapeAttr::Gheight,
    ],
};
const X_RADIUS: Role = Role {
    name: "x-axis radius",
    legal: &[ShapeAttr::Rx, ShapeAttr::Grx, ShapeAttr::Width, ShapeAttr::Gwidth],
};
const Y_RADIUS: Role = Role {
    name: "y-axis radius",
    legal: &[ShapeAttr::Ry, ShapeAttr::Gry, ShapeAttr::Height, ShapeAttr::Gheight],
};

fn check(role: &Role, attr: ShapeAttr) -> BuildResult<()> {
    if role.legal.contains(&attr) {
        Ok(())
    } else {
        let err = BuildError::UnsupportedShapeAttribute { role: role.name, attr };
        crate::log::debug!(%err, "rejected rectangle shape");
        Err(err)
    }
}

// =============================================================================
// RectangleShape
// =============================================================================

/// Which of the three construction modes produced a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeMode {
    /// Two opposite corners
    Corners,
    /// Center and a single radius or diameter
    CenteredCircle,
    /// Center and separate x/y radii or diameters
    CenteredEllipse,
}

/// A rectangle given by one of three attribute sets.
#[derive(Debug, Clone)]
pub struct RectangleShape {
    mode: ShapeMode,
    /// Sorted by kind; at most four entries.
    attrs: SmallVec<[(ShapeAttr, f64); 4]>,
}

impl RectangleShape {
    /// Specify a rectangle by two opposite corners.
    ///
    /// The second corner may be given as a width/height relative to the first.
    pub fn bounds(
        x1: (ShapeAttr, f64),
        x2: (ShapeAttr, f64),
        y1: (ShapeAttr, f64),
        y2: (ShapeAttr, f64),
    ) -> BuildResult<Self> {
        check(&FIRST_X, x1.0)?;
        check(&SECOND_X, x2.0)?;
        check(&FIRST_Y, y1.0)?;
        check(&SECOND_Y, y2.0)?;
        Ok(Self::from_parts(ShapeMode::Corners, [x1, x2, y1, y2].into_iter()))
    }

    /// Specify a circle's bounding square by its center and one radius or diameter.
    pub fn centered_circle(
        cx: (ShapeAttr, f64),
        cy: (ShapeAttr, f64),
        r: (ShapeAttr, f64),
    ) -> BuildResult<Self> {
        check(&CENTER_X, cx.0)?;
        check(&CENTER_Y, cy.0)?;
        check(&RADIUS, r.0)?;
        Ok(Self::from_parts(ShapeMode::CenteredCircle, [cx, cy, r].into_iter()))
    }

    /// Specify an ellipse's bounding rectangle by its center and two radii or diameters.
    pub fn centered_ellipse(
        cx: (ShapeAttr, f64),
        cy: (ShapeAttr, f64),
        rx: (ShapeAttr, f64),
        ry: (ShapeAttr, f64),
    ) -> BuildResult<Self> {
        check(&CENTER_X, cx.0)?;
        check(&CENTER_Y, cy.0)?;
        check(&X_RADIUS, rx.0)?;
        check(&Y_RADIUS, ry.0)?;
        Ok(Self::from_parts(ShapeMode::CenteredEllipse, [cx, cy, rx, ry].into_iter()))
    }

    /// Pixel-space rectangle from its top-left corner and size.
    pub fn pixel_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_parts(
            ShapeMode::Corners,
            [
                (ShapeAttr::X, x),
                (ShapeAttr::Width, width),
                (ShapeAttr::Y, y),
                (ShapeAttr::Height, height),
            ]
            .into_iter(),
        )
    }

    fn from_parts(mode: ShapeMode, parts: impl Iterator<Item = (ShapeAttr, f64)>) -> Self {
        let mut attrs: SmallVec<[(ShapeAttr, f64); 4]> = parts.collect();
        attrs.sort_by_key(|(attr, _)| *attr);
        Self { mode, attrs }
    }

    pub fn mode(&self) -> ShapeMode {
        self.mode
    }

    /// Value of one attribute kind, if the shape was specified with it.
    pub fn get(&self, attr: ShapeAttr) -> Option<f64> {
        self.attrs.iter().find(|(a, _)| *a == attr).map(|(_, v)| *v)
    }

    /// All attributes in emission order.
    pub fn attributes(&self) -> &[(ShapeAttr, f64)] {
        &self.attrs
    }

    /// Append one ` name="value"` per attribute, in kind order.
    pub fn append_xml_attributes(&self, xml: &mut XmlWriter) {
        for (attr, value) in &self.attrs {
            xml.write_real_attr(attr.name(), *value);
        }
    }
}

impl PartialEq for RectangleShape {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
            && self.attrs.len() == other.attrs.len()
            && self
                .attrs
                .iter()
                .zip(&other.attrs)
                .all(|((a, x), (b, y))| a == b && x.exact_eq(y))
    }
}

impl Eq for RectangleShape {}

impl Hash for RectangleShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mode.hash(state);
        state.write_usize(self.attrs.len());
        for (attr, value) in &self.attrs {
            attr.hash(state);
            value.exact_hash(state);
        }
    }
}

impl fmt::Display for RectangleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Rect{")?;
        for (i, (attr, value)) in self.attrs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{attr}={value}")?;
        }
        f.write_str("}")
    }
}
