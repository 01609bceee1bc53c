//! Style value types
//!
//! Immutable descriptors shared by nodes and primitives:
//! - [`ObjectStyle`]: font and color for document text
//! - [`StrokeStyle`] / [`FillStyle`]: line and area painting
//! - [`RectangleShape`]: rectangle geometry in one of three construction modes

mod object;
mod shape;
mod stroke;

pub use object::{FontStyle, ObjectStyle};
pub use shape::{RectangleShape, ShapeAttr, ShapeMode};
pub use stroke::{FillStyle, StrokeCap, StrokeJoin, StrokeStyle, DEFAULT_MITER_LIMIT};
