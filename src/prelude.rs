//! Prelude module for common imports.
//!
//! ```ignore
//! use mathdoc_inst::prelude::*;
//! ```

// Capabilities
pub use crate::capability::{HasCanvas, HasChildren, HasInputBinding, HasStyle};

// Document nodes
pub use crate::node::{
    AlignMark, CanvasBase, Checkbox, Column, DocNode, Drawing, Dropdown, DropdownOption, EnableCondition,
    ExpressionField, Fence, FenceType, FieldStyle, Fraction, GraphXY, HAlign, HSpace, Image, InputBase,
    IntegerField, Justification, NodeBase, NonwrappingSpan, Paragraph, ParagraphSpacing, PointField, PrimaryBaseline, Radical,
    RadioButton, RealField, RelativeOffset, SymbolPalette, Table, TableOptions, Text, VSpace, Whitespace,
    WrappingSpan,
};

// Primitives
pub use crate::primitive::{
    CircularArc, Formula, FormulaPrimitive, FormulaStyle, Line, Oval, Polygon, Polyline, Primitive, PrimitiveSpan,
    PrimitiveText, Protractor, Raster, Rectangle,
};

// Styles
pub use crate::style::{FillStyle, FontStyle, ObjectStyle, RectangleShape, ShapeAttr, StrokeStyle};

// XML
pub use crate::xml::{ToXml, XmlConfig, XmlMode};

// Banks
pub use crate::bank::{InstanceBank, SharedInstanceBank};

// Errors
pub use crate::error::{BuildError, BuildResult};
