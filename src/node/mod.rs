//! Document nodes
//!
//! The instance document tree: fully resolved, immutable content ready to be
//! rendered. [`DocNode`] is the closed set of node kinds; each kind is its own
//! struct built from shared layers:
//!
//! | Layer           | Struct            | Used by                              |
//! |-----------------|-------------------|--------------------------------------|
//! | Node            | [`NodeBase`]      | every node                           |
//! | Container       | [`ContainerBase`] | paragraphs, columns, spans, fences   |
//! | Canvas          | [`CanvasBase`]    | [`Drawing`], [`GraphXY`]             |
//! | Input           | [`InputBase`]     | every input control                  |
//! | Field           | [`FieldBase`]     | real/integer/expression/point fields |
//!
//! Equality and hashing compose through the layers: a node is equal to
//! another when its base layer is equal and its own fields are equal. Floats
//! compare by bit pattern, so equal nodes always hash equally.

mod base;
mod canvas;
mod container;
mod input;
mod leaf;
mod palette;
mod structure;
mod table;

pub use base::{ContainerBase, NodeBase};
pub use canvas::{AxisSpec, AxisTicksSpec, BoundingRect, CanvasBase, CoordinateSpace, Drawing, GraphXY, GridSpec};
pub use container::{
    Column, Fence, FenceType, Justification, NonwrappingSpan, Paragraph, ParagraphSpacing, WrappingSpan,
};
pub use input::{
    Checkbox, Dropdown, DropdownOption, EnableCondition, ExpressionField, FieldBase, FieldStyle, InputBase,
    IntegerField, PointField, RadioButton, RealField,
};
pub use leaf::{AlignMark, HAlign, HSpace, Image, PrimaryBaseline, Text, VSpace, Whitespace};
pub use palette::{PaletteSymbol, SymbolPalette};
pub use structure::{Fraction, Radical, RelativeOffset};
pub use table::{Padding, Table, TableOptions, TableSizing};

use crate::capability::{HasChildren, HasStyle};
use crate::hash::stable_hash;
use crate::macros::node_enum;

node_enum! {
    /// Any document node.
    pub enum DocNode {
        text => Text(Text),
        whitespace => Whitespace(Whitespace),
        h_space => HSpace(HSpace),
        v_space => VSpace(VSpace),
        h_align => HAlign(HAlign),
        align_mark => AlignMark(AlignMark),
        image => Image(Image),
        paragraph => Paragraph(Paragraph),
        column => Column(Column),
        wrapping_span => WrappingSpan(WrappingSpan),
        nonwrapping_span => NonwrappingSpan(NonwrappingSpan),
        fence => Fence(Fence),
        table => Table(Table),
        fraction => Fraction(Fraction),
        radical => Radical(Radical),
        relative_offset => RelativeOffset(RelativeOffset),
        symbol_palette => SymbolPalette(SymbolPalette),
        checkbox => Checkbox(Checkbox),
        radio_button => RadioButton(RadioButton),
        real_field => RealField(RealField),
        integer_field => IntegerField(IntegerField),
        expression_field => ExpressionField(ExpressionField),
        point_field => PointField(PointField),
        dropdown => Dropdown(Dropdown),
        drawing => Drawing(Drawing),
        graph_xy => GraphXY(GraphXY),
    }
    dyn as_styled: HasStyle;
}

impl DocNode {
    /// Direct document children; empty for leaves, structures, and canvases.
    pub fn children(&self) -> &[DocNode] {
        match self {
            Self::Paragraph(n) => n.children(),
            Self::Column(n) => n.children(),
            Self::WrappingSpan(n) => n.children(),
            Self::NonwrappingSpan(n) => n.children(),
            Self::Fence(n) => n.children(),
            Self::Checkbox(n) => n.children(),
            Self::RadioButton(n) => n.children(),
            _ => &[],
        }
    }

    /// Whether this node holds a child sequence.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Paragraph(_)
                | Self::Column(_)
                | Self::WrappingSpan(_)
                | Self::NonwrappingSpan(_)
                | Self::Fence(_)
                | Self::Checkbox(_)
                | Self::RadioButton(_)
        )
    }

    /// Process-independent hash of the full subtree.
    pub fn structural_hash(&self) -> u64 {
        stable_hash(self)
    }
}

impl HasStyle for DocNode {
    fn node_base(&self) -> &NodeBase {
        self.as_styled().node_base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Line, Polyline, Primitive, PrimitiveText, TextAnchor};
    use crate::style::{ObjectStyle, RectangleShape, ShapeAttr, StrokeStyle};
    use crate::xml::{ToXml, XmlMode};
    use proptest::prelude::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(DocNode: Send, Sync, Clone, Eq, std::hash::Hash);
    assert_impl_all!(Table: Send, Sync);
    assert_impl_all!(GraphXY: Send, Sync);
    assert_impl_all!(Dropdown: Send, Sync);
    assert_impl_all!(crate::primitive::Primitive: Send, Sync, Clone, Eq);

    fn text(s: &str) -> DocNode {
        Text::new(NodeBase::plain(), s).into()
    }

    #[test]
    fn test_hspace_scenario() {
        let node: DocNode = HSpace::new(NodeBase::plain(), 2.5).into();
        assert_eq!(node.to_xml(XmlMode::Inline), "<h-space width=\"2.5\"/>");
    }

    #[test]
    fn test_kind_and_accessors() {
        let node: DocNode = Paragraph::new(NodeBase::plain(), vec![text("a"), text("b")], Justification::Left).into();
        assert_eq!(node.kind_name(), "Paragraph");
        assert!(node.is_paragraph());
        assert!(node.as_column().is_none());
        assert!(node.is_container());
        assert_eq!(node.children().len(), 2);
        assert!(text("x").children().is_empty());
    }

    #[test]
    fn test_style_through_enum() {
        let style = ObjectStyle::new().with_color("red");
        let node: DocNode = WrappingSpan::new(NodeBase::new(Some(style.clone()), Some("white")), vec![]).into();
        assert_eq!(node.style(), Some(&style));
        assert_eq!(node.background(), Some("white"));
        assert_eq!(text("plain").style(), None);
    }

    #[test]
    fn test_indented_column_nesting() {
        let para: DocNode = Paragraph::new(NodeBase::plain(), vec![text("a "), text("b")], Justification::Left).into();
        let column = Column::new(NodeBase::plain(), vec![para, VSpace::new(NodeBase::plain(), 4.0).into()], Some("doc")).unwrap();
        assert_eq!(
            column.to_xml(XmlMode::Indented),
            "<doc>\n  <p>a b</p>\n  <v-space height=\"4.0\"/>\n</doc>\n"
        );
        assert_eq!(
            column.to_xml(XmlMode::Inline),
            "<doc><p>a b</p><v-space height=\"4.0\"/></doc>"
        );
    }

    #[test]
    fn test_reconstruction_is_equal() {
        let build = || -> DocNode {
            Fraction::new(
                NodeBase::plain(),
                NonwrappingSpan::new(NodeBase::plain(), vec![text("1")]),
                NonwrappingSpan::new(NodeBase::plain(), vec![text("2"), HSpace::new(NodeBase::plain(), 0.5).into()]),
            )
            .into()
        };
        assert_eq!(build(), build());
        assert_eq!(build().structural_hash(), build().structural_hash());
        assert_eq!(build().to_xml(XmlMode::Inline), build().to_xml(XmlMode::Inline));
    }

    #[test]
    fn test_float_bits_drive_table_equality() {
        let table = |pad: f64| -> DocNode {
            let cell = NonwrappingSpan::new(NodeBase::plain(), vec![text("a")]);
            let options = TableOptions {
                padding: Some(Padding::new(pad, pad, pad, pad)),
                ..TableOptions::default()
            };
            Table::new(NodeBase::plain(), vec![vec![cell]], options).unwrap().into()
        };
        assert_ne!(table(0.0), table(-0.0));
        assert_eq!(table(f64::NAN), table(f64::NAN));
        assert_eq!(table(f64::NAN).structural_hash(), table(f64::NAN).structural_hash());
    }

    /// Floats whose bit patterns differ from their numeric equality.
    fn arb_real() -> impl Strategy<Value = f64> {
        prop::sample::select(vec![0.0, -0.0, 0.5, 1.0, -1.0, 1e16, f64::NAN])
    }

    fn arb_stroke() -> impl Strategy<Value = Option<StrokeStyle>> {
        prop::option::of((arb_real(), prop::sample::select(vec!["red", "black"])))
            .prop_map(|s| s.map(|(width, color)| StrokeStyle::new(width, color).unwrap()))
    }

    fn arb_primitive() -> impl Strategy<Value = Primitive> {
        prop_oneof![
            (arb_real(), arb_real(), arb_stroke()).prop_map(|(x, y, stroke)| {
                let shape = RectangleShape::bounds(
                    (ShapeAttr::X1, x),
                    (ShapeAttr::X2, 1.0),
                    (ShapeAttr::Y1, y),
                    (ShapeAttr::Y2, 2.0),
                )
                .unwrap();
                Primitive::from(Line::new(shape, stroke))
            }),
            (prop::collection::vec(arb_real(), 1..4), arb_stroke()).prop_map(|(xs, stroke)| {
                Primitive::from(Polyline::new(&xs, &xs, stroke).unwrap())
            }),
            (arb_real(), "[a-c]{0,3}", prop::sample::select(vec![TextAnchor::SW, TextAnchor::N]))
                .prop_map(|(x, label, anchor)| Primitive::from(PrimitiveText::new(x, 0.0, label, anchor))),
        ]
    }

    fn arb_canvas() -> impl Strategy<Value = DocNode> {
        (prop::collection::vec(arb_primitive(), 0..3), arb_real(), any::<bool>()).prop_map(
            |(primitives, min, graph)| {
                let canvas = CanvasBase::new(NodeBase::plain(), 40, 30, primitives);
                if graph {
                    DocNode::from(GraphXY::new(canvas, BoundingRect::new(min, min, 4.0, 2.0)))
                } else {
                    DocNode::from(Drawing::new(canvas))
                }
            },
        )
    }

    fn arb_field() -> impl Strategy<Value = DocNode> {
        let input = || InputBase::new(NodeBase::plain(), "f").unwrap();
        prop_oneof![
            (prop::option::of(arb_real()), prop::option::of(arb_real())).prop_map(move |(default, minus)| {
                let mut field = RealField::new(input(), FieldStyle::Box, Some(4));
                if let Some(v) = default {
                    field = field.with_default(v);
                }
                if let Some(v) = minus {
                    field = field.with_minus_as(v);
                }
                DocNode::from(field)
            }),
            (any::<i64>(), any::<bool>()).prop_map(move |(default, underline)| {
                let style = if underline { FieldStyle::Underline } else { FieldStyle::Box };
                DocNode::from(IntegerField::new(input(), style, None).with_default(default))
            }),
            Just(DocNode::from(ExpressionField::new(input(), FieldStyle::Box, None))),
        ]
    }

    fn arb_leaf() -> impl Strategy<Value = DocNode> {
        prop_oneof![
            "[a-c]{0,3}".prop_map(|s| text(&s)),
            arb_real().prop_map(|w| DocNode::from(HSpace::new(NodeBase::plain(), w))),
            prop::sample::select(vec![0.0, 2.0, 2.5]).prop_map(|h| DocNode::from(VSpace::new(NodeBase::plain(), h))),
            prop::option::of(prop::sample::select(vec!["red", "blue"]))
                .prop_map(|bg| DocNode::from(Whitespace::new(NodeBase::new(None, bg)))),
            arb_field(),
            arb_canvas(),
        ]
    }

    fn arb_node() -> impl Strategy<Value = DocNode> {
        arb_leaf().prop_recursive(3, 24, 4, |inner| {
            let span = prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|children| NonwrappingSpan::new(NodeBase::plain(), children));
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4)
                    .prop_map(|children| DocNode::from(WrappingSpan::new(NodeBase::plain(), children))),
                prop::collection::vec(inner, 0..4)
                    .prop_map(|children| DocNode::from(NonwrappingSpan::new(NodeBase::plain(), children))),
                (span.clone(), span.clone())
                    .prop_map(|(num, den)| DocNode::from(Fraction::new(NodeBase::plain(), num, den))),
                (span.clone(), prop::option::of(span.clone()))
                    .prop_map(|(radicand, root)| DocNode::from(Radical::new(NodeBase::plain(), radicand, root))),
                (1..3usize, 1..3usize, arb_stroke(), arb_real()).prop_flat_map(move |(rows, columns, border, pad)| {
                    prop::collection::vec(span.clone(), rows * columns).prop_map(move |cells| {
                        let options = TableOptions {
                            border: border.clone(),
                            padding: Some(Padding::new(pad, pad, 0.0, pad)),
                            ..TableOptions::default()
                        };
                        let rows = cells.chunks(columns).map(<[_]>::to_vec).collect();
                        DocNode::from(Table::new(NodeBase::plain(), rows, options).unwrap())
                    })
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn test_equal_nodes_hash_equally(a in arb_node(), b in arb_node()) {
            if a == b {
                prop_assert_eq!(a.structural_hash(), b.structural_hash());
            }
            prop_assert_eq!(a.clone(), a.clone());
            prop_assert_eq!(a.structural_hash(), a.clone().structural_hash());
        }

        #[test]
        fn test_inline_output_has_no_newlines(node in arb_node()) {
            prop_assert!(!node.to_xml(XmlMode::Inline).contains('\n'));
        }
    }
}
