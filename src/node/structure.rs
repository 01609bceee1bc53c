//! Composite math structures: fractions, radicals, and relative offsets
//! (sub/superscripts and over/under decorations).
//!
//! Each part sits in its own named wrapper element and is emitted inline.

use std::fmt;

use super::base::delegate_style;
use super::{DocNode, NodeBase, NonwrappingSpan};
use crate::capability::{append_common_xml_attributes, append_style_diagnostic};
use crate::xml::{ToXml, XmlMode, XmlWriter};

// =============================================================================
// Fraction
// =============================================================================

/// A numerator over a denominator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    base: NodeBase,
    numerator: NonwrappingSpan,
    denominator: NonwrappingSpan,
}

impl Fraction {
    pub fn new(base: NodeBase, numerator: NonwrappingSpan, denominator: NonwrappingSpan) -> Self {
        Self {
            base,
            numerator,
            denominator,
        }
    }

    pub fn numerator(&self) -> &NonwrappingSpan {
        &self.numerator
    }

    pub fn denominator(&self) -> &NonwrappingSpan {
        &self.denominator
    }
}

impl ToXml for Fraction {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.inline_element(
            mode,
            indent,
            "fraction",
            |xml| append_common_xml_attributes(&self.base, xml),
            |xml| {
                self.numerator.emit_as("numerator", xml, XmlMode::Inline, indent);
                self.denominator.emit_as("denominator", xml, XmlMode::Inline, indent);
            },
        );
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fraction{{{} / {}}}", self.numerator, self.denominator)?;
        append_style_diagnostic(&self.base, f)
    }
}

// =============================================================================
// Radical
// =============================================================================

/// A radical sign over a radicand, with an optional root index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Radical {
    base: NodeBase,
    radicand: NonwrappingSpan,
    root: Option<NonwrappingSpan>,
}

impl Radical {
    pub fn new(base: NodeBase, radicand: NonwrappingSpan, root: Option<NonwrappingSpan>) -> Self {
        Self {
            base,
            radicand,
            root,
        }
    }

    pub fn radicand(&self) -> &NonwrappingSpan {
        &self.radicand
    }

    pub fn root(&self) -> Option<&NonwrappingSpan> {
        self.root.as_ref()
    }
}

impl ToXml for Radical {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.inline_element(
            mode,
            indent,
            "radical",
            |xml| append_common_xml_attributes(&self.base, xml),
            |xml| {
                self.radicand.emit_as("base", xml, XmlMode::Inline, indent);
                if let Some(root) = &self.root {
                    root.emit_as("root", xml, XmlMode::Inline, indent);
                }
            },
        );
    }
}

impl fmt::Display for Radical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Radical{{{}", self.radicand)?;
        if let Some(root) = &self.root {
            write!(f, ", root={root}")?;
        }
        f.write_str("}")?;
        append_style_diagnostic(&self.base, f)
    }
}

// =============================================================================
// RelativeOffset
// =============================================================================

/// A base with any combination of superscript, subscript, over and under parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativeOffset {
    base: NodeBase,
    content: Box<DocNode>,
    superscript: Option<Box<DocNode>>,
    subscript: Option<Box<DocNode>>,
    over: Option<Box<DocNode>>,
    under: Option<Box<DocNode>>,
}

impl RelativeOffset {
    pub fn new(base: NodeBase, content: DocNode) -> Self {
        Self {
            base,
            content: Box::new(content),
            superscript: None,
            subscript: None,
            over: None,
            under: None,
        }
    }

    pub fn with_superscript(mut self, node: DocNode) -> Self {
        self.superscript = Some(Box::new(node));
        self
    }

    pub fn with_subscript(mut self, node: DocNode) -> Self {
        self.subscript = Some(Box::new(node));
        self
    }

    pub fn with_over(mut self, node: DocNode) -> Self {
        self.over = Some(Box::new(node));
        self
    }

    pub fn with_under(mut self, node: DocNode) -> Self {
        self.under = Some(Box::new(node));
        self
    }

    /// The node being decorated.
    pub fn content(&self) -> &DocNode {
        &self.content
    }

    pub fn superscript(&self) -> Option<&DocNode> {
        self.superscript.as_deref()
    }

    pub fn subscript(&self) -> Option<&DocNode> {
        self.subscript.as_deref()
    }

    pub fn over(&self) -> Option<&DocNode> {
        self.over.as_deref()
    }

    pub fn under(&self) -> Option<&DocNode> {
        self.under.as_deref()
    }

    fn parts(&self) -> [(&'static str, Option<&DocNode>); 5] {
        [
            ("base", Some(&*self.content)),
            ("super", self.superscript()),
            ("sub", self.subscript()),
            ("over", self.over()),
            ("under", self.under()),
        ]
    }
}

impl ToXml for RelativeOffset {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.inline_element(
            mode,
            indent,
            "rel-offset",
            |xml| append_common_xml_attributes(&self.base, xml),
            |xml| {
                for (tag, part) in self.parts() {
                    if let Some(node) = part {
                        xml.inline_element(
                            XmlMode::Inline,
                            indent,
                            tag,
                            |_| {},
                            |xml| node.emit_xml(xml, XmlMode::Inline, indent),
                        );
                    }
                }
            },
        );
    }
}

impl fmt::Display for RelativeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RelOffset{")?;
        let mut sep = "";
        for (tag, part) in self.parts() {
            if let Some(node) = part {
                write!(f, "{sep}{tag}={node}")?;
                sep = ", ";
            }
        }
        f.write_str("}")?;
        append_style_diagnostic(&self.base, f)
    }
}

delegate_style! {
    Fraction => base;
    Radical => base;
    RelativeOffset => base;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Text;
    use crate::style::ObjectStyle;

    fn span(s: &str) -> NonwrappingSpan {
        NonwrappingSpan::new(NodeBase::plain(), vec![Text::new(NodeBase::plain(), s).into()])
    }

    fn text(s: &str) -> DocNode {
        Text::new(NodeBase::plain(), s).into()
    }

    #[test]
    fn test_fraction_xml() {
        let frac = Fraction::new(NodeBase::plain(), span("1"), span("x+2"));
        assert_eq!(
            frac.to_xml(XmlMode::Inline),
            "<fraction><numerator>1</numerator><denominator>x+2</denominator></fraction>"
        );
        assert_eq!(
            frac.to_xml(XmlMode::Indented),
            "<fraction><numerator>1</numerator><denominator>x+2</denominator></fraction>\n"
        );
    }

    #[test]
    fn test_fraction_part_keeps_its_style() {
        let styled = NonwrappingSpan::new(
            NodeBase::styled(ObjectStyle::new().with_color("red")),
            vec![text("a")],
        );
        let frac = Fraction::new(NodeBase::plain(), styled, span("b"));
        assert!(frac.to_xml(XmlMode::Inline).contains("<numerator color=\"red\">a</numerator>"));
    }

    #[test]
    fn test_radical() {
        let sqrt = Radical::new(NodeBase::plain(), span("2"), None);
        assert_eq!(sqrt.to_xml(XmlMode::Inline), "<radical><base>2</base></radical>");

        let cube = Radical::new(NodeBase::plain(), span("8"), Some(span("3")));
        assert_eq!(
            cube.to_xml(XmlMode::Inline),
            "<radical><base>8</base><root>3</root></radical>"
        );
        assert_ne!(sqrt, cube);
    }

    #[test]
    fn test_relative_offset_parts_in_fixed_order() {
        let rel = RelativeOffset::new(NodeBase::plain(), text("x"))
            .with_under(text("u"))
            .with_superscript(text("2"));
        assert_eq!(
            rel.to_xml(XmlMode::Inline),
            "<rel-offset><base>x</base><super>2</super><under>u</under></rel-offset>"
        );
        assert!(rel.subscript().is_none());
        assert_eq!(rel.to_string(), "RelOffset{base=Text{\"x\"}, super=Text{\"2\"}, under=Text{\"u\"}}");
    }

    #[test]
    fn test_relative_offset_equality_per_slot() {
        let a = RelativeOffset::new(NodeBase::plain(), text("x")).with_superscript(text("2"));
        let b = RelativeOffset::new(NodeBase::plain(), text("x")).with_subscript(text("2"));
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }
}
