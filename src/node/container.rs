//! Container nodes: paragraphs, columns, spans and fences.
//!
//! All of these hold an ordered child sequence and differ in their wrapper
//! tag and extra attributes. Except for a tagged [`Column`], their children
//! are inline runs and are always emitted in [`XmlMode::Inline`].

use std::fmt;

use compact_str::CompactString;

use super::base::{delegate_children, delegate_style};
use super::{ContainerBase, DocNode, NodeBase, PrimaryBaseline};
use crate::capability::{
    HasChildren, append_background_xml_attribute, append_common_xml_attributes,
    append_style_diagnostic, append_style_xml_attributes, emit_children_xml,
};
use crate::error::{BuildResult, require_element_name};
use crate::xml::{ToXml, XmlMode, XmlWriter};

/// Inline-content container: `<tag attrs...>children</tag>`.
pub(crate) fn emit_inline_container(
    container: &ContainerBase,
    xml: &mut XmlWriter,
    mode: XmlMode,
    indent: usize,
    tag: &str,
    attrs: impl FnOnce(&mut XmlWriter),
) {
    xml.inline_element(mode, indent, tag, attrs, |xml| {
        emit_children_xml(container, xml, XmlMode::Inline, indent)
    });
}

pub(crate) fn write_children_diagnostic(children: &[DocNode], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{child}")?;
    }
    f.write_str("]")
}

// =============================================================================
// Justification
// =============================================================================

/// Horizontal placement of lines within their box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
    Full,
    /// Left aligned, with every line after the first indented
    LeftHang,
}

impl Justification {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Full => "full",
            Self::LeftHang => "left-hang",
        }
    }
}

/// Vertical space added after a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ParagraphSpacing {
    None,
    Small,
    #[default]
    Normal,
    Large,
}

impl ParagraphSpacing {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Small => "small",
            Self::Normal => "normal",
            Self::Large => "large",
        }
    }
}

// =============================================================================
// Paragraph
// =============================================================================

/// A block of wrapped inline content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Paragraph {
    container: ContainerBase,
    justification: Justification,
    spacing: ParagraphSpacing,
    /// Left indent, in multiples of the indent unit
    indent: u32,
}

impl Paragraph {
    /// A paragraph with normal spacing and no indent.
    pub fn new(base: NodeBase, children: Vec<DocNode>, justification: Justification) -> Self {
        Self {
            container: ContainerBase::new(base, children),
            justification,
            spacing: ParagraphSpacing::Normal,
            indent: 0,
        }
    }

    pub fn with_spacing(mut self, spacing: ParagraphSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_indent(mut self, indent: u32) -> Self {
        self.indent = indent;
        self
    }

    pub fn justification(&self) -> Justification {
        self.justification
    }

    pub fn spacing(&self) -> ParagraphSpacing {
        self.spacing
    }

    pub fn indent(&self) -> u32 {
        self.indent
    }
}

impl ToXml for Paragraph {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_inline_container(&self.container, xml, mode, indent, "p", |xml| {
            append_style_xml_attributes(self, xml);
            if self.justification != Justification::Left {
                xml.write_attr("justification", self.justification.as_str());
            }
            if self.spacing != ParagraphSpacing::Normal {
                xml.write_attr("spacing", self.spacing.as_str());
            }
            if self.indent > 0 {
                xml.write_int_attr("indent", i64::from(self.indent));
            }
            append_background_xml_attribute(self, xml);
        });
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Paragraph{{{}", self.justification.as_str())?;
        if self.spacing != ParagraphSpacing::Normal {
            write!(f, ", spacing={}", self.spacing.as_str())?;
        }
        if self.indent > 0 {
            write!(f, ", indent={}", self.indent)?;
        }
        f.write_str("}")?;
        append_style_diagnostic(self, f)?;
        write_children_diagnostic(self.children(), f)
    }
}

// =============================================================================
// Column
// =============================================================================

/// A vertical stack of blocks.
///
/// Without a tag the children are emitted directly, with no wrapper element.
/// A tag must be a well-formed element name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    container: ContainerBase,
    tag: Option<CompactString>,
}

impl Column {
    pub fn new(base: NodeBase, children: Vec<DocNode>, tag: Option<&str>) -> BuildResult<Self> {
        let tag = tag.filter(|t| !t.is_empty());
        if let Some(tag) = tag {
            require_element_name("column", tag)?;
        }
        Ok(Self {
            container: ContainerBase::new(base, children),
            tag: tag.map(CompactString::from),
        })
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

impl ToXml for Column {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        let Some(tag) = self.tag.as_deref() else {
            for child in self.children() {
                child.emit_xml(xml, mode, indent);
            }
            return;
        };
        xml.block_element(
            mode,
            indent,
            tag,
            |xml| append_common_xml_attributes(self, xml),
            |xml| emit_children_xml(self, xml, mode, indent),
        );
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Column")?;
        if let Some(tag) = &self.tag {
            write!(f, "<{tag}>")?;
        }
        append_style_diagnostic(self, f)?;
        write_children_diagnostic(self.children(), f)
    }
}

// =============================================================================
// WrappingSpan / NonwrappingSpan
// =============================================================================

/// Inline content that may break across lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WrappingSpan {
    container: ContainerBase,
}

impl WrappingSpan {
    pub fn new(base: NodeBase, children: Vec<DocNode>) -> Self {
        Self {
            container: ContainerBase::new(base, children),
        }
    }
}

impl ToXml for WrappingSpan {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_inline_container(&self.container, xml, mode, indent, "span", |xml| {
            append_common_xml_attributes(self, xml)
        });
    }
}

impl fmt::Display for WrappingSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Span")?;
        append_style_diagnostic(self, f)?;
        write_children_diagnostic(self.children(), f)
    }
}

/// Inline content laid out on a single line (math runs, table cells,
/// fraction parts).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonwrappingSpan {
    container: ContainerBase,
}

impl NonwrappingSpan {
    pub const TAG: &'static str = "nonwrap";

    pub fn new(base: NodeBase, children: Vec<DocNode>) -> Self {
        Self {
            container: ContainerBase::new(base, children),
        }
    }

    /// Emit under a different wrapper tag (`tc`, `numerator`, ...).
    pub fn emit_as(&self, tag: &str, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_inline_container(&self.container, xml, mode, indent, tag, |xml| {
            append_common_xml_attributes(self, xml)
        });
    }
}

impl ToXml for NonwrappingSpan {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        self.emit_as(Self::TAG, xml, mode, indent);
    }
}

impl fmt::Display for NonwrappingSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Nonwrap")?;
        append_style_diagnostic(self, f)?;
        write_children_diagnostic(self.children(), f)
    }
}

// =============================================================================
// Fence
// =============================================================================

/// Delimiters drawn around fenced content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FenceType {
    #[default]
    Parentheses,
    Brackets,
    Bars,
    Braces,
    /// Left brace only, as used for piecewise definitions
    LeftBrace,
}

impl FenceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parentheses => "parentheses",
            Self::Brackets => "brackets",
            Self::Bars => "bars",
            Self::Braces => "braces",
            Self::LeftBrace => "lbrace",
        }
    }
}

/// Content enclosed in stretchy delimiters.
///
/// Fences center on the math axis unless their baseline is the typographic
/// one, which the markup spells `valign="baseline"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fence {
    container: ContainerBase,
    fence_type: FenceType,
    baseline: PrimaryBaseline,
}

impl Fence {
    pub fn new(
        base: NodeBase,
        children: Vec<DocNode>,
        fence_type: FenceType,
        baseline: PrimaryBaseline,
    ) -> Self {
        Self {
            container: ContainerBase::new(base, children),
            fence_type,
            baseline,
        }
    }

    pub fn fence_type(&self) -> FenceType {
        self.fence_type
    }

    pub fn baseline(&self) -> PrimaryBaseline {
        self.baseline
    }
}

impl ToXml for Fence {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_inline_container(&self.container, xml, mode, indent, "fence", |xml| {
            append_style_xml_attributes(self, xml);
            if self.fence_type != FenceType::Parentheses {
                xml.write_attr("type", self.fence_type.as_str());
            }
            if self.baseline == PrimaryBaseline::Typographic {
                xml.write_attr("valign", "baseline");
            }
            append_background_xml_attribute(self, xml);
        });
    }
}

impl fmt::Display for Fence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fence{{{}, {}}}",
            self.fence_type.as_str(),
            self.baseline.as_str()
        )?;
        append_style_diagnostic(self, f)?;
        write_children_diagnostic(self.children(), f)
    }
}

delegate_style! {
    Paragraph => container;
    Column => container;
    WrappingSpan => container;
    NonwrappingSpan => container;
    Fence => container;
}

delegate_children! {
    Paragraph => container;
    Column => container;
    WrappingSpan => container;
    NonwrappingSpan => container;
    Fence => container;
}
