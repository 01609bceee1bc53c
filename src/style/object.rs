//! Font and color style for document nodes.

use std::fmt;
use std::ops::BitOr;

use compact_str::CompactString;

use crate::hash::impl_exact_eq;
use crate::xml::XmlWriter;

// =============================================================================
// FontStyle
// =============================================================================

/// Font-style bit flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FontStyle(u8);

impl FontStyle {
    pub const PLAIN: Self = Self(0);
    pub const BOLD: Self = Self(1);
    pub const ITALIC: Self = Self(1 << 1);
    pub const UNDERLINE: Self = Self(1 << 2);
    pub const OVERLINE: Self = Self(1 << 3);
    pub const STRIKETHROUGH: Self = Self(1 << 4);
    pub const BOXED: Self = Self(1 << 5);
    pub const HIDDEN: Self = Self(1 << 6);

    const NAMES: [(Self, &'static str); 7] = [
        (Self::BOLD, "bold"),
        (Self::ITALIC, "italic"),
        (Self::UNDERLINE, "underline"),
        (Self::OVERLINE, "overline"),
        (Self::STRIKETHROUGH, "strikethrough"),
        (Self::BOXED, "boxed"),
        (Self::HIDDEN, "hidden"),
    ];

    /// Build from raw bits, dropping undefined ones.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0x7f)
    }

    #[inline]
    /// Raw flag bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    /// Whether every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    /// Whether no flag is set.
    pub const fn is_plain(self) -> bool {
        self.0 == 0
    }

    /// Flag names in a fixed order, e.g. `["bold", "italic"]`.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for FontStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_plain() {
            return f.write_str("plain");
        }
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

// =============================================================================
// ObjectStyle
// =============================================================================

/// Font and color applied to a node's text.
///
/// Every part is optional; an absent part is inherited from the nearest
/// ancestor that defines it when the document is rendered.
#[derive(Debug, Clone, Default)]
pub struct ObjectStyle {
    color_name: Option<CompactString>,
    font_name: Option<CompactString>,
    font_style: Option<FontStyle>,
    font_size: Option<f64>,
}

impl_exact_eq!(ObjectStyle; eq: [color_name, font_name, font_style]; exact: [font_size]);

impl ObjectStyle {
    /// An empty style (everything inherited).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color by name.
    pub fn with_color(mut self, name: impl Into<CompactString>) -> Self {
        self.color_name = Some(name.into());
        self
    }

    /// Set the font family name.
    pub fn with_font_name(mut self, name: impl Into<CompactString>) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Set the font size in points.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set the bold/italic flags.
    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    /// Color name, if set.
    pub fn color_name(&self) -> Option<&str> {
        self.color_name.as_deref()
    }

    /// Font family name, if set.
    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    /// Font size in points, if set.
    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    /// Font flags, if set.
    pub fn font_style(&self) -> Option<FontStyle> {
        self.font_style
    }

    /// Whether no part of the style is set.
    pub fn is_empty(&self) -> bool {
        self.color_name.is_none()
            && self.font_name.is_none()
            && self.font_size.is_none()
            && self.font_style.is_none()
    }

    /// Append `color`, `fontname`, `fontsize` and `fontstyle` attributes.
    pub fn append_xml_attributes(&self, xml: &mut XmlWriter) {
        xml.write_opt_attr("color", self.color_name());
        xml.write_opt_attr("fontname", self.font_name());
        if let Some(size) = self.font_size {
            xml.write_real_attr("fontsize", size);
        }
        if let Some(style) = self.font_style {
            xml.write_attr("fontstyle", &style.to_string());
        }
    }
}

impl fmt::Display for ObjectStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(color) = &self.color_name {
            write!(f, "{sep}color={color}")?;
            sep = " ";
        }
        if let Some(font) = &self.font_name {
            write!(f, "{sep}font={font}")?;
            sep = " ";
        }
        if let Some(size) = self.font_size {
            write!(f, "{sep}size={size}")?;
            sep = " ";
        }
        if let Some(style) = self.font_style {
            write!(f, "{sep}style={style}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::stable_hash;

    #[test]
    fn test_font_style_names() {
        let style = FontStyle::BOLD | FontStyle::ITALIC | FontStyle::BOXED;
        assert!(style.contains(FontStyle::ITALIC));
        assert!(!style.contains(FontStyle::UNDERLINE));
        assert_eq!(style.to_string(), "bold,italic,boxed");
        assert_eq!(FontStyle::PLAIN.to_string(), "plain");
        assert_eq!(FontStyle::from_bits_truncate(0xff).bits(), 0x7f);
    }

    #[test]
    fn test_style_xml_attributes() {
        let style = ObjectStyle::new()
            .with_color("red")
            .with_font_name("Times")
            .with_font_size(12.0)
            .with_font_style(FontStyle::BOLD);
        let mut xml = XmlWriter::new();
        style.append_xml_attributes(&mut xml);
        assert_eq!(
            xml.as_str(),
            " color=\"red\" fontname=\"Times\" fontsize=\"12.0\" fontstyle=\"bold\""
        );
    }

    #[test]
    fn test_style_equality_is_exact() {
        let a = ObjectStyle::new().with_font_size(12.0);
        let b = ObjectStyle::new().with_font_size(12.0);
        let c = ObjectStyle::new().with_font_size(12.000_000_1);
        assert_eq!(a, b);
        assert_eq!(stable_hash(&a), stable_hash(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn test_builders_set_accessors() {
        let style = ObjectStyle::new()
            .with_color("navy")
            .with_font_name("Times")
            .with_font_size(11.5)
            .with_font_style(FontStyle::BOLD);
        assert_eq!(style.color_name(), Some("navy"));
        assert_eq!(style.font_name(), Some("Times"));
        assert_eq!(style.font_size(), Some(11.5));
        assert_eq!(style.font_style(), Some(FontStyle::BOLD));
        assert_eq!(ObjectStyle::new().font_size(), None);
    }

    #[test]
    fn test_style_display() {
        let style = ObjectStyle::new().with_color("blue").with_font_style(FontStyle::ITALIC);
        assert_eq!(style.to_string(), "color=blue style=italic");
        assert!(ObjectStyle::new().is_empty());
    }
}
