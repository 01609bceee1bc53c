//! XML emission for instance documents
//!
//! Every node and primitive renders itself into an [`XmlWriter`] through the
//! [`ToXml`] trait. The emission mode is passed explicitly on every call so a
//! node can override it for its children (table cells always render inline).
//!
//! # Modes
//!
//! - [`XmlMode::Inline`]: no added whitespace. Incidental whitespace between
//!   inline runs is visible spacing in a rendered math document.
//! - [`XmlMode::Indented`]: each element starts on its own line, prefixed by
//!   `indent` copies of the indent unit, and ends with a newline.

use std::fmt::Write as _;

// =============================================================================
// XmlConfig
// =============================================================================

/// Emission mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum XmlMode {
    /// Back-to-back output with no added whitespace
    #[default]
    Inline,
    /// One element per line, nested elements indented
    Indented,
}

/// Default indentation unit: two spaces per level.
pub const DEFAULT_INDENT_UNIT: &str = "  ";

/// Configuration for XML emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlConfig {
    /// Mode used for the root call
    pub mode: XmlMode,
    /// String repeated once per indentation level
    pub indent_unit: &'static str,
    /// Indentation level of the root element
    pub base_indent: usize,
}

impl XmlConfig {
    /// Compact output (inline, no added whitespace).
    pub const COMPACT: Self = Self {
        mode: XmlMode::Inline,
        indent_unit: DEFAULT_INDENT_UNIT,
        base_indent: 0,
    };

    /// Pretty-printed output.
    pub const PRETTY: Self = Self {
        mode: XmlMode::Indented,
        indent_unit: DEFAULT_INDENT_UNIT,
        base_indent: 0,
    };

    /// Set the root emission mode.
    pub fn with_mode(mut self, mode: XmlMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the indentation unit.
    pub fn with_indent_unit(mut self, unit: &'static str) -> Self {
        self.indent_unit = unit;
        self
    }

    /// Set the indentation level of the root element.
    pub fn with_base_indent(mut self, level: usize) -> Self {
        self.base_indent = level;
        self
    }
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self::COMPACT
    }
}

// =============================================================================
// ToXml
// =============================================================================

/// Two-mode XML emission.
pub trait ToXml {
    /// Append this value's XML to `xml` at the given mode and indentation level.
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize);

    /// Render to a string in `mode` with the default indentation unit.
    fn to_xml(&self, mode: XmlMode) -> String {
        self.to_xml_with(&XmlConfig::default().with_mode(mode))
    }

    /// Render to a string with an explicit configuration.
    fn to_xml_with(&self, config: &XmlConfig) -> String {
        let mut xml = XmlWriter::with_config(*config);
        self.emit_xml(&mut xml, config.mode, config.base_indent);
        xml.finish()
    }
}

impl<T: ToXml + ?Sized> ToXml for &T {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        (**self).emit_xml(xml, mode, indent)
    }
}

/// Render many values, in parallel when the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub fn to_xml_batch<T: ToXml + Sync>(items: &[T], config: &XmlConfig) -> Vec<String> {
    use rayon::prelude::*;
    items.par_iter().map(|item| item.to_xml_with(config)).collect()
}

/// Render many values, in parallel when the `parallel` feature is enabled.
#[cfg(not(feature = "parallel"))]
pub fn to_xml_batch<T: ToXml>(items: &[T], config: &XmlConfig) -> Vec<String> {
    items.iter().map(|item| item.to_xml_with(config)).collect()
}

// =============================================================================
// XmlWriter
// =============================================================================

/// Output buffer with the low-level writes every node shares.
#[derive(Debug, Clone)]
pub struct XmlWriter {
    config: XmlConfig,
    buffer: String,
}

impl XmlWriter {
    /// Create a writer with the compact configuration.
    pub fn new() -> Self {
        Self::with_config(XmlConfig::default())
    }

    /// Create a writer with a custom configuration.
    pub fn with_config(config: XmlConfig) -> Self {
        Self {
            config,
            buffer: String::with_capacity(1024),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &XmlConfig {
        &self.config
    }

    /// Output written so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the writer and return its output.
    pub fn finish(self) -> String {
        self.buffer
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────

    /// Start an element: in indented mode, write the indentation prefix.
    #[inline]
    pub fn open_line(&mut self, mode: XmlMode, indent: usize) {
        if mode == XmlMode::Indented {
            for _ in 0..indent {
                self.buffer.push_str(self.config.indent_unit);
            }
        }
    }

    /// Finish an element: in indented mode, end the line.
    #[inline]
    pub fn end_line(&mut self, mode: XmlMode) {
        if mode == XmlMode::Indented {
            self.buffer.push('\n');
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Elements
    // ─────────────────────────────────────────────────────────────────────────

    /// `<tag attrs/>` on its own line when indented.
    pub fn empty_element(
        &mut self,
        mode: XmlMode,
        indent: usize,
        tag: &str,
        attrs: impl FnOnce(&mut Self),
    ) {
        self.open_line(mode, indent);
        self.start_tag(tag);
        attrs(self);
        self.buffer.push_str("/>");
        self.end_line(mode);
    }

    /// `<tag attrs>body</tag>` with no whitespace inside the element.
    pub fn inline_element(
        &mut self,
        mode: XmlMode,
        indent: usize,
        tag: &str,
        attrs: impl FnOnce(&mut Self),
        body: impl FnOnce(&mut Self),
    ) {
        self.open_line(mode, indent);
        self.start_tag(tag);
        attrs(self);
        self.buffer.push('>');
        body(self);
        self.end_tag(tag);
        self.end_line(mode);
    }

    /// `<tag attrs>` and `</tag>` on their own lines when indented.
    ///
    /// `body` is responsible for indenting its own content.
    pub fn block_element(
        &mut self,
        mode: XmlMode,
        indent: usize,
        tag: &str,
        attrs: impl FnOnce(&mut Self),
        body: impl FnOnce(&mut Self),
    ) {
        self.open_line(mode, indent);
        self.start_tag(tag);
        attrs(self);
        self.buffer.push('>');
        self.end_line(mode);
        body(self);
        self.open_line(mode, indent);
        self.end_tag(tag);
        self.end_line(mode);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Buffer operations
    // ─────────────────────────────────────────────────────────────────────────

    #[inline]
    pub fn write_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Write `<name` (an unterminated start tag).
    #[inline]
    pub fn start_tag(&mut self, name: &str) {
        self.buffer.push('<');
        self.buffer.push_str(name);
    }

    /// Write `</name>`.
    #[inline]
    pub fn end_tag(&mut self, name: &str) {
        self.buffer.push_str("</");
        self.buffer.push_str(name);
        self.buffer.push('>');
    }

    /// Write text content with entity escaping
    pub fn write_text_escaped(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '&' => self.buffer.push_str("&amp;"),
                '<' => self.buffer.push_str("&lt;"),
                '>' => self.buffer.push_str("&gt;"),
                _ => self.buffer.push(c),
            }
        }
    }

    /// Write attribute value with entity escaping
    pub fn write_attr_escaped(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '&' => self.buffer.push_str("&amp;"),
                '"' => self.buffer.push_str("&quot;"),
                '<' => self.buffer.push_str("&lt;"),
                '>' => self.buffer.push_str("&gt;"),
                _ => self.buffer.push(c),
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────────

    /// Write ` name="value"` with the value escaped.
    pub fn write_attr(&mut self, name: &str, value: &str) {
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str("=\"");
        self.write_attr_escaped(value);
        self.buffer.push('"');
    }

    /// Write ` name="value"` when `value` is present.
    pub fn write_opt_attr(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.write_attr(name, value);
        }
    }

    /// Write a real-valued attribute using [`format_real`].
    pub fn write_real_attr(&mut self, name: &str, value: f64) {
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str("=\"");
        push_real(&mut self.buffer, value);
        self.buffer.push('"');
    }

    /// Write a whole-pixel measure: integral values as integers (`2`), others
    /// as reals (`1.5`).
    pub fn write_pixels_attr(&mut self, name: &str, value: f64) {
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str("=\"");
        push_pixels(&mut self.buffer, value);
        self.buffer.push('"');
    }

    /// Write an integer-valued attribute.
    pub fn write_int_attr(&mut self, name: &str, value: i64) {
        // Writing to a String cannot fail.
        let _ = write!(self.buffer, " {name}=\"{value}\"");
    }

    /// Write a comma-separated list of reals.
    pub fn write_real_list_attr(&mut self, name: &str, values: &[f64]) {
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str("=\"");
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                self.buffer.push(',');
            }
            push_real(&mut self.buffer, *v);
        }
        self.buffer.push('"');
    }

    /// Write an alpha attribute unless it is effectively opaque.
    pub fn write_alpha_attr(&mut self, name: &str, alpha: f64) {
        if !is_opaque(alpha) {
            self.write_real_attr(name, alpha);
        }
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Alpha values within this distance of 1.0 are treated as opaque.
pub const ALPHA_TOLERANCE: f64 = 0.01;

/// Whether an alpha value is close enough to 1.0 to be omitted.
#[inline]
pub fn is_opaque(alpha: f64) -> bool {
    (alpha - 1.0).abs() < ALPHA_TOLERANCE
}

/// Format a real value for an attribute.
///
/// Integral values of any magnitude keep one fractional digit (`10.0`,
/// `1e16` as `10000000000000000.0`); everything else uses the shortest
/// representation that round-trips (`2.5`, `0.1`).
pub fn format_real(value: f64) -> String {
    let mut out = String::new();
    push_real(&mut out, value);
    out
}

/// Format a pixel measure: integral values without a fraction (`2`).
pub fn format_pixels(value: f64) -> String {
    let mut out = String::new();
    push_pixels(&mut out, value);
    out
}

fn push_pixels(out: &mut String, value: f64) {
    // Beyond 2^53 not every integer is representable; fall back to reals.
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        let _ = write!(out, "{}", value as i64);
    } else {
        push_real(out, value);
    }
}

fn push_real(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("NaN");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    } else if value.fract() == 0.0 {
        let _ = write!(out, "{value:.1}");
    } else {
        let _ = write!(out, "{value}");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf(&'static str);

    impl ToXml for Leaf {
        fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
            xml.open_line(mode, indent);
            xml.start_tag(self.0);
            xml.write_str("/>");
            xml.end_line(mode);
        }
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(2.5), "2.5");
        assert_eq!(format_real(10.0), "10.0");
        assert_eq!(format_real(-3.0), "-3.0");
        assert_eq!(format_real(0.1), "0.1");
        assert_eq!(format_real(f64::NAN), "NaN");
        assert_eq!(format_real(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_real_large_integral_keeps_fraction() {
        assert_eq!(format_real(1e15), "1000000000000000.0");
        assert_eq!(format_real(1e16), "10000000000000000.0");
        assert_eq!(format_real(-2e17), "-200000000000000000.0");
        assert!(format_real(1e300).ends_with(".0"));
    }

    #[test]
    fn test_pixels_attr() {
        let mut xml = XmlWriter::new();
        xml.write_pixels_attr("box-width", 2.0);
        xml.write_pixels_attr("h-line-width", 0.5);
        xml.write_pixels_attr("v-line-width", -0.0);
        assert_eq!(xml.as_str(), " box-width=\"2\" h-line-width=\"0.5\" v-line-width=\"0\"");
    }

    #[test]
    fn test_attribute_escaping() {
        let mut xml = XmlWriter::new();
        xml.write_attr("alt", "a \"b\" & <c>");
        assert_eq!(xml.as_str(), " alt=\"a &quot;b&quot; &amp; &lt;c&gt;\"");
    }

    #[test]
    fn test_text_escaping() {
        let mut xml = XmlWriter::new();
        xml.write_text_escaped("x < 3 & \"y\"");
        assert_eq!(xml.as_str(), "x &lt; 3 &amp; \"y\"");
    }

    #[test]
    fn test_alpha_omitted_near_one() {
        let mut xml = XmlWriter::new();
        xml.write_alpha_attr("alpha", 0.995);
        assert_eq!(xml.as_str(), "");
        xml.write_alpha_attr("alpha", 0.5);
        assert_eq!(xml.as_str(), " alpha=\"0.5\"");
    }

    #[test]
    fn test_real_list() {
        let mut xml = XmlWriter::new();
        xml.write_real_list_attr("x-list", &[1.0, 2.5]);
        assert_eq!(xml.as_str(), " x-list=\"1.0,2.5\"");
    }

    #[test]
    fn test_modes() {
        assert_eq!(Leaf("ws").to_xml(XmlMode::Inline), "<ws/>");
        assert_eq!(Leaf("ws").to_xml(XmlMode::Indented), "<ws/>\n");

        let config = XmlConfig::PRETTY.with_base_indent(2);
        assert_eq!(Leaf("ws").to_xml_with(&config), "    <ws/>\n");

        let config = config.with_indent_unit("\t");
        assert_eq!(Leaf("ws").to_xml_with(&config), "\t\t<ws/>\n");
    }

    #[test]
    fn test_block_element() {
        let mut xml = XmlWriter::new();
        xml.block_element(
            XmlMode::Indented,
            1,
            "drawing",
            |xml| xml.write_int_attr("width", 10),
            |xml| Leaf("line").emit_xml(xml, XmlMode::Indented, 2),
        );
        assert_eq!(xml.as_str(), "  <drawing width=\"10\">\n    <line/>\n  </drawing>\n");

        let mut xml = XmlWriter::new();
        xml.inline_element(XmlMode::Indented, 1, "p", |_| {}, |xml| xml.write_str("a b"));
        assert_eq!(xml.as_str(), "  <p>a b</p>\n");
    }

    #[test]
    fn test_batch() {
        let items = [Leaf("a"), Leaf("b")];
        assert_eq!(to_xml_batch(&items, &XmlConfig::COMPACT), vec!["<a/>", "<b/>"]);
    }
}
