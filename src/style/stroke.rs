//! Stroke and fill styles for primitives and canvas borders.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

use crate::error::{BuildResult, require_text};
use crate::hash::impl_exact_eq;
use crate::xml::XmlWriter;

/// Miter limit assumed when none is given.
pub const DEFAULT_MITER_LIMIT: f64 = 10.0;

// =============================================================================
// Cap / Join
// =============================================================================

/// Line-end decoration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Corner treatment where segments meet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

// =============================================================================
// StrokeStyle
// =============================================================================

/// How a line or outline is painted.
///
/// The dash pattern is copied in on construction and shared read-only
/// afterwards; an empty pattern means a solid line.
#[derive(Debug, Clone)]
pub struct StrokeStyle {
    color_name: CompactString,
    cap: StrokeCap,
    join: StrokeJoin,
    width: f64,
    dash: Arc<[f64]>,
    alpha: f64,
    miter_limit: f64,
}

impl_exact_eq!(StrokeStyle; eq: [color_name, cap, join]; exact: [width, dash, alpha, miter_limit]);

impl StrokeStyle {
    /// A solid, opaque stroke with butt caps and miter joins.
    pub fn new(width: f64, color_name: impl Into<CompactString>) -> BuildResult<Self> {
        let color_name = color_name.into();
        require_text("stroke", "color name", &color_name)?;
        Ok(Self {
            color_name,
            cap: StrokeCap::Butt,
            join: StrokeJoin::Miter,
            width,
            dash: Arc::from([]),
            alpha: 1.0,
            miter_limit: DEFAULT_MITER_LIMIT,
        })
    }

    /// Set the dash pattern; an empty slice draws a solid line.
    pub fn with_dash(mut self, dash: &[f64]) -> Self {
        self.dash = Arc::from(dash);
        self
    }

    /// Set the opacity, `1.0` being opaque.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the line-end decoration.
    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set the corner decoration and its miter limit.
    pub fn with_join(mut self, join: StrokeJoin, miter_limit: f64) -> Self {
        self.join = join;
        self.miter_limit = miter_limit;
        self
    }

    /// Line width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Color name.
    pub fn color_name(&self) -> &str {
        &self.color_name
    }

    /// Dash pattern, empty for a solid line.
    pub fn dash(&self) -> &[f64] {
        &self.dash
    }

    /// Opacity, `1.0` being opaque.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Line-end decoration.
    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    /// Corner decoration.
    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    /// Limit on miter length relative to the width.
    pub fn miter_limit(&self) -> f64 {
        self.miter_limit
    }

    /// Append `{prefix}width`, `{prefix}color` and every non-default part.
    pub fn append_xml_attributes(&self, xml: &mut XmlWriter, prefix: &str) {
        xml.write_real_attr(&format!("{prefix}width"), self.width);
        xml.write_attr(&format!("{prefix}color"), &self.color_name);
        if !self.dash.is_empty() {
            xml.write_real_list_attr(&format!("{prefix}dash"), &self.dash);
        }
        xml.write_alpha_attr(&format!("{prefix}alpha"), self.alpha);
        if self.cap != StrokeCap::Butt {
            xml.write_attr(&format!("{prefix}cap"), self.cap.as_str());
        }
        if self.join == StrokeJoin::Miter {
            if self.miter_limit != DEFAULT_MITER_LIMIT {
                xml.write_real_attr(&format!("{prefix}miter-limit"), self.miter_limit);
            }
        } else {
            xml.write_attr(&format!("{prefix}join"), self.join.as_str());
        }
    }
}

impl fmt::Display for StrokeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stroke{{width={}, color={}", self.width, self.color_name)?;
        if !self.dash.is_empty() {
            write!(f, ", dash={:?}", &*self.dash)?;
        }
        write!(
            f,
            ", alpha={}, cap={}, join={}, miter-limit={}}}",
            self.alpha,
            self.cap.as_str(),
            self.join.as_str(),
            self.miter_limit
        )
    }
}

// =============================================================================
// FillStyle
// =============================================================================

/// How an area is painted.
#[derive(Debug, Clone)]
pub struct FillStyle {
    color_name: CompactString,
    alpha: f64,
}

impl_exact_eq!(FillStyle; eq: [color_name]; exact: [alpha]);

impl FillStyle {
    /// A fill of the named color at the given opacity.
    pub fn new(color_name: impl Into<CompactString>, alpha: f64) -> BuildResult<Self> {
        let color_name = color_name.into();
        require_text("fill", "color name", &color_name)?;
        Ok(Self { color_name, alpha })
    }

    /// Color name.
    pub fn color_name(&self) -> &str {
        &self.color_name
    }

    /// Opacity, `1.0` being opaque.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Append `fill-color` and, when translucent, `fill-alpha`.
    pub fn append_xml_attributes(&self, xml: &mut XmlWriter) {
        xml.write_attr("fill-color", &self.color_name);
        xml.write_alpha_attr("fill-alpha", self.alpha);
    }
}

impl fmt::Display for FillStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fill{{color={}, alpha={}}}", self.color_name, self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::hash::stable_hash;

    fn dashed(pattern: &[f64]) -> StrokeStyle {
        StrokeStyle::new(2.0, "black")
            .unwrap()
            .with_dash(pattern)
            .with_alpha(0.5)
            .with_cap(StrokeCap::Round)
            .with_join(StrokeJoin::Bevel, 4.0)
    }

    #[test]
    fn test_equal_contents_equal_hash() {
        let first = vec![3.0, 1.5];
        let second = vec![3.0, 1.5];
        let a = dashed(&first);
        let b = dashed(&second);
        assert_eq!(a, b);
        assert_eq!(stable_hash(&a), stable_hash(&b));
    }

    #[test]
    fn test_dash_is_copied_in() {
        let mut pattern = vec![4.0, 2.0];
        let stroke = dashed(&pattern);
        pattern[0] = 100.0;
        assert_eq!(stroke.dash(), &[4.0, 2.0]);

        let mut out = stroke.dash().to_vec();
        out[1] = 9.0;
        assert_eq!(stroke.dash(), &[4.0, 2.0]);
    }

    #[test]
    fn test_any_field_breaks_equality() {
        let base = dashed(&[1.0]);
        assert_ne!(base, dashed(&[1.0, 1.0]));
        assert_ne!(base, base.clone().with_alpha(0.25));
        assert_ne!(base, base.clone().with_cap(StrokeCap::Square));
        assert_ne!(base, base.clone().with_join(StrokeJoin::Bevel, 5.0));
    }

    #[test]
    fn test_default_attributes_omitted() {
        let stroke = StrokeStyle::new(1.0, "black").unwrap();
        let mut xml = XmlWriter::new();
        stroke.append_xml_attributes(&mut xml, "stroke-");
        assert_eq!(xml.as_str(), " stroke-width=\"1.0\" stroke-color=\"black\"");
    }

    #[test]
    fn test_non_default_attributes() {
        let mut xml = XmlWriter::new();
        dashed(&[3.0, 1.0]).append_xml_attributes(&mut xml, "border-");
        assert_eq!(
            xml.as_str(),
            " border-width=\"2.0\" border-color=\"black\" border-dash=\"3.0,1.0\" \
             border-alpha=\"0.5\" border-cap=\"round\" border-join=\"bevel\""
        );
    }

    #[test]
    fn test_miter_limit_only_for_miter_join() {
        let stroke = StrokeStyle::new(1.0, "red")
            .unwrap()
            .with_join(StrokeJoin::Miter, 4.0);
        let mut xml = XmlWriter::new();
        stroke.append_xml_attributes(&mut xml, "stroke-");
        assert!(xml.as_str().ends_with(" stroke-miter-limit=\"4.0\""));
    }

    #[test]
    fn test_builders_set_accessors() {
        let stroke = StrokeStyle::new(2.5, "green")
            .unwrap()
            .with_dash(&[2.0, 1.0])
            .with_alpha(0.5)
            .with_cap(StrokeCap::Round)
            .with_join(StrokeJoin::Bevel, 4.0);
        assert_eq!(stroke.width(), 2.5);
        assert_eq!(stroke.color_name(), "green");
        assert_eq!(stroke.dash(), &[2.0, 1.0]);
        assert_eq!(stroke.alpha(), 0.5);
        assert_eq!(stroke.cap(), StrokeCap::Round);
        assert_eq!(stroke.join(), StrokeJoin::Bevel);
        assert_eq!(stroke.miter_limit(), 4.0);
        let fill = FillStyle::new("pink", 0.25).unwrap();
        assert_eq!((fill.color_name(), fill.alpha()), ("pink", 0.25));
    }

    #[test]
    fn test_color_required() {
        assert_eq!(
            StrokeStyle::new(1.0, "").unwrap_err(),
            BuildError::missing("stroke", "color name")
        );
        assert!(FillStyle::new("", 1.0).is_err());
    }

    #[test]
    fn test_fill_attributes() {
        let mut xml = XmlWriter::new();
        FillStyle::new("yellow", 0.3).unwrap().append_xml_attributes(&mut xml);
        assert_eq!(xml.as_str(), " fill-color=\"yellow\" fill-alpha=\"0.3\"");
    }
}
