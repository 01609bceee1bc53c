//! Function graphs.
//!
//! The expression is produced and evaluated elsewhere; here it is an opaque,
//! already-serialized XML fragment re-emitted verbatim.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

use crate::error::{BuildResult, require_text};
use crate::hash::impl_exact_eq;
use crate::style::StrokeStyle;
use crate::xml::{ToXml, XmlMode, XmlWriter};

/// Default name of the independent variable.
pub const DEFAULT_DOMAIN_VAR: &str = "x";

/// A resolved expression in its XML form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Formula(Arc<str>);

impl Formula {
    pub fn new(xml: impl Into<Arc<str>>) -> BuildResult<Self> {
        let xml = xml.into();
        require_text("formula", "expression", &xml)?;
        Ok(Self(xml))
    }

    pub fn as_xml(&self) -> &str {
        &self.0
    }
}

/// How a formula is plotted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormulaStyle {
    /// A smooth curve, evaluated at every pixel column
    #[default]
    Curve,
}

impl FormulaStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Curve => "curve",
        }
    }
}

/// The graph of `formula` over `min_x..=max_x`.
#[derive(Debug, Clone)]
pub struct FormulaPrimitive {
    formula: Formula,
    domain_var: CompactString,
    stroke: Option<StrokeStyle>,
    style: Option<FormulaStyle>,
    min_x: f64,
    max_x: f64,
}

impl_exact_eq!(FormulaPrimitive; eq: [formula, domain_var, stroke, style]; exact: [min_x, max_x]);

impl FormulaPrimitive {
    /// A curve over `min_x..=max_x` in the default domain variable.
    pub fn new(formula: Formula, min_x: f64, max_x: f64) -> Self {
        Self {
            formula,
            domain_var: CompactString::from(DEFAULT_DOMAIN_VAR),
            stroke: None,
            style: Some(FormulaStyle::Curve),
            min_x,
            max_x,
        }
    }

    /// Plot style; `None` leaves it to the renderer.
    pub fn with_style(mut self, style: Option<FormulaStyle>) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> Option<FormulaStyle> {
        self.style
    }

    pub fn with_domain_var(mut self, name: impl Into<CompactString>) -> BuildResult<Self> {
        let name = name.into();
        require_text("formula", "domain variable", &name)?;
        self.domain_var = name;
        Ok(self)
    }

    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn domain_var(&self) -> &str {
        &self.domain_var
    }

    pub fn stroke(&self) -> Option<&StrokeStyle> {
        self.stroke.as_ref()
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }
}

impl ToXml for FormulaPrimitive {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        let expr_indent = match mode {
            XmlMode::Inline => indent,
            XmlMode::Indented => indent + 1,
        };
        xml.block_element(
            mode,
            indent,
            "formula",
            |xml| {
                if self.domain_var.as_str() != DEFAULT_DOMAIN_VAR {
                    xml.write_attr("domain-var", &self.domain_var);
                }
                if let Some(stroke) = &self.stroke {
                    stroke.append_xml_attributes(xml, "stroke-");
                }
                if let Some(style) = self.style {
                    xml.write_attr("style", style.as_str());
                }
                xml.write_real_attr("minx", self.min_x);
                xml.write_real_attr("maxx", self.max_x);
            },
            |xml| {
                xml.inline_element(mode, expr_indent, "expr", |_| {}, |xml| {
                    xml.write_str(self.formula.as_xml());
                });
            },
        );
    }
}

impl fmt::Display for FormulaPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Formula{{{} in [{},{}]: {}}}",
            self.domain_var,
            self.min_x,
            self.max_x,
            self.formula.as_xml()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;

    fn formula() -> Formula {
        Formula::new("<var name=\"x\"/>").unwrap()
    }

    #[test]
    fn test_formula_inline() {
        let graph = FormulaPrimitive::new(formula(), -1.0, 1.0);
        assert_eq!(
            graph.to_xml(XmlMode::Inline),
            "<formula style=\"curve\" minx=\"-1.0\" maxx=\"1.0\"><expr><var name=\"x\"/></expr></formula>"
        );
    }

    #[test]
    fn test_formula_without_style() {
        let graph = FormulaPrimitive::new(formula(), 0.0, 1.0).with_style(None);
        assert_eq!(
            graph.to_xml(XmlMode::Inline),
            "<formula minx=\"0.0\" maxx=\"1.0\"><expr><var name=\"x\"/></expr></formula>"
        );
        assert_ne!(graph, FormulaPrimitive::new(formula(), 0.0, 1.0));
    }

    #[test]
    fn test_formula_indented_with_domain_var() {
        let graph = FormulaPrimitive::new(formula(), 0.0, 6.5)
            .with_domain_var("t")
            .unwrap()
            .with_stroke(StrokeStyle::new(2.0, "red").unwrap());
        assert_eq!(
            graph.to_xml(XmlMode::Indented),
            "<formula domain-var=\"t\" stroke-width=\"2.0\" stroke-color=\"red\" style=\"curve\" minx=\"0.0\" \
             maxx=\"6.5\">\n  \
             <expr><var name=\"x\"/></expr>\n</formula>\n"
        );
    }

    #[test]
    fn test_formula_required() {
        assert_eq!(Formula::new("").unwrap_err(), BuildError::missing("formula", "expression"));
        assert!(FormulaPrimitive::new(formula(), 0.0, 1.0).with_domain_var("").is_err());
    }
}
