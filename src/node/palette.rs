//! Symbol palette shown alongside expression inputs.

use std::fmt;
use std::sync::Arc;

use super::NodeBase;
use super::base::delegate_style;
use crate::capability::{append_common_xml_attributes, append_style_diagnostic};
use crate::error::{BuildError, BuildResult};
use crate::xml::{ToXml, XmlMode, XmlWriter};

/// Symbols a palette can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteSymbol {
    Pi,
    E,
    Infinity,
    SquareRoot,
    CubeRoot,
    Power,
    AbsoluteValue,
    PlusMinus,
    NotEqual,
    LessOrEqual,
    GreaterOrEqual,
    Union,
    Intersection,
    Theta,
    Degree,
}

impl PaletteSymbol {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
            Self::Infinity => "infinity",
            Self::SquareRoot => "sqrt",
            Self::CubeRoot => "cbrt",
            Self::Power => "power",
            Self::AbsoluteValue => "abs",
            Self::PlusMinus => "plus-minus",
            Self::NotEqual => "ne",
            Self::LessOrEqual => "le",
            Self::GreaterOrEqual => "ge",
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Theta => "theta",
            Self::Degree => "degree",
        }
    }
}

/// A palette of one or more symbol buttons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolPalette {
    base: NodeBase,
    symbols: Arc<[PaletteSymbol]>,
}

impl SymbolPalette {
    pub fn new(base: NodeBase, symbols: &[PaletteSymbol]) -> BuildResult<Self> {
        if symbols.is_empty() {
            return Err(BuildError::empty("symbol-palette", "symbols"));
        }
        Ok(Self {
            base,
            symbols: Arc::from(symbols),
        })
    }

    pub fn symbols(&self) -> &[PaletteSymbol] {
        &self.symbols
    }

    fn symbol_list(&self) -> String {
        let names: Vec<&str> = self.symbols.iter().map(|s| s.as_str()).collect();
        names.join(",")
    }
}

impl ToXml for SymbolPalette {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.empty_element(mode, indent, "symbol-palette", |xml| {
            xml.write_attr("symbols", &self.symbol_list());
            append_common_xml_attributes(&self.base, xml);
        });
    }
}

impl fmt::Display for SymbolPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolPalette{{{}}}", self.symbol_list())?;
        append_style_diagnostic(&self.base, f)
    }
}

delegate_style! {
    SymbolPalette => base;
}
