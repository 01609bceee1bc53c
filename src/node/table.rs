//! Rectangular tables of non-wrapping cells.
//!
//! Cell content is always emitted inline, whatever the ambient mode:
//! whitespace inside a cell would render as visible space.

use std::fmt;
use std::sync::Arc;

use super::base::delegate_style;
use super::{Justification, NodeBase, NonwrappingSpan};
use crate::capability::{
    append_background_xml_attribute, append_style_diagnostic, append_style_xml_attributes,
};
use crate::error::{BuildError, BuildResult};
use crate::hash::impl_exact_eq;
use crate::style::StrokeStyle;
use crate::xml::{ToXml, XmlMode, XmlWriter, format_pixels};

/// Border and rule width assumed when the markup names none.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

// =============================================================================
// Options
// =============================================================================

/// How column widths or row heights are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableSizing {
    /// Every column (row) takes the size of the largest
    Uniform,
    /// Each column (row) takes the size of its own content
    Nonuniform,
}

impl TableSizing {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Nonuniform => "nonuniform",
        }
    }
}

/// Space between a cell's border and its content.
#[derive(Debug, Clone, Copy)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl_exact_eq!(Padding; eq: []; exact: [left, top, right, bottom]);

impl Padding {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(amount: f64) -> Self {
        Self::new(amount, amount, amount, amount)
    }
}

impl Padding {
    /// Whether all four sides are the same.
    pub fn is_uniform(&self) -> bool {
        self.left.to_bits() == self.top.to_bits()
            && self.left.to_bits() == self.right.to_bits()
            && self.left.to_bits() == self.bottom.to_bits()
    }

    /// `cell-margins`: one value when uniform, else `top,left,bottom,right`.
    fn append_xml_attribute(&self, xml: &mut XmlWriter) {
        if self.is_uniform() {
            xml.write_pixels_attr("cell-margins", self.left);
        } else {
            xml.write_attr("cell-margins", &self.to_string());
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            format_pixels(self.top),
            format_pixels(self.left),
            format_pixels(self.bottom),
            format_pixels(self.right)
        )
    }
}

/// Table layout and decoration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableOptions {
    pub column_sizing: TableSizing,
    pub row_sizing: TableSizing,
    /// Default justification of cell content
    pub justification: Justification,
    pub padding: Option<Padding>,
    /// Outer border
    pub border: Option<StrokeStyle>,
    /// Lines between rows
    pub hlines: Option<StrokeStyle>,
    /// Lines between columns
    pub vlines: Option<StrokeStyle>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            column_sizing: TableSizing::Uniform,
            row_sizing: TableSizing::Nonuniform,
            justification: Justification::Center,
            padding: None,
            border: None,
            hlines: None,
            vlines: None,
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// A `rows × columns` grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    base: NodeBase,
    rows: usize,
    columns: usize,
    /// Row-major
    cells: Arc<[NonwrappingSpan]>,
    options: TableOptions,
}

impl Table {
    /// Build from rows of cells. Every row must have as many cells as the first.
    pub fn new(base: NodeBase, rows: Vec<Vec<NonwrappingSpan>>, options: TableOptions) -> BuildResult<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != columns {
                let err = BuildError::RaggedTable {
                    row,
                    expected: columns,
                    found: cells.len(),
                };
                crate::log::debug!(%err, "rejected table");
                return Err(err);
            }
        }
        let num_rows = rows.len();
        let cells: Arc<[NonwrappingSpan]> = rows.into_iter().flatten().collect();
        Ok(Self {
            base,
            rows: num_rows,
            columns,
            cells,
            options,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&NonwrappingSpan> {
        if row < self.rows && column < self.columns {
            self.cells.get(row * self.columns + column)
        } else {
            None
        }
    }

    /// Read-only view of each row.
    pub fn rows(&self) -> impl Iterator<Item = &[NonwrappingSpan]> {
        (0..self.rows).map(move |r| &self.cells[r * self.columns..(r + 1) * self.columns])
    }

    /// Owned copy of the grid.
    pub fn cells(&self) -> Vec<Vec<NonwrappingSpan>> {
        self.rows().map(<[NonwrappingSpan]>::to_vec).collect()
    }

    /// Line widths, sizing, justification, `bgcolor`, `cell-margins`, then
    /// the style.
    fn append_xml_attributes(&self, xml: &mut XmlWriter) {
        let opts = &self.options;
        for (name, stroke) in [
            ("box-width", &opts.border),
            ("v-line-width", &opts.vlines),
            ("h-line-width", &opts.hlines),
        ] {
            let width = stroke.as_ref().map_or(0.0, StrokeStyle::width);
            if width != DEFAULT_LINE_WIDTH {
                xml.write_pixels_attr(name, width);
            }
        }
        if opts.column_sizing == TableSizing::Nonuniform {
            xml.write_attr("column-width", TableSizing::Nonuniform.as_str());
        }
        if opts.row_sizing == TableSizing::Uniform {
            xml.write_attr("row-height", TableSizing::Uniform.as_str());
        }
        if opts.justification != Justification::Center {
            xml.write_attr("justification", opts.justification.as_str());
        }
        append_background_xml_attribute(&self.base, xml);
        if let Some(padding) = &opts.padding {
            padding.append_xml_attribute(xml);
        }
        append_style_xml_attributes(&self.base, xml);
    }
}

impl ToXml for Table {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        let row_indent = match mode {
            XmlMode::Inline => indent,
            XmlMode::Indented => indent + 1,
        };
        xml.block_element(
            mode,
            indent,
            "table",
            |xml| self.append_xml_attributes(xml),
            |xml| {
                for row in self.rows() {
                    xml.inline_element(
                        mode,
                        row_indent,
                        "tr",
                        |_| {},
                        |xml| {
                            for cell in row {
                                cell.emit_as("tc", xml, XmlMode::Inline, row_indent);
                            }
                        },
                    );
                }
            },
        );
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table{{{}x{}", self.rows, self.columns)?;
        if let Some(padding) = &self.options.padding {
            write!(f, ", padding={padding}")?;
        }
        f.write_str("}")?;
        append_style_diagnostic(&self.base, f)
    }
}

delegate_style! {
    Table => base;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{DocNode, Text, WrappingSpan};
    use crate::style::ObjectStyle;

    fn cell(s: &str) -> NonwrappingSpan {
        NonwrappingSpan::new(NodeBase::plain(), vec![Text::new(NodeBase::plain(), s).into()])
    }

    fn grid() -> Vec<Vec<NonwrappingSpan>> {
        vec![vec![cell("a b"), cell("c")], vec![cell("d"), cell("e f")]]
    }

    #[test]
    fn test_rectangular_table_builds() {
        let table = Table::new(NodeBase::plain(), grid(), TableOptions::default()).unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.cell(1, 0), Some(&cell("d")));
        assert_eq!(table.cell(2, 0), None);
        assert_eq!(table.cells(), grid());
    }

    #[test]
    fn test_ragged_table_rejected() {
        let rows = vec![vec![cell("a"), cell("b")], vec![cell("c")]];
        let err = Table::new(NodeBase::plain(), rows, TableOptions::default()).unwrap_err();
        assert_eq!(err, BuildError::RaggedTable { row: 1, expected: 2, found: 1 });
    }

    #[test]
    fn test_cells_copy_is_independent() {
        let table = Table::new(NodeBase::plain(), grid(), TableOptions::default()).unwrap();
        let mut copy = table.cells();
        copy[0][0] = cell("changed");
        copy.pop();
        assert_eq!(table.cells(), grid());
    }

    #[test]
    fn test_inline_table() {
        let table = Table::new(NodeBase::plain(), grid(), TableOptions::default()).unwrap();
        assert_eq!(
            table.to_xml(XmlMode::Inline),
            "<table><tr><tc>a b</tc><tc>c</tc></tr><tr><tc>d</tc><tc>e f</tc></tr></table>"
        );
    }

    #[test]
    fn test_indented_table_keeps_cells_inline() {
        let nested: DocNode = WrappingSpan::new(
            NodeBase::plain(),
            vec![Text::new(NodeBase::plain(), "x").into(), Text::new(NodeBase::plain(), "y").into()],
        )
        .into();
        let rows = vec![vec![NonwrappingSpan::new(NodeBase::plain(), vec![nested]), cell("z")]];
        let table = Table::new(NodeBase::plain(), rows, TableOptions::default()).unwrap();
        assert_eq!(
            table.to_xml(XmlMode::Indented),
            "<table>\n  <tr><tc><span>xy</span></tc><tc>z</tc></tr>\n</table>\n"
        );
    }

    #[test]
    fn test_non_default_options() {
        let options = TableOptions {
            column_sizing: TableSizing::Nonuniform,
            row_sizing: TableSizing::Uniform,
            justification: Justification::Left,
            padding: Some(Padding::new(1.0, 2.0, 3.0, 4.0)),
            border: Some(StrokeStyle::new(2.0, "black").unwrap()),
            hlines: None,
            vlines: Some(StrokeStyle::new(0.5, "gray").unwrap()),
        };
        let base = NodeBase::new(Some(ObjectStyle::new().with_color("red")), Some("white"));
        let table = Table::new(base, vec![vec![cell("1")]], options).unwrap();
        assert_eq!(
            table.to_xml(XmlMode::Inline),
            "<table box-width=\"2\" v-line-width=\"0.5\" h-line-width=\"0\" column-width=\"nonuniform\" \
             row-height=\"uniform\" justification=\"left\" bgcolor=\"white\" cell-margins=\"2,1,4,3\" \
             color=\"red\"><tr><tc>1</tc></tr></table>"
        );
    }

    #[test]
    fn test_default_line_widths_omitted() {
        let stroke = || Some(StrokeStyle::new(1.0, "black").unwrap());
        let options = TableOptions {
            border: stroke(),
            hlines: stroke(),
            vlines: stroke(),
            padding: Some(Padding::uniform(2.0)),
            ..TableOptions::default()
        };
        let table = Table::new(NodeBase::plain(), vec![vec![cell("1")]], options).unwrap();
        assert_eq!(
            table.to_xml(XmlMode::Inline),
            "<table cell-margins=\"2\"><tr><tc>1</tc></tr></table>"
        );
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(NodeBase::plain(), Vec::new(), TableOptions::default()).unwrap();
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.to_xml(XmlMode::Inline), "<table></table>");
    }

    #[test]
    fn test_padding_participates_in_equality() {
        let a = Table::new(NodeBase::plain(), grid(), TableOptions::default()).unwrap();
        let options = TableOptions {
            padding: Some(Padding::uniform(2.0)),
            ..TableOptions::default()
        };
        let b = Table::new(NodeBase::plain(), grid(), options).unwrap();
        assert_ne!(a, b);
    }
}
