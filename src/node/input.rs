//! Interactive input controls.
//!
//! Every input submits its value under a name and may be enabled only while
//! an evaluation variable holds a given value. Field-style inputs add how
//! their entry box is drawn.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

use super::base::delegate_style;
use super::container::write_children_diagnostic;
use super::{DocNode, NodeBase, NonwrappingSpan};
use crate::capability::{
    HasChildren, HasInputBinding, HasStyle, append_common_xml_attributes,
    append_input_field_xml_attributes, append_input_xml_attributes, append_style_diagnostic,
    emit_children_xml,
};
use crate::error::{BuildError, BuildResult, require_text};
use crate::hash::impl_exact_eq;
use crate::xml::{ToXml, XmlMode, XmlWriter};

// =============================================================================
// Input layers
// =============================================================================

/// "Enabled only while `var_name` equals `var_value`."
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnableCondition {
    var_name: CompactString,
    var_value: i64,
}

impl EnableCondition {
    pub fn new(var_name: impl Into<CompactString>, var_value: i64) -> BuildResult<Self> {
        let var_name = var_name.into();
        require_text("input", "enabling variable name", &var_name)?;
        Ok(Self { var_name, var_value })
    }

    /// Variable tested by the condition.
    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    /// Value the variable must hold for the input to be enabled.
    pub fn var_value(&self) -> i64 {
        self.var_value
    }
}

/// How a field's entry box is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FieldStyle {
    #[default]
    Box,
    Underline,
}

impl FieldStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Underline => "underline",
        }
    }
}

/// Node layer plus submission name and enable condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputBase {
    base: NodeBase,
    name: CompactString,
    enabled_when: Option<EnableCondition>,
}

impl InputBase {
    pub fn new(base: NodeBase, name: impl Into<CompactString>) -> BuildResult<Self> {
        let name = name.into();
        require_text("input", "name", &name)?;
        Ok(Self {
            base,
            name,
            enabled_when: None,
        })
    }

    /// Enable the input only while `condition` holds.
    pub fn with_enabled_when(mut self, condition: EnableCondition) -> Self {
        self.enabled_when = Some(condition);
        self
    }

    /// Name the value is submitted under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Condition gating the input, if any.
    pub fn enabled_when(&self) -> Option<&EnableCondition> {
        self.enabled_when.as_ref()
    }

    fn write_diagnostic(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name={}", self.name)?;
        if let Some(cond) = &self.enabled_when {
            write!(f, ", enabled-when {}={}", cond.var_name, cond.var_value)?;
        }
        Ok(())
    }
}

impl HasStyle for InputBase {
    fn node_base(&self) -> &NodeBase {
        &self.base
    }
}

impl HasInputBinding for InputBase {
    fn input(&self) -> &InputBase {
        self
    }
}

/// Input layer plus field style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldBase {
    input: InputBase,
    style: FieldStyle,
}

impl FieldBase {
    pub fn new(input: InputBase, style: FieldStyle) -> Self {
        Self { input, style }
    }
}

impl HasStyle for FieldBase {
    fn node_base(&self) -> &NodeBase {
        self.input.node_base()
    }
}

impl HasInputBinding for FieldBase {
    fn input(&self) -> &InputBase {
        &self.input
    }

    fn field_style(&self) -> Option<FieldStyle> {
        Some(self.style)
    }
}

/// Implement [`HasInputBinding`] by delegating to an input or field layer.
macro_rules! delegate_input {
    ($($ty:ty => $field:ident;)*) => {
        $(
            impl HasInputBinding for $ty {
                fn input(&self) -> &InputBase {
                    self.$field.input()
                }

                fn field_style(&self) -> Option<FieldStyle> {
                    self.$field.field_style()
                }
            }
        )*
    };
}

// =============================================================================
// Checkbox / RadioButton
// =============================================================================

/// Shared emission for labelled choice controls.
fn emit_choice(
    node: &(impl HasInputBinding + HasChildren),
    kind: &str,
    value: i64,
    xml: &mut XmlWriter,
    mode: XmlMode,
    indent: usize,
) {
    xml.inline_element(
        mode,
        indent,
        "input",
        |xml| {
            xml.write_attr("type", kind);
            append_input_xml_attributes(node, xml);
            xml.write_int_attr("value", value);
            append_common_xml_attributes(node, xml);
        },
        |xml| emit_children_xml(node, xml, XmlMode::Inline, indent),
    );
}

/// A checkbox; `value` is the bit it contributes to the submitted flag set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checkbox {
    input: InputBase,
    value: i64,
    label: Arc<[DocNode]>,
}

impl Checkbox {
    pub fn new(input: InputBase, value: i64, label: Vec<DocNode>) -> Self {
        Self {
            input,
            value,
            label: Arc::from(label),
        }
    }

    /// Bit contributed when checked.
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl HasChildren for Checkbox {
    fn children(&self) -> &[DocNode] {
        &self.label
    }
}

impl ToXml for Checkbox {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_choice(self, "checkbox", self.value, xml, mode, indent);
    }
}

impl fmt::Display for Checkbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Checkbox{")?;
        self.input.write_diagnostic(f)?;
        write!(f, ", value={}}}", self.value)?;
        append_style_diagnostic(self, f)?;
        write_children_diagnostic(&self.label, f)
    }
}

/// One choice in a group of radio buttons sharing a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RadioButton {
    input: InputBase,
    value: i64,
    label: Arc<[DocNode]>,
}

impl RadioButton {
    pub fn new(input: InputBase, value: i64, label: Vec<DocNode>) -> Self {
        Self {
            input,
            value,
            label: Arc::from(label),
        }
    }

    /// Value submitted when selected.
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl HasChildren for RadioButton {
    fn children(&self) -> &[DocNode] {
        &self.label
    }
}

impl ToXml for RadioButton {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_choice(self, "radio-button", self.value, xml, mode, indent);
    }
}

impl fmt::Display for RadioButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RadioButton{")?;
        self.input.write_diagnostic(f)?;
        write!(f, ", value={}}}", self.value)?;
        append_style_diagnostic(self, f)?;
        write_children_diagnostic(&self.label, f)
    }
}

// =============================================================================
// Entry fields
// =============================================================================

/// `<input type="kind" name... [style] own... common.../>`
fn emit_field(
    field: &FieldBase,
    kind: &str,
    xml: &mut XmlWriter,
    mode: XmlMode,
    indent: usize,
    own: impl FnOnce(&mut XmlWriter),
) {
    xml.empty_element(mode, indent, "input", |xml| {
        xml.write_attr("type", kind);
        append_input_field_xml_attributes(field, xml);
        own(xml);
        append_common_xml_attributes(field, xml);
    });
}

fn write_width(xml: &mut XmlWriter, width: Option<u32>) {
    if let Some(width) = width {
        xml.write_int_attr("width", i64::from(width));
    }
}

/// Entry of a real number.
///
/// `minus_as` is the value submitted when the entry is a bare minus sign.
#[derive(Debug, Clone)]
pub struct RealField {
    field: FieldBase,
    width: Option<u32>,
    default: Option<f64>,
    minus_as: Option<f64>,
}

impl_exact_eq!(RealField; eq: [field, width]; exact: [default, minus_as]);

impl RealField {
    pub fn new(input: InputBase, style: FieldStyle, width: Option<u32>) -> Self {
        Self {
            field: FieldBase::new(input, style),
            width,
            default: None,
            minus_as: None,
        }
    }

    /// Value shown before the student enters anything.
    pub fn with_default(mut self, value: f64) -> Self {
        self.default = Some(value);
        self
    }

    /// Value submitted for a bare minus sign.
    pub fn with_minus_as(mut self, value: f64) -> Self {
        self.minus_as = Some(value);
        self
    }

    /// Entry box width in characters.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Initial value, if any.
    pub fn default_value(&self) -> Option<f64> {
        self.default
    }

    /// Value submitted for a bare minus sign, if any.
    pub fn minus_as(&self) -> Option<f64> {
        self.minus_as
    }
}

impl ToXml for RealField {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_field(&self.field, "real", xml, mode, indent, |xml| {
            write_width(xml, self.width);
            if let Some(default) = self.default {
                xml.write_real_attr("default", default);
            }
            if let Some(minus_as) = self.minus_as {
                xml.write_real_attr("treat-minus-as", minus_as);
            }
        });
    }
}

impl fmt::Display for RealField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RealField{")?;
        self.field.input.write_diagnostic(f)?;
        if let Some(default) = self.default {
            write!(f, ", default={default}")?;
        }
        if let Some(minus_as) = self.minus_as {
            write!(f, ", minus-as={minus_as}")?;
        }
        f.write_str("}")?;
        append_style_diagnostic(self, f)
    }
}

/// Entry of an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegerField {
    field: FieldBase,
    width: Option<u32>,
    default: Option<i64>,
    minus_as: Option<i64>,
}

impl IntegerField {
    pub fn new(input: InputBase, style: FieldStyle, width: Option<u32>) -> Self {
        Self {
            field: FieldBase::new(input, style),
            width,
            default: None,
            minus_as: None,
        }
    }

    /// Value shown before the student enters anything.
    pub fn with_default(mut self, value: i64) -> Self {
        self.default = Some(value);
        self
    }

    /// Value submitted for a bare minus sign.
    pub fn with_minus_as(mut self, value: i64) -> Self {
        self.minus_as = Some(value);
        self
    }

    /// Entry box width in characters.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Initial value, if any.
    pub fn default_value(&self) -> Option<i64> {
        self.default
    }

    /// Value submitted for a bare minus sign, if any.
    pub fn minus_as(&self) -> Option<i64> {
        self.minus_as
    }
}

impl ToXml for IntegerField {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_field(&self.field, "integer", xml, mode, indent, |xml| {
            write_width(xml, self.width);
            if let Some(default) = self.default {
                xml.write_int_attr("default", default);
            }
            if let Some(minus_as) = self.minus_as {
                xml.write_int_attr("treat-minus-as", minus_as);
            }
        });
    }
}

impl fmt::Display for IntegerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IntegerField{")?;
        self.field.input.write_diagnostic(f)?;
        if let Some(default) = self.default {
            write!(f, ", default={default}")?;
        }
        if let Some(minus_as) = self.minus_as {
            write!(f, ", minus-as={minus_as}")?;
        }
        f.write_str("}")?;
        append_style_diagnostic(self, f)
    }
}

/// Entry of a symbolic expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpressionField {
    field: FieldBase,
    width: Option<u32>,
}

impl ExpressionField {
    pub fn new(input: InputBase, style: FieldStyle, width: Option<u32>) -> Self {
        Self {
            field: FieldBase::new(input, style),
            width,
        }
    }

    /// Entry box width in characters.
    pub fn width(&self) -> Option<u32> {
        self.width
    }
}

impl ToXml for ExpressionField {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_field(&self.field, "expression", xml, mode, indent, |xml| {
            write_width(xml, self.width);
        });
    }
}

impl fmt::Display for ExpressionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExpressionField{")?;
        self.field.input.write_diagnostic(f)?;
        f.write_str("}")?;
        append_style_diagnostic(self, f)
    }
}

/// Entry of an (x, y) point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointField {
    field: FieldBase,
    width: Option<u32>,
}

impl PointField {
    pub fn new(input: InputBase, style: FieldStyle, width: Option<u32>) -> Self {
        Self {
            field: FieldBase::new(input, style),
            width,
        }
    }

    /// Entry box width in characters.
    pub fn width(&self) -> Option<u32> {
        self.width
    }
}

impl ToXml for PointField {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        emit_field(&self.field, "point", xml, mode, indent, |xml| {
            write_width(xml, self.width);
        });
    }
}

impl fmt::Display for PointField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PointField{")?;
        self.field.input.write_diagnostic(f)?;
        f.write_str("}")?;
        append_style_diagnostic(self, f)
    }
}

// =============================================================================
// Dropdown
// =============================================================================

/// One selectable entry of a [`Dropdown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropdownOption {
    value: i64,
    label: NonwrappingSpan,
}

impl DropdownOption {
    pub fn new(value: i64, label: NonwrappingSpan) -> Self {
        Self { value, label }
    }

    /// Value submitted when this option is chosen.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Text shown for the option.
    pub fn label(&self) -> &NonwrappingSpan {
        &self.label
    }
}

impl ToXml for DropdownOption {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        xml.inline_element(
            mode,
            indent,
            "option",
            |xml| {
                xml.write_int_attr("value", self.value);
                append_common_xml_attributes(&self.label, xml);
            },
            |xml| emit_children_xml(&self.label, xml, XmlMode::Inline, indent),
        );
    }
}

/// A drop-down list of labelled values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dropdown {
    input: InputBase,
    options: Arc<[DropdownOption]>,
    default: Option<i64>,
}

impl Dropdown {
    pub fn new(input: InputBase, options: Vec<DropdownOption>) -> BuildResult<Self> {
        if options.is_empty() {
            return Err(BuildError::empty("dropdown", "options"));
        }
        Ok(Self {
            input,
            options: Arc::from(options),
            default: None,
        })
    }

    /// Option selected initially.
    pub fn with_default(mut self, value: i64) -> Self {
        self.default = Some(value);
        self
    }

    /// Options in display order.
    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    /// Initially selected value, if any.
    pub fn default_value(&self) -> Option<i64> {
        self.default
    }
}

impl ToXml for Dropdown {
    fn emit_xml(&self, xml: &mut XmlWriter, mode: XmlMode, indent: usize) {
        let option_indent = match mode {
            XmlMode::Inline => indent,
            XmlMode::Indented => indent + 1,
        };
        xml.block_element(
            mode,
            indent,
            "input",
            |xml| {
                xml.write_attr("type", "dropdown");
                append_input_xml_attributes(self, xml);
                if let Some(default) = self.default {
                    xml.write_int_attr("default", default);
                }
                append_common_xml_attributes(self, xml);
            },
            |xml| {
                for option in self.options.iter() {
                    option.emit_xml(xml, mode, option_indent);
                }
            },
        );
    }
}

impl fmt::Display for Dropdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Dropdown{")?;
        self.input.write_diagnostic(f)?;
        for option in self.options.iter() {
            write!(f, ", {}={}", option.value, option.label)?;
        }
        f.write_str("}")?;
        append_style_diagnostic(self, f)
    }
}

delegate_style! {
    Checkbox => input;
    RadioButton => input;
    RealField => field;
    IntegerField => field;
    ExpressionField => field;
    PointField => field;
    Dropdown => input;
}

delegate_input! {
    Checkbox => input;
    RadioButton => input;
    RealField => field;
    IntegerField => field;
    ExpressionField => field;
    PointField => field;
    Dropdown => input;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::stable_hash;
    use crate::node::Text;

    fn input(name: &str) -> InputBase {
        InputBase::new(NodeBase::plain(), name).unwrap()
    }

    fn label(s: &str) -> Vec<DocNode> {
        vec![Text::new(NodeBase::plain(), s).into()]
    }

    #[test]
    fn test_name_required() {
        assert_eq!(
            InputBase::new(NodeBase::plain(), "").unwrap_err(),
            BuildError::missing("input", "name")
        );
        assert!(EnableCondition::new("", 1).is_err());
    }

    #[test]
    fn test_radio_button_xml() {
        let cond = EnableCondition::new("show", 1).unwrap();
        let radio = RadioButton::new(input("q1").with_enabled_when(cond), 2, label("Yes"));
        assert_eq!(
            radio.to_xml(XmlMode::Inline),
            "<input type=\"radio-button\" name=\"q1\" enabled-var-name=\"show\" \
             enabled-var-value=\"1\" value=\"2\">Yes</input>"
        );
        assert_eq!(radio.name(), "q1");
        assert_eq!(radio.enabled_when().map(EnableCondition::var_value), Some(1));
    }

    #[test]
    fn test_checkbox_label_inline_when_indented() {
        let check = Checkbox::new(input("c"), 4, label("a b"));
        assert_eq!(
            check.to_xml(XmlMode::Indented),
            "<input type=\"checkbox\" name=\"c\" value=\"4\">a b</input>\n"
        );
        assert_eq!(check.num_children(), 1);
    }

    #[test]
    fn test_real_field_xml() {
        let field = RealField::new(input("ans"), FieldStyle::Underline, Some(6))
            .with_default(0.5)
            .with_minus_as(-1.0);
        assert_eq!(
            field.to_xml(XmlMode::Inline),
            "<input type=\"real\" name=\"ans\" style=\"underline\" width=\"6\" default=\"0.5\" \
             treat-minus-as=\"-1.0\"/>"
        );
        assert_eq!(field.field_style(), Some(FieldStyle::Underline));
    }

    #[test]
    fn test_box_style_is_default() {
        let field = IntegerField::new(input("n"), FieldStyle::Box, None).with_default(3);
        assert_eq!(
            field.to_xml(XmlMode::Inline),
            "<input type=\"integer\" name=\"n\" default=\"3\"/>"
        );
    }

    #[test]
    fn test_expression_and_point_fields() {
        let expr = ExpressionField::new(input("e"), FieldStyle::Box, Some(20));
        assert_eq!(expr.to_xml(XmlMode::Inline), "<input type=\"expression\" name=\"e\" width=\"20\"/>");
        let point = PointField::new(input("p"), FieldStyle::Box, None);
        assert_eq!(point.to_xml(XmlMode::Inline), "<input type=\"point\" name=\"p\"/>");
    }

    #[test]
    fn test_field_style_participates_in_equality() {
        let a = PointField::new(input("p"), FieldStyle::Box, None);
        let b = PointField::new(input("p"), FieldStyle::Underline, None);
        let c = PointField::new(input("p"), FieldStyle::Box, None);
        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_eq!(stable_hash(&a), stable_hash(&c));
    }

    #[test]
    fn test_field_display_includes_minus_as() {
        let real = RealField::new(input("x"), FieldStyle::Box, None)
            .with_default(0.5)
            .with_minus_as(-1.5);
        assert_eq!(real.to_string(), "RealField{name=x, default=0.5, minus-as=-1.5}");
        let int = IntegerField::new(input("n"), FieldStyle::Box, None).with_minus_as(-1);
        assert_eq!(int.to_string(), "IntegerField{name=n, minus-as=-1}");
        let plain = IntegerField::new(input("n"), FieldStyle::Box, None);
        assert_eq!(plain.to_string(), "IntegerField{name=n}");
    }

    #[test]
    fn test_real_field_exact_default() {
        let a = RealField::new(input("x"), FieldStyle::Box, None).with_default(0.1 + 0.2);
        let b = RealField::new(input("x"), FieldStyle::Box, None).with_default(0.3);
        assert_ne!(a, b);
    }

    #[test]
    fn test_dropdown() {
        let span = |s: &str| NonwrappingSpan::new(NodeBase::plain(), label(s));
        let dropdown = Dropdown::new(
            input("pick"),
            vec![DropdownOption::new(1, span("one")), DropdownOption::new(2, span("two"))],
        )
        .unwrap()
        .with_default(2);
        assert_eq!(
            dropdown.to_xml(XmlMode::Inline),
            "<input type=\"dropdown\" name=\"pick\" default=\"2\"><option value=\"1\">one</option>\
             <option value=\"2\">two</option></input>"
        );
        assert_eq!(
            dropdown.to_xml(XmlMode::Indented),
            "<input type=\"dropdown\" name=\"pick\" default=\"2\">\n  <option value=\"1\">one</option>\n  \
             <option value=\"2\">two</option>\n</input>\n"
        );
        assert_eq!(
            Dropdown::new(input("pick"), Vec::new()).unwrap_err(),
            BuildError::empty("dropdown", "options")
        );
    }
}
