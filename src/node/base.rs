//! Shared node layers: style/background and child sequence.

use std::sync::Arc;

use compact_str::CompactString;

use super::DocNode;
use crate::capability::{HasChildren, HasStyle};
use crate::style::ObjectStyle;

// =============================================================================
// NodeBase
// =============================================================================

/// Style and background carried by every document node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodeBase {
    style: Option<ObjectStyle>,
    background: Option<CompactString>,
}

impl NodeBase {
    pub fn new(style: Option<ObjectStyle>, background: Option<&str>) -> Self {
        Self {
            style,
            background: background.map(CompactString::from),
        }
    }

    /// No style and no background.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn styled(style: ObjectStyle) -> Self {
        Self {
            style: Some(style),
            background: None,
        }
    }

    pub fn style(&self) -> Option<&ObjectStyle> {
        self.style.as_ref()
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Whether neither style nor background is set.
    pub fn is_plain(&self) -> bool {
        self.style.is_none() && self.background.is_none()
    }
}

impl HasStyle for NodeBase {
    fn node_base(&self) -> &NodeBase {
        self
    }
}

// =============================================================================
// ContainerBase
// =============================================================================

/// Node layer plus an ordered, shared, read-only child sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerBase {
    base: NodeBase,
    children: Arc<[DocNode]>,
}

impl ContainerBase {
    pub fn new(base: NodeBase, children: Vec<DocNode>) -> Self {
        Self {
            base,
            children: Arc::from(children),
        }
    }
}

impl HasStyle for ContainerBase {
    fn node_base(&self) -> &NodeBase {
        &self.base
    }
}

impl HasChildren for ContainerBase {
    fn children(&self) -> &[DocNode] {
        &self.children
    }
}

/// Implement [`HasStyle`] by delegating to a field path.
macro_rules! delegate_style {
    ($($ty:ty => $($field:ident).+;)*) => {
        $(
            impl $crate::capability::HasStyle for $ty {
                fn node_base(&self) -> &$crate::node::NodeBase {
                    $crate::capability::HasStyle::node_base(&self.$($field).+)
                }
            }
        )*
    };
}

/// Implement [`HasChildren`] by delegating to a container field.
macro_rules! delegate_children {
    ($($ty:ty => $field:ident;)*) => {
        $(
            impl $crate::capability::HasChildren for $ty {
                fn children(&self) -> &[$crate::node::DocNode] {
                    $crate::capability::HasChildren::children(&self.$field)
                }
            }
        )*
    };
}

pub(crate) use {delegate_children, delegate_style};
