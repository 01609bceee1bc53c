//! mathdoc-inst - Immutable instance documents for math assessment content
//!
//! ## Core Concepts
//!
//! **Instance documents**: fully resolved, rendering-ready content trees.
//! Nodes are validated once at construction and read-only afterwards, so they
//! can be shared across threads freely.
//!
//! **Two node families**: [`DocNode`] is the document tree proper (text,
//! containers, math structures, inputs, canvases); [`Primitive`] is the set of
//! drawing instructions owned by canvases. Neither appears inside the other
//! except through a canvas.
//!
//! **Structural identity**: equality and hashing cover every field, with
//! floats compared bit-exactly so equal nodes always hash equally. This is
//! what [`InstanceBank`] de-duplicates on.
//!
//! **Two-mode XML**: every node emits itself inline or indented; content
//! where whitespace would be visible (table cells, spans, fraction parts)
//! always stays inline.
//!
//! ## Modules
//! - `style`: style values (`ObjectStyle`, `StrokeStyle`, `FillStyle`, `RectangleShape`)
//! - `node`: document nodes and their shared layers
//! - `primitive`: drawing primitives
//! - `capability`: layer traits and shared attribute emission
//! - `xml`: `XmlWriter`, `ToXml`, modes and config
//! - `bank`: de-duplicating instance storage
//!
//! ## Usage
//!
//! ```
//! use mathdoc_inst::prelude::*;
//!
//! let space: DocNode = HSpace::new(NodeBase::plain(), 2.5).into();
//! assert_eq!(space.to_xml(XmlMode::Inline), "<h-space width=\"2.5\"/>");
//!
//! let frac = Fraction::new(
//!     NodeBase::plain(),
//!     NonwrappingSpan::new(NodeBase::plain(), vec![Text::new(NodeBase::plain(), "1").into()]),
//!     NonwrappingSpan::new(NodeBase::plain(), vec![Text::new(NodeBase::plain(), "2").into()]),
//! );
//! assert_eq!(
//!     frac.to_xml(XmlMode::Inline),
//!     "<fraction><numerator>1</numerator><denominator>2</denominator></fraction>"
//! );
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Error types
pub mod error;

/// Structural hashing and exact float equality
pub mod hash;

/// XML emission
pub mod xml;

/// Style value types
pub mod style;

/// Layer traits and shared attribute emission
pub mod capability;

/// Document nodes
pub mod node;

/// Drawing primitives
pub mod primitive;

/// De-duplicating instance storage
pub mod bank;

/// Prelude for common imports
pub mod prelude;

mod log;
mod macros;

// =============================================================================
// Re-exports
// =============================================================================

// Node families
pub use node::{DocNode, NodeBase};
pub use primitive::Primitive;

// Capabilities
pub use capability::{HasCanvas, HasChildren, HasInputBinding, HasStyle};

// XML
pub use xml::{ToXml, XmlConfig, XmlMode, XmlWriter, to_xml_batch};

// Hashing
pub use hash::{StableHasher, stable_hash};

// Banks
pub use bank::{InstanceBank, SharedInstanceBank, structural_hashes};

// Error types
pub use error::{BuildError, BuildResult};
