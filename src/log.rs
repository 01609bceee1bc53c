//! Conditional logging macros.
//!
//! With the `tracing` feature these re-export the `tracing` macros.
//! Without it they expand to nothing.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
macro_rules! discard {
    ($($arg:tt)*) => {};
}

// Re-exported under new names so the import never has to resolve `warn`,
// which is also a built-in attribute.
#[cfg(not(feature = "tracing"))]
pub(crate) use {discard as debug, discard as warn};
