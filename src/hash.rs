//! Deterministic hashing and exact equality for the instance model
//!
//! Provides cross-process deterministic hashing using blake3, and the
//! exact floating-point comparison every node uses so that equal values
//! always hash equally.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

// =============================================================================
// StableHasher - Builder Pattern
// =============================================================================

/// A deterministic hasher using blake3
///
/// Produces the same output across process restarts for the same input, so
/// structural hashes can be persisted alongside generated banks. It also
/// implements [`Hasher`], which lets any `Hash` type feed it.
#[derive(Clone)]
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    /// Create a new StableHasher
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Update with raw bytes
    #[inline]
    pub fn update(mut self, data: &[u8]) -> Self {
        self.inner.update(data);
        self
    }

    /// Update with a string
    #[inline]
    pub fn update_str(self, s: &str) -> Self {
        self.update_usize(s.len()).update(s.as_bytes())
    }

    /// Update with a u64 value (little-endian)
    #[inline]
    pub fn update_u64(self, v: u64) -> Self {
        self.update(&v.to_le_bytes())
    }

    /// Update with a usize value (little-endian, widened to u64)
    #[inline]
    pub fn update_usize(self, v: usize) -> Self {
        self.update_u64(v as u64)
    }

    /// Update with the bit pattern of an f64
    #[inline]
    pub fn update_f64(self, v: f64) -> Self {
        self.update_u64(v.to_bits())
    }

    /// Update with any `Hash` value
    #[inline]
    pub fn update_hash<T: Hash + ?Sized>(mut self, value: &T) -> Self {
        value.hash(&mut self);
        self
    }

    /// Finish and return the hash as u64
    ///
    /// Takes the first 8 bytes of blake3 output as little-endian u64.
    #[inline]
    pub fn finish(self) -> u64 {
        digest_u64(&self.inner)
    }
}

impl Default for StableHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for StableHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    // Platform-independent widths for the integer writes `Hash` impls use.
    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.inner.update(&(i as u64).to_le_bytes());
    }

    #[inline]
    fn write_isize(&mut self, i: isize) {
        self.inner.update(&(i as i64).to_le_bytes());
    }

    #[inline]
    fn finish(&self) -> u64 {
        digest_u64(&self.inner)
    }
}

fn digest_u64(hasher: &blake3::Hasher) -> u64 {
    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Structural hash of any `Hash` value, stable across processes.
pub fn stable_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    StableHasher::new().update_hash(value).finish()
}

// =============================================================================
// ExactEq - bit-exact float comparison
// =============================================================================

/// Exact equality and matching hash for floating-point fields.
///
/// Values compare by bit pattern: `NaN` equals itself and `0.0` differs from
/// `-0.0`. Tolerance-based comparison would break `a == b ⇒ hash(a) == hash(b)`.
pub trait ExactEq {
    /// Compare two values by bit pattern.
    fn exact_eq(&self, other: &Self) -> bool;

    /// Feed the same bits [`ExactEq::exact_eq`] compares.
    fn exact_hash<H: Hasher>(&self, state: &mut H);
}

impl ExactEq for f64 {
    #[inline]
    fn exact_eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }

    #[inline]
    fn exact_hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.to_bits());
    }
}

impl ExactEq for Option<f64> {
    fn exact_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.exact_eq(b),
            (None, None) => true,
            _ => false,
        }
    }

    fn exact_hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Some(v) => {
                state.write_u8(1);
                v.exact_hash(state);
            }
            None => state.write_u8(0),
        }
    }
}

impl ExactEq for [f64] {
    fn exact_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.exact_eq(b))
    }

    fn exact_hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for v in self {
            v.exact_hash(state);
        }
    }
}

impl ExactEq for Arc<[f64]> {
    #[inline]
    fn exact_eq(&self, other: &Self) -> bool {
        (**self).exact_eq(&**other)
    }

    #[inline]
    fn exact_hash<H: Hasher>(&self, state: &mut H) {
        (**self).exact_hash(state)
    }
}

/// Implement `PartialEq`, `Eq` and `Hash` over an ordered field list.
///
/// `eq` fields use their own `PartialEq`/`Hash`; `exact` fields go through
/// [`ExactEq`]. List the layer-below field first so the comparison reads as
/// "everything the base compares, then this type's own fields".
///
/// # Example
/// ```ignore
/// impl_exact_eq!(HSpace; eq: [base]; exact: [width]);
/// ```
macro_rules! impl_exact_eq {
    ($ty:ty; eq: [$($eq:ident),* $(,)?]; exact: [$($exact:ident),* $(,)?]) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                true
                    $(&& self.$eq == other.$eq)*
                    $(&& $crate::hash::ExactEq::exact_eq(&self.$exact, &other.$exact))*
            }
        }

        impl Eq for $ty {}

        impl ::std::hash::Hash for $ty {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                $(::std::hash::Hash::hash(&self.$eq, state);)*
                $($crate::hash::ExactEq::exact_hash(&self.$exact, state);)*
            }
        }
    };
}

pub(crate) use impl_exact_eq;
