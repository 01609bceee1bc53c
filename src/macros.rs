//! Sum-type generation macros
//!
//! [`DocNode`](crate::node::DocNode) and [`Primitive`](crate::primitive::Primitive)
//! are closed enums with one concrete struct per variant. Every variant needs
//! the same conversion, dispatch and accessor code; these macros write it
//! once. All macros use `paste` internally for identifier concatenation.

// =============================================================================
// Closed node enum
// =============================================================================

/// Define a closed node enum and its per-variant boilerplate.
///
/// # Generated items
/// - the enum, deriving `Debug, Clone, PartialEq, Eq, Hash`
/// - `From<Type>` for every variant
/// - `ToXml` and `Display` forwarding to the wrapped value
/// - `kind_name(&self) -> &'static str` (the variant name)
/// - `is_xxx(&self) -> bool` and `as_xxx(&self) -> Option<&Type>` per variant
/// - for each `dyn` line, `fn name(&self) -> &dyn Trait` over every variant
///
/// # Example
/// ```ignore
/// node_enum! {
///     pub enum Shape {
///         line => Line(Line),
///         oval => Oval(Oval),
///     }
///     dyn as_styled: HasStyle;
/// }
/// ```
macro_rules! node_enum {
    // The variant list travels as one token group so it can be repeated
    // once per `dyn` line.
    (@dyns $enum:ident $variants:tt $($dyn_name:ident: $dyn_trait:path;)*) => {
        $(
            $crate::macros::node_enum!(@dyn $enum $variants $dyn_name: $dyn_trait);
        )*
    };

    (@dyn $enum:ident [$($variant:ident),*] $dyn_name:ident: $dyn_trait:path) => {
        impl $enum {
            #[allow(dead_code)]
            pub(crate) fn $dyn_name(&self) -> &dyn $dyn_trait {
                match self {
                    $(Self::$variant(v) => v,)*
                }
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $enum:ident {
            $($method:ident => $variant:ident($ty:ty)),* $(,)?
        }
        $(dyn $dyn_name:ident: $dyn_trait:path;)*
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $enum {
            $(
                #[allow(missing_docs)]
                $variant($ty),
            )*
        }

        $(
            impl From<$ty> for $enum {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*

        impl $crate::xml::ToXml for $enum {
            fn emit_xml(
                &self,
                xml: &mut $crate::xml::XmlWriter,
                mode: $crate::xml::XmlMode,
                indent: usize,
            ) {
                match self {
                    $(Self::$variant(v) => $crate::xml::ToXml::emit_xml(v, xml, mode, indent),)*
                }
            }
        }

        impl ::std::fmt::Display for $enum {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant(v) => ::std::fmt::Display::fmt(v, f),)*
                }
            }
        }

        impl $enum {
            /// Name of the concrete variant.
            pub fn kind_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)*
                }
            }

            ::paste::paste! {
                $(
                    #[doc = "Check if this is a `" $variant "`"]
                    #[inline]
                    pub fn [<is_ $method>](&self) -> bool {
                        matches!(self, Self::$variant(_))
                    }

                    #[doc = "Try to get as `" $variant "` reference"]
                    #[inline]
                    pub fn [<as_ $method>](&self) -> Option<&$ty> {
                        match self {
                            Self::$variant(v) => Some(v),
                            #[allow(unreachable_patterns)]
                            _ => None,
                        }
                    }
                )*
            }
        }

        $crate::macros::node_enum!(@dyns $enum [$($variant),*] $($dyn_name: $dyn_trait;)*);
    };
}

pub(crate) use node_enum;
