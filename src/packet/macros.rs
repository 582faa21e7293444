/// ffi_enum! {}
///
/// Declares a transparent newtype over a wire integer, with associated constants for the known
/// values and a case-insensitive lookup by mnemonic. Unknown values are representable and print
/// as such.
macro_rules! ffi_enum {
    (
        $( #[$attrs:meta] )*
        $v:vis enum $name:ident: $native:ty {
            $(
                $( #[$variant_attrs:meta] )*
                $variant:ident = $value:expr
            ),+
            $(,)?
        }
    ) => {
        $( #[$attrs] )*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
        #[repr(transparent)]
        $v struct $name(pub(crate) $native);

        impl $name {
            $(
                $( #[$variant_attrs] )*
                $v const $variant: Self = Self($value);
            )+

            /// Returns the raw wire value.
            #[inline]
            $v fn to_raw(self) -> $native {
                self.0
            }

            /// Returns the mnemonic of this value, or `None` if it is not one of the named
            /// constants.
            #[allow(unreachable_patterns)]
            $v fn name(&self) -> Option<&'static str> {
                match *self {
                    $(
                        Self::$variant => Some(stringify!($variant)),
                    )+
                    _ => None,
                }
            }

            /// Looks up a named constant by its mnemonic, ignoring ASCII case.
            $v fn from_name(name: impl AsRef<[u8]>) -> Option<Self> {
                let name = name.as_ref();
                $(
                    if name.eq_ignore_ascii_case(stringify!($variant).as_bytes()) {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }

        impl From<$native> for $name {
            #[inline]
            fn from(raw: $native) -> Self {
                Self(raw)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self.name() {
                    Some(name) => f.write_str(name),
                    None => write!(f, "(unknown {}: {:#x})", stringify!($name), self.0),
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Debug::fmt(self, f)
            }
        }
    };
}
