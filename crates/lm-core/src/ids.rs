//! Strongly typed identifier wrappers.
//!
//! Entities live in per-run `Vec` arenas and reference each other through
//! these handles, never through ownership.  The inner integer is `pub` so
//! `id.0 as usize` works, but callers should prefer `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a warehouse.  Stable for the lifetime of an instance.
    pub struct WarehouseId(u32);
}

typed_id! {
    /// Index of a courier in the per-run arena.
    pub struct CourierId(u32);
}

typed_id! {
    /// Index of a picker in the per-run arena.
    pub struct PickerId(u32);
}

typed_id! {
    /// Sequential order number, assigned at creation.
    pub struct OrderId(u32);
}

typed_id! {
    /// Row of the travel-time table; one per client location.
    pub struct ClientId(u32);
}
