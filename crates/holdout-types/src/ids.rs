//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Party members are the only entities that need a stable identity across
//! ticks; everything else is addressed by position (plot row/column, tree
//! slot) or by a closed enum. [`MemberId::new`] mints a UUID v7
//! (time-ordered); the game itself builds ids from its seeded generator
//! with [`MemberId::from_random_bits`] so a seeded run reproduces them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Build a version 4 identifier from 128 random bits.
            pub const fn from_random_bits(bits: u128) -> Self {
                Self(uuid::Builder::from_random_bytes(bits.to_le_bytes()).into_uuid())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a survivor in the party.
    MemberId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        let first = MemberId::new();
        let second = MemberId::new();
        assert_ne!(first, second);
        assert_ne!(first.into_inner(), Uuid::nil());
    }

    #[test]
    fn ids_from_random_bits_are_v4_and_repeatable() {
        let bits = 0x0123_4567_89ab_cdef_0123_4567_89ab_cdef_u128;
        let id = MemberId::from_random_bits(bits);
        assert_eq!(id, MemberId::from_random_bits(bits));
        assert_eq!(id.into_inner().get_version(), Some(uuid::Version::Random));
        assert_ne!(id, MemberId::from_random_bits(bits.wrapping_add(1)));
    }

    #[test]
    fn id_serializes_as_bare_uuid() {
        let id = MemberId::new();
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, format!("\"{id}\""));
    }
}
