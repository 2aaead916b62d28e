//! Compact `u32` id types.
//!
//! Each id wraps a `u32` index so a `RecordId` cannot be passed where a
//! `CategoryId` is expected. `RecordId`s are assigned in priority order:
//! a smaller id always means a lower priority (removed first).

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u32);

        impl $name {
            /// Create an id from a slice index.
            ///
            /// Panics if `index` does not fit in a `u32`; tables are bounded
            /// well below that by validation.
            pub fn from_index(index: usize) -> Self {
                Self(u32::try_from(index).expect(concat!(stringify!($name), " overflow")))
            }

            /// The id as a slice index.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Compact record id, equal to the record's position in the priority order.
    RecordId
);

define_id!(
    /// Interned composition category.
    CategoryId
);

define_id!(
    /// Interned stratum label.
    StratumId
);
