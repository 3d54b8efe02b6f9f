//! Strongly-typed identifiers.
//!
//! Every entity the scouting core touches is referenced by a small `Copy`
//! newtype so that a scout id can never be passed where a player id is
//! expected.

use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident($inner:ty), $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $inner);

        impl $name {
            /// Returns the raw numeric value.
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

id_type!(
    /// A franchise that employs scouts and owns scouting reports.
    TeamId(u32),
    "team#"
);

id_type!(
    /// A scout, unique across the whole office (employed and free agents).
    ScoutId(u64),
    "scout#"
);

id_type!(
    /// A player resolvable through a [`PlayerDirectory`](crate::report::PlayerDirectory).
    PlayerId(u64),
    "player#"
);

id_type!(
    /// A live assignment in an [`AssignmentLedger`](crate::assignment::AssignmentLedger).
    AssignmentId(u64),
    "assignment#"
);
