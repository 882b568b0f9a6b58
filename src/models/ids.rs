//! Index identifiers.
//!
//! Every entity of a timetabling problem lives in a dense, fixed-size
//! indexed set. Identifiers are thin `usize` newtypes so that a teacher
//! index cannot be passed where a room index is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl $name {
            /// Creates an identifier from a raw index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Raw index into the owning collection.
            #[inline]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

index_id!(
    /// Index of a room.
    RoomId,
    "R"
);
index_id!(
    /// Index of a teacher.
    TeacherId,
    "T"
);
index_id!(
    /// Index of a student group.
    GroupId,
    "G"
);
index_id!(
    /// Index of a subject.
    SubjectId,
    "S"
);
index_id!(
    /// Index of a lesson slot in the weekly grid.
    SlotId,
    "L"
);
