//! Strongly-typed identifiers for mesh elements.
//!
//! Newtype wrappers prevent accidental mixing of vertex indices
//! with edge or triangle indices at API boundaries. The packed
//! adjacency tables themselves store raw `u32`.

use serde::{Deserialize, Serialize};

macro_rules! element_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the raw index as `usize` for array indexing.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(val: u32) -> Self {
                Self(val)
            }
        }
    };
}

element_id!(
    /// Index of a mesh vertex.
    VertexId
);

element_id!(
    /// Index of an undirected mesh edge, as enumerated by the topology builder.
    EdgeId
);

element_id!(
    /// Index of a mesh triangle.
    TriangleId
);
