//! Generational node identifier.
//! u64 layout: low 32 bits = slot index (0 = nil), high 32 bits = generation.
//! IDs are handed out by the owning [`NodeArena`](crate::scene::arena::NodeArena);
//! when a slot is reused its generation is bumped, so stale IDs stop resolving.

use std::fmt;

/// Identifier for a node in a [`SceneTree`](crate::scene::graph::SceneTree).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeID(u64);

impl NodeID {
    #[inline]
    pub const fn nil() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn from_parts(index: u32, generation: u32) -> Self {
        Self((index as u64) | ((generation as u64) << 32))
    }

    #[inline]
    pub const fn index(self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }
}

impl Default for NodeID {
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Debug for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeID({}:{})", self.index(), self.generation())
    }
}

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.index(), self.generation())
    }
}
