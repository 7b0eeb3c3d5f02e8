use std::fmt;

/// Bits of an id holding the entity slot (or tag id)
pub const LO_EXTENT: u32 = 20;
pub const LO_MASK: u32 = (1 << LO_EXTENT) - 1;
/// Bits of an id holding the relation id. Ids are 31 bits wide.
pub const HI_EXTENT: u32 = 31 - LO_EXTENT;
pub const HI_MASK: u32 = (1 << HI_EXTENT) - 1;

/// Packs a slot and a relation tag into one id. Both halves are masked,
/// out-of-range input is truncated rather than rejected.
pub const fn pack(lo: u32, hi: u32) -> u32 {
    ((hi & HI_MASK) << LO_EXTENT) | (lo & LO_MASK)
}

pub const fn unpack_lo(id: u32) -> u32 {
    id & LO_MASK
}

pub const fn unpack_hi(id: u32) -> u32 {
    id >> LO_EXTENT
}

// Entity
#[derive(PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    pub const fn new(lo: u32, hi: u32) -> Self {
        Self(pack(lo, hi))
    }

    pub const fn from_u32(id: u32) -> Self {
        Self(id)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }

    pub const fn lo(self) -> u32 {
        unpack_lo(self.0)
    }

    pub const fn hi(self) -> u32 {
        unpack_hi(self.0)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hi() == 0 {
            write!(f, "Entity({})", self.lo())
        } else {
            write!(f, "Entity({}:{})", self.lo(), self.hi())
        }
    }
}
