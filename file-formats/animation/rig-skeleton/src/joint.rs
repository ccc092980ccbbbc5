//! Packed per-joint hierarchy link

use std::fmt;

use rig_archive::prelude::*;

/// Number of bits used to store a joint index
///
/// Limiting the index width keeps joint references compact enough for packed
/// key-frame formats and bounds worst-case stack allocations.
pub const MAX_JOINTS_NUM_BITS: u32 = 10;

/// Maximum number of joints in a skeleton
///
/// The last index representable in `MAX_JOINTS_NUM_BITS` bits is reserved for
/// [`NO_PARENT`].
pub const MAX_JOINTS: usize = (1 << MAX_JOINTS_NUM_BITS) - 1;

/// Maximum number of SoA transform groups needed for `MAX_JOINTS` joints
pub const MAX_SOA_JOINTS: usize = MAX_JOINTS.div_ceil(4);

/// Parent index stored for root joints
pub const NO_PARENT: u16 = MAX_JOINTS as u16;

const PARENT_MASK: u16 = (1 << MAX_JOINTS_NUM_BITS) - 1;
const LEAF_BIT: u16 = 1 << MAX_JOINTS_NUM_BITS;
const VALID_BITS: u16 = PARENT_MASK | LEAF_BIT;

/// Hierarchy link of one joint, packed in 16 bits
///
/// ```text
/// bit  15..11     10       9..0
///     reserved  is_leaf   parent
/// ```
///
/// `parent` is [`NO_PARENT`] for roots. `is_leaf` is set when no joint has
/// this joint as its parent; traversal code uses it to skip child lookups.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct JointProperties(u16);

impl JointProperties {
    /// Pack a parent index and a leaf flag
    ///
    /// Returns `None` when `parent` does not fit the parent field, i.e. when
    /// it is greater than [`NO_PARENT`].
    ///
    /// ```
    /// use rig_skeleton::{JointProperties, NO_PARENT};
    ///
    /// let joint = JointProperties::new(3, true).unwrap();
    /// assert_eq!(joint.parent(), 3);
    /// assert!(joint.is_leaf());
    /// assert!(JointProperties::new(NO_PARENT + 1, false).is_none());
    /// ```
    pub fn new(parent: u16, is_leaf: bool) -> Option<Self> {
        (parent <= NO_PARENT).then(|| Self::pack(parent, is_leaf))
    }

    /// Properties of a root joint
    pub const fn root(is_leaf: bool) -> Self {
        Self::pack(NO_PARENT, is_leaf)
    }

    pub(crate) const fn pack(parent: u16, is_leaf: bool) -> Self {
        let leaf = if is_leaf { LEAF_BIT } else { 0 };
        Self((parent & PARENT_MASK) | leaf)
    }

    /// Decode a packed value, rejecting values with reserved bits set
    pub fn from_bits(bits: u16) -> Option<Self> {
        (bits & !VALID_BITS == 0).then_some(Self(bits))
    }

    /// Raw packed value
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Parent index, [`NO_PARENT`] for roots
    pub const fn parent(self) -> u16 {
        self.0 & PARENT_MASK
    }

    /// Parent index, `None` for roots
    pub fn parent_index(self) -> Option<usize> {
        (!self.is_root()).then_some(self.parent() as usize)
    }

    pub const fn is_root(self) -> bool {
        self.parent() == NO_PARENT
    }

    pub const fn is_leaf(self) -> bool {
        self.0 & LEAF_BIT != 0
    }
}

impl fmt::Debug for JointProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JointProperties")
            .field("parent", &self.parent())
            .field("is_leaf", &self.is_leaf())
            .finish()
    }
}

impl ArchiveRead for JointProperties {
    fn read_from<R: Read>(archive: &mut IArchive<R>) -> Result<Self> {
        let bits = archive.read_u16()?;
        Self::from_bits(bits).ok_or_else(|| {
            ArchiveError::invalid_data(format!(
                "Joint properties {bits:#06x} have reserved bits set"
            ))
        })
    }
}

impl ArchiveWrite for JointProperties {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        archive.write_u16(self.0)
    }

    fn archive_size(&self) -> usize {
        2
    }
}
