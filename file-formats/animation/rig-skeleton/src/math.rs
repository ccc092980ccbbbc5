//! Joint transforms in scalar and 4-wide structure-of-arrays form
//!
//! A [`SoaTransform`] holds the local transforms of four consecutive joints,
//! one per lane, so sampling and blending code can process a whole group
//! with packed arithmetic. The skeleton only stores and serializes these
//! groups; it never does math on them.

use glam::{Quat, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rig_archive::prelude::*;

/// Number of joints packed in a single SoA group
pub const SOA_WIDTH: usize = 4;

/// Local transform of a single joint
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JointTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl JointTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }
}

impl Default for JointTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Lane-wise bit comparison, so NaN payloads and signed zeros count
fn lanes_eq(a: &[f32; 4], b: &[f32; 4]) -> bool {
    a.iter().zip(b).all(|(a, b)| a.to_bits() == b.to_bits())
}

/// Four 3-component vectors, one per lane
///
/// Equality compares the bit patterns of every lane.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoaFloat3 {
    pub x: [f32; 4],
    pub y: [f32; 4],
    pub z: [f32; 4],
}

impl SoaFloat3 {
    /// Same vector in every lane
    pub const fn splat(v: Vec3) -> Self {
        Self {
            x: [v.x; 4],
            y: [v.y; 4],
            z: [v.z; 4],
        }
    }

    /// # Panics
    ///
    /// Panics if `lane >= 4`.
    pub fn lane(&self, lane: usize) -> Vec3 {
        Vec3::new(self.x[lane], self.y[lane], self.z[lane])
    }

    /// # Panics
    ///
    /// Panics if `lane >= 4`.
    pub fn set_lane(&mut self, lane: usize, v: Vec3) {
        self.x[lane] = v.x;
        self.y[lane] = v.y;
        self.z[lane] = v.z;
    }
}

/// Four quaternions, one per lane
///
/// Equality compares the bit patterns of every lane.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoaQuaternion {
    pub x: [f32; 4],
    pub y: [f32; 4],
    pub z: [f32; 4],
    pub w: [f32; 4],
}

impl SoaQuaternion {
    pub const IDENTITY: Self = Self {
        x: [0.0; 4],
        y: [0.0; 4],
        z: [0.0; 4],
        w: [1.0; 4],
    };

    pub fn splat(q: Quat) -> Self {
        Self {
            x: [q.x; 4],
            y: [q.y; 4],
            z: [q.z; 4],
            w: [q.w; 4],
        }
    }

    /// # Panics
    ///
    /// Panics if `lane >= 4`.
    pub fn lane(&self, lane: usize) -> Quat {
        Quat::from_xyzw(self.x[lane], self.y[lane], self.z[lane], self.w[lane])
    }

    /// # Panics
    ///
    /// Panics if `lane >= 4`.
    pub fn set_lane(&mut self, lane: usize, q: Quat) {
        self.x[lane] = q.x;
        self.y[lane] = q.y;
        self.z[lane] = q.z;
        self.w[lane] = q.w;
    }
}

/// Local transforms of four joints in structure-of-arrays layout
///
/// Archived as 40 `f32` values: translation x, y, z, then rotation x, y, z,
/// w, then scale x, y, z, each component as 4 lanes. Two groups are equal
/// when their archived bytes would be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoaTransform {
    pub translation: SoaFloat3,
    pub rotation: SoaQuaternion,
    pub scale: SoaFloat3,
}

impl SoaTransform {
    /// Identity in all four lanes
    pub const IDENTITY: Self = Self {
        translation: SoaFloat3::splat(Vec3::ZERO),
        rotation: SoaQuaternion::IDENTITY,
        scale: SoaFloat3::splat(Vec3::ONE),
    };

    /// Same transform in every lane
    pub fn splat(transform: JointTransform) -> Self {
        Self {
            translation: SoaFloat3::splat(transform.translation),
            rotation: SoaQuaternion::splat(transform.rotation),
            scale: SoaFloat3::splat(transform.scale),
        }
    }

    /// Transform stored in `lane`
    ///
    /// # Panics
    ///
    /// Panics if `lane >= 4`.
    pub fn lane(&self, lane: usize) -> JointTransform {
        JointTransform {
            translation: self.translation.lane(lane),
            rotation: self.rotation.lane(lane),
            scale: self.scale.lane(lane),
        }
    }

    /// # Panics
    ///
    /// Panics if `lane >= 4`.
    pub fn set_lane(&mut self, lane: usize, transform: JointTransform) {
        self.translation.set_lane(lane, transform.translation);
        self.rotation.set_lane(lane, transform.rotation);
        self.scale.set_lane(lane, transform.scale);
    }
}

impl PartialEq for SoaFloat3 {
    fn eq(&self, other: &Self) -> bool {
        lanes_eq(&self.x, &other.x) && lanes_eq(&self.y, &other.y) && lanes_eq(&self.z, &other.z)
    }
}

impl Eq for SoaFloat3 {}

impl PartialEq for SoaQuaternion {
    fn eq(&self, other: &Self) -> bool {
        lanes_eq(&self.x, &other.x)
            && lanes_eq(&self.y, &other.y)
            && lanes_eq(&self.z, &other.z)
            && lanes_eq(&self.w, &other.w)
    }
}

impl Eq for SoaQuaternion {}

impl Default for SoaTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ArchiveRead for SoaFloat3 {
    fn read_from<R: Read>(archive: &mut IArchive<R>) -> Result<Self> {
        Ok(Self {
            x: archive.read()?,
            y: archive.read()?,
            z: archive.read()?,
        })
    }
}

impl ArchiveWrite for SoaFloat3 {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        archive.write(&self.x)?;
        archive.write(&self.y)?;
        archive.write(&self.z)
    }

    fn archive_size(&self) -> usize {
        3 * 4 * 4
    }
}

impl ArchiveRead for SoaQuaternion {
    fn read_from<R: Read>(archive: &mut IArchive<R>) -> Result<Self> {
        Ok(Self {
            x: archive.read()?,
            y: archive.read()?,
            z: archive.read()?,
            w: archive.read()?,
        })
    }
}

impl ArchiveWrite for SoaQuaternion {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        archive.write(&self.x)?;
        archive.write(&self.y)?;
        archive.write(&self.z)?;
        archive.write(&self.w)
    }

    fn archive_size(&self) -> usize {
        4 * 4 * 4
    }
}

impl ArchiveRead for SoaTransform {
    fn read_from<R: Read>(archive: &mut IArchive<R>) -> Result<Self> {
        Ok(Self {
            translation: archive.read()?,
            rotation: archive.read()?,
            scale: archive.read()?,
        })
    }
}

impl ArchiveWrite for SoaTransform {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        archive.write(&self.translation)?;
        archive.write(&self.rotation)?;
        archive.write(&self.scale)
    }

    fn archive_size(&self) -> usize {
        self.translation.archive_size() + self.rotation.archive_size() + self.scale.archive_size()
    }
}
