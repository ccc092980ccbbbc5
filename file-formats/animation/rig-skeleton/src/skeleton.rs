//! Runtime skeleton
//!
//! A [`Skeleton`] stores the joint hierarchy of a rig as three index-aligned
//! arrays: packed [`JointProperties`], the bind pose in SoA groups of four
//! joints, and joint names. Joints are sorted breadth-first so that every
//! parent comes before its children, which lets local-to-model passes run as
//! a single forward sweep.
//!
//! A skeleton is immutable once populated. It is produced by
//! [`SkeletonBuilder`](crate::SkeletonBuilder) or reloaded from an archive.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use rig_archive::{
    ArchiveError, ArchiveLoad, ArchiveWrite, Endianness, IArchive, OArchive, Tagged,
};

use crate::error::{Result, SkeletonError};
use crate::joint::{JointProperties, MAX_JOINTS};
use crate::math::{JointTransform, SOA_WIDTH, SoaTransform};
use crate::names::{JointNames, NameTable};

/// Runtime joint hierarchy with bind pose and names
///
/// # Examples
///
/// ```
/// use rig_skeleton::{RawJoint, RawSkeleton, SkeletonBuilder};
///
/// let raw = RawSkeleton {
///     roots: vec![RawJoint::new("hip").with_children(vec![
///         RawJoint::new("spine"),
///         RawJoint::new("leg"),
///     ])],
/// };
/// let skeleton = SkeletonBuilder::new().build(&raw).unwrap();
///
/// assert_eq!(skeleton.num_joints(), 3);
/// assert_eq!(skeleton.num_soa_joints(), 1);
/// assert_eq!(skeleton.parent(2), Some(0));
/// assert_eq!(skeleton.find_joint("leg"), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Skeleton {
    joint_properties: Box<[JointProperties]>,
    bind_pose: Box<[SoaTransform]>,
    joint_names: NameTable,
}

impl Skeleton {
    /// Empty skeleton, allocates nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a skeleton from already consistent arrays
    pub(crate) fn from_parts(
        joint_properties: Box<[JointProperties]>,
        bind_pose: Box<[SoaTransform]>,
        joint_names: NameTable,
    ) -> Self {
        debug_assert_eq!(bind_pose.len(), joint_properties.len().div_ceil(SOA_WIDTH));
        debug_assert_eq!(joint_names.len(), joint_properties.len());
        Self {
            joint_properties,
            bind_pose,
            joint_names,
        }
    }

    /// Release every buffer, leaving an empty skeleton
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn num_joints(&self) -> usize {
        self.joint_properties.len()
    }

    /// Number of SoA groups in the bind pose
    pub fn num_soa_joints(&self) -> usize {
        self.num_joints().div_ceil(SOA_WIDTH)
    }

    pub fn is_empty(&self) -> bool {
        self.joint_properties.is_empty()
    }

    /// Parent link and leaf flag of every joint, in breadth-first order
    pub fn joint_properties(&self) -> &[JointProperties] {
        &self.joint_properties
    }

    /// Bind pose grouped by four joints
    ///
    /// Joint `i` is lane `i % 4` of group `i / 4`. Lanes past the last joint
    /// hold identity transforms.
    pub fn bind_pose(&self) -> &[SoaTransform] {
        &self.bind_pose
    }

    pub fn joint_names(&self) -> JointNames<'_> {
        self.joint_names.view()
    }

    /// Index of the first joint called `name`
    pub fn find_joint(&self, name: &str) -> Option<usize> {
        self.joint_names().position(name)
    }

    /// Parent of joint `index`, `None` for roots and out-of-range indices
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.joint_properties.get(index)?.parent_index()
    }

    /// Whether joint `index` has no children, `false` when out of range
    pub fn is_leaf(&self, index: usize) -> bool {
        self.joint_properties
            .get(index)
            .is_some_and(|joint| joint.is_leaf())
    }

    /// Bind pose of joint `index`, extracted from its SoA lane
    pub fn joint_bind_pose(&self, index: usize) -> Option<JointTransform> {
        if index >= self.num_joints() {
            return None;
        }
        Some(self.bind_pose[index / SOA_WIDTH].lane(index % SOA_WIDTH))
    }

    /// Direct children of joint `index`, in index order
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let first = if self.is_leaf(index) {
            self.num_joints()
        } else {
            index + 1
        };
        (first..self.num_joints())
            .filter(move |&child| self.joint_properties[child].parent() as usize == index)
    }

    /// Indices of the root joints
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.joint_properties
            .iter()
            .enumerate()
            .filter(|(_, joint)| joint.is_root())
            .map(|(index, _)| index)
    }

    /// Check every structural invariant
    ///
    /// Array lengths must agree with the joint count, parents must precede
    /// their children, and leaf flags must match the hierarchy.
    pub fn validate(&self) -> Result<()> {
        let num_joints = self.num_joints();
        if num_joints > MAX_JOINTS {
            return Err(SkeletonError::TooManyJoints {
                count: num_joints,
                max: MAX_JOINTS,
            });
        }
        if self.bind_pose.len() != self.num_soa_joints() {
            return Err(SkeletonError::validation(format!(
                "Bind pose holds {} SoA groups, expected {}",
                self.bind_pose.len(),
                self.num_soa_joints()
            )));
        }
        if self.joint_names.len() != num_joints {
            return Err(SkeletonError::validation(format!(
                "{} joint names for {num_joints} joints",
                self.joint_names.len()
            )));
        }

        let mut has_children = vec![false; num_joints];
        for (index, joint) in self.joint_properties.iter().enumerate() {
            if let Some(parent) = joint.parent_index() {
                if parent >= index {
                    return Err(SkeletonError::validation(format!(
                        "Joint {index} has parent {parent}, parents must come first"
                    )));
                }
                has_children[parent] = true;
            }
        }

        for (index, (joint, has_children)) in
            self.joint_properties.iter().zip(has_children).enumerate()
        {
            if joint.is_leaf() == has_children {
                return Err(SkeletonError::validation(format!(
                    "Joint {index} leaf flag is {}, but it has {} children",
                    joint.is_leaf(),
                    if has_children { "some" } else { "no" }
                )));
            }
        }

        Ok(())
    }

    /// Read a skeleton archive, endianness marker included
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut archive = IArchive::new(reader)?;
        Ok(archive.read_object()?)
    }

    /// Load a skeleton archive file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Write a native-endian skeleton archive
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        self.to_writer_with_endianness(writer, Endianness::native())
    }

    pub fn to_writer_with_endianness<W: Write>(
        &self,
        writer: W,
        endianness: Endianness,
    ) -> Result<()> {
        let mut archive = OArchive::with_endianness(writer, endianness)?;
        archive.write_object(self)?;
        archive.flush()?;
        Ok(())
    }

    /// Save as a native-endian skeleton archive file
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.to_writer(BufWriter::new(file))
    }

    /// Size of a complete archive holding only this skeleton
    pub fn file_size(&self) -> usize {
        1 + Self::TAG.len() + 1 + 4 + self.archive_size()
    }

    fn read_payload<R: Read>(archive: &mut IArchive<R>) -> rig_archive::Result<Self> {
        let num_joints = archive.read_u32()? as usize;
        if num_joints > MAX_JOINTS {
            return Err(ArchiveError::invalid_data(format!(
                "Skeleton holds {num_joints} joints, maximum is {MAX_JOINTS}"
            )));
        }

        let joint_properties = archive.read_vec::<JointProperties>(num_joints)?;
        let bind_pose = archive.read_vec::<SoaTransform>(num_joints.div_ceil(SOA_WIDTH))?;

        let block_size = archive.read_u32()? as usize;
        let block = archive.read_bytes(block_size)?;
        let joint_names =
            NameTable::from_block(&block, num_joints).map_err(ArchiveError::InvalidData)?;

        let skeleton = Self::from_parts(
            joint_properties.into_boxed_slice(),
            bind_pose.into_boxed_slice(),
            joint_names,
        );
        skeleton
            .validate()
            .map_err(|e| ArchiveError::invalid_data(e.to_string()))?;
        Ok(skeleton)
    }
}

impl Tagged for Skeleton {
    const TAG: &'static str = "rig-skeleton";
    const VERSION: u32 = 1;
}

impl ArchiveWrite for Skeleton {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> rig_archive::Result<()> {
        archive.write_u32(self.num_joints() as u32)?;
        archive.write_slice(&self.joint_properties)?;
        archive.write_slice(&self.bind_pose)?;
        archive.write(&self.joint_names)
    }

    fn archive_size(&self) -> usize {
        4 + self.joint_properties.archive_size()
            + self.bind_pose.archive_size()
            + self.joint_names.archive_size()
    }
}

impl ArchiveLoad for Skeleton {
    /// Replace this skeleton with the one stored in `archive`
    ///
    /// An unsupported `version` is rejected before anything changes. Any
    /// other failure leaves the skeleton empty.
    fn load<R: Read>(&mut self, archive: &mut IArchive<R>, version: u32) -> rig_archive::Result<()> {
        if version != Self::VERSION {
            return Err(ArchiveError::unsupported_version(
                Self::TAG,
                version,
                Self::VERSION,
            ));
        }

        self.clear();
        *self = Self::read_payload(archive)?;
        log::debug!("Loaded skeleton with {} joints", self.num_joints());
        Ok(())
    }
}
