use crate::error::{Result, SkeletonError};
use crate::joint::JointProperties;
use crate::math::{SOA_WIDTH, SoaTransform};
use crate::names::NameTable;
use crate::raw::RawSkeleton;
use crate::skeleton::Skeleton;

/// Converts an authoring hierarchy into a runtime [`Skeleton`]
///
/// Joints are numbered breadth-first: all roots in order, then their
/// children level by level. Parent indices therefore always precede child
/// indices.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkeletonBuilder;

impl SkeletonBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a skeleton from `raw`
    ///
    /// Fails with [`SkeletonError::TooManyJoints`] when `raw` holds more than
    /// [`MAX_JOINTS`](crate::MAX_JOINTS) joints, and with
    /// [`SkeletonError::InvalidJointName`] when a name contains a NUL byte.
    pub fn build(&self, raw: &RawSkeleton) -> Result<Skeleton> {
        raw.validate()?;

        let joints: Vec<_> = raw.iter_breadth_first().collect();
        let num_joints = joints.len();

        let mut has_children = vec![false; num_joints];
        for &(_, _, parent) in &joints {
            if let Some(parent) = parent {
                has_children[parent] = true;
            }
        }

        let joint_properties: Box<[JointProperties]> = joints
            .iter()
            .map(|&(index, _, parent)| {
                let is_leaf = !has_children[index];
                match parent {
                    // validate() bounds every index below MAX_JOINTS
                    Some(parent) => JointProperties::pack(parent as u16, is_leaf),
                    None => JointProperties::root(is_leaf),
                }
            })
            .collect();

        let mut bind_pose = vec![SoaTransform::IDENTITY; num_joints.div_ceil(SOA_WIDTH)];
        for &(index, joint, _) in &joints {
            bind_pose[index / SOA_WIDTH].set_lane(index % SOA_WIDTH, joint.transform);
        }

        let names = joints.iter().map(|(_, joint, _)| joint.name.as_str());
        let joint_names =
            NameTable::from_names(names).map_err(|index| SkeletonError::InvalidJointName {
                index,
                reason: format!(
                    "'{}' contains a NUL byte",
                    joints[index].1.name.escape_default()
                ),
            })?;

        let skeleton = Skeleton::from_parts(
            joint_properties,
            bind_pose.into_boxed_slice(),
            joint_names,
        );
        log::debug!(
            "Built skeleton with {} joints in {} SoA groups",
            skeleton.num_joints(),
            skeleton.num_soa_joints()
        );
        Ok(skeleton)
    }
}
