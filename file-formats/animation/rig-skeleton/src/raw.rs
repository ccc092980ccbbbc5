//! Offline authoring hierarchy
//!
//! [`RawSkeleton`] is a plain tree of named joints, convenient to author,
//! edit and serialize. It is turned into a runtime [`Skeleton`] by
//! [`SkeletonBuilder`](crate::SkeletonBuilder).

use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkeletonError};
use crate::joint::MAX_JOINTS;
pub use crate::math::JointTransform;
use crate::skeleton::Skeleton;

/// A joint of the authoring hierarchy and all of its descendants
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawJoint {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub transform: JointTransform,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<RawJoint>,
}

impl RawJoint {
    /// Childless joint with an identity bind pose
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: JointTransform::IDENTITY,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: JointTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_children(mut self, children: Vec<RawJoint>) -> Self {
        self.children = children;
        self
    }
}

/// Authoring hierarchy, possibly made of several root joints
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSkeleton {
    #[cfg_attr(feature = "serde", serde(default))]
    pub roots: Vec<RawJoint>,
}

impl RawSkeleton {
    pub fn new(roots: Vec<RawJoint>) -> Self {
        Self { roots }
    }

    /// Total number of joints in the hierarchy
    pub fn num_joints(&self) -> usize {
        self.iter_depth_first().count()
    }

    /// Check that the hierarchy fits in a runtime skeleton
    pub fn validate(&self) -> Result<()> {
        let count = self.num_joints();
        if count > MAX_JOINTS {
            return Err(SkeletonError::TooManyJoints {
                count,
                max: MAX_JOINTS,
            });
        }
        Ok(())
    }

    /// Pre-order traversal yielding each joint with its parent
    pub fn iter_depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            stack: self.roots.iter().rev().map(|joint| (joint, None)).collect(),
        }
    }

    /// Level-order traversal yielding `(index, joint, parent index)`
    ///
    /// Indices are assigned in visiting order, which is the joint order of a
    /// runtime skeleton built from this hierarchy.
    pub fn iter_breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst {
            queue: self.roots.iter().map(|joint| (joint, None)).collect(),
            next_index: 0,
        }
    }
}

/// Rebuilds the authoring tree of a runtime skeleton
///
/// Children keep their index order, so building the result again yields an
/// identical skeleton.
impl From<&Skeleton> for RawSkeleton {
    fn from(skeleton: &Skeleton) -> Self {
        let names = skeleton.joint_names();
        let mut joints: Vec<RawJoint> = (0..skeleton.num_joints())
            .map(|index| RawJoint {
                name: names[index].to_string(),
                transform: skeleton
                    .joint_bind_pose(index)
                    .unwrap_or(JointTransform::IDENTITY),
                children: Vec::new(),
            })
            .collect();

        let mut roots = Vec::new();
        for index in (0..joints.len()).rev() {
            let mut joint = std::mem::take(&mut joints[index]);
            // children were attached highest index first
            joint.children.reverse();
            match skeleton.parent(index) {
                Some(parent) => joints[parent].children.push(joint),
                None => roots.push(joint),
            }
        }
        roots.reverse();

        Self { roots }
    }
}

pub struct DepthFirst<'a> {
    stack: Vec<(&'a RawJoint, Option<&'a RawJoint>)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (&'a RawJoint, Option<&'a RawJoint>);

    fn next(&mut self) -> Option<Self::Item> {
        let (joint, parent) = self.stack.pop()?;
        self.stack
            .extend(joint.children.iter().rev().map(|child| (child, Some(joint))));
        Some((joint, parent))
    }
}

pub struct BreadthFirst<'a> {
    queue: VecDeque<(&'a RawJoint, Option<usize>)>,
    next_index: usize,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = (usize, &'a RawJoint, Option<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let (joint, parent) = self.queue.pop_front()?;
        let index = self.next_index;
        self.next_index += 1;
        self.queue
            .extend(joint.children.iter().map(|child| (child, Some(index))));
        Some((index, joint, parent))
    }
}
