//! Hierarchy traversal helpers

use crate::skeleton::Skeleton;

/// Depth-first (pre-order) traversal of `skeleton`
///
/// Starts at joint `from`, or at every root in order when `from` is `None`.
/// Yields `(joint, parent)` pairs, where `parent` is `None` for roots. An
/// out-of-range `from` yields nothing.
///
/// ```
/// use rig_skeleton::{RawJoint, RawSkeleton, SkeletonBuilder, utils};
///
/// let raw = RawSkeleton::new(vec![
///     RawJoint::new("a").with_children(vec![
///         RawJoint::new("b").with_children(vec![RawJoint::new("d")]),
///         RawJoint::new("c"),
///     ]),
/// ]);
/// let skeleton = SkeletonBuilder::new().build(&raw).unwrap();
/// let names = skeleton.joint_names();
///
/// let order: Vec<_> = utils::iter_depth_first(&skeleton, None)
///     .map(|(joint, _)| &names[joint])
///     .collect();
/// assert_eq!(order, ["a", "b", "d", "c"]);
/// ```
pub fn iter_depth_first(skeleton: &Skeleton, from: Option<usize>) -> DepthFirst<'_> {
    let stack = match from {
        Some(joint) if joint < skeleton.num_joints() => vec![joint],
        Some(_) => Vec::new(),
        None => {
            let mut roots: Vec<usize> = skeleton.roots().collect();
            roots.reverse();
            roots
        }
    };
    DepthFirst { skeleton, stack }
}

pub struct DepthFirst<'a> {
    skeleton: &'a Skeleton,
    stack: Vec<usize>,
}

impl Iterator for DepthFirst<'_> {
    type Item = (usize, Option<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let joint = self.stack.pop()?;
        let mark = self.stack.len();
        self.stack.extend(self.skeleton.children(joint));
        self.stack[mark..].reverse();
        Some((joint, self.skeleton.parent(joint)))
    }
}

/// Depth of every joint, roots being at depth 0
///
/// Parents always precede their children, so a single forward pass is
/// enough.
pub fn joint_depths(skeleton: &Skeleton) -> Vec<u16> {
    let mut depths: Vec<u16> = Vec::with_capacity(skeleton.num_joints());
    for joint in skeleton.joint_properties() {
        let depth = match joint.parent_index() {
            Some(parent) => depths[parent] + 1,
            None => 0,
        };
        depths.push(depth);
    }
    depths
}

/// Number of joints on the longest root-to-leaf path
pub fn max_depth(skeleton: &Skeleton) -> usize {
    joint_depths(skeleton)
        .into_iter()
        .max()
        .map_or(0, |depth| depth as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkeletonBuilder;
    use crate::raw::{RawJoint, RawSkeleton};
    use pretty_assertions::assert_eq;

    fn two_roots() -> Skeleton {
        // breadth-first: a0 b0 a1 a2 a3 a4
        let raw = RawSkeleton::new(vec![
            RawJoint::new("a0").with_children(vec![
                RawJoint::new("a1").with_children(vec![RawJoint::new("a3")]),
                RawJoint::new("a2").with_children(vec![RawJoint::new("a4")]),
            ]),
            RawJoint::new("b0"),
        ]);
        SkeletonBuilder::new().build(&raw).unwrap()
    }

    fn names(skeleton: &Skeleton, joints: impl Iterator<Item = usize>) -> Vec<String> {
        joints
            .map(|joint| skeleton.joint_names()[joint].to_string())
            .collect()
    }

    #[test]
    fn test_depth_first_all() {
        let skeleton = two_roots();
        assert_eq!(
            names(&skeleton, skeleton.roots()),
            vec!["a0".to_string(), "b0".to_string()]
        );
        let order = iter_depth_first(&skeleton, None).map(|(joint, _)| joint);
        assert_eq!(
            names(&skeleton, order),
            vec!["a0", "a1", "a3", "a2", "a4", "b0"]
        );
    }

    #[test]
    fn test_depth_first_subtree() {
        let skeleton = two_roots();
        let a2 = skeleton.find_joint("a2").unwrap();
        let visited: Vec<_> = iter_depth_first(&skeleton, Some(a2)).collect();
        let a4 = skeleton.find_joint("a4").unwrap();
        assert_eq!(visited, vec![(a2, Some(0)), (a4, Some(a2))]);

        assert_eq!(iter_depth_first(&skeleton, Some(100)).count(), 0);
    }

    #[test]
    fn test_joint_depths() {
        let skeleton = two_roots();
        assert_eq!(joint_depths(&skeleton), vec![0, 0, 1, 1, 2, 2]);
        assert_eq!(max_depth(&skeleton), 3);
        assert_eq!(max_depth(&Skeleton::new()), 0);
    }
}
