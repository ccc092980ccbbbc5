//! Runtime skeleton for real-time skeletal animation.
//!
//! A [`Skeleton`] is the read-only joint hierarchy shared by sampling,
//! blending, IK and skinning code. Its joints are sorted breadth-first, the
//! hierarchy is packed in 16 bits per joint and the bind pose is stored in
//! 4-wide structure-of-arrays groups.
//!
//! Skeletons are built offline from a [`RawSkeleton`] with a
//! [`SkeletonBuilder`], then saved to and reloaded from `rig-archive`
//! streams.
//!
//! ```
//! use rig_skeleton::{RawJoint, RawSkeleton, Skeleton, SkeletonBuilder};
//!
//! let raw = RawSkeleton::new(vec![
//!     RawJoint::new("pelvis").with_children(vec![RawJoint::new("spine")]),
//! ]);
//! let skeleton = SkeletonBuilder::new().build(&raw).unwrap();
//!
//! let mut bytes = Vec::new();
//! skeleton.to_writer(&mut bytes).unwrap();
//! let loaded = Skeleton::from_reader(bytes.as_slice()).unwrap();
//! assert_eq!(loaded, skeleton);
//! ```

pub mod builder;
pub mod error;
pub mod joint;
pub mod math;
mod names;
pub mod raw;
pub mod skeleton;
pub mod utils;

pub use builder::SkeletonBuilder;
pub use error::{Result, SkeletonError};
pub use joint::{JointProperties, MAX_JOINTS, MAX_JOINTS_NUM_BITS, MAX_SOA_JOINTS, NO_PARENT};
pub use math::{JointTransform, SoaFloat3, SoaQuaternion, SoaTransform};
pub use names::JointNames;
pub use raw::{RawJoint, RawSkeleton};
pub use skeleton::Skeleton;

pub use rig_archive::{ArchiveLoad, ArchiveWrite, Endianness, Tagged};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
