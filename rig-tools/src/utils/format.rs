//! Formatting utilities

use humansize::{DECIMAL, format_size};
use rig_skeleton::JointTransform;

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a translation or scale vector
pub fn format_vec3(v: [f32; 3]) -> String {
    format!("({:.3}, {:.3}, {:.3})", v[0], v[1], v[2])
}

/// Format a rotation quaternion as x, y, z, w
pub fn format_quat(q: [f32; 4]) -> String {
    format!("({:.3}, {:.3}, {:.3}, {:.3})", q[0], q[1], q[2], q[3])
}

/// One-line summary of a joint transform
pub fn format_transform(transform: &JointTransform) -> String {
    format!(
        "t={} r={} s={}",
        format_vec3(transform.translation.to_array()),
        format_quat(transform.rotation.to_array()),
        format_vec3(transform.scale.to_array())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1024), "1.02 kB");
        assert_eq!(format_bytes(1048576), "1.05 MB");
    }

    #[test]
    fn test_format_transform() {
        assert_eq!(
            format_transform(&JointTransform::IDENTITY),
            "t=(0.000, 0.000, 0.000) r=(0.000, 0.000, 0.000, 1.000) s=(1.000, 1.000, 1.000)"
        );
    }
}
