//! Joint poses and pose blending

use crate::animation::skeleton::Skeleton;
use crate::foundation::math::Vec2;

/// Local (parent-relative) transform of one joint
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JointPose {
    /// Translation relative to the parent joint
    pub translation: Vec2,

    /// Rotation in radians
    pub rotation: f32,

    /// Uniform scale
    pub scale: f32,
}

impl Default for JointPose {
    fn default() -> Self {
        Self {
            translation: Vec2::zeros(),
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl JointPose {
    /// Linearly interpolate between two poses
    pub fn lerp(&self, other: &Self, weight: f32) -> Self {
        Self {
            translation: self.translation.lerp(&other.translation, weight),
            rotation: self.rotation + (other.rotation - self.rotation) * weight,
            scale: self.scale + (other.scale - self.scale) * weight,
        }
    }
}

/// Per-joint local transforms for a whole skeleton
///
/// Indexed in skeleton joint order; written in place by blend-tree
/// evaluation. Combining with the hierarchy into global transforms is the
/// caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonPose {
    /// One local pose per joint, in skeleton order
    pub joint_poses: Vec<JointPose>,
}

impl SkeletonPose {
    /// A pose holding every joint's bind transform
    pub fn bind_pose(skeleton: &Skeleton) -> Self {
        Self {
            joint_poses: skeleton
                .joints()
                .iter()
                .map(|joint| joint.bind_pose)
                .collect(),
        }
    }
}

/// Interpolate two pose arrays joint-by-joint into `out`
///
/// Extra joints in either input beyond the shortest common length are left
/// untouched in `out`.
pub fn lerp_joint_poses(a: &[JointPose], b: &[JointPose], weight: f32, out: &mut [JointPose]) {
    let count = a.len().min(b.len()).min(out.len());
    for index in 0..count {
        out[index] = a[index].lerp(&b[index], weight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::skeleton::{Joint, JointIndex};
    use approx::assert_relative_eq;

    #[test]
    fn test_bind_pose_copies_joint_transforms() {
        let skeleton = Skeleton::new(vec![
            Joint {
                parent: None,
                bind_pose: JointPose::default(),
            },
            Joint {
                parent: Some(JointIndex(0)),
                bind_pose: JointPose {
                    translation: Vec2::new(2.0, 3.0),
                    rotation: 0.5,
                    scale: 2.0,
                },
            },
        ]);
        let pose = SkeletonPose::bind_pose(&skeleton);
        assert_eq!(pose.joint_poses.len(), 2);
        assert_eq!(pose.joint_poses[1].translation, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_lerp_midpoint() {
        let a = JointPose {
            translation: Vec2::new(0.0, 0.0),
            rotation: 0.0,
            scale: 1.0,
        };
        let b = JointPose {
            translation: Vec2::new(2.0, 4.0),
            rotation: 1.0,
            scale: 3.0,
        };
        let mid = a.lerp(&b, 0.5);
        assert_relative_eq!(mid.translation.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(mid.translation.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(mid.rotation, 0.5, epsilon = 1e-6);
        assert_relative_eq!(mid.scale, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_lerp_endpoints_are_exact() {
        let a = JointPose {
            translation: Vec2::new(1.0, 1.0),
            rotation: 0.25,
            scale: 1.5,
        };
        let b = JointPose {
            translation: Vec2::new(-1.0, 2.0),
            rotation: -0.25,
            scale: 0.5,
        };
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn test_lerp_joint_poses_writes_common_prefix() {
        let a = vec![JointPose::default(); 2];
        let b = vec![
            JointPose {
                translation: Vec2::new(2.0, 0.0),
                rotation: 0.0,
                scale: 1.0,
            };
            2
        ];
        let sentinel = JointPose {
            translation: Vec2::new(9.0, 9.0),
            rotation: 9.0,
            scale: 9.0,
        };
        let mut out = vec![sentinel; 3];
        lerp_joint_poses(&a, &b, 0.5, &mut out);
        assert_relative_eq!(out[0].translation.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(out[1].translation.x, 1.0, epsilon = 1e-6);
        assert_eq!(out[2], sentinel);
    }
}
