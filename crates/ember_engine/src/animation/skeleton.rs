//! Joint hierarchy

use crate::animation::pose::JointPose;

/// Index of a joint within its skeleton
///
/// Skeletons are small; an 8-bit index addresses every joint. "No joint"
/// is expressed as `Option::<JointIndex>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct JointIndex(pub u8);

impl JointIndex {
    /// The index as a container offset
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One joint of a skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    /// Parent joint; `None` only for the root
    pub parent: Option<JointIndex>,

    /// Local rest transform
    pub bind_pose: JointPose,
}

/// An ordered joint hierarchy, root first
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    joints: Vec<Joint>,
}

impl Skeleton {
    /// Create a skeleton from an ordered joint list
    ///
    /// The first joint is the root and must have no parent.
    pub fn new(joints: Vec<Joint>) -> Self {
        debug_assert!(!joints.is_empty());
        debug_assert!(joints.first().map_or(true, |root| root.parent.is_none()));
        Self { joints }
    }

    /// The root joint
    pub fn root(&self) -> &Joint {
        &self.joints[0]
    }

    /// All joints in hierarchy order
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Joint at `index`, if in range
    pub fn joint(&self, index: JointIndex) -> Option<&Joint> {
        self.joints.get(index.index())
    }

    /// Number of joints
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    fn two_bone() -> Skeleton {
        Skeleton::new(vec![
            Joint {
                parent: None,
                bind_pose: JointPose::default(),
            },
            Joint {
                parent: Some(JointIndex(0)),
                bind_pose: JointPose {
                    translation: Vec2::new(1.0, 0.0),
                    rotation: 0.0,
                    scale: 1.0,
                },
            },
        ])
    }

    #[test]
    fn test_joint_lookup() {
        let skeleton = two_bone();
        assert_eq!(skeleton.joint_count(), 2);
        assert!(skeleton.root().parent.is_none());
        assert_eq!(
            skeleton.joint(JointIndex(1)).and_then(|j| j.parent),
            Some(JointIndex(0))
        );
        assert!(skeleton.joint(JointIndex(2)).is_none());
    }
}
