//! Animation blend trees
//!
//! A blend tree is a hierarchy whose leaves sample clips and whose internal
//! nodes combine child poses by a weight. Trees are owned by an
//! [`AnimationGraph`] and evaluated per frame. The node set is closed:
//! clip playback, parameterized lerp, and the runtime-only cross-fade.

pub mod crossfade;
pub mod graph;
pub mod weights;

pub use crossfade::CrossFadeNode;
pub use graph::{AnimationBlendInput, AnimationBlendInputKind, AnimationGraph, AnimationGraphState};
pub use weights::AnimationGraphWeightCollection;

use std::sync::Arc;

use crate::animation::clip::AnimationClip;
use crate::animation::pose::{lerp_joint_poses, SkeletonPose};
use crate::animation::skeleton::Skeleton;
use crate::animation::skin::Skin;
use crate::foundation::time::AnimationTime;

/// A named reference to one of a graph's states
///
/// Transient; rebuilt whenever playback or a transition retargets the
/// animator. The index refers into the graph's state storage, which owns
/// the tree and strictly outlives any animator using it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonAnimationState {
    /// State name as declared in the graph
    pub name: String,

    /// Index into the graph's state list
    pub state: usize,
}

/// Leaf node that samples a fixed clip
#[derive(Debug, Clone)]
pub struct ClipNode {
    clip: Arc<AnimationClip>,
}

impl ClipNode {
    /// Create a leaf over a shared clip
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self { clip }
    }

    /// The sampled clip
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }
}

/// Binary blend of two subtrees by a named float parameter
#[derive(Debug, Clone)]
pub struct LerpNode {
    node_a: Box<BlendTreeNode>,
    node_b: Box<BlendTreeNode>,
    weight_index: u16,
    length: AnimationTime,
}

impl LerpNode {
    /// Create a blend of two subtrees controlled by `weight_index`
    pub fn new(node_a: BlendTreeNode, node_b: BlendTreeNode, weight_index: u16) -> Self {
        let length = node_a.length().max(node_b.length());
        Self {
            node_a: Box::new(node_a),
            node_b: Box::new(node_b),
            weight_index,
            length,
        }
    }

    /// First blend input
    pub fn node_a(&self) -> &BlendTreeNode {
        &self.node_a
    }

    /// Second blend input
    pub fn node_b(&self) -> &BlendTreeNode {
        &self.node_b
    }

    /// Index of the controlling parameter in the weight collection
    pub fn weight_index(&self) -> u16 {
        self.weight_index
    }
}

/// A node of an animation blend tree
#[derive(Debug, Clone)]
pub enum BlendTreeNode {
    /// Clip playback leaf
    Clip(ClipNode),

    /// Parameterized binary blend
    Lerp(LerpNode),
}

impl BlendTreeNode {
    /// Total playable duration of the subtree
    pub fn length(&self) -> AnimationTime {
        match self {
            Self::Clip(node) => node.clip.length(),
            Self::Lerp(node) => node.length,
        }
    }

    /// Evaluate the subtree at `time`, writing the pose in place
    ///
    /// When a skin is supplied it is routed to whichever side currently
    /// dominates the blend, so only one animation drives attachments.
    pub fn calculate(
        &self,
        time: AnimationTime,
        weights: &AnimationGraphWeightCollection,
        skeleton: &Skeleton,
        pose: &mut SkeletonPose,
        skin: Option<&mut Skin>,
    ) {
        match self {
            Self::Clip(node) => {
                node.clip.apply(time, pose);
                if let Some(skin) = skin {
                    node.clip.apply_attachments(time, skin);
                }
            }
            Self::Lerp(node) => {
                let weight = weights.float_at(node.weight_index);

                let (skin_a, skin_b) = if weight >= 0.5 {
                    (None, skin)
                } else {
                    (skin, None)
                };

                let mut pose_a = SkeletonPose::bind_pose(skeleton);
                let mut pose_b = SkeletonPose::bind_pose(skeleton);
                node.node_a
                    .calculate(time, weights, skeleton, &mut pose_a, skin_a);
                node.node_b
                    .calculate(time, weights, skeleton, &mut pose_b, skin_b);

                lerp_joint_poses(
                    &pose_a.joint_poses,
                    &pose_b.joint_poses,
                    weight,
                    &mut pose.joint_poses,
                );
            }
        }
    }
}
