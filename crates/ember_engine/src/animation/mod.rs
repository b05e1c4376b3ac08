//! # Skeletal Animation
//!
//! A blend-tree evaluator for 2D skeletal animation. Leaves sample
//! keyframed clips; internal nodes combine child poses by parameterized
//! weights; an [`Animator`] drives one tree per entity, advancing time,
//! looping playback, and cross-fading between states.
//!
//! ## Architecture
//!
//! - **Skeleton / SkeletonPose**: joint hierarchy and per-joint local
//!   transforms written in place each frame
//! - **AnimationClip**: keyframed joint and attachment tracks
//! - **blendtree**: the node tree, graph, blend-weight storage, and the
//!   runtime cross-fade node
//! - **Animator**: per-entity playback state machine
//!
//! The pose produced here is local per joint; combining it with the
//! skeleton hierarchy into global transforms for skinning is up to the
//! caller.

pub mod animator;
pub mod blendtree;
pub mod clip;
pub mod pose;
pub mod skeleton;
pub mod skin;

pub use crate::foundation::time::AnimationTime;
pub use animator::{Animator, AnimatorError};
pub use blendtree::{
    AnimationBlendInput, AnimationBlendInputKind, AnimationGraph, AnimationGraphState,
    AnimationGraphWeightCollection, BlendTreeNode, ClipNode, CrossFadeNode, LerpNode,
    SkeletonAnimationState,
};
pub use clip::{AnimationClip, AttachmentKeyframe, AttachmentTrack, JointKeyframe, JointTrack};
pub use pose::{lerp_joint_poses, JointPose, SkeletonPose};
pub use skeleton::{Joint, JointIndex, Skeleton};
pub use skin::{Skin, SkinSlot};
