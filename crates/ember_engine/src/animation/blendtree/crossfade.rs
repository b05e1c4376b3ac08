//! Timed cross-fade between two animation states
//!
//! A cross-fade node exists only at runtime: the animator installs one when
//! a transition starts and it is discarded once the transition commits. It
//! references the participating states by index; the graph that owns their
//! trees strictly outlives the animator.

use crate::animation::blendtree::graph::AnimationGraph;
use crate::animation::blendtree::weights::AnimationGraphWeightCollection;
use crate::animation::blendtree::SkeletonAnimationState;
use crate::animation::pose::{lerp_joint_poses, SkeletonPose};
use crate::animation::skeleton::Skeleton;
use crate::animation::skin::Skin;
use crate::foundation::time::AnimationTime;

/// Timed linear blend from a current animation state to a next one
#[derive(Debug, Clone, PartialEq)]
pub struct CrossFadeNode {
    current: SkeletonAnimationState,
    next: SkeletonAnimationState,
    transition_duration: AnimationTime,
    current_start_time: AnimationTime,
}

impl CrossFadeNode {
    /// Create a transition from `current` to `next`
    ///
    /// `current_start_time` is where the outgoing animation was when the
    /// transition started; it keeps playing from there while the incoming
    /// one starts at zero.
    pub fn new(
        current: SkeletonAnimationState,
        next: SkeletonAnimationState,
        transition_duration: AnimationTime,
        current_start_time: AnimationTime,
    ) -> Self {
        debug_assert!(transition_duration > AnimationTime::ZERO);
        Self {
            current,
            next,
            transition_duration,
            current_start_time,
        }
    }

    /// The outgoing state
    pub fn current(&self) -> &SkeletonAnimationState {
        &self.current
    }

    /// The incoming state
    pub fn next(&self) -> &SkeletonAnimationState {
        &self.next
    }

    /// A cross-fade plays for exactly its transition duration
    pub fn length(&self) -> AnimationTime {
        self.transition_duration
    }

    /// Evaluate both sides at their own wrapped times and blend
    ///
    /// `time` is measured from the start of the transition. The skin goes
    /// to the outgoing side below weight 0.5 and to the incoming side from
    /// there on, so one animation drives attachments at a time.
    pub fn calculate(
        &self,
        time: AnimationTime,
        weights: &AnimationGraphWeightCollection,
        graph: &AnimationGraph,
        skeleton: &Skeleton,
        pose: &mut SkeletonPose,
        skin: Option<&mut Skin>,
    ) {
        let (Some(current_state), Some(next_state)) =
            (graph.state(self.current.state), graph.state(self.next.state))
        else {
            debug_assert!(false, "cross-fade references a missing graph state");
            return;
        };

        let weight = if self.transition_duration > AnimationTime::ZERO {
            (time / self.transition_duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let (current_skin, next_skin) = if weight >= 0.5 {
            (None, skin)
        } else {
            (skin, None)
        };

        let mut current_pose = SkeletonPose::bind_pose(skeleton);
        let mut next_pose = SkeletonPose::bind_pose(skeleton);

        {
            let source_time =
                (self.current_start_time + time).wrap(current_state.tree.length());
            current_state
                .tree
                .calculate(source_time, weights, skeleton, &mut current_pose, current_skin);
        }
        {
            let source_time = time.wrap(next_state.tree.length());
            next_state
                .tree
                .calculate(source_time, weights, skeleton, &mut next_pose, next_skin);
        }

        lerp_joint_poses(
            &current_pose.joint_poses,
            &next_pose.joint_poses,
            weight,
            &mut pose.joint_poses,
        );
    }
}
