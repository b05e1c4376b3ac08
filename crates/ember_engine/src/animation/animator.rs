//! Per-entity animation playback
//!
//! An animator binds one skeleton, one pose, and one shared animation
//! graph. Each frame it advances time, loops or commits a pending
//! transition, and evaluates the active node into the pose.

use std::sync::Arc;

use thiserror::Error;

use crate::animation::blendtree::{
    AnimationBlendInputKind, AnimationGraph, AnimationGraphWeightCollection, CrossFadeNode,
    SkeletonAnimationState,
};
use crate::animation::pose::SkeletonPose;
use crate::animation::skeleton::Skeleton;
use crate::animation::skin::Skin;
use crate::foundation::time::AnimationTime;

/// Errors from animator construction
#[derive(Debug, Error)]
pub enum AnimatorError {
    /// The supplied graph declares no states
    #[error("animation graph has no states")]
    EmptyGraph,
}

/// The node an animator currently evaluates
#[derive(Debug, Clone)]
enum ActiveNode {
    /// A graph state's own tree
    State(usize),

    /// A transition wrapping the outgoing and incoming states
    CrossFade(CrossFadeNode),
}

/// Playback driver for one animated entity
///
/// Starts on the graph's first declared state at time zero with unit
/// playback rate. The graph is shared and read-only; the animator owns its
/// pose and weight values.
pub struct Animator {
    weights: AnimationGraphWeightCollection,
    skeleton: Arc<Skeleton>,
    pose: SkeletonPose,
    current_name: String,
    current_node: ActiveNode,
    next_animation: Option<SkeletonAnimationState>,
    graph: Arc<AnimationGraph>,
    time: AnimationTime,
    playback_rate: f32,
}

impl Animator {
    /// Create an animator over a skeleton and a shared graph
    pub fn new(skeleton: Arc<Skeleton>, graph: Arc<AnimationGraph>) -> Result<Self, AnimatorError> {
        let first = graph.states().first().ok_or(AnimatorError::EmptyGraph)?;

        let mut weights = AnimationGraphWeightCollection::new();
        weights.reserve(graph.inputs().len());
        for input in graph.inputs() {
            match input.kind {
                AnimationBlendInputKind::Float => {
                    weights.add_float(0.0);
                }
                AnimationBlendInputKind::Bool => {
                    weights.add_bool(false);
                }
            }
        }

        let pose = SkeletonPose::bind_pose(&skeleton);
        let current_name = first.name.clone();

        Ok(Self {
            weights,
            skeleton,
            pose,
            current_name,
            current_node: ActiveNode::State(0),
            next_animation: None,
            graph,
            time: AnimationTime::ZERO,
            playback_rate: 1.0,
        })
    }

    /// Advance playback and recompute the pose
    pub fn update(&mut self, frame_duration: AnimationTime) {
        self.advance_time(frame_duration);
        self.evaluate(None);
    }

    /// Advance playback, recompute the pose, and drive a skin's attachments
    pub fn update_with_skin(&mut self, frame_duration: AnimationTime, skin: &mut Skin) {
        self.advance_time(frame_duration);
        self.evaluate(Some(skin));
    }

    /// Start a timed transition to another state
    ///
    /// At most one transition is in flight; while one is pending this is a
    /// no-op, as is an unknown state name. The reported state name stays
    /// the outgoing one until the transition commits.
    pub fn cross_fade(&mut self, state_name: &str, transition_duration: AnimationTime) {
        if self.next_animation.is_some() {
            return;
        }
        debug_assert!(transition_duration > AnimationTime::ZERO);
        debug_assert!(!transition_duration.as_seconds().is_nan());

        let Some(target_index) = self.graph.find_state(state_name) else {
            log::debug!("cross_fade: unknown animation state {state_name:?}");
            return;
        };
        let ActiveNode::State(current_index) = self.current_node else {
            debug_assert!(false, "cross-fade active without a pending transition");
            return;
        };

        let next = SkeletonAnimationState {
            name: state_name.to_string(),
            state: target_index,
        };
        let cross_fade = CrossFadeNode::new(
            SkeletonAnimationState {
                name: self.current_name.clone(),
                state: current_index,
            },
            next.clone(),
            transition_duration,
            self.time,
        );

        self.next_animation = Some(next);
        self.current_node = ActiveNode::CrossFade(cross_fade);
        self.time = AnimationTime::ZERO;
    }

    /// Hard-cut to a state
    ///
    /// Unknown state names are a no-op. Any pending cross-fade is canceled;
    /// a hard cut overrides an in-flight transition.
    pub fn play(&mut self, state_name: &str) {
        let Some(index) = self.graph.find_state(state_name) else {
            log::debug!("play: unknown animation state {state_name:?}");
            return;
        };

        self.current_name = state_name.to_string();
        self.current_node = ActiveNode::State(index);
        self.next_animation = None;
        self.time = AnimationTime::ZERO;
    }

    /// Set a float blend parameter; unknown names change nothing
    pub fn set_float(&mut self, name: &str, value: f32) {
        debug_assert!(!value.is_nan());
        if let Some(index) = self.graph.find_parameter(name) {
            self.weights.set_float(index, value);
        }
    }

    /// Set a bool blend parameter; unknown names change nothing
    pub fn set_bool(&mut self, name: &str, value: bool) {
        if let Some(index) = self.graph.find_parameter(name) {
            self.weights.set_bool(index, value);
        }
    }

    /// Current playback rate multiplier
    pub fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    /// Set the playback rate multiplier; negative rates play backwards
    pub fn set_playback_rate(&mut self, playback_rate: f32) {
        self.playback_rate = playback_rate;
    }

    /// Name of the current state
    ///
    /// During a transition this is still the outgoing state's name.
    pub fn current_state_name(&self) -> &str {
        &self.current_name
    }

    /// Current playback position within the active node
    pub fn time(&self) -> AnimationTime {
        self.time
    }

    /// The pose produced by the most recent update
    pub fn pose(&self) -> &SkeletonPose {
        &self.pose
    }

    /// The bound skeleton
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    fn active_node_length(&self) -> AnimationTime {
        match &self.current_node {
            ActiveNode::State(index) => self
                .graph
                .state(*index)
                .map_or(AnimationTime::ZERO, |state| state.tree.length()),
            ActiveNode::CrossFade(node) => node.length(),
        }
    }

    fn advance_time(&mut self, frame_duration: AnimationTime) {
        self.time += frame_duration * self.playback_rate;

        let length = self.active_node_length();
        if self.time < AnimationTime::ZERO {
            // Rewound past the start; wrap backward to the end.
            self.time = length;
        } else if self.time > length {
            if let Some(next) = self.next_animation.take() {
                // The transition has run its course; the target becomes
                // the current state and time wraps into its length.
                self.current_name = next.name.clone();
                self.current_node = ActiveNode::State(next.state);
                self.time = self.time.wrap(self.active_node_length());
            } else {
                self.time = AnimationTime::ZERO;
            }
        }
    }

    fn evaluate(&mut self, skin: Option<&mut Skin>) {
        match &self.current_node {
            ActiveNode::State(index) => {
                if let Some(state) = self.graph.state(*index) {
                    state
                        .tree
                        .calculate(self.time, &self.weights, &self.skeleton, &mut self.pose, skin);
                }
            }
            ActiveNode::CrossFade(node) => {
                node.calculate(
                    self.time,
                    &self.weights,
                    &self.graph,
                    &self.skeleton,
                    &mut self.pose,
                    skin,
                );
            }
        }
    }
}
