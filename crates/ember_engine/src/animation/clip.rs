//! Keyframed animation clips

use crate::animation::pose::{JointPose, SkeletonPose};
use crate::animation::skeleton::JointIndex;
use crate::animation::skin::Skin;
use crate::foundation::time::AnimationTime;

/// One keyframe of a joint track
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JointKeyframe {
    /// Sample time from the start of the clip
    pub time: AnimationTime,

    /// Local pose at that time
    pub pose: JointPose,
}

/// Keyframed local transform of one joint
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JointTrack {
    /// Joint the track animates
    pub joint: JointIndex,

    /// Keyframes in ascending time order
    pub keyframes: Vec<JointKeyframe>,
}

impl JointTrack {
    /// Sample the track with linear interpolation, clamping at both ends
    pub fn sample(&self, time: AnimationTime) -> Option<JointPose> {
        let first = self.keyframes.first()?;
        if time <= first.time {
            return Some(first.pose);
        }
        let last = self.keyframes.last()?;
        if time >= last.time {
            return Some(last.pose);
        }
        let next_index = self
            .keyframes
            .iter()
            .position(|key| key.time >= time)
            .unwrap_or(self.keyframes.len() - 1);
        let next = &self.keyframes[next_index];
        let prev = &self.keyframes[next_index - 1];
        let span = next.time - prev.time;
        let t = if span > AnimationTime::ZERO {
            (time - prev.time) / span
        } else {
            0.0
        };
        Some(prev.pose.lerp(&next.pose, t))
    }

    fn length(&self) -> AnimationTime {
        self.keyframes
            .last()
            .map_or(AnimationTime::ZERO, |key| key.time)
    }
}

/// One keyframe of an attachment track
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AttachmentKeyframe {
    /// Time from which the attachment applies
    pub time: AnimationTime,

    /// Attachment index to show, or `None` to hide the slot
    pub attachment: Option<usize>,
}

/// Keyframed attachment switching for one skin slot
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AttachmentTrack {
    /// Skin slot the track retargets
    pub slot: usize,

    /// Keyframes in ascending time order
    pub keyframes: Vec<AttachmentKeyframe>,
}

impl AttachmentTrack {
    /// Apply the latest keyframe at or before `time` to the skin
    ///
    /// Before the first keyframe the slot keeps whatever it showed.
    pub fn apply(&self, time: AnimationTime, skin: &mut Skin) {
        let active = self
            .keyframes
            .iter()
            .take_while(|key| key.time <= time)
            .last();
        if let Some(key) = active {
            skin.set_attachment(self.slot, key.attachment);
        }
    }

    fn length(&self) -> AnimationTime {
        self.keyframes
            .last()
            .map_or(AnimationTime::ZERO, |key| key.time)
    }
}

/// A fixed keyframed animation
///
/// Joint tracks drive local poses; attachment tracks swap skin slots.
/// Joints without a track keep whatever the target pose already holds.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    joint_tracks: Vec<JointTrack>,
    attachment_tracks: Vec<AttachmentTrack>,
    length: AnimationTime,
}

impl AnimationClip {
    /// Create a clip from its tracks
    ///
    /// Keyframes are sorted by time; the clip length is the latest keyframe
    /// across every track.
    pub fn new(
        mut joint_tracks: Vec<JointTrack>,
        mut attachment_tracks: Vec<AttachmentTrack>,
    ) -> Self {
        for track in &mut joint_tracks {
            track
                .keyframes
                .sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
        }
        for track in &mut attachment_tracks {
            track
                .keyframes
                .sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
        }

        let joint_length = joint_tracks
            .iter()
            .map(JointTrack::length)
            .fold(AnimationTime::ZERO, AnimationTime::max);
        let attachment_length = attachment_tracks
            .iter()
            .map(AttachmentTrack::length)
            .fold(AnimationTime::ZERO, AnimationTime::max);

        Self {
            joint_tracks,
            attachment_tracks,
            length: joint_length.max(attachment_length),
        }
    }

    /// Total playable duration
    pub fn length(&self) -> AnimationTime {
        self.length
    }

    /// Sample every joint track into the pose at `time`
    pub fn apply(&self, time: AnimationTime, pose: &mut SkeletonPose) {
        for track in &self.joint_tracks {
            if let Some(sampled) = track.sample(time) {
                if let Some(slot) = pose.joint_poses.get_mut(track.joint.index()) {
                    *slot = sampled;
                }
            }
        }
    }

    /// Apply every attachment track to the skin at `time`
    pub fn apply_attachments(&self, time: AnimationTime, skin: &mut Skin) {
        for track in &self.attachment_tracks {
            track.apply(time, skin);
        }
    }
}
