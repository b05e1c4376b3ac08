//! Tests for the Update/Draw frame flow across subsystems

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::animation::{
        AnimationClip, AnimationTime, Animator, Joint, JointIndex, JointKeyframe, JointPose,
        JointTrack, Skeleton,
    };
    use crate::assets::load_animation_graph;
    use crate::foundation::color::Color;
    use crate::foundation::math::{Mat4, Rectangle, Vec2};
    use crate::render::backends::headless::{HeadlessCommandList, HeadlessDevice, RecordedCommand};
    use crate::render::api::{RenderDevice, SurfaceFormat};
    use crate::render::sprite::{SpriteBatch, SpriteBatchConfig, SpriteInstance};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn walking_clip() -> Arc<AnimationClip> {
        Arc::new(AnimationClip::new(
            vec![JointTrack {
                joint: JointIndex(0),
                keyframes: vec![
                    JointKeyframe {
                        time: AnimationTime::ZERO,
                        pose: JointPose {
                            translation: Vec2::new(0.0, 0.0),
                            rotation: 0.0,
                            scale: 1.0,
                        },
                    },
                    JointKeyframe {
                        time: AnimationTime::from_seconds(1.0),
                        pose: JointPose {
                            translation: Vec2::new(100.0, 0.0),
                            rotation: 0.0,
                            scale: 1.0,
                        },
                    },
                ],
            }],
            Vec::new(),
        ))
    }

    /// One frame of the driver loop: update advances the animation and
    /// produces a pose, draw feeds the posed joints into the batch.
    #[test]
    fn test_update_then_draw_feeds_pose_into_instances() {
        init_logging();

        let skeleton = Arc::new(Skeleton::new(vec![Joint {
            parent: None,
            bind_pose: JointPose::default(),
        }]));
        let mut clips = HashMap::new();
        clips.insert("walk".to_string(), walking_clip());
        let graph = Arc::new(
            load_animation_graph(
                r#"(states: [(name: "Walk", tree: Clip(clip: "walk"))])"#,
                &clips,
            )
            .expect("graph"),
        );
        let mut animator = Animator::new(Arc::clone(&skeleton), graph).expect("animator");

        let mut device = HeadlessDevice::new();
        let mut batch =
            SpriteBatch::new(&mut device, SpriteBatchConfig::default()).expect("batch");
        let atlas = device
            .create_texture_2d(256, 256, SurfaceFormat::R8G8B8A8UNorm)
            .expect("atlas");

        // Update phase: half a second into the walk cycle.
        animator.update(AnimationTime::from_seconds(0.5));
        let joint_position = animator.pose().joint_poses[0].translation;

        // Draw phase: one sprite per posed joint.
        let mut commands = HeadlessCommandList::new();
        let mut session = batch.begin(&mut commands, Mat4::identity());
        session.draw(
            &atlas,
            joint_position,
            Rectangle::new(0, 0, 32, 32),
            Color::WHITE,
        );
        session.end();

        assert_eq!(batch.draw_call_count(), 1);

        let instance_buffer = commands
            .recorded()
            .iter()
            .find_map(|command| match command {
                RecordedCommand::SetVertexBuffer { slot: 1, buffer } => Some(*buffer),
                _ => None,
            })
            .expect("instance buffer binding");
        let instance = commands
            .recorded()
            .iter()
            .find_map(|command| match command {
                RecordedCommand::UpdateBuffer { buffer, data, .. } if *buffer == instance_buffer => {
                    Some(bytemuck::pod_read_unaligned::<SpriteInstance>(data))
                }
                _ => None,
            })
            .expect("instance upload");

        // The animated joint position flowed into the packed instance.
        assert_eq!(instance.translation[0], 50.0);
        assert_eq!(instance.translation[1], 0.0);
    }
}
