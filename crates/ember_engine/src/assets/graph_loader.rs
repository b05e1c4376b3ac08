//! Animation-graph descriptions
//!
//! A graph description declares blend parameters and named states, each
//! state a recursive node tree. Clip leaves reference clips by name; the
//! caller supplies the clip library (clip file parsing is a platform
//! concern). Descriptions are RON documents:
//!
//! ```ron
//! (
//!     parameters: [
//!         (name: "Speed", kind: Float),
//!     ],
//!     states: [
//!         (name: "Idle", tree: Clip(clip: "idle")),
//!         (name: "Locomotion", tree: Lerp(
//!             a: Clip(clip: "walk"),
//!             b: Clip(clip: "run"),
//!             parameter: "Speed",
//!         )),
//!     ],
//! )
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::animation::blendtree::{
    AnimationBlendInput, AnimationBlendInputKind, AnimationGraph, AnimationGraphState,
    BlendTreeNode, ClipNode, LerpNode,
};
use crate::animation::clip::AnimationClip;

/// Named clips available to a graph, usually filled by the asset pipeline
pub type ClipLibrary = HashMap<String, Arc<AnimationClip>>;

/// Errors from parsing or resolving a graph description
#[derive(Debug, Error)]
pub enum AssetError {
    /// The RON document failed to parse
    #[error("failed to parse animation graph description: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A clip leaf references a clip the library does not contain
    #[error("unknown animation clip: {0:?}")]
    UnknownClip(String),

    /// A lerp node references an undeclared blend parameter
    #[error("unknown blend parameter: {0:?}")]
    UnknownParameter(String),

    /// The description declares no states
    #[error("animation graph has no states")]
    EmptyGraph,
}

/// Value type of a declared blend parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BlendParameterKind {
    /// Continuous weight
    Float,
    /// On/off weight
    Bool,
}

/// Declaration of one blend parameter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlendParameterDesc {
    /// Parameter name
    pub name: String,

    /// Value type
    pub kind: BlendParameterKind,
}

/// One node of a described blend tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum AnimationNodeDesc {
    /// Clip playback leaf
    Clip {
        /// Name of the clip in the library
        clip: String,
    },

    /// Parameterized binary blend
    Lerp {
        /// First input tree
        a: Box<AnimationNodeDesc>,
        /// Second input tree
        b: Box<AnimationNodeDesc>,
        /// Name of the controlling parameter
        parameter: String,
    },
}

/// Declaration of one named state
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnimationStateDesc {
    /// State name
    pub name: String,

    /// Root of the state's tree
    pub tree: AnimationNodeDesc,
}

/// A full animation-graph description
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnimationGraphDesc {
    /// Declared blend parameters
    #[serde(default)]
    pub parameters: Vec<BlendParameterDesc>,

    /// Declared states, first is the animator's initial state
    pub states: Vec<AnimationStateDesc>,
}

/// Parse a RON description and build the graph
pub fn load_animation_graph(
    source: &str,
    clips: &ClipLibrary,
) -> Result<AnimationGraph, AssetError> {
    let desc: AnimationGraphDesc = ron::from_str(source)?;
    build_animation_graph(&desc, clips)
}

/// Build a graph from an already-parsed description
pub fn build_animation_graph(
    desc: &AnimationGraphDesc,
    clips: &ClipLibrary,
) -> Result<AnimationGraph, AssetError> {
    if desc.states.is_empty() {
        return Err(AssetError::EmptyGraph);
    }

    let inputs: Vec<AnimationBlendInput> = desc
        .parameters
        .iter()
        .map(|parameter| AnimationBlendInput {
            name: parameter.name.clone(),
            kind: match parameter.kind {
                BlendParameterKind::Float => AnimationBlendInputKind::Float,
                BlendParameterKind::Bool => AnimationBlendInputKind::Bool,
            },
        })
        .collect();

    let parameter_indices: HashMap<&str, u16> = desc
        .parameters
        .iter()
        .enumerate()
        .map(|(index, parameter)| (parameter.name.as_str(), index as u16))
        .collect();

    let states = desc
        .states
        .iter()
        .map(|state| {
            Ok(AnimationGraphState {
                name: state.name.clone(),
                tree: build_node(&state.tree, clips, &parameter_indices)?,
            })
        })
        .collect::<Result<Vec<_>, AssetError>>()?;

    log::debug!(
        "built animation graph: {} states, {} parameters",
        states.len(),
        inputs.len()
    );

    Ok(AnimationGraph::new(states, inputs))
}

fn build_node(
    desc: &AnimationNodeDesc,
    clips: &ClipLibrary,
    parameter_indices: &HashMap<&str, u16>,
) -> Result<BlendTreeNode, AssetError> {
    match desc {
        AnimationNodeDesc::Clip { clip } => clips
            .get(clip)
            .map(|shared| BlendTreeNode::Clip(ClipNode::new(Arc::clone(shared))))
            .ok_or_else(|| AssetError::UnknownClip(clip.clone())),
        AnimationNodeDesc::Lerp { a, b, parameter } => {
            let weight_index = *parameter_indices
                .get(parameter.as_str())
                .ok_or_else(|| AssetError::UnknownParameter(parameter.clone()))?;
            let node_a = build_node(a, clips, parameter_indices)?;
            let node_b = build_node(b, clips, parameter_indices)?;
            Ok(BlendTreeNode::Lerp(LerpNode::new(
                node_a,
                node_b,
                weight_index,
            )))
        }
    }
}
