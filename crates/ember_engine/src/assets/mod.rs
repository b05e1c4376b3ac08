//! Asset descriptions and loaders
//!
//! Binary and image asset parsing lives in platform crates; what belongs
//! here is the engine-native description formats. Currently that is the
//! animation-graph description, a RON document resolved against clips the
//! caller already loaded.

pub mod graph_loader;

pub use graph_loader::{
    build_animation_graph, load_animation_graph, AnimationGraphDesc, AnimationNodeDesc,
    AnimationStateDesc, AssetError, BlendParameterDesc, BlendParameterKind, ClipLibrary,
};
