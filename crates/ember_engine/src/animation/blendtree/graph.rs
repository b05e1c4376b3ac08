//! Animation graphs
//!
//! A graph owns a set of named states (each a blend tree) and the named
//! blend inputs its lerp nodes read. Graphs are immutable once built and
//! shared across animators via `Arc`.

use std::collections::HashMap;

use crate::animation::blendtree::BlendTreeNode;

/// Type of a named blend input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationBlendInputKind {
    /// Continuous blend weight
    Float,
    /// On/off blend weight
    Bool,
}

/// A named blend input declared by a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationBlendInput {
    /// Parameter name used by `set_float`/`set_bool`
    pub name: String,

    /// Value type of the parameter
    pub kind: AnimationBlendInputKind,
}

/// A named state of a graph: a name plus the root of its blend tree
#[derive(Debug, Clone)]
pub struct AnimationGraphState {
    /// State name used by `play`/`cross_fade`
    pub name: String,

    /// Root node of the state's blend tree
    pub tree: BlendTreeNode,
}

/// An immutable set of animation states and blend inputs
#[derive(Debug, Clone)]
pub struct AnimationGraph {
    states: Vec<AnimationGraphState>,
    inputs: Vec<AnimationBlendInput>,
    parameter_indices: HashMap<String, u16>,
}

impl AnimationGraph {
    /// Build a graph from its states and inputs
    ///
    /// Parameter lookup is resolved into a map here so per-frame name
    /// resolution never rescans the input list. The first declaration wins
    /// for duplicate input names.
    pub fn new(states: Vec<AnimationGraphState>, inputs: Vec<AnimationBlendInput>) -> Self {
        debug_assert!(inputs.len() <= usize::from(u16::MAX));
        let mut parameter_indices = HashMap::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            parameter_indices
                .entry(input.name.clone())
                .or_insert(index as u16);
        }
        Self {
            states,
            inputs,
            parameter_indices,
        }
    }

    /// All states in declaration order
    pub fn states(&self) -> &[AnimationGraphState] {
        &self.states
    }

    /// State at `index`, if in range
    pub fn state(&self, index: usize) -> Option<&AnimationGraphState> {
        self.states.get(index)
    }

    /// Find a state index by name
    pub fn find_state(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|state| state.name == name)
    }

    /// All blend inputs in declaration order
    pub fn inputs(&self) -> &[AnimationBlendInput] {
        &self.inputs
    }

    /// Resolve a blend parameter name to its weight index
    pub fn find_parameter(&self, name: &str) -> Option<u16> {
        self.parameter_indices.get(name).copied()
    }
}
