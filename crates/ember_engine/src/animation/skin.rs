//! Sprite attachment sets
//!
//! A skin maps skeleton joints to the sprite attachments currently shown
//! for them. Clips retarget slots through attachment tracks; during a
//! cross-fade exactly one side of the blend drives the skin.

use crate::animation::skeleton::JointIndex;

/// One attachment slot of a skin
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SkinSlot {
    /// Joint the attachment follows
    pub joint: Option<JointIndex>,

    /// Index of the shown attachment, or `None` when hidden
    pub attachment: Option<usize>,
}

/// The set of sprite attachments bound to a skeleton
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skin {
    slots: Vec<SkinSlot>,
}

impl Skin {
    /// Create a skin from its slots
    pub fn new(slots: Vec<SkinSlot>) -> Self {
        Self { slots }
    }

    /// All slots in declaration order
    pub fn slots(&self) -> &[SkinSlot] {
        &self.slots
    }

    /// Slot at `index`, if in range
    pub fn slot(&self, index: usize) -> Option<&SkinSlot> {
        self.slots.get(index)
    }

    /// Point a slot at a different attachment; out-of-range slots are ignored
    pub fn set_attachment(&mut self, slot: usize, attachment: Option<usize>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            entry.attachment = attachment;
        }
    }
}
