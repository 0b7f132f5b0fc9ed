//! Slot arena for tween run state.
//!
//! Slots are never deallocated: a released slot goes on the free list with
//! its waypoint and table buffers cleared but still allocated, and the next
//! acquire hands it out again.

use super::instance::TweenInstance;
use super::request::OnComplete;

pub(crate) struct TweenPool {
    slots: Vec<TweenInstance>,
    free: Vec<usize>,
}

impl TweenPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
        }
    }

    /// Take a free slot, growing the arena if none is left.
    pub fn acquire(&mut self) -> (usize, &mut TweenInstance) {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(TweenInstance::default());
                self.slots.len() - 1
            }
        };
        let instance = &mut self.slots[slot];
        instance.live = true;
        (slot, instance)
    }

    /// Clear a slot and put it back on the free list.
    ///
    /// Returns the callback the slot still held. Releasing a slot that is
    /// already free does nothing.
    pub fn release(&mut self, slot: usize) -> Option<OnComplete> {
        let instance = self.slots.get_mut(slot)?;
        if !instance.live {
            return None;
        }
        instance.live = false;
        let callback = instance.reset();
        self.free.push(slot);
        callback
    }

    pub fn get(&self, slot: usize) -> &TweenInstance {
        &self.slots[slot]
    }

    pub fn get_mut(&mut self, slot: usize) -> &mut TweenInstance {
        &mut self.slots[slot]
    }

    /// Slots allocated so far, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots ready for reuse.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }
}
