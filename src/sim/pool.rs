//! Fixed-capacity slot pools for transient entities
//!
//! Slots are never added or removed after construction. An entity is "alive"
//! while its slot reports active; spawning reuses the first inactive slot.

/// An entity that can occupy a pool slot
pub trait Slot: Default {
    fn is_active(&self) -> bool;
}

/// Fixed-size arena with an active tag per slot
#[derive(Debug, Clone)]
pub struct Pool<T: Slot> {
    slots: Box<[T]>,
}

impl<T: Slot> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| T::default()).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index of the first free slot, if any
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|s| !s.is_active())
    }

    /// Claim the first free slot. Returns `None` when the pool is exhausted.
    pub fn claim(&mut self) -> Option<(usize, &mut T)> {
        let index = self.first_free()?;
        Some((index, &mut self.slots[index]))
    }

    /// Reset every slot to its default (inactive) state
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = T::default();
        }
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    pub fn slots_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }

    /// Active slots with their indices, in index order
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.is_active())
    }
}
