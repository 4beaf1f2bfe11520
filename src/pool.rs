//! Fixed-capacity entity pools.
//!
//! A pool is sized once and never grows.  An occupied slot is an active
//! entity; `spawn` and `despawn` are the only ways to change which slots are
//! occupied.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Pool<T> {
    slots: Vec<Option<T>>,
}

impl<T> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn free_count(&self) -> usize {
        self.capacity() - self.active_count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Place `value` in the first empty slot.  Returns `None` and drops the
    /// value when every slot is taken.
    pub fn spawn(&mut self, value: T) -> Option<SlotIndex> {
        let index = self.slots.iter().position(Option::is_none)?;
        self.slots[index] = Some(value);
        Some(SlotIndex(index))
    }

    /// Vacate a slot, handing back whatever lived there.
    pub fn despawn(&mut self, index: SlotIndex) -> Option<T> {
        self.slots.get_mut(index.0).and_then(Option::take)
    }

    pub fn get(&self, index: SlotIndex) -> Option<&T> {
        self.slots.get(index.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: SlotIndex) -> Option<&mut T> {
        self.slots.get_mut(index.0).and_then(Option::as_mut)
    }

    pub fn is_active(&self, index: SlotIndex) -> bool {
        self.get(index).is_some()
    }

    /// Every slot index, occupied or not.  Does not borrow the pool, so the
    /// caller may despawn while walking it.
    pub fn slot_indices(&self) -> impl Iterator<Item = SlotIndex> {
        (0..self.slots.len()).map(SlotIndex)
    }

    /// Active entities with their slots, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (SlotIndex(i), v)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotIndex, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|v| (SlotIndex(i), v)))
    }
}
