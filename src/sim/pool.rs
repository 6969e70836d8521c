//! Slot pool for transient entities
//!
//! Entities live in fixed slots and are addressed by [`SlotId`]. Released
//! slots are reset and pushed onto a free list; `acquire` pops from it (LIFO)
//! before growing. Nothing is ever evicted or shrunk.

/// Handle to a pooled entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u32);

impl SlotId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reuse pool parameterized by a factory and a reset function
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<T>,
    live: Vec<bool>,
    free: Vec<SlotId>,
    factory: fn() -> T,
    reset: fn(&mut T),
}

impl<T> Pool<T> {
    pub fn new(factory: fn() -> T, reset: fn(&mut T)) -> Self {
        Self {
            slots: Vec::new(),
            live: Vec::new(),
            free: Vec::new(),
            factory,
            reset,
        }
    }

    /// Take an entity from the free list, constructing one if it is empty
    pub fn acquire(&mut self) -> (SlotId, &mut T) {
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                let id = SlotId(self.slots.len() as u32);
                self.slots.push((self.factory)());
                self.live.push(false);
                id
            }
        };
        self.live[id.index()] = true;
        (id, &mut self.slots[id.index()])
    }

    /// Reset an entity and return it to the free list.
    ///
    /// Returns false (and changes nothing) if the slot is not live.
    pub fn release(&mut self, id: SlotId) -> bool {
        match self.live.get_mut(id.index()) {
            Some(live) if *live => {
                *live = false;
                (self.reset)(&mut self.slots[id.index()]);
                self.free.push(id);
                true
            }
            _ => {
                log::warn!("Ignoring release of idle pool slot {}", id.index());
                false
            }
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        if self.is_live(id) {
            self.slots.get(id.index())
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        if self.is_live(id) {
            self.slots.get_mut(id.index())
        } else {
            None
        }
    }

    pub fn is_live(&self, id: SlotId) -> bool {
        self.live.get(id.index()).copied().unwrap_or(false)
    }

    /// Total entities ever constructed
    pub fn constructed(&self) -> usize {
        self.slots.len()
    }

    /// Entities waiting on the free list
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    /// Entities currently handed out
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
