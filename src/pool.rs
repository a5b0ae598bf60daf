//! Fixed-capacity slab allocator for effects and layers.
//!
//! Every slot is the same size: big enough for the largest type registered
//! before [`Pool::create`], plus a one-byte occupancy header. Allocation scans
//! circularly from the slot after the previous allocation, so recently freed
//! slots are not reused first.
//!
//! Slots are addressed by [`SlotId`], which pairs the slot index with a
//! generation counter. Freeing a slot bumps its generation, so ids that
//! outlive their object are detected instead of aliasing a new occupant.
//!
//! ## Lifecycle
//!
//! ```text
//! register_type::<A>()  register_type::<B>()  create(n)  alloc/free ...  clear()
//! ```
//!
//! `register_type` and `create` are only valid before the pool is created;
//! `alloc` only after.

use std::mem::{align_of, size_of};

use crate::error::{LayerFxError, LayerFxResult};

const HEADER_SIZE: usize = 1;
const FREE: u8 = 0;
const OCCUPIED: u8 = 1;

/// Generational address of a pool slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: u32,
    generation: u32,
}

impl SlotId {
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    header: u8,
    generation: u32,
    value: Option<T>,
}

impl<T> Slot<T> {
    fn vacant() -> Self {
        Self {
            header: FREE,
            generation: 0,
            value: None,
        }
    }
}

#[derive(Debug)]
pub struct Pool<T> {
    biggest: usize,
    chunk_size: usize,
    slots: Vec<Slot<T>>,
    /// Slot the next scan starts from.
    cursor: usize,
    live: usize,
    created: bool,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            biggest: 0,
            chunk_size: 0,
            slots: Vec::new(),
            cursor: 0,
            live: 0,
            created: false,
        }
    }

    /// Grow the slot size to fit `U`. Idempotent.
    pub fn register_type<U>(&mut self) -> LayerFxResult<()> {
        if self.created {
            return Err(LayerFxError::PoolAlreadyCreated);
        }
        self.biggest = self.biggest.max(size_of::<U>());
        Ok(())
    }

    /// Commit the slot size and reserve `count` free slots.
    pub fn create(&mut self, count: usize) -> LayerFxResult<()> {
        if self.created {
            return Err(LayerFxError::PoolAlreadyCreated);
        }

        let word = align_of::<usize>();
        let payload = self.biggest.max(size_of::<T>());
        self.chunk_size = (payload + HEADER_SIZE).div_ceil(word) * word;
        self.slots = (0..count).map(|_| Slot::vacant()).collect();
        self.cursor = 0;
        self.live = 0;
        self.created = true;

        tracing::debug!(count, chunk_size = self.chunk_size, "created pool");
        Ok(())
    }

    /// Place `value` in the first free slot at or after the cursor.
    pub fn alloc(&mut self, value: T) -> LayerFxResult<SlotId> {
        if !self.created {
            return Err(LayerFxError::PoolNotCreated);
        }

        let capacity = self.slots.len();
        for step in 0..capacity {
            let index = (self.cursor + step) % capacity;
            let slot = &mut self.slots[index];
            if slot.header != FREE {
                continue;
            }

            slot.header = OCCUPIED;
            slot.value = Some(value);
            self.live += 1;
            self.cursor = (index + 1) % capacity;

            tracing::trace!(index, live = self.live, "pool alloc");
            return Ok(SlotId {
                index: index as u32,
                generation: slot.generation,
            });
        }

        tracing::warn!(capacity, "pool exhausted");
        Err(LayerFxError::CapacityExhausted { capacity })
    }

    /// Vacate the slot and hand its value back to the caller.
    pub fn free(&mut self, id: SlotId) -> LayerFxResult<T> {
        let slot = self.occupied_mut(id)?;
        let value = slot.value.take().ok_or(LayerFxError::StaleHandle { index: id.index })?;
        slot.header = FREE;
        slot.generation = slot.generation.wrapping_add(1);
        self.live -= 1;

        tracing::trace!(index = id.index, live = self.live, "pool free");
        Ok(value)
    }

    pub fn get(&self, id: SlotId) -> LayerFxResult<&T> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.header == OCCUPIED && slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
            .ok_or(LayerFxError::StaleHandle { index: id.index })
    }

    pub fn get_mut(&mut self, id: SlotId) -> LayerFxResult<&mut T> {
        self.occupied_mut(id)?
            .value
            .as_mut()
            .ok_or(LayerFxError::StaleHandle { index: id.index })
    }

    /// Mark every slot free at once.
    ///
    /// Values are dropped in place, but nothing they reference is released;
    /// every outstanding id becomes stale.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.header != FREE {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.header = FREE;
            slot.value = None;
        }
        tracing::debug!(dropped = self.live, "cleared pool");
        self.live = 0;
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Bytes per slot, header included. Zero until created.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    fn occupied_mut(&mut self, id: SlotId) -> LayerFxResult<&mut Slot<T>> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.header == OCCUPIED && slot.generation == id.generation)
            .ok_or(LayerFxError::StaleHandle { index: id.index })
    }
}
