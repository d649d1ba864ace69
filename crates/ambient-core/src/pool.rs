//! Fixed-capacity particle pool.
//!
//! All records are allocated up front. Acquire and release move ids between
//! an inactive stack and an active list; the active list is kept dense with
//! `swap_remove`, and each record remembers its slot so release never scans.

use glam::Vec2;

pub type ParticleId = u32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleRecord {
    pub id: ParticleId,
    /// Percentage space, both axes in `[0, 100]`.
    pub position: Vec2,
    pub size: f32,
    pub animation_duration: f32,
    pub animation_delay: f32,
    pub active: bool,
}

impl ParticleRecord {
    fn blank(id: ParticleId) -> Self {
        Self {
            id,
            position: Vec2::new(50.0, 50.0),
            size: 1.0,
            animation_duration: 10.0,
            animation_delay: 0.0,
            active: false,
        }
    }
}

#[derive(Debug)]
pub struct ParticlePool {
    records: Vec<ParticleRecord>,
    inactive: Vec<ParticleId>,
    active: Vec<ParticleId>,
    // index into `active` for each record currently held
    active_slot: Vec<Option<usize>>,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        let capacity = Self::clamped_capacity(capacity);
        let records = (0..capacity)
            .map(|i| ParticleRecord::blank(i as ParticleId))
            .collect::<Vec<_>>();
        // Reverse so the first acquire hands out id 0
        let inactive = (0..capacity as ParticleId).rev().collect::<Vec<_>>();
        Self {
            records,
            inactive,
            active: Vec::with_capacity(capacity),
            active_slot: vec![None; capacity],
        }
    }

    /// Largest capacity whose ids all fit in a [`ParticleId`].
    #[inline]
    pub fn clamped_capacity(requested: usize) -> usize {
        requested.min(ParticleId::MAX as usize)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn available(&self) -> usize {
        self.inactive.len()
    }

    /// Hand out an inactive record, or `None` when every record is held.
    pub fn acquire(&mut self) -> Option<&mut ParticleRecord> {
        let id = self.inactive.pop()?;
        let idx = id as usize;
        self.active_slot[idx] = Some(self.active.len());
        self.active.push(id);
        let record = &mut self.records[idx];
        record.active = true;
        Some(record)
    }

    /// Return a record to the pool. Unknown or already released ids are ignored.
    pub fn release(&mut self, id: ParticleId) {
        let idx = id as usize;
        let Some(slot) = self.active_slot.get(idx).copied().flatten() else {
            return;
        };
        self.active.swap_remove(slot);
        if let Some(&moved) = self.active.get(slot) {
            self.active_slot[moved as usize] = Some(slot);
        }
        self.active_slot[idx] = None;
        self.records[idx].active = false;
        self.inactive.push(id);
    }

    /// Force every held record back to the inactive set.
    pub fn reset_all(&mut self) {
        while let Some(id) = self.active.pop() {
            let idx = id as usize;
            self.active_slot[idx] = None;
            self.records[idx].active = false;
            self.inactive.push(id);
        }
    }

    pub fn get(&self, id: ParticleId) -> Option<&ParticleRecord> {
        self.records.get(id as usize)
    }

    /// Mutable access, only for records that are currently held.
    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut ParticleRecord> {
        self.records.get_mut(id as usize).filter(|r| r.active)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &ParticleRecord> + '_ {
        self.active.iter().map(move |&id| &self.records[id as usize])
    }
}
