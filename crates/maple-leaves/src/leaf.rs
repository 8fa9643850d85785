//! Leaf records and the fixed-capacity pool that owns them

use maple_core::{AssetId, LeafId};
use serde::Serialize;

/// One floating leaf.
///
/// Fields of a pooled leaf are stale until the next spawn overwrites them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Leaf {
    pub id: LeafId,
    pub x: f32,
    pub y: f32,
    /// Units per second
    pub x_speed: f32,
    /// Units per second
    pub y_speed: f32,
    /// Degrees
    pub rotation: f32,
    /// Degrees per second
    pub rotation_speed: f32,
    /// Vertical wobble magnitude
    pub period: f32,
    /// Wobble frequency along x
    pub amplitude: f32,
    pub scale: f32,
    pub alpha: f32,
    pub shape: AssetId,
    pub color: AssetId,
}

impl Leaf {
    pub fn pooled(id: LeafId) -> Self {
        Self {
            id,
            x: 0.0,
            y: 0.0,
            x_speed: 0.0,
            y_speed: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            period: 0.0,
            amplitude: 0.0,
            scale: 0.0,
            alpha: 0.0,
            shape: AssetId::default(),
            color: AssetId::default(),
        }
    }
}

/// Arena of leaves split into an active prefix and a free suffix.
///
/// `leaves[..active_count]` is the active set, `leaves[active_count..]` the
/// free pool. Spawning grows the prefix by one and recycling swaps a leaf past
/// the boundary, so the two sets are disjoint and always cover the whole arena.
pub struct LeafPool {
    leaves: Vec<Leaf>,
    active_count: usize,
}

impl LeafPool {
    pub fn new(capacity: usize) -> Self {
        let mut leaves = Vec::with_capacity(capacity);
        for i in 0..capacity {
            leaves.push(Leaf::pooled(LeafId(i as u32)));
        }
        Self {
            leaves,
            active_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.leaves.len()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn free_count(&self) -> usize {
        self.leaves.len() - self.active_count
    }

    /// Take one leaf from the free pool, returning a mutable ref to initialize it.
    /// Returns None if the pool is empty.
    pub fn spawn(&mut self) -> Option<&mut Leaf> {
        if self.active_count >= self.leaves.len() {
            return None;
        }
        let idx = self.active_count;
        self.active_count += 1;
        Some(&mut self.leaves[idx])
    }

    /// Return every active leaf matching `evict` to the free pool.
    ///
    /// Each active leaf is tested exactly once; the leaf swapped into a
    /// vacated slot is tested before moving on. Returns how many were recycled.
    pub fn recycle_where<F>(&mut self, mut evict: F) -> usize
    where
        F: FnMut(&Leaf) -> bool,
    {
        let mut recycled = 0;
        let mut i = 0;
        while i < self.active_count {
            if evict(&self.leaves[i]) {
                self.active_count -= 1;
                if i < self.active_count {
                    self.leaves.swap(i, self.active_count);
                }
                recycled += 1;
                // Stay on i: the swapped-in leaf is untested
            } else {
                i += 1;
            }
        }
        recycled
    }

    /// Return all leaves to the free pool
    pub fn recycle_all(&mut self) {
        self.active_count = 0;
    }

    pub fn active(&self) -> &[Leaf] {
        &self.leaves[..self.active_count]
    }

    pub fn active_mut(&mut self) -> &mut [Leaf] {
        &mut self.leaves[..self.active_count]
    }

    pub fn free(&self) -> &[Leaf] {
        &self.leaves[self.active_count..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pool_spawn_and_recycle() {
        let mut pool = LeafPool::new(4);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.free_count(), 4);

        for i in 0..3 {
            let leaf = pool.spawn().unwrap();
            leaf.x = i as f32 * 100.0;
        }
        assert_eq!(pool.active_count(), 3);

        // Recycle the middle one
        let recycled = pool.recycle_where(|l| l.x > 50.0 && l.x < 150.0);
        assert_eq!(recycled, 1);
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.free_count(), 2);

        pool.spawn().unwrap();
        pool.spawn().unwrap();
        assert!(pool.spawn().is_none());
    }

    #[test]
    fn recycle_checks_swapped_in_leaf() {
        let mut pool = LeafPool::new(5);
        for _ in 0..5 {
            pool.spawn().unwrap().x = 1000.0;
        }
        pool.active_mut()[2].x = 0.0;

        let mut visits = 0;
        let recycled = pool.recycle_where(|l| {
            visits += 1;
            l.x > 500.0
        });
        assert_eq!(recycled, 4);
        assert_eq!(visits, 5);
        assert_eq!(pool.active().len(), 1);
        assert_eq!(pool.active()[0].x, 0.0);
    }

    #[test]
    fn ids_are_unique_and_stable() {
        let mut pool = LeafPool::new(6);
        for i in 0..6 {
            pool.spawn().unwrap().x = i as f32;
        }
        pool.recycle_where(|l| l.id.raw() % 2 == 0);

        let ids: HashSet<_> = pool
            .active()
            .iter()
            .chain(pool.free())
            .map(|l| l.id)
            .collect();
        assert_eq!(ids.len(), 6);
        for leaf in pool.active() {
            assert_eq!(leaf.id.raw() % 2, 1);
            assert_eq!(leaf.x, leaf.id.raw() as f32);
        }
    }

    #[test]
    fn recycle_all_empties_active_set() {
        let mut pool = LeafPool::new(3);
        pool.spawn();
        pool.spawn();
        pool.recycle_all();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.free_count(), 3);
    }

    #[test]
    fn zero_capacity_never_spawns() {
        let mut pool = LeafPool::new(0);
        assert!(pool.spawn().is_none());
        assert_eq!(pool.capacity(), 0);
    }
}
