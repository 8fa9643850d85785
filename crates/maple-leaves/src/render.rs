//! Packing active leaves into instance data for the host renderer

use crate::leaf::Leaf;
use bytemuck::{Pod, Zeroable};

/// Per-leaf instance record.
/// 48 bytes, 16-byte rows so it can be uploaded as three vec4s.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LeafInstance {
    /// x, y, rotation (degrees), scale
    pub pos_rot_scale: [f32; 4],
    /// pivot x, pivot y, alpha, unused
    pub pivot_alpha: [f32; 4],
    /// shape, color, leaf id, unused
    pub asset: [u32; 4],
}

impl LeafInstance {
    pub fn from_leaf(leaf: &Leaf, pivot: [f32; 2]) -> Self {
        Self {
            pos_rot_scale: [leaf.x, leaf.y, leaf.rotation, leaf.scale],
            pivot_alpha: [pivot[0], pivot[1], leaf.alpha, 0.0],
            asset: [leaf.shape.raw(), leaf.color.raw(), leaf.id.raw(), 0],
        }
    }

    pub fn position(&self) -> [f32; 2] {
        [self.pos_rot_scale[0], self.pos_rot_scale[1]]
    }

    pub fn alpha(&self) -> f32 {
        self.pivot_alpha[2]
    }
}

/// Pre-allocated instance buffer, refilled after every tick
pub struct LeafBatch {
    instances: Vec<LeafInstance>,
}

impl LeafBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    /// Replace the batch contents with the given leaves
    pub fn pack(&mut self, leaves: &[Leaf], pivot: [f32; 2]) {
        self.instances.clear();
        self.instances
            .extend(leaves.iter().map(|leaf| LeafInstance::from_leaf(leaf, pivot)));
    }

    pub fn instances(&self) -> &[LeafInstance] {
        &self.instances
    }

    /// Raw bytes for a vertex/instance buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maple_core::{AssetId, LeafId};

    #[test]
    fn leaf_instance_layout() {
        assert_eq!(std::mem::size_of::<LeafInstance>(), 48);
        assert_eq!(std::mem::align_of::<LeafInstance>(), 4);
    }

    #[test]
    fn pack_copies_leaf_state() {
        let mut leaf = Leaf::pooled(LeafId(5));
        leaf.x = 12.0;
        leaf.y = 34.0;
        leaf.rotation = 90.0;
        leaf.scale = 1.1;
        leaf.alpha = 0.5;
        leaf.shape = AssetId(3);
        leaf.color = AssetId(6);

        let mut batch = LeafBatch::with_capacity(4);
        batch.pack(&[leaf.clone(), leaf], [16.0, 9.0]);
        assert_eq!(batch.len(), 2);

        let inst = batch.instances()[0];
        assert_eq!(inst.position(), [12.0, 34.0]);
        assert_eq!(inst.alpha(), 0.5);
        assert_eq!(inst.pivot_alpha, [16.0, 9.0, 0.5, 0.0]);
        assert_eq!(inst.asset, [3, 6, 5, 0]);
        assert_eq!(batch.as_bytes().len(), 96);
    }

    #[test]
    fn repack_does_not_grow_buffer() {
        let leaves: Vec<Leaf> = (0..8).map(|i| Leaf::pooled(LeafId(i))).collect();
        let mut batch = LeafBatch::with_capacity(8);
        let cap = batch.instances.capacity();
        for n in [8, 3, 0, 8] {
            batch.pack(&leaves[..n], [0.0, 0.0]);
            assert_eq!(batch.len(), n);
        }
        assert_eq!(batch.instances.capacity(), cap);
        assert!(!batch.is_empty());
    }
}
