//! Memoized list of the block collision boxes near an entity.

use crate::world_geometry::BlockGrid;
use block_geom::{
    AaBox,
    BlockPos,
};
use std::slice;


/// One collision box of one block, in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedBox<B> {
    pub aa_box: AaBox,
    pub pos: BlockPos,
    pub block: B,
}

/// The world-space collision boxes of every block in some inclusive region.
///
/// Only valid for the region it was last built for. Any change of region,
/// dimension included, rebuilds the whole list from the grid.
#[derive(Debug, Clone)]
pub struct CachedBoxList<B> {
    boxes: Vec<CachedBox<B>>,
    region: Option<(BlockPos, BlockPos)>,
}

impl<B> Default for CachedBoxList<B> {
    fn default() -> Self {
        CachedBoxList {
            boxes: Vec::new(),
            region: None,
        }
    }
}

impl<B: Clone> CachedBoxList<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Region the list currently reflects, if any.
    pub fn region(&self) -> Option<(BlockPos, BlockPos)> {
        self.region
    }

    /// Force the next `update` to rebuild, for example after the grid changed.
    pub fn invalidate(&mut self) {
        self.region = None;
    }

    /// Make self reflect the inclusive region from `min` to `max`. Returns
    /// whether the list had to be rebuilt.
    pub fn update<G>(&mut self, grid: &G, min: BlockPos, max: BlockPos) -> bool
    where
        G: BlockGrid<Block=B>,
    {
        if self.region == Some((min, max)) {
            return false;
        }

        // clearing keeps the allocation around for the next rebuild
        self.boxes.clear();
        let boxes = &mut self.boxes;
        grid.walk_blocks(min, max, |pos, block| {
            let origin = pos.origin();
            grid.collision_boxes(pos, &block, |aa_box| boxes.push(CachedBox {
                aa_box: aa_box.translate(origin),
                pos,
                block: block.clone(),
            }));
        });
        self.region = Some((min, max));
        trace!(%min, %max, boxes = self.boxes.len(), "rebuilt cached collision boxes");
        true
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.boxes.capacity()
    }

    pub fn as_slice(&self) -> &[CachedBox<B>] {
        &self.boxes
    }

    pub fn iter(&self) -> slice::Iter<'_, CachedBox<B>> {
        self.boxes.iter()
    }
}

impl<'a, B> IntoIterator for &'a CachedBoxList<B> {
    type Item = &'a CachedBox<B>;
    type IntoIter = slice::Iter<'a, CachedBox<B>>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}
