//! Seams onto the world's block grid.

use block_geom::{
    AaBox,
    BlockPos,
};


/// Grid of blocks, each of which has zero or more collision boxes.
pub trait BlockGrid {
    /// Handle to a block, handed back to collision callbacks.
    type Block: Clone;

    /// Get the block at `pos`. Positions outside of whatever the grid
    /// stores should return some non-colliding block.
    fn block(&self, pos: BlockPos) -> Self::Block;

    /// Visit the collision boxes of `block`, which is at `pos`, _relative to
    /// `pos`_. Blocks which visit nothing don't collide.
    fn collision_boxes<V: FnMut(AaBox)>(
        &self,
        pos: BlockPos,
        block: &Self::Block,
        visit: V,
    );

    /// Visit every block in the inclusive range from `min` to `max`, in
    /// `min`'s dimension.
    ///
    /// The default visits x fastest and z slowest.
    fn walk_blocks<V: FnMut(BlockPos, Self::Block)>(
        &self,
        min: BlockPos,
        max: BlockPos,
        mut visit: V,
    ) {
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    let pos = BlockPos::with_dim(x, y, z, min.dim);
                    visit(pos, self.block(pos));
                }
            }
        }
    }
}


/// Source of the selection geometry a look ray is tested against.
pub trait IntersectionSupplier {
    type Block: Clone;

    fn block(&self, pos: BlockPos) -> Self::Block;

    /// Visit the selection boxes of `block`, which is at `pos`, _relative to
    /// `pos`_. The visit order is the order ties are broken in.
    fn selection_boxes<V: FnMut(AaBox)>(
        &self,
        pos: BlockPos,
        block: &Self::Block,
        visit: V,
    );

    /// Whether a look ray may enter `pos` at all.
    fn is_valid_pos(&self, pos: BlockPos) -> bool {
        let _ = pos;
        true
    }
}
