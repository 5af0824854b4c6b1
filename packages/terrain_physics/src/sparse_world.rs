//! Sparse in-memory world, for tests and the demo.

use crate::world_geometry::{
    BlockGrid,
    IntersectionSupplier,
};
use block_geom::{
    AaBox,
    BlockPos,
};
use std::collections::HashMap;
use serde::{Serialize, Deserialize};


/// Index of a block shape in a `BlockShapes` registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u16);

pub const AIR: BlockId = BlockId(0);
pub const STONE: BlockId = BlockId(1);
/// Post which collides 1.5 blocks high but only selects 1 block high.
pub const FENCE: BlockId = BlockId(2);
/// Bottom half of a block.
pub const SLAB: BlockId = BlockId(3);
/// Selectable but doesn't collide.
pub const TALL_GRASS: BlockId = BlockId(4);
/// Two stacked selection boxes, the lower one wider.
pub const LANTERN: BlockId = BlockId(5);


/// How a block collides with entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockPhysicsLogic {
    NoClip,
    BasicCube,
    Boxes(Vec<AaBox>),
}

/// How a block interacts with look rays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockHitscanLogic {
    Vacuous,
    BasicCube,
    Boxes(Vec<AaBox>),
}

impl BlockPhysicsLogic {
    pub fn visit_boxes<V: FnMut(AaBox)>(&self, mut visit: V) {
        match self {
            &BlockPhysicsLogic::NoClip => (),
            &BlockPhysicsLogic::BasicCube => visit(AaBox::UNIT_BOX),
            &BlockPhysicsLogic::Boxes(ref boxes) => boxes.iter().copied().for_each(visit),
        }
    }
}

impl BlockHitscanLogic {
    pub fn visit_boxes<V: FnMut(AaBox)>(&self, mut visit: V) {
        match self {
            &BlockHitscanLogic::Vacuous => (),
            &BlockHitscanLogic::BasicCube => visit(AaBox::UNIT_BOX),
            &BlockHitscanLogic::Boxes(ref boxes) => boxes.iter().copied().for_each(visit),
        }
    }
}


/// Per-block-id tables of names and shapes.
#[derive(Debug, Clone)]
pub struct BlockShapes {
    names: Vec<String>,
    physics_logic: Vec<BlockPhysicsLogic>,
    hitscan_logic: Vec<BlockHitscanLogic>,
}

impl BlockShapes {
    /// Registry containing only air.
    pub fn empty() -> Self {
        let mut shapes = BlockShapes {
            names: Vec::new(),
            physics_logic: Vec::new(),
            hitscan_logic: Vec::new(),
        };
        shapes.register("air", BlockPhysicsLogic::NoClip, BlockHitscanLogic::Vacuous);
        shapes
    }

    pub fn register(
        &mut self,
        name: &str,
        physics_logic: BlockPhysicsLogic,
        hitscan_logic: BlockHitscanLogic,
    ) -> BlockId {
        let bid = BlockId(self.names.len() as u16);
        self.names.push(name.to_owned());
        self.physics_logic.push(physics_logic);
        self.hitscan_logic.push(hitscan_logic);
        bid
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn name(&self, bid: BlockId) -> &str {
        &self.names[bid.0 as usize]
    }

    pub fn physics_logic(&self, bid: BlockId) -> &BlockPhysicsLogic {
        &self.physics_logic[bid.0 as usize]
    }

    pub fn hitscan_logic(&self, bid: BlockId) -> &BlockHitscanLogic {
        &self.hitscan_logic[bid.0 as usize]
    }

    pub fn by_name(&self, name: &str) -> Option<BlockId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| BlockId(i as u16))
    }
}

impl Default for BlockShapes {
    /// Registry with `AIR`, `STONE`, `FENCE`, `SLAB`, `TALL_GRASS` and
    /// `LANTERN` at their constant ids.
    fn default() -> Self {
        let mut shapes = BlockShapes::empty();
        shapes.register(
            "stone",
            BlockPhysicsLogic::BasicCube,
            BlockHitscanLogic::BasicCube,
        );
        shapes.register(
            "fence",
            BlockPhysicsLogic::Boxes(vec![
                AaBox::new([0.375, 0.0, 0.375], [0.625, 1.5, 0.625]),
            ]),
            BlockHitscanLogic::Boxes(vec![
                AaBox::new([0.375, 0.0, 0.375], [0.625, 1.0, 0.625]),
            ]),
        );
        let slab = AaBox::new([0.0, 0.0, 0.0], [1.0, 0.5, 1.0]);
        shapes.register(
            "slab",
            BlockPhysicsLogic::Boxes(vec![slab]),
            BlockHitscanLogic::Boxes(vec![slab]),
        );
        shapes.register(
            "tall_grass",
            BlockPhysicsLogic::NoClip,
            BlockHitscanLogic::Boxes(vec![
                AaBox::new([0.125, 0.0, 0.125], [0.875, 0.75, 0.875]),
            ]),
        );
        let lantern = vec![
            AaBox::new([0.25, 0.0, 0.25], [0.75, 0.5, 0.75]),
            AaBox::new([0.375, 0.5, 0.375], [0.625, 0.75, 0.625]),
        ];
        shapes.register(
            "lantern",
            BlockPhysicsLogic::Boxes(lantern.clone()),
            BlockHitscanLogic::Boxes(lantern),
        );
        debug_assert_eq!(shapes.by_name("lantern"), Some(LANTERN));
        shapes
    }
}


/// World which stores only its non-air blocks, in a hash map.
#[derive(Debug, Clone)]
pub struct SparseWorld {
    pub shapes: BlockShapes,
    blocks: HashMap<BlockPos, BlockId>,
    /// Inclusive y range look rays may enter, if limited.
    pub height_limits: Option<(i32, i32)>,
}

impl SparseWorld {
    /// Empty world with the default block shapes.
    pub fn new() -> Self {
        Self::with_shapes(BlockShapes::default())
    }

    pub fn with_shapes(shapes: BlockShapes) -> Self {
        SparseWorld {
            shapes,
            blocks: HashMap::new(),
            height_limits: None,
        }
    }

    pub fn get(&self, pos: BlockPos) -> BlockId {
        self.blocks.get(&pos).copied().unwrap_or(AIR)
    }

    /// Set the block at `pos`, returning the previous block.
    pub fn set(&mut self, pos: BlockPos, bid: BlockId) -> BlockId {
        assert!((bid.0 as usize) < self.shapes.len(), "unregistered block id {:?}", bid);
        let prev = if bid == AIR {
            self.blocks.remove(&pos)
        } else {
            self.blocks.insert(pos, bid)
        };
        prev.unwrap_or(AIR)
    }

    /// Fill the inclusive range from `min` to `max`, in `min`'s dimension.
    pub fn fill(&mut self, min: BlockPos, max: BlockPos, bid: BlockId) {
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    self.set(BlockPos::with_dim(x, y, z, min.dim), bid);
                }
            }
        }
    }

    /// Number of non-air blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for SparseWorld {
    fn default() -> Self {
        SparseWorld::new()
    }
}

impl BlockGrid for SparseWorld {
    type Block = BlockId;

    fn block(&self, pos: BlockPos) -> BlockId {
        self.get(pos)
    }

    fn collision_boxes<V: FnMut(AaBox)>(&self, _pos: BlockPos, block: &BlockId, visit: V) {
        self.shapes.physics_logic(*block).visit_boxes(visit)
    }
}

impl IntersectionSupplier for SparseWorld {
    type Block = BlockId;

    fn block(&self, pos: BlockPos) -> BlockId {
        self.get(pos)
    }

    fn selection_boxes<V: FnMut(AaBox)>(&self, _pos: BlockPos, block: &BlockId, visit: V) {
        self.shapes.hitscan_logic(*block).visit_boxes(visit)
    }

    fn is_valid_pos(&self, pos: BlockPos) -> bool {
        self.height_limits
            .map(|(min_y, max_y)| pos.y >= min_y && pos.y <= max_y)
            .unwrap_or(true)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ids_line_up() {
        let shapes = BlockShapes::default();
        assert_eq!(shapes.by_name("air"), Some(AIR));
        assert_eq!(shapes.by_name("stone"), Some(STONE));
        assert_eq!(shapes.by_name("fence"), Some(FENCE));
        assert_eq!(shapes.by_name("slab"), Some(SLAB));
        assert_eq!(shapes.by_name("tall_grass"), Some(TALL_GRASS));
        assert_eq!(shapes.by_name("lantern"), Some(LANTERN));
        assert_eq!(shapes.by_name("bedrock"), None);
    }

    #[test]
    fn set_and_get() {
        let mut world = SparseWorld::new();
        let pos = BlockPos::new(1, 2, 3);
        assert_eq!(world.set(pos, STONE), AIR);
        assert_eq!(world.get(pos), STONE);
        assert_eq!(world.get(pos.in_dim(1)), AIR);
        assert_eq!(world.set(pos, AIR), STONE);
        assert!(world.is_empty());
    }

    #[test]
    fn walk_order_is_x_fastest() {
        let world = SparseWorld::new();
        let mut visited = Vec::new();
        world.walk_blocks(BlockPos::new(0, 0, 0), BlockPos::new(1, 1, 1), |pos, _| visited.push(pos));
        assert_eq!(visited.len(), 8);
        assert_eq!(visited[0], BlockPos::new(0, 0, 0));
        assert_eq!(visited[1], BlockPos::new(1, 0, 0));
        assert_eq!(visited[2], BlockPos::new(0, 1, 0));
        assert_eq!(visited[4], BlockPos::new(0, 0, 1));
    }

    #[test]
    fn collision_and_selection_shapes_differ() {
        let world = SparseWorld::new();
        let mut collision = Vec::new();
        world.collision_boxes(BlockPos::new(0, 0, 0), &TALL_GRASS, |b| collision.push(b));
        assert!(collision.is_empty());

        let mut selection = Vec::new();
        world.selection_boxes(BlockPos::new(0, 0, 0), &TALL_GRASS, |b| selection.push(b));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn height_limits() {
        let mut world = SparseWorld::new();
        assert!(world.is_valid_pos(BlockPos::new(0, -1000, 0)));
        world.height_limits = Some((0, 255));
        assert!(world.is_valid_pos(BlockPos::new(0, 255, 0)));
        assert!(!world.is_valid_pos(BlockPos::new(0, 256, 0)));
        assert!(!world.is_valid_pos(BlockPos::new(0, -1, 0)));
    }
}
