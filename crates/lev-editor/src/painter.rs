//! Block painting: single-cell writes and the two active-block slots.

use crate::input::BlockSlot;
use lev_core::{BlockCatalog, BlockId, EMPTY_BLOCK, GridMap};

/// Primary/secondary active block and the cell writes they drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPainter {
    primary: BlockId,
    secondary: BlockId,
}

impl Default for BlockPainter {
    fn default() -> Self {
        Self {
            primary: 1,
            secondary: EMPTY_BLOCK,
        }
    }
}

impl BlockPainter {
    pub fn new(primary: BlockId, secondary: BlockId) -> Self {
        Self { primary, secondary }
    }

    pub fn active(&self, slot: BlockSlot) -> BlockId {
        match slot {
            BlockSlot::Primary => self.primary,
            BlockSlot::Secondary => self.secondary,
        }
    }

    pub fn set_active(&mut self, slot: BlockSlot, block: BlockId) {
        match slot {
            BlockSlot::Primary => self.primary = block,
            BlockSlot::Secondary => self.secondary = block,
        }
    }

    /// `(primary, secondary)`.
    pub fn active_blocks(&self) -> (BlockId, BlockId) {
        (self.primary, self.secondary)
    }

    /// Write `block` at `(x, y)` if it differs from what is there.
    ///
    /// Returns whether the cell changed. Out-of-bounds writes are ignored.
    pub fn paint(map: &mut GridMap, x: i32, y: i32, block: BlockId) -> bool {
        match map.get_block(x, y) {
            Some(current) if current != block => map.set_block(x, y, block).is_ok(),
            Some(_) => false,
            None => {
                log::trace!("paint ignored outside grid at ({x}, {y})");
                false
            }
        }
    }

    /// Paint with the block in `slot`.
    pub fn paint_slot(&self, map: &mut GridMap, x: i32, y: i32, slot: BlockSlot) -> bool {
        Self::paint(map, x, y, self.active(slot))
    }

    pub fn erase(map: &mut GridMap, x: i32, y: i32) -> bool {
        Self::paint(map, x, y, EMPTY_BLOCK)
    }

    /// Copy the block under `(x, y)` into `slot`. Returns the picked block.
    ///
    /// Cells holding a block the catalog does not know leave the slot as is.
    pub fn pick(
        &mut self,
        map: &GridMap,
        catalog: &BlockCatalog,
        x: i32,
        y: i32,
        slot: BlockSlot,
    ) -> Option<BlockId> {
        let block = map.get_block(x, y)?;
        if !catalog.contains(block) {
            log::debug!("not picking block {block} at ({x}, {y}): not in the catalog");
            return None;
        }
        self.set_active(slot, block);
        Some(block)
    }
}
