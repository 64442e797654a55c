//! Block catalog: sprite frame names per block index and animation state.
//!
//! The catalog is read-only metadata plus one frame cursor per block. Image
//! handles are the host's concern; the core only hands out the name of the
//! frame a block currently shows.

use crate::error::{LevelError, Result};
use crate::model::BlockId;
use serde::{Deserialize, Serialize};

/// Metadata for one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockMeta {
    /// Sprite names, one per animation frame.
    #[serde(rename = "animationFrames", alias = "animations")]
    pub animation_frames: Vec<String>,
}

/// Ordered block catalog. Entry 0 is the empty block.
#[derive(Debug, Clone)]
pub struct BlockCatalog {
    blocks: Vec<BlockMeta>,
    current: Vec<usize>,
}

impl BlockCatalog {
    pub fn new(blocks: Vec<BlockMeta>) -> Result<Self> {
        if blocks.is_empty() {
            return Err(LevelError::MalformedCatalog(
                "catalog needs at least the empty block".to_string(),
            ));
        }
        if let Some(i) = blocks.iter().position(|b| b.animation_frames.is_empty()) {
            return Err(LevelError::MalformedCatalog(format!(
                "block {i} has no animation frames"
            )));
        }
        let current = vec![0; blocks.len()];
        Ok(Self { blocks, current })
    }

    /// Parse a JSON array of `{ "animationFrames": [...] }` entries.
    pub fn from_json(input: &str) -> Result<Self> {
        let blocks: Vec<BlockMeta> =
            serde_json::from_str(input).map_err(|e| LevelError::MalformedCatalog(e.to_string()))?;
        Self::new(blocks)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn contains(&self, block: BlockId) -> bool {
        (block as usize) < self.blocks.len()
    }

    pub fn meta(&self, block: BlockId) -> Option<&BlockMeta> {
        self.blocks.get(block as usize)
    }

    /// Number of animation frames, 0 for unknown blocks.
    pub fn frame_count(&self, block: BlockId) -> usize {
        self.meta(block).map_or(0, |m| m.animation_frames.len())
    }

    pub fn is_animated(&self, block: BlockId) -> bool {
        self.frame_count(block) > 1
    }

    /// Index of the frame the block currently shows.
    pub fn current_frame_index(&self, block: BlockId) -> Option<usize> {
        self.current.get(block as usize).copied()
    }

    /// Sprite name of the frame the block currently shows.
    pub fn current_frame(&self, block: BlockId) -> Option<&str> {
        let meta = self.meta(block)?;
        let frame = self.current_frame_index(block)?;
        meta.animation_frames.get(frame).map(String::as_str)
    }

    /// Every sprite name in the catalog, in catalog order.
    pub fn frame_names(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .flat_map(|b| b.animation_frames.iter().map(String::as_str))
    }

    /// Step every block to its next frame, wrapping around.
    ///
    /// Returns `true` when at least one block is animated, i.e. when the
    /// step changed something worth redrawing.
    pub fn advance_animation(&mut self) -> bool {
        let mut any = false;
        for (cursor, meta) in self.current.iter_mut().zip(&self.blocks) {
            let frames = meta.animation_frames.len();
            *cursor = (*cursor + 1) % frames;
            any |= frames > 1;
        }
        any
    }
}
