//! Root of the seating tree.
//!
//! Blocks sit behind `Arc` so a `Layout` clone is a structural copy: cheap to
//! take before a mutation, and [`Layout::block_mut`] copies a block on write.
//! Snapshots handed out earlier therefore never observe later edits.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{Block, BlockId, BlockKind, Row, RowId, Seat, SeatId, TierId};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub blocks: Vec<Arc<Block>>,
}

/// Result of a seat lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeatHit<'a> {
    Grid { row: &'a Row, seat: &'a Seat },
    /// A seat a standing block exposes for its shared tier.
    Representative { tier_id: Option<&'a TierId> },
}

impl<'a> SeatHit<'a> {
    pub fn tier_id(&self) -> Option<&'a TierId> {
        match self {
            SeatHit::Grid { seat, .. } => seat.tier_id.as_ref(),
            SeatHit::Representative { tier_id } => *tier_id,
        }
    }
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self {
            blocks: blocks.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().map(|b| b.as_ref())
    }

    pub fn find_block(&self, block_id: &BlockId) -> Option<&Block> {
        self.iter().find(|b| &b.id == block_id)
    }

    /// Looks a seat up by id. Without `row_id` every row of the block is
    /// searched, and a standing block matches its representative seat id.
    pub fn find_seat(&self, block_id: &BlockId, row_id: Option<&RowId>, seat_id: &SeatId) -> Option<SeatHit<'_>> {
        let block = self.find_block(block_id)?;
        match &block.kind {
            BlockKind::SeatedGrid { rows } => rows
                .iter()
                .filter(|r| row_id.is_none_or(|id| &r.id == id))
                .find_map(|row| row.find_seat(seat_id).map(|seat| SeatHit::Grid { row, seat })),
            BlockKind::StandingCapacity { tier_id, .. } => (row_id.is_none() && block.is_representative_seat(seat_id))
                .then_some(SeatHit::Representative {
                    tier_id: tier_id.as_ref(),
                }),
            BlockKind::NonSellable { .. } => None,
        }
    }

    /// Mutable access to one block, copying it first if a snapshot still shares it.
    pub fn block_mut(&mut self, block_id: &BlockId) -> Option<&mut Block> {
        self.blocks
            .iter_mut()
            .find(|b| &b.id == block_id)
            .map(Arc::make_mut)
    }

    pub fn contains(&self, block_id: &BlockId) -> bool {
        self.find_block(block_id).is_some()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(Arc::new(block));
    }

    /// Replaces the block with the same id. Returns false when absent.
    pub fn replace(&mut self, block: Block) -> bool {
        match self.blocks.iter_mut().find(|b| b.id == block.id) {
            Some(slot) => {
                *slot = Arc::new(block);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, block_id: &BlockId) -> Option<Block> {
        let index = self.blocks.iter().position(|b| &b.id == block_id)?;
        let removed = self.blocks.remove(index);
        Some(Arc::unwrap_or_clone(removed))
    }
}
