use thiserror::Error;

use crate::models::{BlockId, BlockType, RowId, SeatId};

/// Failures of layout mutations. Every one of them leaves the layout unchanged.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("row {row} not found in block {block}")]
    RowNotFound { block: BlockId, row: RowId },

    #[error("seat {seat} not found in block {block}")]
    SeatNotFound { block: BlockId, seat: SeatId },

    #[error("block {block} is {found:?}, expected {expected:?}")]
    WrongBlockType {
        block: BlockId,
        expected: BlockType,
        found: BlockType,
    },

    #[error("block {0} has a fixed footprint and cannot be resized")]
    FixedFootprint(BlockId),

    #[error("invalid block settings: {0}")]
    InvalidSettings(#[from] validator::ValidationErrors),
}

impl LayoutError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LayoutError::BlockNotFound(_) | LayoutError::RowNotFound { .. } | LayoutError::SeatNotFound { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("ZOOM_MIN ({min}) must be positive and not exceed ZOOM_MAX ({max})")]
    ZoomRange { min: f64, max: f64 },
}
