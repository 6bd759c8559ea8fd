//! Canvas transform: zoom state and pointer-delta translation.
//!
//! Pointer deltas arrive in screen pixels. Dividing by the current zoom turns
//! them into logical units, so the same mouse movement moves a block the same
//! on-screen distance at every zoom level.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CanvasConfig;
use crate::error::LayoutError;
use crate::models::{BlockId, BlockKind, Layout, Position, Size};

/// Pointer movement in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenDelta {
    pub dx: f64,
    pub dy: f64,
}

impl ScreenDelta {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

#[derive(Debug, Clone)]
pub struct Canvas {
    zoom: f64,
    config: CanvasConfig,
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        let zoom = bounded(1.0, &config);
        Self { zoom, config }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Clamps into the configured range. Blocks never move on zoom.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        if zoom.is_finite() {
            self.zoom = bounded(zoom, &self.config);
        }
        self.zoom
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(round_zoom(self.zoom + self.config.zoom_step))
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(round_zoom(self.zoom - self.config.zoom_step))
    }

    /// Screen delta to logical delta. Non-finite components count as zero.
    pub fn screen_to_logical(&self, delta: ScreenDelta) -> (f64, f64) {
        (finite_or_zero(delta.dx) / self.zoom, finite_or_zero(delta.dy) / self.zoom)
    }

    /// Rendering transform for a logical point.
    pub fn logical_to_screen(&self, position: Position) -> Position {
        Position::new(position.x * self.zoom, position.y * self.zoom)
    }

    /// Moves a block by a pointer drag. Rows, seats and tiers are untouched.
    pub fn drag(&self, layout: &Layout, block_id: &BlockId, delta: ScreenDelta) -> Result<Layout, LayoutError> {
        let (dx, dy) = self.screen_to_logical(delta);
        move_block(layout, block_id, dx, dy)
    }

    /// Grows or shrinks an area block from its bottom-right handle.
    pub fn resize(&self, layout: &Layout, block_id: &BlockId, delta: ScreenDelta) -> Result<Layout, LayoutError> {
        let (dw, dh) = self.screen_to_logical(delta);
        resize_block(layout, block_id, dw, dh, self.config.min_block_size)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

/// Shifts a block by a logical offset.
pub fn move_block(layout: &Layout, block_id: &BlockId, dx: f64, dy: f64) -> Result<Layout, LayoutError> {
    let mut next = layout.clone();
    let block = next
        .block_mut(block_id)
        .ok_or_else(|| LayoutError::BlockNotFound(block_id.clone()))?;
    block.position = block.position.offset(dx, dy);
    debug!("Moved block {} to ({:.1}, {:.1})", block_id, block.position.x, block.position.y);
    Ok(next)
}

/// Adds a logical delta to an area block's size, flooring each axis at `min_size`.
pub fn resize_block(
    layout: &Layout,
    block_id: &BlockId,
    dw: f64,
    dh: f64,
    min_size: f64,
) -> Result<Layout, LayoutError> {
    let mut next = layout.clone();
    let block = next
        .block_mut(block_id)
        .ok_or_else(|| LayoutError::BlockNotFound(block_id.clone()))?;

    match &mut block.kind {
        BlockKind::StandingCapacity { size, .. } | BlockKind::NonSellable { size } => {
            *size = clamp_size(Size::new(size.width + dw, size.height + dh), min_size);
            debug!("Resized block {} to {:.1}x{:.1}", block_id, size.width, size.height);
            Ok(next)
        }
        BlockKind::SeatedGrid { .. } => Err(LayoutError::FixedFootprint(block_id.clone())),
    }
}

pub fn clamp_size(size: Size, min_size: f64) -> Size {
    Size::new(size.width.max(min_size), size.height.max(min_size))
}

// zoom_max wins if a hand-built config has the bounds crossed
fn bounded(zoom: f64, config: &CanvasConfig) -> f64 {
    zoom.max(config.zoom_min).min(config.zoom_max)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn round_zoom(zoom: f64) -> f64 {
    (zoom * 100.0).round() / 100.0
}
