//! Block creation, replacement, removal and settings-panel edits.
//!
//! Every function takes the current layout by reference and returns a new one.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use crate::config::EditorDefaults;
use crate::error::LayoutError;
use crate::models::{Block, BlockId, BlockKind, BlockType, Layout, Position, Row, RowId, Seat, SeatId, Size};

/// Edits coming from the side settings panel. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlockSettings {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub block_type: Option<BlockType>,
    #[validate(range(max = 1_000_000))]
    pub capacity: Option<u32>,
    #[validate(range(min = 1, max = 200))]
    pub rows: Option<u32>,
    #[validate(range(min = 1, max = 200))]
    pub columns: Option<u32>,
}

/// Appends a freshly defaulted block of the given type.
pub fn add_block(layout: &Layout, block_type: BlockType, defaults: &EditorDefaults) -> (Layout, Block) {
    let ordinal = layout.iter().filter(|b| b.block_type() == block_type).count() + 1;
    let block = Block {
        id: unique_id(layout),
        name: format!("{} {}", block_type.label(), ordinal),
        position: Position::new(defaults.spawn_x, defaults.spawn_y),
        kind: default_kind(block_type, defaults),
    };

    let mut next = layout.clone();
    next.push(block.clone());
    info!("Added {:?} block {} ({})", block_type, block.id, block.name);
    (next, block)
}

/// Replaces the block with the same id.
pub fn update_block(layout: &Layout, block: Block) -> Result<Layout, LayoutError> {
    let mut next = layout.clone();
    let id = block.id.clone();
    if !next.replace(block) {
        return Err(LayoutError::BlockNotFound(id));
    }
    debug!("Replaced block {}", id);
    Ok(next)
}

pub fn remove_block(layout: &Layout, block_id: &BlockId) -> Result<(Layout, Block), LayoutError> {
    let mut next = layout.clone();
    let removed = next
        .remove(block_id)
        .ok_or_else(|| LayoutError::BlockNotFound(block_id.clone()))?;
    info!("Removed block {} ({})", removed.id, removed.name);
    Ok((next, removed))
}

/// Applies settings-panel edits.
///
/// A type change happens first. Changing a grid's row or column count
/// regenerates it from scratch and drops its tier assignments.
pub fn configure_block(
    layout: &Layout,
    block_id: &BlockId,
    settings: &BlockSettings,
    defaults: &EditorDefaults,
) -> Result<Layout, LayoutError> {
    settings.validate()?;

    let mut next = layout.clone();
    let block = next
        .block_mut(block_id)
        .ok_or_else(|| LayoutError::BlockNotFound(block_id.clone()))?;

    if let Some(name) = &settings.name {
        block.name = name.trim().to_string();
    }

    if let Some(target) = settings.block_type {
        if target != block.block_type() {
            debug!("Converting block {} from {:?} to {:?}", block_id, block.block_type(), target);
            block.kind = convert_kind(block, target, defaults);
        }
    }

    let found = block.block_type();
    if let Some(capacity) = settings.capacity {
        match &mut block.kind {
            BlockKind::StandingCapacity { capacity: current, .. } => *current = capacity,
            _ => return Err(wrong_type(block_id, BlockType::StandingCapacity, found)),
        }
    }

    if settings.rows.is_some() || settings.columns.is_some() {
        let current_rows = block.rows().len() as u32;
        let current_columns = block.columns() as u32;
        match &mut block.kind {
            BlockKind::SeatedGrid { rows } => {
                let wanted_rows = settings.rows.unwrap_or(current_rows).max(1);
                let wanted_columns = settings.columns.unwrap_or(current_columns).max(1);
                if wanted_rows != current_rows || wanted_columns != current_columns {
                    *rows = build_grid(wanted_rows, wanted_columns);
                    info!(
                        "Regenerated grid for block {} as {}x{}, tier assignments cleared",
                        block_id, wanted_rows, wanted_columns
                    );
                }
            }
            _ => return Err(wrong_type(block_id, BlockType::SeatedGrid, found)),
        }
    }

    Ok(next)
}

/// Materializes a `rows x columns` grid with sequential labels.
pub fn build_grid(rows: u32, columns: u32) -> Vec<Row> {
    (0..rows)
        .map(|r| Row {
            id: RowId(format!("row-{}", r + 1)),
            label: row_label(r as usize),
            seats: (0..columns)
                .map(|c| Seat::new(SeatId(format!("seat-{}-{}", r + 1, c + 1)), (c + 1).to_string()))
                .collect(),
        })
        .collect()
}

/// Spreadsheet-style row labels: A..Z, AA, AB, ...
pub fn row_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

fn default_kind(block_type: BlockType, defaults: &EditorDefaults) -> BlockKind {
    let size = Size::new(defaults.area_width, defaults.area_height);
    match block_type {
        BlockType::SeatedGrid => BlockKind::SeatedGrid {
            rows: build_grid(defaults.grid_rows.max(1), defaults.grid_columns.max(1)),
        },
        BlockType::StandingCapacity => BlockKind::StandingCapacity {
            size,
            capacity: defaults.standing_capacity,
            tier_id: None,
            representatives: Vec::new(),
        },
        BlockType::NonSellable => BlockKind::NonSellable { size },
    }
}

fn convert_kind(block: &Block, target: BlockType, defaults: &EditorDefaults) -> BlockKind {
    // Площадка сохраняет свой размер; сетка при конвертации отдаёт свой footprint
    let size = block.footprint();
    match target {
        BlockType::SeatedGrid => default_kind(BlockType::SeatedGrid, defaults),
        BlockType::StandingCapacity => BlockKind::StandingCapacity {
            size,
            capacity: match block.block_type() {
                BlockType::SeatedGrid => block.seat_count() as u32,
                _ => defaults.standing_capacity,
            },
            tier_id: None,
            representatives: Vec::new(),
        },
        BlockType::NonSellable => BlockKind::NonSellable { size },
    }
}

fn wrong_type(block_id: &BlockId, expected: BlockType, found: BlockType) -> LayoutError {
    LayoutError::WrongBlockType {
        block: block_id.clone(),
        expected,
        found,
    }
}

fn unique_id(layout: &Layout) -> BlockId {
    loop {
        let id = BlockId::generate();
        if !layout.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TierId;

    #[test]
    fn row_labels_roll_over_like_spreadsheet_columns() {
        assert_eq!(row_label(0), "A");
        assert_eq!(row_label(25), "Z");
        assert_eq!(row_label(26), "AA");
        assert_eq!(row_label(27), "AB");
        assert_eq!(row_label(701), "ZZ");
        assert_eq!(row_label(702), "AAA");
    }

    #[test]
    fn add_block_materializes_default_grid() {
        let defaults = EditorDefaults::default();
        let (layout, block) = add_block(&Layout::new(), BlockType::SeatedGrid, &defaults);
        assert_eq!(layout.blocks.len(), 1);
        assert_eq!(block.name, "Seated Block 1");
        assert_eq!(block.rows().len(), 5);
        assert_eq!(block.columns(), 10);
        assert_eq!(block.rows()[1].label, "B");
        assert_eq!(block.rows()[1].seats[9].label, "10");
        assert!(block.size().is_none());
        assert_eq!(block.position, Position::new(50.0, 50.0));
    }

    #[test]
    fn added_blocks_overlap_and_get_distinct_ids() {
        let defaults = EditorDefaults::default();
        let (layout, first) = add_block(&Layout::new(), BlockType::StandingCapacity, &defaults);
        let (layout, second) = add_block(&layout, BlockType::StandingCapacity, &defaults);
        assert_ne!(first.id, second.id);
        assert_eq!(first.position, second.position);
        assert_eq!(second.name, "Standing Area 2");
        assert_eq!(layout.blocks.len(), 2);
        assert_eq!(second.sellable_capacity(), 100);
    }

    #[test]
    fn remove_missing_block_fails() {
        assert!(remove_block(&Layout::new(), &BlockId::new("x")).unwrap_err().is_not_found());
    }

    #[test]
    fn regenerating_grid_drops_assignments() {
        let defaults = EditorDefaults::default();
        let (layout, block) = add_block(&Layout::new(), BlockType::SeatedGrid, &defaults);
        let mut edited = block.clone();
        if let BlockKind::SeatedGrid { rows } = &mut edited.kind {
            rows[0].seats[0].assign(Some(TierId::new("vip")));
        }
        let layout = update_block(&layout, edited).unwrap();

        let settings = BlockSettings {
            rows: Some(2),
            columns: Some(3),
            ..Default::default()
        };
        let layout = configure_block(&layout, &block.id, &settings, &defaults).unwrap();
        let regenerated = layout.find_block(&block.id).unwrap();
        assert_eq!(regenerated.seat_count(), 6);
        assert!(regenerated.rows().iter().flat_map(|r| &r.seats).all(Seat::is_unassigned));
    }

    #[test]
    fn unchanged_dimensions_keep_assignments() {
        let defaults = EditorDefaults::default();
        let (layout, block) = add_block(&Layout::new(), BlockType::SeatedGrid, &defaults);
        let mut edited = block.clone();
        if let BlockKind::SeatedGrid { rows } = &mut edited.kind {
            rows[0].seats[0].assign(Some(TierId::new("vip")));
        }
        let layout = update_block(&layout, edited.clone()).unwrap();
        let settings = BlockSettings {
            rows: Some(5),
            name: Some("Stalls".into()),
            ..Default::default()
        };
        let layout = configure_block(&layout, &block.id, &settings, &defaults).unwrap();
        let after = layout.find_block(&block.id).unwrap();
        assert_eq!(after.name, "Stalls");
        assert_eq!(after.rows(), edited.rows());
    }

    #[test]
    fn standing_block_converts_to_non_sellable() {
        let defaults = EditorDefaults::default();
        let (layout, block) = add_block(&Layout::new(), BlockType::StandingCapacity, &defaults);
        let settings = BlockSettings {
            block_type: Some(BlockType::NonSellable),
            ..Default::default()
        };
        let layout = configure_block(&layout, &block.id, &settings, &defaults).unwrap();
        let after = layout.find_block(&block.id).unwrap();
        assert_eq!(after.block_type(), BlockType::NonSellable);
        assert_eq!(after.size(), block.size());
    }

    #[test]
    fn capacity_on_grid_is_rejected() {
        let defaults = EditorDefaults::default();
        let (layout, block) = add_block(&Layout::new(), BlockType::SeatedGrid, &defaults);
        let settings = BlockSettings {
            capacity: Some(10),
            ..Default::default()
        };
        let err = configure_block(&layout, &block.id, &settings, &defaults).unwrap_err();
        assert!(matches!(err, LayoutError::WrongBlockType { expected: BlockType::StandingCapacity, .. }));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let defaults = EditorDefaults::default();
        let (layout, block) = add_block(&Layout::new(), BlockType::SeatedGrid, &defaults);
        let settings = BlockSettings {
            name: Some(String::new()),
            rows: Some(0),
            ..Default::default()
        };
        let err = configure_block(&layout, &block.id, &settings, &defaults).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSettings(_)));
        assert_eq!(layout.find_block(&block.id).unwrap().rows().len(), 5);
    }
}
