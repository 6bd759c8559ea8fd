use serde::{Deserialize, Serialize};

use super::{BlockId, RowId, Seat, SeatId, SeatStatus, TierId};

/// Distance between neighbouring seat centres in a seated grid.
pub const SEAT_PITCH: f64 = 28.0;
/// Inner padding around a block's content.
pub const BLOCK_PADDING: f64 = 12.0;
/// Space reserved for the block name above the grid.
pub const BLOCK_HEADER: f64 = 24.0;
/// Geometry used when an area block arrives without width/height.
pub const DEFAULT_AREA_SIZE: Size = Size { width: 200.0, height: 120.0 };

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    SeatedGrid,
    StandingCapacity,
    NonSellable,
}

impl BlockType {
    /// Prefix for default block names.
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::SeatedGrid => "Seated Block",
            BlockType::StandingCapacity => "Standing Area",
            BlockType::NonSellable => "Non-sellable Area",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: RowId,
    pub label: String,
    #[serde(default)]
    pub seats: Vec<Seat>,
}

impl Row {
    pub fn find_seat(&self, seat_id: &SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| &s.id == seat_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    SeatedGrid {
        rows: Vec<Row>,
    },
    /// Aggregate standing area. The tier applies to the whole block.
    StandingCapacity {
        size: Size,
        capacity: u32,
        tier_id: Option<TierId>,
        /// Representative seats as received from the backend, written back
        /// as they came. Empty for areas created in the editor.
        representatives: Vec<Seat>,
    },
    NonSellable {
        size: Size,
    },
}

/// One placed unit on the canvas.
///
/// On the wire a block keeps the flat shape consumed by the backend
/// (`type`, `position`, `width`/`height`, `rows`, `seats`, `capacity`);
/// a private wire adapter converts between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireBlock", into = "WireBlock")]
pub struct Block {
    pub id: BlockId,
    pub name: String,
    pub position: Position,
    pub kind: BlockKind,
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        match self.kind {
            BlockKind::SeatedGrid { .. } => BlockType::SeatedGrid,
            BlockKind::StandingCapacity { .. } => BlockType::StandingCapacity,
            BlockKind::NonSellable { .. } => BlockType::NonSellable,
        }
    }

    /// Explicit width/height; `None` for seated grids.
    pub fn size(&self) -> Option<Size> {
        match &self.kind {
            BlockKind::SeatedGrid { .. } => None,
            BlockKind::StandingCapacity { size, .. } | BlockKind::NonSellable { size } => Some(*size),
        }
    }

    /// On-canvas footprint; derived from the grid for seated blocks.
    pub fn footprint(&self) -> Size {
        match &self.kind {
            BlockKind::SeatedGrid { rows } => {
                let columns = Self::column_count(rows) as f64;
                Size {
                    width: columns * SEAT_PITCH + 2.0 * BLOCK_PADDING,
                    height: rows.len() as f64 * SEAT_PITCH + BLOCK_HEADER + 2.0 * BLOCK_PADDING,
                }
            }
            BlockKind::StandingCapacity { size, .. } | BlockKind::NonSellable { size } => *size,
        }
    }

    pub fn rows(&self) -> &[Row] {
        match &self.kind {
            BlockKind::SeatedGrid { rows } => rows,
            _ => &[],
        }
    }

    /// Width of the rendered grid: the longest row.
    pub fn columns(&self) -> usize {
        Self::column_count(self.rows())
    }

    pub fn seat_count(&self) -> usize {
        self.rows().iter().map(|r| r.seats.len()).sum()
    }

    /// Whether `seat_id` names one of the seats a standing block exposes.
    pub fn is_representative_seat(&self, seat_id: &SeatId) -> bool {
        match &self.kind {
            BlockKind::StandingCapacity { representatives, .. } if representatives.is_empty() => {
                area_seat_id(&self.id) == *seat_id
            }
            BlockKind::StandingCapacity { representatives, .. } => representatives.iter().any(|s| &s.id == seat_id),
            _ => false,
        }
    }

    /// Seated: available seats. Standing: the capacity field. Otherwise zero.
    pub fn sellable_capacity(&self) -> u64 {
        match &self.kind {
            BlockKind::SeatedGrid { rows } => rows
                .iter()
                .flat_map(|r| r.seats.iter())
                .filter(|s| s.status == SeatStatus::Available)
                .count() as u64,
            BlockKind::StandingCapacity { capacity, .. } => u64::from(*capacity),
            BlockKind::NonSellable { .. } => 0,
        }
    }

    fn column_count(rows: &[Row]) -> usize {
        rows.iter().map(|r| r.seats.len()).max().unwrap_or(0)
    }
}

fn area_seat_id(block_id: &BlockId) -> SeatId {
    SeatId(format!("{}-area", block_id))
}

/// The seat written for a standing area that has none of its own.
fn area_seat(block_id: &BlockId, tier_id: Option<TierId>) -> Seat {
    Seat {
        id: area_seat_id(block_id),
        label: "Standing".to_string(),
        tier_id,
        status: SeatStatus::Available,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBlock {
    id: BlockId,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    block_type: BlockType,
    #[serde(default)]
    position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rows: Option<Vec<Row>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seats: Option<Vec<Seat>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capacity: Option<u32>,
}

impl WireBlock {
    fn size_or_default(&self) -> Size {
        Size {
            width: self.width.unwrap_or(DEFAULT_AREA_SIZE.width),
            height: self.height.unwrap_or(DEFAULT_AREA_SIZE.height),
        }
    }
}

impl From<WireBlock> for Block {
    fn from(mut wire: WireBlock) -> Self {
        let kind = match wire.block_type {
            BlockType::SeatedGrid => BlockKind::SeatedGrid {
                rows: wire.rows.take().unwrap_or_default(),
            },
            BlockType::StandingCapacity => {
                let mut representatives = wire.seats.take().unwrap_or_default();
                let tier_id = representatives.iter().find_map(|s| s.tier_id.clone());
                if representatives
                    .iter()
                    .filter_map(|s| s.tier_id.as_ref())
                    .any(|t| Some(t) != tier_id.as_ref())
                {
                    tracing::warn!(
                        "Standing block {} carries conflicting representative tiers, keeping {:?}",
                        wire.id,
                        tier_id
                    );
                }
                // Our own synthesized seat carries nothing worth keeping
                if representatives.len() == 1 && representatives[0] == area_seat(&wire.id, tier_id.clone()) {
                    representatives.clear();
                }
                BlockKind::StandingCapacity {
                    size: wire.size_or_default(),
                    capacity: wire.capacity.unwrap_or(0),
                    tier_id,
                    representatives,
                }
            }
            BlockType::NonSellable => BlockKind::NonSellable {
                size: wire.size_or_default(),
            },
        };

        Block {
            id: wire.id,
            name: wire.name,
            position: wire.position,
            kind,
        }
    }
}

impl From<Block> for WireBlock {
    fn from(block: Block) -> Self {
        let fallback = area_seat(&block.id, None);
        let mut wire = WireBlock {
            id: block.id,
            name: block.name,
            block_type: BlockType::SeatedGrid,
            position: block.position,
            width: None,
            height: None,
            rows: None,
            seats: None,
            capacity: None,
        };

        match block.kind {
            BlockKind::SeatedGrid { rows } => {
                wire.rows = Some(rows);
            }
            BlockKind::StandingCapacity {
                size,
                capacity,
                tier_id,
                representatives,
            } => {
                wire.block_type = BlockType::StandingCapacity;
                wire.width = Some(size.width);
                wire.height = Some(size.height);
                wire.capacity = Some(capacity);
                wire.seats = Some(if representatives.is_empty() {
                    vec![Seat { tier_id, ..fallback }]
                } else {
                    representatives
                });
            }
            BlockKind::NonSellable { size } => {
                wire.block_type = BlockType::NonSellable;
                wire.width = Some(size.width);
                wire.height = Some(size.height);
            }
        }

        wire
    }
}
