//! Read-only projection of a layout for reviewers.

use serde::Serialize;

use crate::models::{Block, BlockId, BlockKind, Layout, Position, Seat, SeatStatus, SessionView, Size, Tier, TierId};

/// Fill for seats and areas without a resolvable tier.
pub const NEUTRAL_COLOR: &str = "#d1d5db";
/// Opacity applied to reserved seats.
pub const RESERVED_OPACITY: f32 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatingView {
    pub blocks: Vec<BlockView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockView {
    pub id: BlockId,
    pub name: String,
    pub position: Position,
    pub size: Size,
    pub body: BlockBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockBody {
    /// Uniform grid; short rows are padded with `None` cells.
    Grid { columns: usize, rows: Vec<RowView> },
    Standing { capacity: u32, label: String, tier: TierBadge },
    Placeholder { label: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub label: String,
    pub cells: Vec<Option<SeatView>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatView {
    pub label: String,
    pub color: String,
    pub opacity: f32,
    pub popover: SeatPopover,
}

/// Details shown when a reviewer hovers a seat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatPopover {
    pub block: String,
    pub row: String,
    pub seat: String,
    pub status: SeatStatus,
    pub tier: TierBadge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierBadge {
    pub name: String,
    pub color: String,
    pub price: Option<f64>,
}

impl TierBadge {
    fn resolve(tier_id: Option<&TierId>, tiers: &[Tier]) -> Self {
        match tier_id {
            None => Self::neutral("Unassigned"),
            Some(id) => match Tier::lookup(tiers, id) {
                Some(tier) => TierBadge {
                    name: tier.name.clone(),
                    color: tier.color.clone(),
                    price: Some(tier.price),
                },
                None => {
                    tracing::debug!("Tier {} is not in the supplied list", id);
                    Self::neutral("Unknown")
                }
            },
        }
    }

    fn neutral(name: &str) -> Self {
        TierBadge {
            name: name.to_string(),
            color: NEUTRAL_COLOR.to_string(),
            price: None,
        }
    }
}

/// Renders a session's seating map, or nothing when the session is not
/// physical or carries no layout.
pub fn render_session(session: &SessionView, tiers: &[Tier]) -> Option<SeatingView> {
    session.seating_layout().map(|layout| render(layout, tiers))
}

pub fn render(layout: &Layout, tiers: &[Tier]) -> SeatingView {
    SeatingView {
        blocks: layout.iter().map(|block| render_block(block, tiers)).collect(),
    }
}

fn render_block(block: &Block, tiers: &[Tier]) -> BlockView {
    let body = match &block.kind {
        BlockKind::SeatedGrid { rows } => {
            let columns = block.columns();
            BlockBody::Grid {
                columns,
                rows: rows
                    .iter()
                    .map(|row| {
                        let mut cells: Vec<Option<SeatView>> = row
                            .seats
                            .iter()
                            .map(|seat| Some(render_seat(block, &row.label, seat, tiers)))
                            .collect();
                        cells.resize(columns, None);
                        RowView {
                            label: row.label.clone(),
                            cells,
                        }
                    })
                    .collect(),
            }
        }
        BlockKind::StandingCapacity { capacity, tier_id, .. } => BlockBody::Standing {
            capacity: *capacity,
            label: format!("Capacity: {capacity}"),
            tier: TierBadge::resolve(tier_id.as_ref(), tiers),
        },
        BlockKind::NonSellable { .. } => BlockBody::Placeholder {
            label: "Not for sale".to_string(),
        },
    };

    BlockView {
        id: block.id.clone(),
        name: block.name.clone(),
        position: block.position,
        size: block.footprint(),
        body,
    }
}

fn render_seat(block: &Block, row_label: &str, seat: &Seat, tiers: &[Tier]) -> SeatView {
    let tier = TierBadge::resolve(seat.tier_id.as_ref(), tiers);
    SeatView {
        label: seat.label.clone(),
        color: tier.color.clone(),
        opacity: if seat.is_reserved() { RESERVED_OPACITY } else { 1.0 },
        popover: SeatPopover {
            block: block.name.clone(),
            row: row_label.to_string(),
            seat: seat.label.clone(),
            status: seat.status,
            tier,
        },
    }
}
