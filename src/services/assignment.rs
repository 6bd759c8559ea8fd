//! Tier assignment engine.
//!
//! The armed [`Tool`] decides what a click does: assign a tier, toggle
//! reservation, or clear. Reservation never becomes a tier value; it only
//! lives in a seat's status.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::LayoutError;
use crate::models::{Block, BlockId, BlockKind, BlockType, Layout, RowId, SeatId, SeatStatus, Tier, TierId};

pub const STANDING_RESERVE_WARNING: &str =
    "You cannot reserve an entire standing block; change its type to NonSellable instead.";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Tier(TierId),
    Reserve,
    /// No tier armed: clicks clear assignments.
    #[default]
    Clear,
}

impl Tool {
    fn tier_id(&self) -> Option<&TierId> {
        match self {
            Tool::Tier(id) => Some(id),
            _ => None,
        }
    }
}

/// Feedback for a bulk or block-level assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplySummary {
    pub block_id: BlockId,
    pub seats_affected: usize,
    pub label: String,
}

/// Outcome of an assignment that may be refused by policy.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Applied { layout: Layout, summary: ApplySummary },
    /// Nothing changed; the message is meant for the user.
    Rejected { warning: String },
}

/// Click on one seat of a seated grid.
pub fn seat_click(
    layout: &Layout,
    tool: &Tool,
    block_id: &BlockId,
    row_id: &RowId,
    seat_id: &SeatId,
) -> Result<Layout, LayoutError> {
    let mut next = layout.clone();
    let block = next
        .block_mut(block_id)
        .ok_or_else(|| LayoutError::BlockNotFound(block_id.clone()))?;
    let found = block.block_type();

    let BlockKind::SeatedGrid { rows } = &mut block.kind else {
        return Err(LayoutError::WrongBlockType {
            block: block_id.clone(),
            expected: BlockType::SeatedGrid,
            found,
        });
    };
    let row = rows
        .iter_mut()
        .find(|r| &r.id == row_id)
        .ok_or_else(|| LayoutError::RowNotFound {
            block: block_id.clone(),
            row: row_id.clone(),
        })?;
    let seat = row
        .seats
        .iter_mut()
        .find(|s| &s.id == seat_id)
        .ok_or_else(|| LayoutError::SeatNotFound {
            block: block_id.clone(),
            seat: seat_id.clone(),
        })?;

    match tool {
        Tool::Reserve => match seat.status {
            SeatStatus::Available => seat.reserve(),
            SeatStatus::Reserved => seat.release(),
        },
        _ => {
            let armed = tool.tier_id();
            if seat.tier_id.as_ref() == armed {
                seat.tier_id = None;
            } else {
                seat.assign(armed.cloned());
            }
        }
    }

    debug!(
        "Seat {}/{}/{} now {} tier={:?}",
        block_id,
        row_id,
        seat_id,
        seat.status.as_str(),
        seat.tier_id
    );
    Ok(next)
}

/// Click on a standing block: sets the shared tier of the whole area.
pub fn block_click(layout: &Layout, tool: &Tool, block_id: &BlockId, tiers: &[Tier]) -> Result<Assignment, LayoutError> {
    let block = layout
        .find_block(block_id)
        .ok_or_else(|| LayoutError::BlockNotFound(block_id.clone()))?;
    ensure_type(block, BlockType::StandingCapacity)?;

    if *tool == Tool::Reserve {
        warn!("Refused to reserve standing block {}", block_id);
        return Ok(Assignment::Rejected {
            warning: STANDING_RESERVE_WARNING.to_string(),
        });
    }

    let mut next = layout.clone();
    if let Some(BlockKind::StandingCapacity {
        tier_id, representatives, ..
    }) = next.block_mut(block_id).map(|b| &mut b.kind)
    {
        *tier_id = tool.tier_id().cloned();
        for seat in representatives.iter_mut() {
            seat.assign(tier_id.clone());
        }
    }

    let summary = ApplySummary {
        block_id: block_id.clone(),
        seats_affected: 1,
        label: tool_label(tool, tiers),
    };
    info!("Standing block {} set to {}", block_id, summary.label);
    Ok(Assignment::Applied { layout: next, summary })
}

/// Applies the armed tool to every seat of a seated grid, unconditionally.
pub fn apply_to_all(
    layout: &Layout,
    tool: &Tool,
    block_id: &BlockId,
    tiers: &[Tier],
) -> Result<(Layout, ApplySummary), LayoutError> {
    let mut next = layout.clone();
    let block = next
        .block_mut(block_id)
        .ok_or_else(|| LayoutError::BlockNotFound(block_id.clone()))?;
    ensure_type(block, BlockType::SeatedGrid)?;

    let mut seats_affected = 0;
    if let BlockKind::SeatedGrid { rows } = &mut block.kind {
        for seat in rows.iter_mut().flat_map(|r| r.seats.iter_mut()) {
            match tool {
                Tool::Reserve => seat.reserve(),
                _ => seat.assign(tool.tier_id().cloned()),
            }
            seats_affected += 1;
        }
    }

    let summary = ApplySummary {
        block_id: block_id.clone(),
        seats_affected,
        label: tool_label(tool, tiers),
    };
    info!(
        "Applied {} to {} seats in block {}",
        summary.label, summary.seats_affected, block_id
    );
    Ok((next, summary))
}

/// Human label for what the tool applies.
pub fn tool_label(tool: &Tool, tiers: &[Tier]) -> String {
    match tool {
        Tool::Tier(id) => Tier::lookup(tiers, id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "Unknown tier".to_string()),
        Tool::Reserve => "Reserved".to_string(),
        Tool::Clear => "Unassigned".to_string(),
    }
}

fn ensure_type(block: &Block, expected: BlockType) -> Result<(), LayoutError> {
    let found = block.block_type();
    if found == expected {
        Ok(())
    } else {
        Err(LayoutError::WrongBlockType {
            block: block.id.clone(),
            expected,
            found,
        })
    }
}
