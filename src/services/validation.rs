//! Structural checks for layouts coming from outside the editor.

use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

use crate::models::{BlockId, BlockKind, Layout, SeatId, SeatStatus, Tier, TierId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    DuplicateBlockId { block_id: BlockId },
    DuplicateSeatId { block_id: BlockId, seat_id: SeatId },
    ReservedWithTier { block_id: BlockId, seat_id: SeatId },
    DanglingTier { block_id: BlockId, tier_id: TierId },
    EmptyGrid { block_id: BlockId },
}

pub fn validate(layout: &Layout, tiers: &[Tier]) -> Vec<Violation> {
    let known: HashSet<&TierId> = tiers.iter().map(|t| &t.id).collect();
    let mut block_ids = HashSet::new();
    let mut violations = Vec::new();

    for block in layout.iter() {
        if !block_ids.insert(&block.id) {
            violations.push(Violation::DuplicateBlockId {
                block_id: block.id.clone(),
            });
        }

        match &block.kind {
            BlockKind::SeatedGrid { rows } => {
                if block.seat_count() == 0 {
                    violations.push(Violation::EmptyGrid {
                        block_id: block.id.clone(),
                    });
                }
                let mut seat_ids = HashSet::new();
                for seat in rows.iter().flat_map(|r| r.seats.iter()) {
                    if !seat_ids.insert(&seat.id) {
                        violations.push(Violation::DuplicateSeatId {
                            block_id: block.id.clone(),
                            seat_id: seat.id.clone(),
                        });
                    }
                    if let Some(tier_id) = &seat.tier_id {
                        if seat.status == SeatStatus::Reserved {
                            violations.push(Violation::ReservedWithTier {
                                block_id: block.id.clone(),
                                seat_id: seat.id.clone(),
                            });
                        } else if !known.contains(tier_id) {
                            violations.push(Violation::DanglingTier {
                                block_id: block.id.clone(),
                                tier_id: tier_id.clone(),
                            });
                        }
                    }
                }
            }
            BlockKind::StandingCapacity { tier_id: Some(tier_id), .. } if !known.contains(tier_id) => {
                violations.push(Violation::DanglingTier {
                    block_id: block.id.clone(),
                    tier_id: tier_id.clone(),
                });
            }
            _ => {}
        }
    }

    violations
}

/// Drops the tier from reserved seats; reservation wins.
pub fn normalize(layout: &Layout) -> Layout {
    let mut next = layout.clone();
    let offenders: Vec<BlockId> = layout
        .iter()
        .filter(|b| b.rows().iter().flat_map(|r| &r.seats).any(|s| s.is_reserved() && s.tier_id.is_some()))
        .map(|b| b.id.clone())
        .collect();

    for block_id in offenders {
        if let Some(BlockKind::SeatedGrid { rows }) = next.block_mut(&block_id).map(|b| &mut b.kind) {
            for seat in rows.iter_mut().flat_map(|r| r.seats.iter_mut()) {
                if seat.is_reserved() && seat.tier_id.is_some() {
                    warn!("Seat {} in block {} was reserved with a tier, dropping tier", seat.id, block_id);
                    seat.reserve();
                }
            }
        }
    }

    next
}
