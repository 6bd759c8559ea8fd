//! Per-tier seat counts for session cards.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{BlockId, BlockKind, BlockType, Layout, SeatStatus, Tier, TierId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierTally {
    pub tier_id: TierId,
    pub name: String,
    /// Available grid seats carrying this tier.
    pub seats: u64,
    /// Standing capacity assigned to this tier.
    pub standing: u64,
}

impl TierTally {
    pub fn total(&self) -> u64 {
        self.seats + self.standing
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockCapacity {
    pub block_id: BlockId,
    pub name: String,
    pub block_type: BlockType,
    pub sellable: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    /// Supplied tiers first, in order, then any dangling ids.
    pub tiers: Vec<TierTally>,
    pub unassigned_seats: u64,
    pub reserved_seats: u64,
    pub unassigned_standing: u64,
    pub non_sellable_blocks: usize,
    pub total_sellable: u64,
    pub blocks: Vec<BlockCapacity>,
}

impl LayoutSummary {
    /// Sellable capacity that has a tier, dangling or not.
    pub fn assigned(&self) -> u64 {
        self.tiers.iter().map(TierTally::total).sum()
    }
}

pub fn tally(layout: &Layout, tiers: &[Tier]) -> LayoutSummary {
    let mut summary = LayoutSummary {
        tiers: tiers
            .iter()
            .map(|t| TierTally {
                tier_id: t.id.clone(),
                name: t.name.clone(),
                seats: 0,
                standing: 0,
            })
            .collect(),
        ..Default::default()
    };
    let mut slots: HashMap<TierId, usize> = summary
        .tiers
        .iter()
        .enumerate()
        .map(|(i, t)| (t.tier_id.clone(), i))
        .collect();

    for block in layout.iter() {
        match &block.kind {
            BlockKind::SeatedGrid { rows } => {
                for seat in rows.iter().flat_map(|r| r.seats.iter()) {
                    match (seat.status, &seat.tier_id) {
                        (SeatStatus::Reserved, _) => summary.reserved_seats += 1,
                        (SeatStatus::Available, None) => summary.unassigned_seats += 1,
                        (SeatStatus::Available, Some(id)) => {
                            let slot = slot_for(&mut summary.tiers, &mut slots, id);
                            summary.tiers[slot].seats += 1;
                        }
                    }
                }
            }
            BlockKind::StandingCapacity { capacity, tier_id, .. } => match tier_id {
                Some(id) => {
                    let slot = slot_for(&mut summary.tiers, &mut slots, id);
                    summary.tiers[slot].standing += u64::from(*capacity);
                }
                None => summary.unassigned_standing += u64::from(*capacity),
            },
            BlockKind::NonSellable { .. } => summary.non_sellable_blocks += 1,
        }

        let sellable = block.sellable_capacity();
        summary.total_sellable += sellable;
        summary.blocks.push(BlockCapacity {
            block_id: block.id.clone(),
            name: block.name.clone(),
            block_type: block.block_type(),
            sellable,
        });
    }

    summary
}

fn slot_for(tallies: &mut Vec<TierTally>, slots: &mut HashMap<TierId, usize>, id: &TierId) -> usize {
    *slots.entry(id.clone()).or_insert_with(|| {
        tallies.push(TierTally {
            tier_id: id.clone(),
            name: "Unknown".to_string(),
            seats: 0,
            standing: 0,
        });
        tallies.len() - 1
    })
}
