use serde::{Deserialize, Serialize};

use super::{SeatId, TierId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    #[default]
    Available,
    Reserved,
}

impl SeatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatStatus::Available => "AVAILABLE",
            SeatStatus::Reserved => "RESERVED",
        }
    }
}

/// A single addressable seat inside a row.
///
/// `tier_id` and `Reserved` are mutually exclusive; the mutators below keep it
/// that way, and `services::validation::normalize` repairs inbound data that
/// breaks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: SeatId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_id: Option<TierId>,
    #[serde(default)]
    pub status: SeatStatus,
}

impl Seat {
    pub fn new(id: impl Into<SeatId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            tier_id: None,
            status: SeatStatus::Available,
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.status == SeatStatus::Reserved
    }

    /// Available with no tier.
    pub fn is_unassigned(&self) -> bool {
        self.status == SeatStatus::Available && self.tier_id.is_none()
    }

    /// Sets (or clears) the tier; always un-reserves.
    pub fn assign(&mut self, tier_id: Option<TierId>) {
        self.tier_id = tier_id;
        self.status = SeatStatus::Available;
    }

    pub fn reserve(&mut self) {
        self.tier_id = None;
        self.status = SeatStatus::Reserved;
    }

    pub fn release(&mut self) {
        self.status = SeatStatus::Available;
    }
}
