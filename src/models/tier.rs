use serde::{Deserialize, Serialize};

use super::TierId;

/// Price tier supplied by the event context. The layout only stores ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub id: TierId,
    pub name: String,
    pub price: f64,
    pub color: String,
}

impl Tier {
    pub fn new(id: impl Into<TierId>, name: impl Into<String>, price: f64, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            color: color.into(),
        }
    }

    /// Looks up a tier by id; dangling ids simply miss.
    pub fn lookup<'a>(tiers: &'a [Tier], id: &TierId) -> Option<&'a Tier> {
        tiers.iter().find(|t| &t.id == id)
    }
}
