pub mod block;
pub mod layout;
pub mod seat;
pub mod session;
pub mod tier;

pub use block::{Block, BlockKind, BlockType, Position, Row, Size};
pub use layout::{Layout, SeatHit};
pub use seat::{Seat, SeatStatus};
pub use session::{SessionSeatingMapRequest, SessionType, SessionView};
pub use tier::Tier;

use serde::{Deserialize, Serialize};
use std::fmt;

// Строковые идентификаторы: на проводе это обычные строки
macro_rules! string_id {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub String);

            impl $name {
                pub fn new(value: impl Into<String>) -> Self {
                    Self(value.into())
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }

            impl From<String> for $name {
                fn from(value: String) -> Self {
                    Self(value)
                }
            }
        )*
    };
}

string_id!(BlockId, RowId, SeatId, TierId);

impl BlockId {
    /// Fresh random id for a newly placed block.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
