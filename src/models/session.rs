use serde::{Deserialize, Serialize};

use super::Layout;

/// Payload attached verbatim to a session create/update request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSeatingMapRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub layout: Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    Physical,
    Online,
}

/// The slice of a session the read-only seating display needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_type: SessionType,
    #[serde(default)]
    pub layout_data: Option<SessionSeatingMapRequest>,
}

impl SessionView {
    /// Layout to display, if this session has a physical seating map.
    pub fn seating_layout(&self) -> Option<&Layout> {
        match (self.session_type, &self.layout_data) {
            (SessionType::Physical, Some(map)) => Some(&map.layout),
            _ => None,
        }
    }
}
