//! Editing-page state: the current layout plus the transient UI state around
//! it (selected block, armed tool, zoom).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{CanvasConfig, EditorDefaults};
use crate::error::LayoutError;
use crate::models::{Block, BlockId, BlockType, Layout, RowId, SeatId, SessionSeatingMapRequest, Tier};
use crate::services::assignment::{self, ApplySummary, Assignment, Tool};
use crate::services::editor::{self, BlockSettings};
use crate::services::geometry::{Canvas, ScreenDelta};

/// One editor interaction, as posted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    #[serde(rename_all = "camelCase")]
    AddBlock { block_type: BlockType },
    UpdateBlock { block: Block },
    #[serde(rename_all = "camelCase")]
    RemoveBlock { block_id: BlockId },
    #[serde(rename_all = "camelCase")]
    Select { block_id: Option<BlockId> },
    #[serde(rename_all = "camelCase")]
    Configure { block_id: BlockId, settings: BlockSettings },
    SetZoom { zoom: f64 },
    ZoomIn,
    ZoomOut,
    #[serde(rename_all = "camelCase")]
    Drag { block_id: BlockId, dx: f64, dy: f64 },
    #[serde(rename_all = "camelCase")]
    Resize { block_id: BlockId, dx: f64, dy: f64 },
    SelectTool { tool: Tool },
    #[serde(rename_all = "camelCase")]
    SeatClick { block_id: BlockId, row_id: RowId, seat_id: SeatId },
    #[serde(rename_all = "camelCase")]
    BlockClick { block_id: BlockId },
    #[serde(rename_all = "camelCase")]
    ApplyToAll { block_id: BlockId },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandOutcome {
    Ok,
    Added { block: Block },
    Applied { summary: ApplySummary },
    Warning { message: String },
    /// `missing` is set when the command named a block, row or seat the
    /// layout does not have.
    Failed { error: String, missing: bool },
}

pub struct EditorSession {
    layout: Layout,
    selected: Option<BlockId>,
    tool: Tool,
    canvas: Canvas,
    tiers: Vec<Tier>,
    defaults: EditorDefaults,
}

impl EditorSession {
    pub fn new(layout: Layout, tiers: Vec<Tier>, canvas: CanvasConfig, defaults: EditorDefaults) -> Self {
        Self {
            layout,
            selected: None,
            tool: Tool::Clear,
            canvas: Canvas::new(canvas),
            tiers,
            defaults,
        }
    }

    /// Current layout. Cloning it yields a snapshot later edits cannot touch.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    /// Block shown in the settings panel.
    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.as_ref().and_then(|id| self.layout.find_block(id))
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn zoom(&self) -> f64 {
        self.canvas.zoom()
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.canvas.set_zoom(zoom)
    }

    pub fn select_tool(&mut self, tool: Tool) {
        debug!("Armed tool {:?}", tool);
        self.tool = tool;
    }

    /// Selects a block, or clears the selection. Unknown ids are not selectable.
    pub fn select(&mut self, block_id: Option<BlockId>) -> Result<(), LayoutError> {
        if let Some(id) = &block_id {
            if !self.layout.contains(id) {
                return Err(LayoutError::BlockNotFound(id.clone()));
            }
        }
        self.selected = block_id;
        Ok(())
    }

    pub fn add_block(&mut self, block_type: BlockType) -> Block {
        let (layout, block) = editor::add_block(&self.layout, block_type, &self.defaults);
        self.layout = layout;
        block
    }

    pub fn update_block(&mut self, block: Block) -> Result<(), LayoutError> {
        self.layout = editor::update_block(&self.layout, block)?;
        Ok(())
    }

    pub fn remove_block(&mut self, block_id: &BlockId) -> Result<Block, LayoutError> {
        let (layout, removed) = editor::remove_block(&self.layout, block_id)?;
        self.layout = layout;
        if self.selected.as_ref() == Some(block_id) {
            self.selected = None;
        }
        Ok(removed)
    }

    pub fn configure_block(&mut self, block_id: &BlockId, settings: &BlockSettings) -> Result<(), LayoutError> {
        self.layout = editor::configure_block(&self.layout, block_id, settings, &self.defaults)?;
        Ok(())
    }

    pub fn drag_block(&mut self, block_id: &BlockId, delta: ScreenDelta) -> Result<(), LayoutError> {
        self.layout = self.canvas.drag(&self.layout, block_id, delta)?;
        Ok(())
    }

    pub fn resize_block(&mut self, block_id: &BlockId, delta: ScreenDelta) -> Result<(), LayoutError> {
        self.layout = self.canvas.resize(&self.layout, block_id, delta)?;
        Ok(())
    }

    pub fn seat_click(&mut self, block_id: &BlockId, row_id: &RowId, seat_id: &SeatId) -> Result<(), LayoutError> {
        self.layout = assignment::seat_click(&self.layout, &self.tool, block_id, row_id, seat_id)?;
        Ok(())
    }

    /// Standing-block click. A policy refusal comes back as `Err(warning)`
    /// inside the `Ok`, with the layout untouched.
    pub fn block_click(&mut self, block_id: &BlockId) -> Result<Result<ApplySummary, String>, LayoutError> {
        match assignment::block_click(&self.layout, &self.tool, block_id, &self.tiers)? {
            Assignment::Applied { layout, summary } => {
                self.layout = layout;
                Ok(Ok(summary))
            }
            Assignment::Rejected { warning } => Ok(Err(warning)),
        }
    }

    pub fn apply_to_all(&mut self, block_id: &BlockId) -> Result<ApplySummary, LayoutError> {
        let (layout, summary) = assignment::apply_to_all(&self.layout, &self.tool, block_id, &self.tiers)?;
        self.layout = layout;
        Ok(summary)
    }

    /// Runs one command. Failures are reported in the outcome and leave the
    /// layout as it was.
    pub fn execute(&mut self, command: EditCommand) -> CommandOutcome {
        let result = match command {
            EditCommand::AddBlock { block_type } => {
                let block = self.add_block(block_type);
                return CommandOutcome::Added { block };
            }
            EditCommand::UpdateBlock { block } => self.update_block(block),
            EditCommand::RemoveBlock { block_id } => self.remove_block(&block_id).map(|_| ()),
            EditCommand::Select { block_id } => self.select(block_id),
            EditCommand::Configure { block_id, settings } => self.configure_block(&block_id, &settings),
            EditCommand::SetZoom { zoom } => {
                self.set_zoom(zoom);
                Ok(())
            }
            EditCommand::ZoomIn => {
                self.canvas.zoom_in();
                Ok(())
            }
            EditCommand::ZoomOut => {
                self.canvas.zoom_out();
                Ok(())
            }
            EditCommand::Drag { block_id, dx, dy } => self.drag_block(&block_id, ScreenDelta::new(dx, dy)),
            EditCommand::Resize { block_id, dx, dy } => self.resize_block(&block_id, ScreenDelta::new(dx, dy)),
            EditCommand::SelectTool { tool } => {
                self.select_tool(tool);
                Ok(())
            }
            EditCommand::SeatClick {
                block_id,
                row_id,
                seat_id,
            } => self.seat_click(&block_id, &row_id, &seat_id),
            EditCommand::BlockClick { block_id } => match self.block_click(&block_id) {
                Ok(Ok(summary)) => return CommandOutcome::Applied { summary },
                Ok(Err(message)) => return CommandOutcome::Warning { message },
                Err(e) => Err(e),
            },
            EditCommand::ApplyToAll { block_id } => match self.apply_to_all(&block_id) {
                Ok(summary) => return CommandOutcome::Applied { summary },
                Err(e) => Err(e),
            },
        };

        match result {
            Ok(()) => CommandOutcome::Ok,
            Err(e) => {
                warn!("Edit command failed: {}", e);
                CommandOutcome::Failed {
                    error: e.to_string(),
                    missing: e.is_not_found(),
                }
            }
        }
    }

    pub fn into_request(self, name: Option<String>) -> SessionSeatingMapRequest {
        SessionSeatingMapRequest {
            name,
            layout: self.layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockKind, Position, TierId};
    use serde_json::json;

    fn session() -> EditorSession {
        EditorSession::new(
            Layout::new(),
            vec![Tier::new("t1", "VIP", 50.0, "#fff")],
            CanvasConfig::default(),
            EditorDefaults::default(),
        )
    }

    #[test]
    fn removing_selected_block_clears_selection() {
        let mut session = session();
        let a = session.add_block(BlockType::NonSellable);
        let b = session.add_block(BlockType::NonSellable);
        session.select(Some(a.id.clone())).unwrap();
        session.remove_block(&b.id).unwrap();
        assert_eq!(session.selected(), Some(&a.id));
        session.remove_block(&a.id).unwrap();
        assert_eq!(session.selected(), None);
        assert!(session.layout().is_empty());
    }

    #[test]
    fn selecting_unknown_block_fails() {
        let mut session = session();
        assert!(session.select(Some(BlockId::new("ghost"))).is_err());
        assert!(session.selected_block().is_none());
    }

    #[test]
    fn snapshots_survive_later_edits() {
        let mut session = session();
        let block = session.add_block(BlockType::StandingCapacity);
        let snapshot = session.layout().clone();
        session.set_zoom(0.5);
        session.drag_block(&block.id, ScreenDelta::new(10.0, 10.0)).unwrap();
        assert_eq!(snapshot.find_block(&block.id).unwrap().position, Position::new(50.0, 50.0));
        assert_eq!(session.layout().find_block(&block.id).unwrap().position, Position::new(70.0, 70.0));
    }

    #[test]
    fn batch_continues_after_failure_and_warning() {
        let mut session = session();
        let Ok(commands) = serde_json::from_value::<Vec<EditCommand>>(json!([
            {"op": "add_block", "blockType": "STANDING_CAPACITY"},
            {"op": "select_tool", "tool": "reserve"},
            {"op": "remove_block", "blockId": "missing"},
            {"op": "zoom_in"}
        ])) else {
            panic!("commands should parse");
        };
        let outcomes: Vec<_> = commands.into_iter().map(|c| session.execute(c)).collect();
        assert!(matches!(outcomes[0], CommandOutcome::Added { .. }));
        assert_eq!(outcomes[1], CommandOutcome::Ok);
        assert!(matches!(outcomes[2], CommandOutcome::Failed { missing: true, .. }));
        assert_eq!(outcomes[3], CommandOutcome::Ok);
        assert_eq!(session.zoom(), 1.1);

        let floor = session.layout().blocks[0].id.clone();
        let before = session.layout().clone();
        let outcome = session.execute(EditCommand::BlockClick { block_id: floor });
        assert!(matches!(outcome, CommandOutcome::Warning { .. }));
        assert_eq!(session.layout(), &before);
    }

    #[test]
    fn failure_on_present_block_is_not_missing() {
        let mut session = session();
        let grid = session.add_block(BlockType::SeatedGrid);
        let outcome = session.execute(EditCommand::Resize {
            block_id: grid.id,
            dx: 10.0,
            dy: 10.0,
        });
        assert!(matches!(outcome, CommandOutcome::Failed { missing: false, .. }));
    }

    #[test]
    fn apply_to_all_through_session() {
        let mut session = session();
        let grid = session.add_block(BlockType::SeatedGrid);
        session.select_tool(Tool::Tier(TierId::new("t1")));
        let outcome = session.execute(EditCommand::ApplyToAll { block_id: grid.id.clone() });
        let CommandOutcome::Applied { summary } = outcome else {
            panic!("expected summary");
        };
        assert_eq!(summary.seats_affected, 50);
        assert_eq!(summary.label, "VIP");

        let request = session.into_request(Some("Main".into()));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["name"], "Main");
        assert_eq!(json["layout"]["blocks"][0]["rows"][0]["seats"][0]["tierId"], "t1");
        assert!(matches!(request.layout.blocks[0].kind, BlockKind::SeatedGrid { .. }));
    }
}
