//! Property tests for the editing engine:
//!
//! 1. Clicking a seat twice with the same tool restores the layout.
//! 2. No seat ever ends up reserved while carrying a tier.
//! 3. Apply-to-all touches every seat of the grid.
//! 4. Drags and resizes only change position/width/height on the wire.
//! 5. Drag and resize distances in logical units are the screen delta divided by zoom.

use proptest::prelude::*;
use seating_layout::config::{CanvasConfig, EditorDefaults};
use seating_layout::models::{Block, BlockKind, BlockType, Layout, SeatStatus, Size, TierId};
use seating_layout::services::assignment::{apply_to_all, seat_click, Tool};
use seating_layout::services::editor::add_block;
use seating_layout::services::geometry::{Canvas, ScreenDelta};

// ── Helpers ─────────────────────────────────────────────────────────────

fn tool_strategy() -> impl Strategy<Value = Tool> {
    prop_oneof![
        Just(Tool::Reserve),
        Just(Tool::Clear),
        (0u8..3).prop_map(|n| Tool::Tier(TierId(format!("t{n}")))),
    ]
}

/// A standing area as the backend stores it, with its own representative seat.
fn backend_area() -> Block {
    serde_json::from_value(serde_json::json!({
        "id": "lawn",
        "name": "Lawn",
        "type": "STANDING_CAPACITY",
        "position": {"x": 400.0, "y": 40.0},
        "width": 160.0,
        "height": 90.0,
        "capacity": 800,
        "seats": [{"id": "lawn-ga-1", "label": "Lawn GA", "tierId": "t1", "status": "AVAILABLE"}]
    }))
    .unwrap()
}

/// One seated grid, one editor-created standing area and one backend area.
fn venue(rows: u32, columns: u32) -> Layout {
    let defaults = EditorDefaults {
        grid_rows: rows,
        grid_columns: columns,
        ..Default::default()
    };
    let (layout, _) = add_block(&Layout::new(), BlockType::SeatedGrid, &defaults);
    let (mut layout, _) = add_block(&layout, BlockType::StandingCapacity, &defaults);
    layout.push(backend_area());
    layout
}

/// Applies `(tool, row, column)` clicks to the grid block.
fn click_all(layout: &Layout, clicks: &[(Tool, usize, usize)]) -> Layout {
    let grid = layout.blocks[0].clone();
    clicks.iter().fold(layout.clone(), |acc, (tool, r, c)| {
        let row = &grid.rows()[*r % grid.rows().len()];
        let seat = &row.seats[*c % row.seats.len()];
        seat_click(&acc, tool, &grid.id, &row.id, &seat.id).unwrap()
    })
}

fn click_strategy() -> impl Strategy<Value = Vec<(Tool, usize, usize)>> {
    prop::collection::vec((tool_strategy(), 0usize..16, 0usize..16), 0..40)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Toggle idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn double_click_restores_layout(
        history in click_strategy(),
        tool in tool_strategy(),
        held in any::<bool>(),
        r in 0usize..16,
        c in 0usize..16,
    ) {
        // The target seat starts either unassigned or in the state the tool
        // itself produces; the rest of the grid is whatever the history left.
        let mut start = click_all(&venue(4, 6), &history);
        let grid_id = start.blocks[0].id.clone();
        if let Some(BlockKind::SeatedGrid { rows }) = start.block_mut(&grid_id).map(|b| &mut b.kind) {
            let row_count = rows.len();
            let row = &mut rows[r % row_count];
            let seat_count = row.seats.len();
            let seat = &mut row.seats[c % seat_count];
            match (&tool, held) {
                (Tool::Reserve, true) => seat.reserve(),
                (Tool::Tier(t), true) => seat.assign(Some(t.clone())),
                _ => seat.assign(None),
            }
        }

        let twice = click_all(&start, &[(tool.clone(), r, c), (tool, r, c)]);
        prop_assert_eq!(twice, start);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Mutual exclusivity of tier and reservation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reserved_seats_never_carry_tiers(
        history in click_strategy(),
        bulk in prop::option::of(tool_strategy()),
    ) {
        let mut layout = click_all(&venue(3, 5), &history);
        if let Some(tool) = bulk {
            let id = layout.blocks[0].id.clone();
            layout = apply_to_all(&layout, &tool, &id, &[]).unwrap().0;
        }
        for block in layout.iter() {
            for seat in block.rows().iter().flat_map(|r| &r.seats) {
                prop_assert!(!(seat.status == SeatStatus::Reserved && seat.tier_id.is_some()));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Bulk apply totality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn apply_to_all_covers_every_seat(
        rows in 1u32..8,
        columns in 1u32..12,
        history in click_strategy(),
        tool in tool_strategy(),
    ) {
        let layout = click_all(&venue(rows, columns), &history);
        let id = layout.blocks[0].id.clone();
        let (after, summary) = apply_to_all(&layout, &tool, &id, &[]).unwrap();
        let n = (rows * columns) as usize;
        prop_assert_eq!(summary.seats_affected, n);

        let block = after.find_block(&id).unwrap();
        let matching = block
            .rows()
            .iter()
            .flat_map(|r| &r.seats)
            .filter(|s| match &tool {
                Tool::Reserve => s.status == SeatStatus::Reserved && s.tier_id.is_none(),
                Tool::Tier(t) => s.status == SeatStatus::Available && s.tier_id.as_ref() == Some(t),
                Tool::Clear => s.is_unassigned(),
            })
            .count();
        prop_assert_eq!(matching, n);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Geometry never touches structure
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn geometry_edits_only_change_geometry_fields(
        history in click_strategy(),
        zoom in 0.5f64..=2.0,
        dx in -500.0f64..500.0,
        dy in -500.0f64..500.0,
    ) {
        let layout = click_all(&venue(3, 4), &history);
        let mut canvas = Canvas::new(CanvasConfig::default());
        canvas.set_zoom(zoom);

        let mut next = layout.clone();
        for block in layout.iter() {
            next = canvas.drag(&next, &block.id, ScreenDelta::new(dx, dy)).unwrap();
            if block.size().is_some() {
                next = canvas.resize(&next, &block.id, ScreenDelta::new(dy, dx)).unwrap();
            }
        }

        let before = serde_json::to_value(&layout).unwrap();
        let after = serde_json::to_value(&next).unwrap();
        for (b, a) in before["blocks"].as_array().unwrap().iter().zip(after["blocks"].as_array().unwrap()) {
            let mut b = b.clone();
            let mut a = a.clone();
            for key in ["position", "width", "height"] {
                b.as_object_mut().unwrap().remove(key);
                a.as_object_mut().unwrap().remove(key);
            }
            prop_assert_eq!(b, a);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Zoom-invariant drag and resize
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pointer_deltas_scale_with_zoom(
        zoom in 0.5f64..=2.0,
        dx in -1000.0f64..1000.0,
        dy in -1000.0f64..1000.0,
    ) {
        let layout = venue(2, 2);
        let mut canvas = Canvas::new(CanvasConfig::default());
        canvas.set_zoom(zoom);

        for block in layout.iter() {
            let moved = canvas.drag(&layout, &block.id, ScreenDelta::new(dx, dy)).unwrap();
            let after = moved.find_block(&block.id).unwrap().position;
            prop_assert!((after.x - block.position.x - dx / zoom).abs() < 1e-9);
            prop_assert!((after.y - block.position.y - dy / zoom).abs() < 1e-9);

            if let Some(size) = block.size() {
                let resized = canvas.resize(&layout, &block.id, ScreenDelta::new(dx, dy)).unwrap();
                let expected = Size::new((size.width + dx / zoom).max(20.0), (size.height + dy / zoom).max(20.0));
                let got = resized.find_block(&block.id).unwrap().size().unwrap();
                prop_assert!((got.width - expected.width).abs() < 1e-9);
                prop_assert!((got.height - expected.height).abs() < 1e-9);
            }
        }
    }
}
