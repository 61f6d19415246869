use fencekit_designer::renderer::{ACTIVE, CORNER_POST, GATE, LINE_POST, SELECTION};
use fencekit_designer::{CanvasPoint, DrawCommand, FenceTool, GateKind};

fn at(x: f64, y: f64) -> CanvasPoint {
    CanvasPoint::new(x, y)
}

fn finalized_tool() -> FenceTool {
    let mut tool = FenceTool::default();
    tool.click(at(100.0, 100.0), 0);
    tool.click(at(300.0, 100.0), 1000);
    tool.double_click(at(300.0, 100.0));
    tool
}

#[test]
fn test_empty_canvas_draws_only_grid() {
    let tool = FenceTool::default();
    let scene = tool.scene();
    assert!(!scene.is_empty());
    assert!(scene
        .commands
        .iter()
        .all(|c| matches!(c, DrawCommand::Line { dashed: false, width, .. } if *width == 1.0)));
}

#[test]
fn test_grid_uses_five_foot_cells() {
    let tool = FenceTool::default();
    let scene = tool.scene();
    // 800 x 600 canvas at 10 px/ft: 50 px cells -> 17 vertical + 13 horizontal
    assert_eq!(scene.len(), 30);
}

#[test]
fn test_grid_can_be_hidden() {
    let mut tool = FenceTool::default();
    tool.set_show_grid(false);
    assert!(tool.scene().is_empty());
}

#[test]
fn test_grid_skipped_when_cells_too_small() {
    let mut tool = FenceTool::default();
    tool.update_config(|c| {
        c.set_scale(0.5);
    });
    // 5 ft at 0.5 px/ft is 2.5 px, below the 4 px threshold
    assert!(tool.scene().is_empty());
}

#[test]
fn test_posts_drawn_for_finalized_run() {
    let tool = finalized_tool();
    let scene = tool.scene();
    // 20 ft run with 8 ft spacing: 2 corners, 2 line posts
    assert_eq!(scene.filled_circles(CORNER_POST), 2);
    assert_eq!(scene.filled_circles(LINE_POST), 2);
    let texts: Vec<&str> = scene.texts().collect();
    assert!(texts.contains(&"20.0 ft"));
    assert!(texts.contains(&"Fence 1"));
}

#[test]
fn test_preview_line_with_live_length() {
    let mut tool = FenceTool::default();
    tool.click(at(100.0, 100.0), 0);
    tool.pointer_move(at(100.0, 250.0));

    let scene = tool.scene();
    let dashed: Vec<_> = scene.dashed_lines().collect();
    assert_eq!(dashed.len(), 1);
    assert!(scene.texts().any(|t| t == "15.0 ft"));
    assert_eq!(scene.filled_circles(ACTIVE), 1);
}

#[test]
fn test_no_preview_when_idle() {
    let mut tool = finalized_tool();
    tool.pointer_move(at(500.0, 500.0));
    assert_eq!(tool.scene().dashed_lines().count(), 0);
}

#[test]
fn test_gate_glyphs_and_selection() {
    let mut tool = FenceTool::default();
    let single = tool.store_mut().add_gate(at(200.0, 200.0));
    tool.update_config(|c| {
        c.set_gate_kind(GateKind::Double);
    });
    tool.store_mut().add_gate(at(400.0, 200.0));

    let scene = tool.scene();
    // One hinge for the single gate, two for the double
    assert_eq!(scene.filled_circles(GATE), 3);
    assert!(!scene
        .commands
        .iter()
        .any(|c| matches!(c, DrawCommand::Circle { stroke: Some(s), .. } if *s == SELECTION)));

    tool.store_mut().toggle_gate_selection(single).unwrap();
    let scene = tool.scene();
    let highlight = scene
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Circle { stroke: Some(s), fill: None, .. } if *s == SELECTION))
        .count();
    assert_eq!(highlight, 1);
}

#[test]
fn test_rotated_gate_leaf_rotates() {
    let mut tool = FenceTool::default();
    let id = tool.store_mut().add_gate(at(400.0, 300.0));
    let before = tool.scene();
    tool.store_mut().set_gate_rotation(id, 90.0).unwrap();
    let after = tool.scene();
    assert_ne!(before, after);
    assert_eq!(before.len(), after.len());
}

#[test]
fn test_rendering_does_not_mutate() {
    let tool = finalized_tool();
    let before = tool.store().host_measurements();
    let _ = tool.scene();
    let _ = tool.scene();
    assert_eq!(tool.store().host_measurements(), before);
}

#[test]
fn test_export_png() {
    let tool = finalized_tool();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.png");
    fencekit_designer::export_png(&tool.scene(), 800, 600, &path).unwrap();
    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (800, 600));
}
