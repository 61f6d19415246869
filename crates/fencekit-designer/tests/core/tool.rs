use std::cell::RefCell;
use std::rc::Rc;

use fencekit_designer::{CanvasPoint, FenceTool, Key, Measurement, ToolEvent, ToolState};

fn at(x: f64, y: f64) -> CanvasPoint {
    CanvasPoint::new(x, y)
}

/// Sends the pointer sequence a browser produces for a single tap.
fn tap(tool: &mut FenceTool, x: f64, y: f64, time_ms: u64) {
    tool.handle_event(ToolEvent::PointerDown { position: at(x, y), time_ms });
    tool.handle_event(ToolEvent::PointerUp { position: at(x, y) });
    tool.handle_event(ToolEvent::Click { position: at(x, y), time_ms });
}

fn double_tap(tool: &mut FenceTool, x: f64, y: f64, time_ms: u64) {
    tap(tool, x, y, time_ms);
    tap(tool, x, y, time_ms + 100);
    tool.handle_event(ToolEvent::DoubleClick { position: at(x, y) });
}

fn recorder(tool: &mut FenceTool) -> Rc<RefCell<Vec<Vec<Measurement>>>> {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    tool.subscribe(move |list| sink.borrow_mut().push(list.to_vec()));
    calls
}

#[test]
fn test_browser_sequence_draws_and_finalizes() {
    let mut tool = FenceTool::default();
    let calls = recorder(&mut tool);

    tap(&mut tool, 100.0, 100.0, 0);
    tap(&mut tool, 200.0, 100.0, 1000);
    double_tap(&mut tool, 200.0, 200.0, 2000);

    assert_eq!(tool.state(), ToolState::Idle);
    let measurements = tool.store().measurements();
    assert_eq!(measurements.len(), 1);
    assert_eq!(measurements[0].section_count(), 2);
    assert!((measurements[0].total_length - 20.0).abs() < 1e-9);
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn test_double_click_needs_two_points() {
    let mut tool = FenceTool::default();
    tool.click(at(100.0, 100.0), 0);
    tool.double_click(at(100.0, 100.0));
    assert_eq!(tool.state(), ToolState::Drawing);
    assert!(tool.store().measurements().is_empty());
}

#[test]
fn test_quick_second_click_allows_single_point_measurement() {
    // Boundary case: the click-timing path finalizes a one-point run.
    let mut tool = FenceTool::default();
    tool.click(at(100.0, 100.0), 0);
    tool.click(at(300.0, 100.0), 200);

    let measurements = tool.store().measurements();
    assert_eq!(measurements.len(), 1);
    assert_eq!(measurements[0].section_count(), 0);
    assert_eq!(measurements[0].total_length, 0.0);
}

#[test]
fn test_escape_with_two_points_finalizes() {
    let mut tool = FenceTool::default();
    tool.click(at(100.0, 100.0), 0);
    tool.click(at(180.0, 100.0), 1000);
    tool.handle_event(ToolEvent::Key(Key::Escape));

    assert_eq!(tool.state(), ToolState::Idle);
    assert_eq!(tool.store().measurements().len(), 1);
}

#[test]
fn test_outside_pointer_down_finalizes_and_clears_selection() {
    let mut tool = FenceTool::default();
    let gate = tool.store_mut().add_gate(at(500.0, 500.0));
    tool.click(at(500.0, 500.0), 0);
    assert!(tool.store().gate(gate).unwrap().selected);

    tool.toggle_gate_placement();
    tool.click(at(100.0, 100.0), 1000);
    // placement consumed the click
    assert_eq!(tool.store().gates().len(), 2);

    tool.click(at(100.0, 300.0), 2000);
    tool.click(at(200.0, 300.0), 3000);
    tool.handle_event(ToolEvent::OutsidePointerDown);

    assert_eq!(tool.store().measurements().len(), 1);
    assert!(tool.store().selected_gate().is_none());
    assert!(!tool.is_gate_placement());
}

#[test]
fn test_gate_placement_while_drawing_does_not_add_point() {
    let mut tool = FenceTool::default();
    tool.click(at(100.0, 100.0), 0);
    tool.toggle_gate_placement();
    tool.click(at(150.0, 100.0), 1000);

    assert_eq!(tool.store().active_points().len(), 1);
    assert_eq!(tool.store().gates().len(), 1);
    assert_eq!(tool.state(), ToolState::Drawing);
}

#[test]
fn test_gate_drag_moves_gate_and_skips_selection() {
    let mut tool = FenceTool::default();
    let id = tool.store_mut().add_gate(at(300.0, 300.0));

    tool.handle_event(ToolEvent::PointerDown { position: at(305.0, 300.0), time_ms: 0 });
    assert_eq!(tool.state(), ToolState::DraggingGate { id, moved: false });
    tool.handle_event(ToolEvent::PointerMove { position: at(325.0, 310.0) });
    tool.handle_event(ToolEvent::PointerUp { position: at(325.0, 310.0) });
    tool.handle_event(ToolEvent::Click { position: at(325.0, 310.0), time_ms: 50 });

    let gate = tool.store().gate(id).unwrap();
    assert_eq!((gate.x, gate.y), (320.0, 310.0));
    assert!(!gate.selected);
    assert_eq!(tool.state(), ToolState::Idle);
}

#[test]
fn test_gate_tap_toggles_selection() {
    let mut tool = FenceTool::default();
    let a = tool.store_mut().add_gate(at(300.0, 300.0));
    let b = tool.store_mut().add_gate(at(400.0, 300.0));

    tap(&mut tool, 300.0, 300.0, 0);
    assert!(tool.store().gate(a).unwrap().selected);

    tap(&mut tool, 400.0, 300.0, 1000);
    assert!(!tool.store().gate(a).unwrap().selected);
    assert!(tool.store().gate(b).unwrap().selected);

    tap(&mut tool, 400.0, 300.0, 2000);
    assert!(tool.store().selected_gate().is_none());
}

#[test]
fn test_hit_radius_follows_zoom() {
    let mut tool = FenceTool::default();
    tool.store_mut().add_gate(at(400.0, 300.0));
    tool.set_zoom(2.0);

    // 20 screen px is 10 model units at 2x, outside the 15 px radius
    let screen = tool.viewport().model_to_screen(at(400.0, 300.0));
    tool.handle_event(ToolEvent::PointerDown {
        position: at(screen.x + 20.0, screen.y),
        time_ms: 0,
    });
    assert_eq!(tool.state(), ToolState::Idle);

    tool.handle_event(ToolEvent::PointerDown {
        position: at(screen.x + 12.0, screen.y),
        time_ms: 0,
    });
    assert!(matches!(tool.state(), ToolState::DraggingGate { .. }));
}

#[test]
fn test_endpoint_press_begins_edit_and_drag() {
    let mut tool = FenceTool::default();
    tool.click(at(100.0, 100.0), 0);
    tool.click(at(180.0, 100.0), 1000);
    tool.double_click(at(180.0, 100.0));
    let id = tool.store().measurements()[0].id;

    tool.handle_event(ToolEvent::PointerDown { position: at(182.0, 101.0), time_ms: 5000 });
    assert_eq!(tool.store().editing_id(), Some(id));
    assert!(tool.store().measurements().is_empty());
    assert!(matches!(tool.state(), ToolState::DraggingPoint { .. }));

    tool.handle_event(ToolEvent::PointerUp { position: at(182.0, 101.0) });
    tool.handle_event(ToolEvent::Click { position: at(182.0, 101.0), time_ms: 5050 });
    assert_eq!(tool.state(), ToolState::Drawing);
    assert_eq!(tool.store().active_points().len(), 2);

    // Extend the edited run, then finalize in place
    tool.click(at(180.0, 180.0), 7000);
    tool.handle_event(ToolEvent::Key(Key::Escape));
    let m = &tool.store().measurements()[0];
    assert_eq!(m.id, id);
    assert_eq!(m.label, "Fence 1");
    assert_eq!(m.section_count(), 2);
}

#[test]
fn test_zoomed_drag_converts_delta() {
    let mut tool = FenceTool::default();
    tool.click(at(400.0, 300.0), 0);
    tool.click(at(480.0, 300.0), 1000);
    tool.set_zoom(2.0);

    let first = tool.store().active_points()[0].position();
    let screen = tool.viewport().model_to_screen(first);
    tool.handle_event(ToolEvent::PointerDown { position: screen, time_ms: 2000 });
    tool.handle_event(ToolEvent::PointerMove { position: at(screen.x + 10.0, screen.y + 10.0) });
    tool.handle_event(ToolEvent::PointerUp { position: at(screen.x + 10.0, screen.y + 10.0) });

    let moved = tool.store().active_points()[0];
    assert!((moved.x - 405.0).abs() < 1e-9);
    assert!((moved.y - 305.0).abs() < 1e-9);
    assert_eq!(tool.state(), ToolState::Drawing);
}

#[test]
fn test_pointer_tracked_for_preview() {
    let mut tool = FenceTool::default();
    tool.set_zoom(2.0);
    tool.handle_event(ToolEvent::PointerMove { position: at(400.0, 300.0) });
    assert_eq!(tool.pointer(), Some(at(400.0, 300.0)));
    tool.handle_event(ToolEvent::PointerMove { position: at(0.0, 0.0) });
    assert_eq!(tool.pointer(), Some(at(200.0, 150.0)));
}

#[test]
fn test_delete_measurement_keeps_shared_gates() {
    let mut tool = FenceTool::default();
    let calls = recorder(&mut tool);
    tool.store_mut().add_gate(at(140.0, 100.0));
    tool.click(at(100.0, 100.0), 0);
    tool.click(at(180.0, 100.0), 1000);
    tool.double_click(at(180.0, 100.0));
    let id = tool.store().measurements()[0].id;

    tool.store_mut().delete_measurement(id).unwrap();
    assert!(tool.store().measurements().is_empty());
    assert_eq!(tool.store().gates().len(), 1);
    assert_eq!(calls.borrow().len(), 2);
    assert!(calls.borrow()[1].is_empty());
}

#[test]
fn test_clicks_resume_after_store_empties_polyline() {
    let mut tool = FenceTool::default();
    tool.click(at(100.0, 100.0), 0);
    let id = tool.store().active_points()[0].id;

    tool.store_mut().delete_point(id).unwrap();
    assert_eq!(tool.state(), ToolState::Idle);

    tool.click(at(200.0, 100.0), 5000);
    tool.click(at(300.0, 100.0), 9000);
    assert_eq!(tool.store().active_points().len(), 2);
    assert_eq!(tool.state(), ToolState::Drawing);
}

#[test]
fn test_clicks_resume_after_deleting_edited_measurement() {
    let mut tool = FenceTool::default();
    tool.click(at(100.0, 100.0), 0);
    tool.click(at(180.0, 100.0), 1000);
    tool.double_click(at(180.0, 100.0));
    let id = tool.store().measurements()[0].id;

    tap(&mut tool, 180.0, 100.0, 3000);
    assert_eq!(tool.store().editing_id(), Some(id));
    assert_eq!(tool.state(), ToolState::Drawing);

    tool.store_mut().delete_measurement(id).unwrap();
    tool.click(at(400.0, 400.0), 6000);

    assert_eq!(tool.store().active_points().len(), 1);
    assert_eq!(tool.store().active_points()[0].position(), at(400.0, 400.0));
    assert_eq!(tool.state(), ToolState::Drawing);
}

#[test]
fn test_press_outside_canvas_aborts_gesture() {
    let mut tool = FenceTool::default();
    tool.click(at(100.0, 300.0), 1000);
    tool.click(at(200.0, 300.0), 2000);

    tool.handle_event(ToolEvent::PointerDown { position: at(-5.0, 300.0), time_ms: 3000 });

    assert_eq!(tool.state(), ToolState::Idle);
    assert_eq!(tool.store().measurements().len(), 1);
    assert!(!tool.store().is_drawing());
}

#[test]
fn test_double_click_window_is_exclusive() {
    let mut tool = FenceTool::default();
    tool.click(at(100.0, 100.0), 0);
    tool.click(at(200.0, 100.0), 399);
    assert_eq!(tool.state(), ToolState::Idle);
    assert_eq!(tool.store().measurements().len(), 1);

    let mut tool = FenceTool::default();
    tool.click(at(100.0, 100.0), 0);
    tool.click(at(200.0, 100.0), 400);
    assert_eq!(tool.state(), ToolState::Drawing);
    assert_eq!(tool.store().active_points().len(), 2);
    assert!(tool.store().measurements().is_empty());
}
