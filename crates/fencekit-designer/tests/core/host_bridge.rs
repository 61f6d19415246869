use std::cell::RefCell;
use std::rc::Rc;

use fencekit_designer::{CanvasPoint, FenceTool, MeasurementSummary};

#[test]
fn test_summary_reduces_over_list() {
    let mut tool = FenceTool::default();
    tool.store_mut().add_gate(CanvasPoint::new(150.0, 100.0));

    tool.click(CanvasPoint::new(100.0, 100.0), 0);
    tool.click(CanvasPoint::new(200.0, 100.0), 1000);
    tool.double_click(CanvasPoint::new(200.0, 100.0));
    tool.click(CanvasPoint::new(500.0, 400.0), 5000);
    tool.click(CanvasPoint::new(500.0, 500.0), 6000);
    tool.double_click(CanvasPoint::new(500.0, 500.0));

    let summary = MeasurementSummary::from_measurements(&tool.store().host_measurements());
    assert!((summary.linear_feet - 20.0).abs() < 1e-9);
    assert_eq!(summary.gate_count, 1);
    assert_eq!(summary.panel_count, 4);
    assert_eq!(summary.post_count, 6);
}

#[test]
fn test_multiple_subscribers_each_notified() {
    let mut tool = FenceTool::default();
    let first = Rc::new(RefCell::new(0));
    let second = Rc::new(RefCell::new(0));
    let (a, b) = (first.clone(), second.clone());
    let sub = tool.subscribe(move |_| *a.borrow_mut() += 1);
    tool.subscribe(move |_| *b.borrow_mut() += 1);

    tool.clear_all();
    assert!(tool.store_mut().unsubscribe(sub));
    tool.clear_all();

    assert_eq!(*first.borrow(), 1);
    assert_eq!(*second.borrow(), 2);
}

#[test]
fn test_payload_serializes_to_json() {
    let mut tool = FenceTool::default();
    tool.click(CanvasPoint::new(100.0, 100.0), 0);
    tool.click(CanvasPoint::new(180.0, 100.0), 1000);
    tool.double_click(CanvasPoint::new(180.0, 100.0));

    let json = serde_json::to_value(tool.store().host_measurements()).unwrap();
    assert_eq!(json[0]["label"], "Fence 1");
    assert_eq!(json[0]["sections"][0]["posts"][0]["kind"], "corner");
    assert_eq!(json[0]["materials_list"]["panels"], 1);
}
