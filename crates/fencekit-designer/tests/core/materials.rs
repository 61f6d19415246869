use fencekit_designer::materials::{compute, panel_count};
use fencekit_designer::{CanvasPoint, FenceConfig, Gate, GateKind, Measurement, Point};

fn run(coords: &[(f64, f64)], gates: &[Gate]) -> Measurement {
    let points: Vec<Point> = coords
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Point::new(i as u64 + 1, x, y))
        .collect();
    Measurement::build(100, "Fence 1", &points, gates, &FenceConfig::default())
}

#[test]
fn test_posts_sum_over_sections() {
    let m = run(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)], &[]);
    // 10 ft per section, 8 ft spacing -> 3 posts per section
    assert_eq!(m.materials_list.posts, 6);
    assert_eq!(m.total_posts, 6);
}

#[test]
fn test_panels_from_total_length() {
    let m = run(&[(0.0, 0.0), (250.0, 0.0)], &[]);
    assert_eq!(m.materials_list.panels, panel_count(25.0));
    assert_eq!(m.materials_list.panels, 4);
}

#[test]
fn test_hardware_scales_with_counts() {
    let gates = vec![
        Gate::new(50, CanvasPoint::new(100.0, 0.0), 4.0, GateKind::Single, 0.0),
        Gate::new(51, CanvasPoint::new(300.0, 0.0), 8.0, GateKind::Double, 0.0),
    ];
    let m = run(&[(0.0, 0.0), (400.0, 0.0)], &gates);
    let list = compute(&m);
    assert_eq!(list.gates, 2);
    assert_eq!(
        list.hardware,
        vec![
            format!("{} post anchors", list.posts),
            "5 panel brackets".to_string(),
            "4 gate hinges".to_string(),
            "4 gate latches".to_string(),
        ]
    );
}

#[test]
fn test_only_contained_gates_counted() {
    let gates = vec![
        Gate::new(50, CanvasPoint::new(40.0, 0.0), 4.0, GateKind::Single, 0.0),
        Gate::new(51, CanvasPoint::new(500.0, 0.0), 4.0, GateKind::Single, 0.0),
    ];
    let m = run(&[(0.0, 0.0), (80.0, 0.0)], &gates);
    assert_eq!(m.materials_list.gates, 1);
    assert_eq!(m.total_gates, 1);
}

#[test]
fn test_materials_carry_fence_height() {
    let mut config = FenceConfig::default();
    config.set_fence_height(4.0);
    let points = vec![Point::new(1, 0.0, 0.0), Point::new(2, 80.0, 0.0)];
    let m = Measurement::build(1, "Fence 1", &points, &[], &config);
    assert_eq!(m.materials_list.fence_height, 4.0);
}
