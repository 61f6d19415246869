use std::path::PathBuf;

use anyhow::{bail, Context};
use fencekit::{
    init_logging, CanvasPoint, FenceTool, Key, MeasurementSummary, Settings, ToolEvent,
    BUILD_DATE, VERSION,
};
use fencekit_designer::export_png;
use fencekit_settings::default_config_path;

#[derive(Debug, Default)]
struct Args {
    settings: Option<PathBuf>,
    png: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--png" => {
                let path = iter.next().context("--png needs an output path")?;
                args.png = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("unknown option {}", flag),
            path if args.settings.is_none() => args.settings = Some(PathBuf::from(path)),
            extra => bail!("unexpected argument {}", extra),
        }
    }
    Ok(args)
}

fn load_settings(path: Option<PathBuf>) -> Settings {
    match path.map(Ok).unwrap_or_else(default_config_path) {
        Ok(path) => Settings::load_or_default(&path),
        Err(e) => {
            tracing::warn!("{}; using default settings", e);
            Settings::default()
        }
    }
}

fn click(tool: &mut FenceTool, x: f64, y: f64, time_ms: u64) {
    let position = CanvasPoint::new(x, y);
    tool.handle_event(ToolEvent::PointerDown { position, time_ms });
    tool.handle_event(ToolEvent::PointerUp { position });
    tool.handle_event(ToolEvent::Click { position, time_ms });
}

/// Replays a short session: a gate, an L-shaped run finished by
/// double-click, and a straight run finished with Escape.
fn replay_session(tool: &mut FenceTool) {
    tool.toggle_gate_placement();
    click(tool, 240.0, 150.0, 0);

    click(tool, 120.0, 150.0, 1_000);
    click(tool, 360.0, 150.0, 2_000);
    click(tool, 360.0, 400.0, 3_000);
    tool.handle_event(ToolEvent::DoubleClick {
        position: CanvasPoint::new(360.0, 400.0),
    });

    click(tool, 500.0, 150.0, 6_000);
    click(tool, 700.0, 150.0, 7_000);
    tool.handle_event(ToolEvent::Key(Key::Escape));
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("FenceKit {} (built {})", VERSION, BUILD_DATE);

    let args = parse_args()?;
    let settings = load_settings(args.settings);

    let mut tool = FenceTool::new(settings.fence.clone());
    tool.set_canvas_size(settings.view.canvas_width, settings.view.canvas_height);
    tool.set_show_grid(settings.view.show_grid);
    tool.subscribe(|measurements| {
        let summary = MeasurementSummary::from_measurements(measurements);
        tracing::info!(
            "Host received {} run(s): {:.1} ft, {} post(s), {} panel(s), {} gate(s)",
            measurements.len(),
            summary.linear_feet,
            summary.post_count,
            summary.panel_count,
            summary.gate_count
        );
    });

    replay_session(&mut tool);

    let payload = serde_json::to_string_pretty(&tool.store().host_measurements())?;
    println!("{}", payload);

    if let Some(path) = args.png {
        let width = settings.view.canvas_width.round() as u32;
        let height = settings.view.canvas_height.round() as u32;
        export_png(&tool.scene(), width, height, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}
