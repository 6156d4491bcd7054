use crate::config::HudConfig;
use anyhow::{Context, Result};
use glam::{DVec2, IVec2, Vec3};
use hudkit_camera::Camera;
use hudkit_overlay::{Color, NodeId, Overlay, TextAlignment, TextHudMessage, TexturedBox};
use hudkit_testkit::{FrameRecord, JsonlSink, RecordingHost};

/// Entries shown in the demo menu.
const DEMO_LIST: [&str; 6] = [
    "Enabled: On",
    "Power Output: 120 kW",
    "Range: 50 m",
    "Share Inventory: Off",
    "Priority: High",
    "Color: Default",
];

/// Frames between selection steps.
const SELECTION_PERIOD: u64 = 10;

/// Radians of camera yaw per frame.
const YAW_STEP: f32 = 0.01;

pub struct HeadlessConfig {
    pub hud: HudConfig,
}

/// Totals over a headless run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub boxes: usize,
    pub texts: usize,
    pub empty_frames: u64,
}

struct DemoHud {
    menu: NodeId,
    status: NodeId,
}

fn build_demo(overlay: &mut Overlay, hud: &HudConfig) -> Result<DemoHud> {
    let menu = overlay.add_scroll_menu(None, hud.menu_capacity)?;
    {
        let mut view = overlay.scroll_menu_mut(menu)?;
        view.set_scale(hud.menu_scale)?;
        view.set_scaled_pos(DVec2::from_array(hud.menu_position))?;
        view.set_header_color(hud.header_color())?;
        view.set_body_color(hud.body_color())?;
        view.set_selection_box_color(hud.selection_color())?;
        view.set_header_text("Build Vision")?;
        view.set_footer_right_text(format!("hudkit v{}", hudkit_overlay::VERSION))?;
        view.set_list_text(DEMO_LIST.iter().map(|line| line.to_string()).collect())?;
    }

    // Crosshair at the screen center.
    overlay.add_box(
        None,
        TexturedBox::new()
            .with_color(Color::new(255, 255, 255, 200))
            .with_size(IVec2::new(4, 4)),
    )?;

    let status = overlay.add_text(None, TextHudMessage::new(TextAlignment::Left))?;
    let corner = IVec2::new(
        -(hud.viewport_width as i32) / 2 + 24,
        hud.viewport_height as i32 / 2 - 24,
    );
    overlay.set_origin(status, corner)?;

    if hud.show_test_pattern {
        overlay.show_test_pattern()?;
    }

    Ok(DemoHud { menu, status })
}

pub fn run(cfg: HeadlessConfig) -> Result<RunSummary> {
    let hud = cfg.hud;
    let viewport = DVec2::new(f64::from(hud.viewport_width), f64::from(hud.viewport_height));

    let mut host = RecordingHost::new(viewport);
    let mut overlay = Overlay::initialized()?;
    let demo = build_demo(&mut overlay, &hud)?;

    let mut camera = Camera::new(Vec3::new(0.0, 64.0, 0.0))
        .with_viewport(hud.viewport_width, hud.viewport_height)
        .with_fov_degrees(hud.fov_degrees as f32);

    let mut sink = match hud.frame_log.as_deref() {
        Some(path) => Some(
            JsonlSink::create(path)
                .with_context(|| format!("failed to open frame log {}", path.display()))?,
        ),
        None => None,
    };

    let mut summary = RunSummary::default();

    for frame in 0..hud.frames {
        if frame > 0 && frame % SELECTION_PERIOD == 0 {
            overlay.scroll_menu_mut(demo.menu)?.scroll_selection(1);
        }

        let selection = overlay.scroll_menu(demo.menu)?.selection_index();
        overlay
            .scroll_menu_mut(demo.menu)?
            .set_footer_left_text(format!("{}/{}", selection + 1, DEMO_LIST.len()))?;
        overlay
            .text_mut(demo.status)?
            .set_message(format!("frame {frame}"));

        camera.rotate(YAW_STEP, 0.0);
        let stats = overlay.draw(&camera.frame(), &mut host)?;
        let calls = host.take_calls();

        if let Some(sink) = sink.as_mut() {
            sink.write(&FrameRecord::new(stats, &calls))?;
        }

        summary.frames += 1;
        summary.boxes += stats.boxes;
        summary.texts += stats.texts;
        if stats.is_empty() {
            summary.empty_frames += 1;
        }
    }

    if let Some(sink) = sink {
        let lines = sink.finish()?;
        tracing::info!(lines, "Wrote frame log");
    }

    overlay.close(&mut host);
    if host.live_texts() != 0 {
        tracing::warn!(live = host.live_texts(), "Text primitives leaked past close");
    }

    tracing::info!(
        frames = summary.frames,
        boxes = summary.boxes,
        texts = summary.texts,
        empty_frames = summary.empty_frames,
        "Headless run finished"
    );
    Ok(summary)
}
