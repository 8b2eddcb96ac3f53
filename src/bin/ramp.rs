//! Ball on a ramp, nudged away from the ramp's foot each time it gets there.

use std::time::Instant;

use log::{error, info, LevelFilter};
use macroquad::{
    miniquad::conf::Platform,
    window::{next_frame, Conf},
};
use sandbox2d::{
    config::{GUIDE_INSET, RAMP_TARGET_FPS, WINDOW_TITLE},
    overlay, Canvas, Color, FpsCounter, FrameLimiter, IVec2, MacroquadCanvas, Result, Scene,
    Simulator, SimulatorConfig,
};

fn window_conf() -> Conf {
    let config = SimulatorConfig::default();
    Conf {
        window_title: WINDOW_TITLE.to_string(),
        window_width: config.width as i32,
        window_height: config.height as i32,
        window_resizable: false,
        // Vsync off: the frame limiter alone sets the pace.
        platform: Platform {
            swap_interval: Some(0),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    if let Err(err) = run().await {
        error!("ramp demo failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    macroquad::input::prevent_quit();

    let config = SimulatorConfig::default().with_target_fps(RAMP_TARGET_FPS);
    let mut sim = Simulator::new(config, MacroquadCanvas::new())?;
    let scene = Scene::ramp(sim.viewport());
    sim.populate(&scene)?;

    let (width, height) = (config.width as i32, config.height as i32);
    let guide = (
        IVec2::new(GUIDE_INSET, height / 2),
        IVec2::new(width - GUIDE_INSET, height / 2),
    );

    let mut limiter = FrameLimiter::new(RAMP_TARGET_FPS);
    let mut fps = FpsCounter::new();
    loop {
        if sim.canvas_mut().quit_requested() {
            break;
        }
        sim.draw();
        sim.update();

        let rate = fps.tick(Instant::now());
        overlay::draw_fps(sim.canvas_mut(), rate);
        overlay::draw_dotted_line(sim.canvas_mut(), guide.0, guide.1, Color::WHITE);

        sim.render();
        limiter.wait();
        next_frame().await;
    }

    info!("ramp demo stopped after {} steps", sim.world().steps_taken());
    Ok(())
}
