use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use log::info;
use minifb::{Key, Window, WindowOptions};

use yawall_rs::{
    asset::{demo_scene, load_scene},
    config::RenderConfig,
    engine::Pipeline,
    renderer::{Rgba, Software, pack_0rgb},
    world::TextureBank,
};

/// Walk around a wall scene with the software renderer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scene file (TOML); the built-in demo room when omitted.
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Renderer config (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Horizontal field of view in degrees.
    #[arg(long)]
    fov: Option<f32>,

    #[arg(long)]
    fps: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(fov) = args.fov {
        config.fov_deg = fov;
    }
    if let Some(fps) = args.fps {
        config.target_fps = fps;
    }
    config.validate()?;

    let mut bank = TextureBank::default_with_checker();
    let scene = match &args.scene {
        Some(path) => load_scene(path, &mut bank)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => demo_scene(&mut bank)?,
    };
    let level = scene.level;
    let mut camera = scene.camera;

    let mut pipeline = Pipeline::from_config(&config, level.walls.len());
    let screen = pipeline.screen();
    let mut renderer = Software::default();
    let mut present: Vec<Rgba> = vec![0; screen.w * screen.h];

    let mut win = Window::new(
        &format!("yawall - {}", level.name),
        screen.w,
        screen.h,
        WindowOptions::default(),
    )?;
    win.set_target_fps(config.target_fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_frame = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt = last_frame.elapsed().as_secs_f32();
        last_frame = Instant::now();

        /* movement --------------------------------------------------------- */
        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            camera.step(config.move_speed * dt);
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            camera.step(-config.move_speed * dt);
        }
        if win.is_key_down(Key::Left) || win.is_key_down(Key::A) {
            camera.turn(-config.turn_speed * dt);
        }
        if win.is_key_down(Key::Right) || win.is_key_down(Key::D) {
            camera.turn(config.turn_speed * dt);
        }

        /* draw */
        let t0 = Instant::now();
        pipeline.draw_frame(&level, &camera, &bank, &mut renderer, |fb, _, _| {
            pack_0rgb(fb, &mut present)
        });
        acc_time += t0.elapsed();
        acc_frames += 1;

        win.update_with_buffer(&present, screen.w, screen.h)?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
