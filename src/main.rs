//! Tap Runner entry point
//!
//! Headless native driver: runs the session at a simulated 60 Hz render
//! rate with a scripted touch sequence and logs the semantic events. A
//! rendering host would call the same `Scene` surface.

use tap_runner::sim::GameEvent;
use tap_runner::{Scene, Tuning};

const SCREEN_W: f32 = 800.0;
const SCREEN_H: f32 = 480.0;
const FRAME: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning overrides from {path}");
                    tuning
                }
                Err(err) => {
                    log::error!("bad tuning file {path}: {err}");
                    std::process::exit(1);
                }
            },
            Err(err) => {
                log::error!("cannot read {path}: {err}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut scene = match Scene::new(&tuning, SCREEN_W, SCREEN_H) {
        Ok(scene) => scene,
        Err(err) => {
            log::error!("scene setup failed: {err}");
            std::process::exit(1);
        }
    };

    // Scripted session: settle, jump (right tap), dodge (left tap + release)
    for frame in 0u32..360 {
        match frame {
            60 => scene.touch_down(600.0, 240.0, 0, 0),
            200 => scene.touch_down(100.0, 240.0, 0, 0),
            230 => scene.touch_up(100.0, 240.0, 0, 0),
            _ => {}
        }

        // Copy the frame's events out so the scene is free to answer queries
        let events: Vec<GameEvent> = scene.update(FRAME).to_vec();
        for event in events {
            match event {
                GameEvent::RunnerLanded => {
                    log::info!("frame {frame}: runner landed at {}", scene.runner_position())
                }
            }
        }
    }

    let pos = scene.runner_position();
    log::info!(
        "session over: runner at ({:.2}, {:.2}), jumping={}, dodging={}",
        pos.x,
        pos.y,
        scene.runner().is_jumping(),
        scene.runner().is_dodging()
    );
}
