//! Pong Arena entry point
//!
//! Frame drivers: a `requestAnimationFrame` loop on the web, a headless
//! jittered-clock run natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_demo {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use pong_arena::sim::Simulation;
    use pong_arena::{Settings, step_and_render};

    /// Demo instance holding all state
    struct Demo {
        sim: Simulation,
        ctx: CanvasRenderingContext2d,
        left: bool,
        right: bool,
    }

    impl Demo {
        fn update_steer(&mut self) {
            let dir = match (self.left, self.right) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            };
            self.sim.set_steer(dir);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Pong Arena starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"canvas\"> on the page");
            return;
        };

        let settings = Settings::load();
        settings.save();
        canvas.set_width(settings.arena.width as u32);
        canvas.set_height(settings.arena.height as u32);

        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    log::error!("2d context has an unexpected type");
                    return;
                }
            },
            _ => {
                log::error!("Canvas has no 2d context");
                return;
            }
        };

        let sim = match Simulation::from_settings(&settings) {
            Ok(sim) => sim,
            Err(e) => {
                log::error!("Bad settings: {}", e);
                return;
            }
        };

        let demo = Rc::new(RefCell::new(Demo {
            sim,
            ctx,
            left: false,
            right: false,
        }));

        setup_input_handlers(demo.clone());
        request_animation_frame(demo);

        log::info!("Pong Arena running!");
    }

    fn setup_input_handlers(demo: Rc<RefCell<Demo>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let demo = demo.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut d = demo.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => d.left = pressed,
                    "ArrowRight" | "d" | "D" => d.right = pressed,
                    "r" | "R" if pressed => d.sim.reset(),
                    _ => return,
                }
                d.update_steer();
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(demo: Rc<RefCell<Demo>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(demo, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(demo: Rc<RefCell<Demo>>, time: f64) {
        {
            let mut d = demo.borrow_mut();
            let Demo { sim, ctx, .. } = &mut *d;
            step_and_render(sim, ctx, time);
        }

        request_animation_frame(demo);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_demo::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pong Arena (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to see the canvas");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use pong_arena::renderer::RecordingContext;
    use pong_arena::sim::{ContactEvent, Simulation};
    use pong_arena::{ConfigError, Settings, step_and_render};

    /// Ten seconds at 60 Hz
    const FRAMES: u32 = 600;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Display refresh jitter (ms, either way)
    const JITTER_MS: f64 = 4.0;
    /// Chance per frame of a long stall (backgrounded tab)
    const STALL_CHANCE: f64 = 0.01;
    const STALL_MS: f64 = 750.0;
    const SEED: u64 = 0x5eed_ba11;

    pub fn run() -> Result<(), ConfigError> {
        let settings = Settings::load();
        let mut sim = Simulation::from_settings(&settings)?;
        let mut rng = Pcg32::seed_from_u64(SEED);
        let mut ctx = RecordingContext::new();

        let mut now = 0.0;
        let (mut bounces, mut pass_throughs, mut escapes) = (0u32, 0u32, 0u32);

        for _ in 0..FRAMES {
            // Simple bot: keep the paddle under the ball
            let arena = sim.arena();
            let offset = arena.ball().position.x - arena.paddle().position.x;
            let steer = offset / arena.config.paddle_width;
            sim.set_steer(steer);

            ctx.clear();
            step_and_render(&mut sim, &mut ctx, now);

            let arena = sim.arena();
            for event in arena.world.events() {
                match event {
                    ContactEvent::Bounce { .. } => bounces += 1,
                    ContactEvent::PassThrough { .. } => pass_throughs += 1,
                }
            }
            if !arena.contains_ball(0.5) {
                escapes += 1;
            }

            now += FRAME_MS + rng.random_range(-JITTER_MS..JITTER_MS);
            if rng.random_bool(STALL_CHANCE) {
                log::debug!("Simulating a {} ms stall at {:.1} ms", STALL_MS, now);
                now += STALL_MS;
            }
        }

        let arena = sim.arena();
        log::info!(
            "{} frames over {:.2}s: {} bounces, {} pass-throughs, ball out of bounds on {} frames",
            FRAMES,
            now / 1000.0,
            bounces,
            pass_throughs,
            escapes
        );
        log::info!(
            "Ball at ({:.1}, {:.1}) moving {:.1} u/s; paddle at ({:.1}, {:.1})",
            arena.ball().position.x,
            arena.ball().position.y,
            arena.ball().velocity.length(),
            arena.paddle().position.x,
            arena.paddle().position.y
        );

        match serde_json::to_string_pretty(ctx.commands()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not dump the last frame: {}", e),
        }
        Ok(())
    }
}
