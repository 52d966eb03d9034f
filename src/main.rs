//! Disco Bounce entry point
//!
//! Native builds run the simulation headless and print the final state as
//! JSON. The web build draws it on a canvas every animation frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use disco_bounce::Settings;
    use disco_bounce::renderer::{CanvasRenderer, Renderer};
    use disco_bounce::sim::{FixedStep, SimState};

    /// App instance holding all state
    struct App {
        state: SimState,
        renderer: CanvasRenderer,
        clock: FixedStep,
        last_time: f64,
        paused: bool,
    }

    impl App {
        /// Run simulation ticks for the elapsed frame time
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                self.clock.tick_seconds()
            };
            self.last_time = time;

            if !self.paused {
                self.state.advance(dt, &mut self.clock);
            }
        }

        fn render(&mut self) {
            if let Err(e) = self.renderer.render(&self.state) {
                log::warn!("Render error: {}", e);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Disco Bounce starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };
        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(c) => c,
            None => {
                log::error!("No <canvas id=\"canvas\"> element");
                return;
            }
        };

        let mut settings = Settings::load();
        if settings.seed.is_none() {
            settings.seed = Some(js_sys::Date::now() as u64);
            // Persist the seed so a reload replays the same run
            settings.save();
        }

        let state = match SimState::from_settings(&settings) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Cannot build scene: {}", e);
                return;
            }
        };
        let renderer = match CanvasRenderer::new(canvas) {
            Ok(r) => r,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        renderer.resize(state.arena.width as u32, state.arena.height as u32);

        let app = Rc::new(RefCell::new(App {
            state,
            renderer,
            clock: FixedStep::new(settings.tick_rate_hz, settings.max_substeps),
            last_time: 0.0,
            paused: false,
        }));

        setup_auto_pause(&document, app.clone());
        request_animation_frame(app);
        log::info!("Disco Bounce running!");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
        }
        request_animation_frame(app);
    }

    /// Stop ticking while the tab is hidden so the balls don't jump on return
    fn setup_auto_pause(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            let mut a = app.borrow_mut();
            a.paused = hidden;
            a.clock.reset();
            a.last_time = 0.0;
            log::info!("{}", if hidden { "Paused (tab hidden)" } else { "Resumed" });
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = run_native() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// `disco-bounce [SETTINGS_JSON] [TICKS]`
#[cfg(not(target_arch = "wasm32"))]
fn run_native() -> disco_bounce::Result<()> {
    use disco_bounce::renderer::{LogRenderer, Renderer};
    use disco_bounce::sim::SimState;
    use disco_bounce::{Error, Settings};

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_file(std::path::Path::new(&path))?,
        None => Settings::default(),
    };
    let ticks = match args.next() {
        Some(n) => n
            .parse::<u64>()
            .map_err(|e| Error::InvalidParam(format!("tick count {n:?}: {e}")))?,
        None => DEFAULT_TICKS,
    };

    log::info!("Disco Bounce (native) starting...");
    let mut state = SimState::from_settings(&settings)?;
    // Headless: one frame per tick, summary logged once per simulated second
    let mut renderer = LogRenderer::new(settings.tick_rate_hz.round().max(1.0) as u64);

    let e0 = state.kinetic_energy();
    let mut collisions = 0u64;
    for _ in 0..ticks {
        collisions += u64::from(state.tick().collisions);
        renderer.render(&state)?;
    }

    let e1 = state.kinetic_energy();
    let drift = if e0 > 0.0 { (e1 - e0) / e0 } else { 0.0 };
    log::info!(
        "Ran {} ticks, {} collisions, KE {:.4} -> {:.4} (drift {:+.3e})",
        state.time_ticks,
        collisions,
        e0,
        e1,
        drift
    );
    if !state.all_contained() {
        log::warn!("Some bodies ended outside the arena");
    }

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
