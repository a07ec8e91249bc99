//! In Orbit entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use in_orbit::audio::MusicTrack;
    use in_orbit::platform::web::AnimationFrames;
    use in_orbit::renderer::{RenderError, RenderState, build_scene};
    use in_orbit::sim::{Starfield, Viewport};
    use in_orbit::{Session, Settings};

    /// Decorative refresh while the game loop is idle (title, game over)
    const IDLE_REDRAW_MS: i32 = 50;

    /// Game instance holding all state
    struct Game {
        session: Session<MusicTrack>,
        frames: AnimationFrames,
        render_state: Option<RenderState>,
        starfield: Option<Starfield>,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        fn settings(&self) -> &Settings {
            self.session.settings()
        }

        /// Render the current frame
        fn render(&mut self) {
            let time = js_sys::Date::now() / 1000.0;
            let quality = self.settings().quality;
            let vertices = build_scene(
                &self.session.snapshot(),
                self.starfield.as_ref(),
                time,
                quality,
            );
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size, render_state.view);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snapshot = self.session.snapshot();

            show(&document, "title-screen", !snapshot.game_started);
            show(&document, "hud", snapshot.game_started);
            show(&document, "game-over", snapshot.game_over);

            if let Some(el) = document.get_element_by_id("hud") {
                el.set_text_content(Some(&snapshot.hud_line()));
            }
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&snapshot.final_score().to_string()));
            }
            if let Some(el) = document.get_element_by_id("mute-btn") {
                let label = if snapshot.is_muted { "Unmute" } else { "Mute" };
                el.set_text_content(Some(label));
            }
        }

        /// Match the canvas backing store and the simulation to the page size
        fn fit_to_window(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (viewport, size) = canvas_size(&window, &self.canvas);
            self.session.resize(viewport);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(size, (viewport.width, viewport.height));
            }
        }

        /// A fixed `?seed=` replays the same game after restart
        fn restart(&mut self) {
            let seed = self.settings().run_seed(|| js_sys::Date::now() as u64);
            self.session.restart(seed, &mut self.frames);
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Size the canvas backing store; returns the CSS-pixel viewport and the
    /// physical surface size
    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (Viewport, (u32, u32)) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (Viewport::new(client_w as f32, client_h as f32), (width, height))
    }

    fn on_animation_frame(game: &Weak<RefCell<Game>>, time: f64) {
        let Some(game) = game.upgrade() else {
            return;
        };
        let mut g = game.borrow_mut();
        let Game {
            session,
            frames,
            starfield,
            ..
        } = &mut *g;

        if session.on_frame(time, frames) {
            let viewport = session.state().viewport;
            if let Some(stars) = starfield {
                stars.drift(&viewport);
            }
            g.render();
            g.update_hud();
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        size: (u32, u32),
        viewport: Viewport,
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, size, (viewport.width, viewport.height)).await
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&format!("Logger unavailable: {}", err)));
        }

        log::info!("In Orbit starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let settings = Settings::from_query(&window.location().search().unwrap_or_default());

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (viewport, size) = canvas_size(&window, &canvas);

        let seed = settings.run_seed(|| js_sys::Date::now() as u64);
        let (drift, flicker) = settings.star_counts();
        let starfield =
            (drift + flicker > 0).then(|| Starfield::new(seed, &viewport, drift, flicker));
        let audio = MusicTrack::new(&settings.music_url, settings.music_volume);

        let render_state = match init_renderer(&canvas, size, viewport).await {
            Ok(state) => Some(state),
            Err(err) => {
                log::error!("WebGPU unavailable, running without graphics: {}", err);
                None
            }
        };

        let game = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            let weak = weak.clone();
            RefCell::new(Game {
                session: Session::new(settings, viewport, seed, audio),
                frames: AnimationFrames::new(move |time| on_animation_frame(&weak, time)),
                render_state,
                starfield,
                canvas: canvas.clone(),
            })
        });

        log::info!("Game initialized with seed: {}", seed);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_keyboard(&window, game.clone());
        setup_buttons(&document, game.clone());
        setup_window_events(&window, game.clone());
        setup_idle_redraw(&window, game.clone());

        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }

        log::info!("In Orbit running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key.starts_with("Arrow") {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                let Game { session, frames, .. } = &mut *g;
                session.key_down(&key, frames);
                g.update_hud();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let Game { session, frames, .. } = &mut *g;
                session.start(frames);
                g.update_hud();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.session.toggle_mute();
                g.update_hud();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.restart();
                g.render();
                g.update_hud();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_events(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.fit_to_window();
                g.render();
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys released while unfocused never report keyup
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.release_keys();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                let Game { session, frames, .. } = &mut *g;
                session.teardown(frames);
                log::info!("Page hidden, game loop stopped");
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pages restored from the back/forward cache pick up where they left off
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                let Game { session, frames, .. } = &mut *g;
                session.resume(frames);
                g.render();
                g.update_hud();
            });
            let _ = window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keeps the star flicker alive while no frame loop is running
    fn setup_idle_redraw(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut()>::new(move || {
            let Ok(mut g) = game.try_borrow_mut() else {
                return;
            };
            if !g.session.is_running() && g.starfield.is_some() {
                g.render();
            }
        });
        if let Err(err) = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            IDLE_REDRAW_MS,
        ) {
            log::warn!("Idle redraw timer unavailable: {:?}", err);
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(err) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", err);
    }
}

/// Headless autopilot run
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::process::ExitCode;

    use in_orbit::audio::SilentAudio;
    use in_orbit::platform::headless::SteppedFrames;
    use in_orbit::sim::Viewport;
    use in_orbit::{Session, Settings};

    const REFRESH_HZ: f64 = 60.0;
    const VIEW_WIDTH: f32 = 1280.0;
    const VIEW_HEIGHT: f32 = 720.0;
    /// Stop after ten simulated minutes even if the sun survives
    const MAX_RUN_MS: f64 = 600_000.0;

    pub fn run(query: &str) -> ExitCode {
        let settings = Settings::from_query(query);
        let seed = settings.run_seed(clock_seed);
        log::info!("In Orbit (headless) starting with seed: {}", seed);

        let viewport = Viewport::new(VIEW_WIDTH, VIEW_HEIGHT);
        let mut session = Session::new(settings, viewport, seed, SilentAudio::default());
        let mut frames = SteppedFrames::new(REFRESH_HZ, 0.0);

        session.set_autopilot(true);
        session.start(&mut frames);
        while let Some(now) = frames.next_frame() {
            session.on_frame(now, &mut frames);
            if now >= MAX_RUN_MS {
                session.teardown(&mut frames);
                break;
            }
        }

        let snapshot = session.snapshot();
        log::info!(
            "Run finished after {} frames ({:.1}s): {} | difficulty {:.2} | planets {} | game over: {}",
            frames.delivered(),
            frames.now() / 1000.0,
            snapshot.hud_line(),
            snapshot.difficulty,
            snapshot.planets.len(),
            snapshot.game_over
        );

        match snapshot.to_json() {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(err) => {
                log::error!("Failed to serialize snapshot: {}", err);
                ExitCode::FAILURE
            }
        }
    }

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    // Optional settings in query form, e.g. `seed=42&quality=low`
    let query = std::env::args().nth(1).unwrap_or_default();
    headless::run(&query)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
