//! Dodgefall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use dodgefall::best_score::LocalStore;
    use dodgefall::consts::*;
    use dodgefall::renderer::CanvasRenderState;
    use dodgefall::sim::{
        Dir, FrameClock, GameEvent, GameState, InputState, RenderSnapshot, RoundPhase, TickInput,
        tick,
    };
    use dodgefall::{ScoreStore, Theme};

    /// Current time on the same clock as animation-frame timestamps.
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        clock: FrameClock,
        render_state: Option<CanvasRenderState>,
        store: Box<dyn ScoreStore>,
        tick_input: TickInput,
    }

    impl Game {
        fn new(seed: u64, theme: Theme, store: Box<dyn ScoreStore>) -> Self {
            let best = store.load().unwrap_or(0);
            Self {
                state: GameState::new(seed, theme, best),
                input: InputState::default(),
                clock: FrameClock::new(),
                render_state: None,
                store,
                tick_input: TickInput::default(),
            }
        }

        /// One animation frame: sample input, tick, drain events, draw.
        fn frame(&mut self, time: f64) {
            let dt = self.clock.delta_ms(time).min(MAX_FRAME_DT_MS);
            self.tick_input.movement = self.input.movement(time);

            let input = self.tick_input;
            tick(&mut self.state, &input, dt);

            // Clear one-shot inputs after processing
            self.tick_input.start = false;
            self.tick_input.pause = false;

            for event in self.state.take_events() {
                match event {
                    GameEvent::RoundStarted => log::info!("Round started"),
                    GameEvent::RoundOver { score, new_best } => {
                        if let Some(best) = new_best {
                            self.store.save(best);
                            log::info!("Round over: {} points, new best", score);
                        } else {
                            log::info!("Round over: {} points", score);
                        }
                    }
                }
            }

            let snap = self.state.snapshot();
            if let Some(ref render_state) = self.render_state {
                render_state.render(&snap);
            }
            self.update_hud(&snap);
        }

        /// Update overlay elements in DOM
        fn update_hud(&self, snap: &RenderSnapshot) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("overlay") {
                let class = if snap.phase == RoundPhase::Playing {
                    "overlay hidden"
                } else {
                    "overlay"
                };
                let _ = el.set_attribute("class", class);
            }

            let (title, text, score_info) = match snap.phase {
                RoundPhase::Idle => (
                    "Play".to_string(),
                    "Press Space or Click to start".to_string(),
                    format!("Best: {}", snap.best),
                ),
                RoundPhase::Playing => (String::new(), String::new(), String::new()),
                RoundPhase::Paused => (
                    "Paused".to_string(),
                    "Press Space to resume".to_string(),
                    String::new(),
                ),
                RoundPhase::GameOver => (
                    "Game Over".to_string(),
                    format!("Score: {} — Click to retry", snap.score),
                    format!("Best: {}", snap.best),
                ),
            };

            if let Some(el) = document.get_element_by_id("stateTitle") {
                el.set_text_content(Some(&title));
            }
            if let Some(el) = document.get_element_by_id("stateText") {
                el.set_text_content(Some(&text));
            }
            if let Some(el) = document.get_element_by_id("scoreInfo") {
                el.set_text_content(Some(&score_info));
            }
        }
    }

    fn parse_theme(query: &str) -> Option<Theme> {
        let (_, value) = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "theme")?;
        Theme::from_str(value)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dodgefall starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let theme = window
            .location()
            .search()
            .ok()
            .and_then(|query| parse_theme(&query))
            .unwrap_or_default();
        let seed = js_sys::Date::now() as u64;

        let store: Box<dyn ScoreStore> = Box::new(LocalStore);
        let game = Rc::new(RefCell::new(Game::new(seed, theme, store)));

        log::info!("Theme {:?}, seed {}", theme, seed);

        let render_state = CanvasRenderState::new(&canvas);
        if render_state.is_none() {
            log::error!("No 2d canvas context");
        }
        game.borrow_mut().render_state = render_state;
        apply_canvas_size(&mut game.borrow_mut(), &canvas);

        setup_input_handlers(&canvas, game.clone());
        setup_overlay_controls(game.clone());
        setup_resize(&canvas, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Dodgefall running");
    }

    /// Measure the canvas, then push the logical size into the field and
    /// the device-pixel size into the backing store.
    fn apply_canvas_size(g: &mut Game, canvas: &HtmlCanvasElement) {
        let rect = canvas.get_bounding_client_rect();
        let width = rect.width().round().max(DEFAULT_FIELD_WIDTH as f64);
        let height = if rect.height() > 0.0 {
            rect.height().round()
        } else {
            DEFAULT_FIELD_HEIGHT as f64
        };
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);

        g.state.set_field_size(width as f32, height as f32);
        if let Some(ref mut render_state) = g.render_state {
            render_state.resize(width, height, dpr);
        }

        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", rect.width()));
        let _ = style.set_property("height", &format!("{}px", height));
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard held state and one-shot intents
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" => g.input.set_held(Dir::Left, true),
                    "ArrowRight" | "d" => g.input.set_held(Dir::Right, true),
                    key @ (" " | "Spacebar") => match g.state.phase {
                        RoundPhase::Idle | RoundPhase::GameOver => g.tick_input.start = true,
                        RoundPhase::Playing | RoundPhase::Paused if key == " " => {
                            g.tick_input.pause = true;
                        }
                        _ => {}
                    },
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" => g.input.set_held(Dir::Left, false),
                    "ArrowRight" | "d" => g.input.set_held(Dir::Right, false),
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click: start when idle, otherwise steer by canvas half
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if matches!(g.state.phase, RoundPhase::Idle | RoundPhase::GameOver) {
                    g.tick_input.start = true;
                }
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                let left = x < rect.width() / 2.0;
                let now = now_ms();
                g.input.set_zone(Dir::Left, left, now);
                g.input.set_zone(Dir::Right, !left, now);
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: each touch arms the zone for its canvas half
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if matches!(g.state.phase, RoundPhase::Idle | RoundPhase::GameOver) {
                    g.tick_input.start = true;
                }
                let rect = canvas_clone.get_bounding_client_rect();
                let touches = event.touches();
                let now = now_ms();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let x = touch.client_x() as f64 - rect.left();
                        if x < rect.width() / 2.0 {
                            g.input.set_zone(Dir::Left, true, now);
                        } else {
                            g.input.set_zone(Dir::Right, true, now);
                        }
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                let now = now_ms();
                g.input.set_zone(Dir::Left, false, now);
                g.input.set_zone(Dir::Right, false, now);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_overlay_controls(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if matches!(g.state.phase, RoundPhase::Idle | RoundPhase::GameOver) {
                    g.tick_input.start = true;
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(overlay) = document.get_element_by_id("overlay") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if matches!(g.state.phase, RoundPhase::Idle | RoundPhase::GameOver) {
                    g.tick_input.start = true;
                }
            });
            let _ =
                overlay.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            apply_canvas_size(&mut game.borrow_mut(), &canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == RoundPhase::Playing {
                        g.tick_input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == RoundPhase::Playing {
                    g.tick_input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dodgefall::sim::{GameEvent, GameState, RoundPhase, TickInput, tick};
    use dodgefall::{MemoryStore, ScoreStore, Theme};

    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut store = MemoryStore::default();
    let mut state = GameState::new(seed, Theme::Beats, store.load().unwrap_or(0));

    log::info!("Headless round, seed {}", seed);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        0.0,
    );

    // Fixed 16 ms ticks with a stationary player until something lands on it
    let mut ticks = 0u64;
    while state.phase == RoundPhase::Playing && ticks < 1_000_000 {
        tick(&mut state, &TickInput::default(), 16.0);
        ticks += 1;
    }

    for event in state.take_events() {
        if let GameEvent::RoundOver { score, new_best } = event {
            if let Some(best) = new_best {
                store.save(best);
            }
            log::info!("Round over: {} points after {} ticks", score, ticks);
        }
    }
}
