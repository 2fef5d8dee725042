//! Flappy Lasers entry point
//!
//! On the web this wires the canvas, keyboard and LocalStorage into the game
//! loop. Natively it runs a headless autopilot game and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use flappy_lasers::Viewport;
    use flappy_lasers::highscores::LocalStorageStore;
    use flappy_lasers::renderer::CanvasRenderer;
    use flappy_lasers::sim::{GameLoop, GameState, LoopControl};

    /// Game instance holding all state
    struct Game {
        game_loop: GameLoop,
        renderer: CanvasRenderer,
        store: LocalStorageStore,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Lasers starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Playfield fills the browser window
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, Viewport::new(width as f32, height as f32));
        log::info!("Game initialized with seed: {}", seed);

        let renderer = CanvasRenderer::new(&canvas).expect("Failed to create canvas renderer");
        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::new(state),
            renderer,
            store: LocalStorageStore::load(),
        }));

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Flappy Lasers running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.key() == " " {
                event.prevent_default();
                game.borrow_mut().game_loop.jump();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
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
        let control = {
            let mut g = game.borrow_mut();
            let Game {
                game_loop,
                renderer,
                store,
            } = &mut *g;
            game_loop.frame(time, renderer, store)
        };

        match control {
            LoopControl::Continue => request_animation_frame(game),
            LoopControl::Halt => log::info!("Game loop stopped, reload to play again"),
        }
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

/// Frames a native demo run is capped at (five minutes at 60 fps)
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_FRAMES: u64 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use flappy_lasers::renderer::NullRenderer;
    use flappy_lasers::sim::{GameLoop, GameState, LoopControl, autopilot};
    use flappy_lasers::{MemoryStore, Tuning, Viewport};

    env_logger::init();
    log::info!("Flappy Lasers (native) starting...");
    log::info!("Native mode runs a headless autopilot game - run with `trunk serve` to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read tuning file {path}"))?;
            let tuning =
                Tuning::from_json(&json).with_context(|| format!("invalid tuning in {path}"))?;
            log::info!("Loaded {} tiers from {}", tuning.tiers.len(), path);
            tuning
        }
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let state = GameState::with_tuning(seed, Viewport::default(), tuning)?;
    log::info!("Game initialized with seed: {}", seed);

    let mut game = GameLoop::new(state);
    let mut renderer = NullRenderer;
    let mut store = MemoryStore::new();

    let frame_ms = 1000.0 / 60.0;
    for frame in 0..MAX_DEMO_FRAMES {
        if autopilot(&game.state).jump {
            game.jump();
        }
        if game.frame(frame as f64 * frame_ms, &mut renderer, &mut store) == LoopControl::Halt {
            break;
        }
    }

    let state = &game.state;
    println!(
        "score {} | tier {} ({}) | {} frames | crash {:?}",
        state.score,
        state.tier_index,
        state.tier().name,
        state.frame_count,
        state.crash
    );
    Ok(())
}
