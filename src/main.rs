//! Hex Haunt entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use hex_haunt::session::command_for_key;
    use hex_haunt::{GameConfig, Session};

    // The page owns drawing: it may define `window.hexHauntRender(snapshot)`
    // and `window.hexHauntConfig` (a JSON string).
    #[wasm_bindgen(inline_js = "
        export function present(json) {
            if (typeof window.hexHauntRender === 'function') {
                window.hexHauntRender(JSON.parse(json));
            }
        }

        export function page_config() {
            const cfg = window.hexHauntConfig;
            return typeof cfg === 'string' ? cfg : null;
        }
    ")]
    extern "C" {
        fn present(json: &str);
        fn page_config() -> Option<String>;
    }

    /// Game instance holding the session
    struct Game {
        session: Session,
    }

    impl Game {
        fn new(seed: u32) -> Self {
            let session = match page_config().map(|json| GameConfig::from_json(&json)) {
                Some(Ok(config)) => match Session::with_config(config, seed) {
                    Ok(session) => session,
                    Err(e) => {
                        log::warn!("Page config rejected ({e}), using defaults");
                        Session::new(seed)
                    }
                },
                Some(Err(e)) => {
                    log::warn!("Page config rejected ({e}), using defaults");
                    Session::new(seed)
                }
                None => Session::new(seed),
            };
            Self { session }
        }

        fn update(&mut self, time: f64) {
            self.session.frame(time);
        }

        fn render(&self) {
            match self.session.snapshot().to_json() {
                Ok(json) => present(&json),
                Err(e) => log::warn!("Snapshot error: {e}"),
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hex Haunt starting...");

        let seed = js_sys::Date::now() as u64 as u32;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        setup_input(game.clone());
        setup_visibility(game.clone());
        request_animation_frame(game);
    }

    fn setup_input(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(command) = command_for_key(event.key().as_str()) else {
                return;
            };
            event.prevent_default();
            let mut g = game.borrow_mut();
            match g.session.command(command) {
                Ok(outcome) => log::debug!("{:?}", outcome),
                Err(reason) => log::debug!("Rejected: {reason}"),
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_visibility(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let document_clone = document.clone();
        // Coming back from a hidden tab starts a fresh frame clock
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                game.borrow_mut().session.reset_clock();
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hex Haunt (native) starting...");
    log::info!("Native mode runs a headless demo round - build for wasm32 to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(1);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless round: a walker follows the shortest route home, opening doors
/// on the way, while the ghosts wander.
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::collections::{HashMap, VecDeque};

    use hex_haunt::Session;
    use hex_haunt::sim::{Cell, Command, GameState, RoundStatus};

    /// Simulated frame length
    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Frames between walker steps
    const FRAMES_PER_STEP: u32 = 15;

    pub fn run(seed: u32) {
        let mut session = Session::new(seed);
        println!("{}", render_ascii(&session.state));

        let mut frame = 0u32;
        while session.state.is_running() {
            frame += 1;
            session.advance(FRAME_MS);
            if frame % FRAMES_PER_STEP == 0 && session.state.is_running() {
                step_toward_home(&mut session);
            }
        }

        let snap = session.snapshot();
        println!("{}", render_ascii(&session.state));
        let verdict = match snap.status {
            RoundStatus::Won => "reached home",
            RoundStatus::Lost => "lost",
            RoundStatus::Running => "still running",
        };
        println!(
            "Seed {}: {} after {:.1}s ({} frames) - {}",
            seed,
            verdict,
            session.state.elapsed_ms / 1000.0,
            frame,
            snap.message
        );
    }

    fn step_toward_home(session: &mut Session) {
        let state = &session.state;
        let Some(next) = route_home(state).and_then(|path| path.get(1).copied()) else {
            return;
        };
        let Some(dir) = state.grid.direction_between(state.player.pos, next) else {
            return;
        };

        if !state.grid.is_passable(state.player.pos, next) {
            // Doors open one at a time in priority order; this one gets its turn eventually
            let _ = session.command(Command::OpenDoor);
            return;
        }
        let _ = session.command(Command::Move(dir));
    }

    /// Breadth-first route over carved passages, closed doors included
    fn route_home(state: &GameState) -> Option<Vec<Cell>> {
        let start = state.player.pos;
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        came_from.insert(start, start);

        while let Some(cell) = queue.pop_front() {
            if cell == state.home {
                let mut path = vec![cell];
                let mut cur = cell;
                while cur != start {
                    cur = came_from[&cur];
                    path.push(cur);
                }
                path.reverse();
                return Some(path);
            }
            // Prefer neighbours that head toward home
            let mut neighbors = state.grid.neighbors(cell);
            neighbors.sort_by_key(|n| n.cell.hex_distance(state.home));
            for n in neighbors {
                let carved = state.grid.edge(cell, n.cell).is_some_and(|e| e.open);
                if carved && !came_from.contains_key(&n.cell) {
                    came_from.insert(n.cell, cell);
                    queue.push_back(n.cell);
                }
            }
        }
        None
    }

    /// One line per row, offset by half a cell per row to suggest the hex skew
    fn render_ascii(state: &GameState) -> String {
        let mut out = String::new();
        for r in 0..state.grid.height {
            out.push_str(&" ".repeat(r as usize));
            for q in 0..state.grid.width {
                let cell = Cell::new(q, r);
                let glyph = if state.player.pos == cell {
                    '@'
                } else if state.ghost_on(cell) {
                    'G'
                } else if state.home == cell {
                    'H'
                } else {
                    let doors = state
                        .grid
                        .neighbors(cell)
                        .iter()
                        .filter(|n| state.grid.edge(cell, n.cell).is_some_and(|e| e.is_closed_door()))
                        .count();
                    if doors > 0 { '+' } else { '.' }
                };
                out.push(glyph);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}
