//! Bin Drop entry point
//!
//! Browser host on wasm (DOM input and HUD, requestAnimationFrame pacing);
//! a headless scripted demo everywhere else.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlImageElement, MouseEvent, PointerEvent};

    use bindrop::consts::*;
    use bindrop::storage::LocalStorage;
    use bindrop::{ArenaWorld, Bounds, GameEvent, MergeGame, TIERS};

    /// Browser app: the game plus frame pacing
    struct App {
        game: MergeGame<ArenaWorld, LocalStorage>,
        bounds: Bounds,
        accumulator: f32,
        last_time: f64,
    }

    impl App {
        fn new(bounds: Bounds) -> Self {
            Self {
                game: MergeGame::new(LocalStorage),
                bounds,
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Begin a run seeded from the clock
        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            if let Err(err) = self.game.start(self.bounds, seed) {
                log::error!("Could not start: {}", err);
                return;
            }

            // Hide the game-over overlay from the previous run
            let document = web_sys::window().unwrap().document().unwrap();
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", "hidden");
            }
            log::info!("New run with seed: {}", seed);
        }

        /// Run fixed steps to catch up with wall time
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.game.step(SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Mirror drained events into the HUD
        fn publish_events(&mut self) {
            let events = self.game.drain_events();
            if events.is_empty() {
                return;
            }
            let document = web_sys::window().unwrap().document().unwrap();

            for event in events {
                match event {
                    GameEvent::Score { score } => {
                        if let Some(el) = document.get_element_by_id("score") {
                            el.set_text_content(Some(&score.to_string()));
                            let best = self.game.best_score();
                            if score > best {
                                let _ = el.set_attribute("class", "score beating");
                            } else {
                                let _ = el.set_attribute("class", "score");
                            }
                        }
                    }
                    GameEvent::NextTier { tier } => {
                        if let Some(tier) = TIERS.get(tier) {
                            if let Some(el) = document.get_element_by_id("next-item") {
                                if let Ok(img) = el.dyn_into::<HtmlImageElement>() {
                                    img.set_src(tier.icon);
                                    img.set_alt(tier.label);
                                }
                            }
                        }
                    }
                    GameEvent::GameOver {
                        score,
                        best,
                        new_record,
                    } => {
                        if let Some(el) = document.get_element_by_id("final-score") {
                            el.set_text_content(Some(&score.to_string()));
                        }
                        if let Some(el) = document.get_element_by_id("best-score") {
                            el.set_text_content(Some(&best.to_string()));
                            let class = if new_record { "best new-record" } else { "best" };
                            let _ = el.set_attribute("class", class);
                        }
                        if let Some(el) = document.get_element_by_id("game-over") {
                            let _ = el.set_attribute("class", "");
                        }
                    }
                    // The renderer reads bodies() directly; nothing to mirror
                    GameEvent::Dropped { .. } | GameEvent::Merged { .. } => {}
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bin Drop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let area = document
            .get_element_by_id("game-area")
            .expect("no game area");
        let rect = area.get_bounding_client_rect();
        let bounds = Bounds::new(rect.width() as f32, rect.height() as f32);

        let app = Rc::new(RefCell::new(App::new(bounds)));
        app.borrow_mut().start();

        setup_pointer(&area, app.clone());
        setup_restart_button(app.clone());

        request_animation_frame(app);

        log::info!("Bin Drop running!");
    }

    fn setup_pointer(area: &Element, app: Rc<RefCell<App>>) {
        let area_clone = area.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let rect = area_clone.get_bounding_client_rect();
            let x = event.client_x() as f32 - rect.left() as f32;
            let _ = app.borrow_mut().game.request_drop(x);
        });
        let _ =
            area.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                app.game.stop();
                app.start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt);
            a.publish_events();
        }

        request_animation_frame(app);
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
    use bindrop::consts::SIM_DT;
    use bindrop::{ArenaWorld, Bounds, GameEvent, MemoryStore, MergeGame};

    env_logger::init();
    log::info!("Bin Drop (native) starting...");

    let mut game: MergeGame<ArenaWorld, MemoryStore> = MergeGame::new(MemoryStore::new());
    game.start(Bounds::new(420.0, 600.0), 0x42)
        .expect("start failed");

    // Walk drops across the bin until it overfills
    let columns = [60.0, 140.0, 220.0, 300.0, 360.0];
    let mut column = 0;
    let mut drops = 0u32;
    let mut merges = 0u32;
    let mut summary = None;

    'outer: for _ in 0..200_000 {
        if game.is_drop_armed() {
            let _ = game.request_drop(columns[column % columns.len()]);
            column += 1;
            drops += 1;
        }
        game.step(SIM_DT);
        for event in game.drain_events() {
            match event {
                GameEvent::Merged { .. } => merges += 1,
                GameEvent::GameOver {
                    score,
                    best,
                    new_record,
                } => {
                    summary = Some((score, best, new_record));
                    break 'outer;
                }
                _ => {}
            }
        }
    }

    match summary {
        Some((score, best, new_record)) => {
            println!("Bin full after {} drops and {} merges", drops, merges);
            println!(
                "Score: {} (best {}{})",
                score,
                best,
                if new_record { ", new record" } else { "" }
            );
        }
        None => println!("Bin never overfilled; gave up after {} drops", drops),
    }
}
