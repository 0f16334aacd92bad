//! Balloon Pop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, PageTransitionEvent};

    use balloon_pop::GameConfig;
    use balloon_pop::persistence::LocalStorageStore;
    use balloon_pop::platform::Session;
    use balloon_pop::sim::{Balloon, GamePhase, Pattern, RenderFrame, Viewport};

    const PROJECTILE_COLOR: &str = "#FF0000";
    const CROSSHAIR_RADIUS: f64 = 10.0;
    const DOT_COUNT: usize = 5;

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        ctx: CanvasRenderingContext2d,
        canvas: HtmlCanvasElement,
        /// Pending requestAnimationFrame handle
        frame_handle: Option<i32>,
    }

    impl Game {
        /// Render the current frame
        fn render(&self) {
            let frame = self.session.render_frame();
            let ctx = &self.ctx;
            ctx.clear_rect(
                0.0,
                0.0,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            );

            for balloon in frame.balloons {
                draw_balloon(ctx, balloon);
            }

            let projectile_radius = self.session.state().config.projectile_radius as f64;
            ctx.set_fill_style_str(PROJECTILE_COLOR);
            for projectile in frame.projectiles {
                ctx.begin_path();
                let _ = ctx.arc(
                    projectile.pos.x as f64,
                    projectile.pos.y as f64,
                    projectile_radius,
                    0.0,
                    TAU,
                );
                ctx.fill();
            }

            ctx.begin_path();
            let _ = ctx.arc(
                frame.crosshair.x as f64,
                frame.crosshair.y as f64,
                CROSSHAIR_RADIUS,
                0.0,
                TAU,
            );
            ctx.set_stroke_style_str(PROJECTILE_COLOR);
            ctx.set_line_width(2.0);
            ctx.stroke();

            update_hud(&frame);
        }

        /// Match the canvas backing size to its CSS size
        fn sync_canvas_size(&mut self) {
            let width = self.canvas.client_width().max(0) as u32;
            let height = self.canvas.client_height().max(0) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.session.resize(width as f32, height as f32);
        }

        /// Stop the loop and release the pending frame; the session state is
        /// kept so a cached page can resume
        fn teardown(&mut self) {
            if let Some(handle) = self.frame_handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
            self.session.teardown();
        }
    }

    fn draw_balloon(ctx: &CanvasRenderingContext2d, balloon: &Balloon) {
        let x = balloon.pos.x as f64;
        let y = balloon.pos.y as f64;
        let size = balloon.size as f64;
        let color = balloon.color.hex();

        ctx.save();
        ctx.begin_path();
        let _ = ctx.arc(x, y, size, 0.0, TAU);

        match balloon.pattern {
            Pattern::Solid => {
                ctx.set_fill_style_str(color);
                ctx.fill();
            }
            Pattern::Striped => {
                let gradient = ctx.create_linear_gradient(x - size, y - size, x + size, y + size);
                let _ = gradient.add_color_stop(0.0, color);
                let _ = gradient.add_color_stop(0.5, "#FFFFFF");
                let _ = gradient.add_color_stop(1.0, color);
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill();
            }
            Pattern::Dotted => {
                ctx.set_fill_style_str(color);
                ctx.fill();

                ctx.set_fill_style_str("#FFFFFF");
                for i in 0..DOT_COUNT {
                    let angle = i as f64 / DOT_COUNT as f64 * TAU;
                    ctx.begin_path();
                    let _ = ctx.arc(
                        x + angle.cos() * size * 0.5,
                        y + angle.sin() * size * 0.5,
                        size * 0.15,
                        0.0,
                        TAU,
                    );
                    ctx.fill();
                }
            }
        }

        ctx.restore();
    }

    /// Update HUD elements in DOM
    fn update_hud(frame: &RenderFrame<'_>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document.get_element_by_id("hud-score") {
            el.set_text_content(Some(&format!("Score: {}", frame.score)));
        }
        if let Some(el) = document.get_element_by_id("hud-combo") {
            el.set_text_content(Some(&format!("Combo: x{}", frame.multiplier)));
        }
        if let Some(el) = document.get_element_by_id("hud-high-score") {
            el.set_text_content(Some(&format!("High Score: {}", frame.high_score)));
        }

        // Show/hide game over
        if let Some(el) = document.get_element_by_id("game-over") {
            if frame.phase == GamePhase::GameOver {
                let _ = el.set_attribute("class", "");
                if let Some(score_el) = document.get_element_by_id("final-score") {
                    score_el.set_text_content(Some(&frame.score.to_string()));
                }
                if let Some(best_el) = document.get_element_by_id("final-high-score") {
                    best_el.set_text_content(Some(&frame.high_score.to_string()));
                }
            } else {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
        }

        log::info!("Balloon Pop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let width = canvas.client_width().max(0) as u32;
        let height = canvas.client_height().max(0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(
            seed,
            GameConfig::load(),
            Viewport::new(width as f32, height as f32),
            LocalStorageStore,
        );
        let game = Rc::new(RefCell::new(Game {
            session,
            ctx,
            canvas: canvas.clone(),
            frame_handle: None,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_lifecycle_handlers(game.clone());

        request_animation_frame(game);

        log::info!("Balloon Pop running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - aim
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .session
                    .pointer_move(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - fire or restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .session
                    .click(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().sync_canvas_size();
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_lifecycle_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Page going away: stop scheduling frames against a hidden canvas.
        // A page kept in the back/forward cache comes back through pageshow.
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                game.borrow_mut().teardown();
                if event.persisted() {
                    log::info!("Page cached, session paused");
                }
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restored from the back/forward cache: re-arm the loop
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            if !event.persisted() {
                return;
            }
            let idle = {
                let mut g = game.borrow_mut();
                g.session.resume();
                g.sync_canvas_size();
                g.frame_handle.is_none()
            };
            if idle {
                request_animation_frame(game.clone());
            }
        });
        let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle_game = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => handle_game.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame_handle = None;
            if !g.session.is_active() {
                return;
            }

            g.session.frame(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use balloon_pop::GameConfig;
    use balloon_pop::consts::SIM_DT_MS;
    use balloon_pop::persistence::MemoryStore;
    use balloon_pop::platform::Session;
    use balloon_pop::sim::Viewport;

    env_logger::init();
    log::info!("Balloon Pop (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let mut session = Session::new(
        0x0BA1_100F,
        GameConfig::load(),
        Viewport::default(),
        MemoryStore::new(),
    );

    // Sixty seconds of play, shooting under the lowest visible balloon
    // twice a second
    let frames = 60 * 60;
    for i in 0..frames {
        if i % 30 == 0 {
            let target = session
                .state()
                .balloons
                .iter()
                .filter(|b| b.pos.y < session.state().viewport.height)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|b| (b.pos.x, b.pos.y));
            if let Some((x, y)) = target {
                session.pointer_move(x, y);
                session.click(x, y);
            }
        }
        session.frame(i as f64 * SIM_DT_MS);
    }

    let frame = session.render_frame();
    println!(
        "Demo finished: score {}, combo x{}, high score {}",
        frame.score, frame.multiplier, frame.high_score
    );
    session.teardown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
