//! Sky Blaster entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        TouchEvent, Window,
    };

    use sky_blaster::platform::{FrameClock, InputCollector, Session};
    use sky_blaster::sim::{GameState, Rect, Scene, tick};
    use sky_blaster::{InputSource, Tuning, Variant};

    /// Enemy fill colours, indexed by sprite tag
    const ENEMY_COLORS: [&str; 5] = ["#e05252", "#e0a452", "#9f52e0", "#52b0e0", "#e052b8"];

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputCollector,
        clock: FrameClock,
        ctx: CanvasRenderingContext2d,
        session: Session,
    }

    impl Game {
        fn new(tuning: Tuning, seed: u64, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                input: InputCollector::new(tuning.input_source),
                state: GameState::new(tuning, seed),
                clock: FrameClock::new(),
                ctx,
                session: Session::new(),
            }
        }

        /// Run one simulation tick for the frame at `time`
        fn update(&mut self, time: f64) {
            self.clock.record(time);
            let Some(now) = self.session.elapsed(time) else {
                return;
            };
            let input = self.input.snapshot();
            tick(&mut self.state, &input, now);

            if let Some(score) = self.session.take_game_over(&self.state.events) {
                set_text("final-score", &score.to_string());
                set_visible("game-over", true);
            }
        }

        fn start(&mut self) {
            self.input.clear();
            self.session.start();
            set_visible("start-screen", false);
        }

        fn render(&self) {
            draw_scene(&self.ctx, &self.state.scene(), self.clock.fps());
        }

        fn restart(&mut self, seed: u64) {
            self.state.restart(seed);
            self.input.clear();
            self.clock.reset();
            self.session.restart();
            set_visible("game-over", false);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn set_visible(id: &str, visible: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn viewport(window: &Window) -> (f32, f32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w as f32, h as f32)
    }

    /// Variant and overrides come from `data-variant` / `data-tuning` on the canvas;
    /// without a variant the viewport width picks desktop or touch
    fn load_tuning(canvas: &HtmlCanvasElement, window: &Window) -> Tuning {
        let (vw, vh) = viewport(window);
        let variant = match canvas.get_attribute("data-variant") {
            Some(name) => Variant::from_str(&name).unwrap_or_else(|| {
                log::warn!("Unknown variant '{}', picking by viewport", name);
                Variant::for_viewport(vw)
            }),
            None => Variant::for_viewport(vw),
        };
        let preset = Tuning::for_variant(variant, vw, vh);

        match canvas.get_attribute("data-tuning") {
            Some(json) => match preset.with_overrides(&json) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::warn!("Ignoring tuning overrides: {}", e);
                    preset
                }
            },
            None => preset,
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Sky Blaster starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(canvas) = document()
            .and_then(|d| d.get_element_by_id("canvas"))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let tuning = load_tuning(&canvas, &window);
        canvas.set_width(tuning.canvas_width as u32);
        canvas.set_height(tuning.canvas_height as u32);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("2D canvas context unavailable");
            return;
        };

        log::info!(
            "{} layout, {}x{} at scale {}",
            tuning.variant.as_str(),
            tuning.canvas_width,
            tuning.canvas_height,
            tuning.scale
        );

        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        let game = Rc::new(RefCell::new(Game::new(tuning, seed, ctx)));
        // On-screen pad and Shoot button only where the stick steers
        set_visible(
            "controls",
            game.borrow().input.source() == InputSource::Joystick,
        );

        setup_keyboard(&window, game.clone());
        setup_joystick(game.clone());
        setup_fire_button(game.clone());
        setup_start_button(game.clone());
        setup_restart_button(game.clone());
        setup_blur(&window, game.clone());

        request_animation_frame(game);
        log::info!("Sky Blaster running!");
    }

    fn setup_keyboard(window: &Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            game.borrow_mut().input.key_up(&event.key());
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Virtual stick: offset of the first touch from the pad centre
    fn setup_joystick(game: Rc<RefCell<Game>>) {
        let Some(pad) = document().and_then(|d| d.get_element_by_id("joystick")) else {
            return;
        };

        {
            let game = game.clone();
            let pad_ref = pad.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = pad_ref.get_bounding_client_rect();
                    let dx = touch.client_x() as f64 - (rect.left() + rect.width() / 2.0);
                    let dy = touch.client_y() as f64 - (rect.top() + rect.height() / 2.0);
                    game.borrow_mut().input.stick_move(dx as f32, dy as f32);
                }
            });
            let _ =
                pad.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
            game.borrow_mut().input.stick_release();
        });
        let _ = pad.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
        let _ =
            pad.add_event_listener_with_callback("touchcancel", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_fire_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("shoot-btn")) else {
            return;
        };

        for (event_name, pressed) in [
            ("touchstart", true),
            ("mousedown", true),
            ("touchend", false),
            ("touchcancel", false),
            ("mouseup", false),
            ("mouseleave", false),
        ] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                game.borrow_mut().input.set_fire_button(pressed);
            });
            let _ = btn.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("start-btn")) else {
            // No instruction screen on this page
            game.borrow_mut().start();
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().start();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("restart-btn")) else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let seed = js_sys::Date::now() as u64;
            game.borrow_mut().restart(seed);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Release everything when the window loses focus, or keys stick down
    fn setup_blur(window: &Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().input.clear();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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

        // Keep scheduling after game over so a restart picks up immediately
        request_animation_frame(game);
    }

    fn fill_circle(ctx: &CanvasRenderingContext2d, rect: &Rect, color: &str) {
        let c = rect.center();
        ctx.begin_path();
        let _ = ctx.arc(c.x as f64, c.y as f64, rect.width as f64 / 2.0, 0.0, TAU);
        ctx.set_fill_style_str(color);
        ctx.fill();
    }

    fn draw_scene(ctx: &CanvasRenderingContext2d, scene: &Scene, fps: u32) {
        let (w, h) = (scene.canvas_width as f64, scene.canvas_height as f64);
        ctx.set_fill_style_str("#111827");
        ctx.fill_rect(0.0, 0.0, w, h);

        let p = &scene.player.rect;
        ctx.set_fill_style_str("#3b82f6");
        ctx.fill_rect(p.x as f64, p.y as f64, p.width as f64, p.height as f64);

        for enemy in &scene.enemies {
            let color = ENEMY_COLORS[enemy.sprite.0 as usize % ENEMY_COLORS.len()];
            fill_circle(ctx, &enemy.rect, color);
        }
        for shot in &scene.projectiles {
            fill_circle(ctx, &shot.rect, "yellow");
        }
        if let Some(healer) = &scene.healer {
            fill_circle(ctx, healer, "#22c55e");
        }
        if let Some(booster) = &scene.booster {
            fill_circle(ctx, booster, "#f97316");
        }

        // HUD, bottom left
        let margin = 20.0;
        let hud_bottom = h - margin;
        ctx.set_fill_style_str("white");
        ctx.set_font("20px Arial");
        let boost = if scene.boost_active { "Active" } else { "Inactive" };
        let _ = ctx.fill_text(&format!("Score: {}", scene.score), margin, hud_bottom - 110.0);
        let _ = ctx.fill_text(
            &format!("Health: {}", scene.player.health),
            margin,
            hud_bottom - 90.0,
        );
        let _ = ctx.fill_text(&format!("Weapon Boost: {}", boost), margin, hud_bottom - 70.0);

        let (bar_w, bar_h) = (300.0_f64.min(w - 2.0 * margin), 25.0);
        ctx.set_fill_style_str("red");
        ctx.fill_rect(margin, hud_bottom - 60.0, bar_w, bar_h);
        ctx.set_fill_style_str("green");
        ctx.fill_rect(
            margin,
            hud_bottom - 60.0,
            bar_w * scene.health_fraction() as f64,
            bar_h,
        );
        ctx.set_stroke_style_str("white");
        ctx.stroke_rect(margin, hud_bottom - 60.0, bar_w, bar_h);

        ctx.set_fill_style_str("white");
        let _ = ctx.fill_text(
            "Controls: Arrow keys / WASD to move, Space to shoot",
            margin,
            hud_bottom - 20.0,
        );
        let _ = ctx.fill_text(&format!("FPS: {}", fps), w - 100.0, margin + 10.0);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Blaster (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autopilot session used to smoke-test the simulation without a browser
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use sky_blaster::consts::TICK_MS;
    use sky_blaster::sim::{GameEvent, GameState, Movement, TickInput, tick};
    use sky_blaster::{Tuning, Variant};

    /// Two minutes of frames
    const MAX_TICKS: u64 = 60 * 120;

    /// Chase the nearest marker, otherwise sidestep the closest enemy above
    fn autopilot(state: &GameState) -> TickInput {
        let player = state.player.rect.center();

        let marker = [state.healer, state.booster]
            .into_iter()
            .flatten()
            .map(|r| r.center())
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));

        let threat = state
            .enemies
            .iter()
            .map(|e| e.rect.center())
            .filter(|c| c.y < player.y && (c.x - player.x).abs() < state.player.rect.width)
            .max_by(|a, b| a.y.total_cmp(&b.y));

        let dir = match (threat, marker) {
            (Some(enemy), _) if player.y - enemy.y < 250.0 => {
                Vec2::new(if enemy.x > player.x { -1.0 } else { 1.0 }, 0.3)
            }
            (_, Some(target)) => target - player,
            _ => Vec2::ZERO,
        };

        TickInput {
            movement: Movement::Analog(dir),
            fire: true,
        }
    }

    pub fn run() {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(42);
        let tuning = Tuning::for_variant(Variant::Desktop, 1280.0, 720.0);
        let mut state = GameState::new(tuning, seed);
        log::info!("Headless autopilot run, seed {}", seed);

        let (mut kills, mut hits, mut pickups) = (0u32, 0u32, 0u32);
        for i in 0..MAX_TICKS {
            let input = autopilot(&state);
            tick(&mut state, &input, i as f64 * TICK_MS as f64);

            for event in &state.events {
                match event {
                    GameEvent::EnemyDestroyed { .. } => kills += 1,
                    GameEvent::PlayerHit { .. } => hits += 1,
                    GameEvent::MarkerCollected(_) => pickups += 1,
                    _ => {}
                }
            }
            if state.is_game_over() {
                break;
            }
            if i > 0 && i % 600 == 0 {
                log::info!(
                    "t={}s score={} health={} enemies={}",
                    i / 60,
                    state.score,
                    state.player.health,
                    state.enemies.len()
                );
            }
        }

        println!(
            "Finished after {} ticks: score {}, health {}, {} kills, {} hits taken, {} pickups{}",
            state.time_ticks,
            state.score,
            state.player.health,
            kills,
            hits,
            pickups,
            if state.is_game_over() { " (game over)" } else { "" }
        );

        // Same snapshot a JS renderer would receive
        match state.scene().to_json() {
            Ok(json) => log::debug!("Final scene: {}", json),
            Err(e) => log::warn!("Could not serialize final scene: {}", e),
        }
    }
}
