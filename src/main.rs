//! Bounce Field entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

    use bounce_field::{DensityPreset, Settings};
    use bounce_field::render::{Paint, RenderFrame};
    use bounce_field::sim::{Rect, SimulationState, Viewport, on_resize, step};

    /// Fallback frame time before the first timestamp arrives
    const DEFAULT_DT: f32 = 1.0 / 60.0;

    /// Host instance holding all state
    struct Host {
        state: SimulationState,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
        /// Set by resize events; applied once at the start of the next frame
        resize_pending: bool,
    }

    impl Host {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                DEFAULT_DT
            };
            self.last_time = time;

            if self.resize_pending {
                self.resize_pending = false;
                self.apply_resize();
            }

            let result = step(&mut self.state, dt);
            if !result.relocated.is_empty() {
                log::debug!("Unstuck bodies: {:?}", result.relocated);
            }
            self.draw();
        }

        fn apply_resize(&mut self) {
            let document = web_sys::window().unwrap().document().unwrap();
            let viewport = match fit_canvas(&document, &self.canvas) {
                Ok(viewport) => viewport,
                Err(e) => {
                    log::warn!("Skipping resize: {}", e);
                    return;
                }
            };
            let regions = find_text_regions(&document);
            on_resize(&mut self.state, viewport, &regions);
        }

        fn draw(&self) {
            let frame = RenderFrame::extract(&self.state);
            self.ctx
                .clear_rect(0.0, 0.0, frame.width as f64, frame.height as f64);

            for circle in &frame.circles {
                let css = circle.color.to_css();
                self.ctx.begin_path();
                let _ = self.ctx.arc(
                    circle.center.x as f64,
                    circle.center.y as f64,
                    circle.radius as f64,
                    0.0,
                    TAU,
                );
                match circle.paint {
                    Paint::Fill => {
                        self.ctx.set_fill_style_str(&css);
                        self.ctx.fill();
                    }
                    Paint::Stroke => {
                        self.ctx.set_stroke_style_str(&css);
                        self.ctx.stroke();
                    }
                }
            }
        }
    }

    /// Match the canvas to the document's client size
    fn fit_canvas(document: &Document, canvas: &HtmlCanvasElement) -> bounce_field::Result<Viewport> {
        let root = document.document_element().expect("no root element");
        let width = (root.client_width() - 1).max(1);
        let height = (root.client_height() - 1).max(1);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        Viewport::new(width as f32, height as f32)
    }

    /// No-go rectangles from the visible page text
    fn find_text_regions(document: &Document) -> Vec<Rect> {
        let mut regions = Vec::new();

        // The heading's glyph box is taller than the ink, trim it
        if let Some(name) = document.get_element_by_id("name") {
            let r = name.get_bounding_client_rect();
            regions.push(Rect::from_ltrb(
                r.left() as f32 + 4.0,
                r.top() as f32 + 15.0,
                r.right() as f32,
                r.bottom() as f32 - 15.0,
            ));
        }

        let to_rect = |el: web_sys::Element| {
            let r = el.get_bounding_client_rect();
            Rect::from_ltrb(r.left() as f32, r.top() as f32, r.right() as f32, r.bottom() as f32)
        };

        if let Some(span) = document.get_elements_by_tag_name("span").item(0) {
            regions.push(to_rect(span));
        }

        let anchors = document.get_elements_by_tag_name("a");
        regions.extend((0..anchors.length()).filter_map(|i| anchors.item(i)).map(to_rect));

        regions
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bounce Field starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("background")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let mut settings = Settings::load();
        // The page can pick a density on the canvas, e.g. data-density="busy"
        if let Some(density) = canvas.get_attribute("data-density") {
            match DensityPreset::from_str(&density) {
                Some(preset) => {
                    log::info!("Density preset: {}", preset.as_str());
                    settings.apply_preset(preset);
                }
                None => log::warn!("Unknown density preset {:?}", density),
            }
        }
        settings.save();
        settings.seed = js_sys::Date::now() as u64;

        let viewport = match fit_canvas(&document, &canvas) {
            Ok(viewport) => viewport,
            Err(e) => {
                log::error!("Cannot start: {}", e);
                return;
            }
        };
        let regions = find_text_regions(&document);

        let state = match SimulationState::new(settings, viewport, &regions) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Cannot start: {}", e);
                return;
            }
        };

        let host = Rc::new(RefCell::new(Host {
            state,
            canvas,
            ctx,
            last_time: 0.0,
            resize_pending: false,
        }));

        setup_resize_handler(host.clone());
        request_animation_frame(host);

        log::info!("Bounce Field running!");
    }

    /// Resize events only flag the host; the rebuild happens at most once per frame
    fn setup_resize_handler(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            host.borrow_mut().resize_pending = true;
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            host_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn host_loop(host: Rc<RefCell<Host>>, time: f64) {
        host.borrow_mut().frame(time);
        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_host::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bounce Field (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the animated version");

    if let Err(e) = run_headless() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Run a fixed number of ticks without drawing and report what happened
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> bounce_field::Result<()> {
    use bounce_field::sim::{Rect, SimulationState, Viewport, on_resize, step};
    use bounce_field::{DensityPreset, Settings, SimError};

    const TICKS: u32 = 3600;
    const DT: f32 = 1.0 / 60.0;

    let mut settings = match std::env::var("BOUNCE_FIELD_SETTINGS") {
        Ok(json) => Settings::from_json(&json)?,
        Err(_) => Settings::load(),
    };
    if let Ok(density) = std::env::var("BOUNCE_FIELD_DENSITY") {
        let preset = DensityPreset::from_str(&density)
            .ok_or_else(|| SimError::Parse(format!("unknown density preset {:?}", density)))?;
        log::info!("Density preset: {}", preset.as_str());
        settings.apply_preset(preset);
    }

    let viewport = Viewport::new(1280.0, 720.0)?;
    // Stand-ins for page text: a heading and a row of links
    let regions = [
        Rect::from_origin_size(440.0, 260.0, 400.0, 70.0),
        Rect::from_origin_size(500.0, 360.0, 80.0, 20.0),
        Rect::from_origin_size(600.0, 360.0, 80.0, 20.0),
        Rect::from_origin_size(700.0, 360.0, 80.0, 20.0),
    ];
    let mut state = SimulationState::new(settings, viewport, &regions)?;

    let mut collisions = 0;
    let mut relocations = 0;
    for tick in 0..TICKS {
        // Halfway through, pretend the window was resized
        if tick == TICKS / 2 {
            on_resize(&mut state, Viewport::new(1024.0, 768.0)?, &regions);
        }
        let result = step(&mut state, DT);
        collisions += result.spawned_effects.len();
        relocations += result.relocated.len();
    }

    log::info!(
        "{} ticks: {} collision events, {} relocations, {} waves live, centroid {:?}",
        state.time_ticks,
        collisions,
        relocations,
        state.waves.len(),
        bounce_field::sim::tick::centroid(&state)
    );
    Ok(())
}
