//! Circuit Field entry point
//!
//! Wires the page: canvas background, scroll reveals, typewriter and modals.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_page {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
        IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
        Window,
    };

    use circuit_field::consts::*;
    use circuit_field::platform::{BrowserFrameClock, BrowserTimer};
    use circuit_field::sim::Viewport;
    use circuit_field::ui::{
        Display, Modal, ModalClick, ModalConfig, RevealAction, RevealBoard, SectionId,
        Typewriter, start_typewriter,
    };
    use circuit_field::{AnimationLoop, Driver, Settings};

    type Background = AnimationLoop<CanvasRenderingContext2d>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Circuit Field starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let settings = Settings::load(&document);

        // Each effect is optional; one failing must not take the others down
        if let Err(e) = setup_background(&window, &document, &settings) {
            log::error!("Background disabled: {:?}", e);
        }
        if let Err(e) = setup_reveal(&document, &settings) {
            log::error!("Scroll reveal disabled: {:?}", e);
        }
        if let Err(e) = setup_typewriter(&window, &document, &settings) {
            log::error!("Typewriter disabled: {:?}", e);
        }
        for config in &settings.modals {
            if let Err(e) = setup_modal(&window, &document, config) {
                log::error!("Modal #{} disabled: {:?}", config.modal_id, e);
            }
        }

        log::info!("Circuit Field running!");
        Ok(())
    }

    /// Size the canvas to the window and return the new viewport
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> Result<Viewport, JsValue> {
        let width = window.inner_width()?.as_f64().unwrap_or(0.0);
        let height = window.inner_height()?.as_f64().unwrap_or(0.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        Ok(Viewport::new(width as f32, height as f32))
    }

    fn setup_background(
        window: &Window,
        document: &Document,
        settings: &Settings,
    ) -> Result<(), JsValue> {
        let Some(el) = document.get_element_by_id(CANVAS_ID) else {
            log::warn!("#{} not found, no background", CANVAS_ID);
            return Ok(());
        };
        let canvas: HtmlCanvasElement = el.dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let viewport = fit_canvas(window, &canvas)?;
        let seed = js_sys::Date::now() as u64;
        let mut driver = Driver::new(settings, viewport, seed);
        driver.init();
        let background: Rc<RefCell<Background>> =
            Rc::new(RefCell::new(AnimationLoop::new(driver, ctx)));

        log::info!(
            "Background {}x{} with {} particles (seed {})",
            viewport.width,
            viewport.height,
            settings.particle_count,
            seed
        );

        // Window resize
        {
            let background = background.clone();
            let window_clone = window.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                match fit_canvas(&window_clone, &canvas_clone) {
                    Ok(viewport) => background.borrow_mut().driver.resize(viewport),
                    Err(e) => log::warn!("Resize failed: {:?}", e),
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer position
        {
            let background = background.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                background
                    .borrow_mut()
                    .driver
                    .set_cursor(Vec2::new(event.x() as f32, event.y() as f32));
            });
            window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        AnimationLoop::start(background, Rc::new(BrowserFrameClock::new(window.clone())));
        Ok(())
    }

    fn setup_reveal(document: &Document, settings: &Settings) -> Result<(), JsValue> {
        let nodes = document.query_selector_all(SECTION_SELECTOR)?;
        let sections: Vec<Element> = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();
        if sections.is_empty() {
            log::debug!("No sections to reveal");
            return Ok(());
        }

        // Section ids are indices into `sections`
        let mut board = RevealBoard::new();
        for _ in &sections {
            board.register();
        }
        let board = Rc::new(RefCell::new(board));
        let sections = Rc::new(sections);

        let callback = {
            let sections = sections.clone();
            Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        let target = entry.target();
                        let Some(index) = sections.iter().position(|s| *s == target) else {
                            continue;
                        };
                        let action = board
                            .borrow_mut()
                            .notify(SectionId(index), entry.is_intersecting());
                        if action == RevealAction::Reveal {
                            if let Err(e) = target.class_list().add_1(VISIBLE_CLASS) {
                                log::warn!("Reveal failed: {:?}", e);
                            }
                            observer.unobserve(&target);
                        }
                    }
                },
            )
        };

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(settings.reveal_threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        callback.forget();

        for section in sections.iter() {
            section.class_list().add_1(HIDDEN_CLASS)?;
            observer.observe(section);
        }

        log::info!("Observing {} sections", sections.len());
        Ok(())
    }

    fn setup_typewriter(
        window: &Window,
        document: &Document,
        settings: &Settings,
    ) -> Result<(), JsValue> {
        let Some(target) = document.get_element_by_id(TYPEWRITER_ID) else {
            log::debug!("#{} not found, no typewriter", TYPEWRITER_ID);
            return Ok(());
        };

        let typewriter = Typewriter::new(&settings.typewriter_text);
        let timer = Rc::new(BrowserTimer::new(window.clone()));
        let delay_ms = settings.typewriter_delay_ms;

        // Start on page load; if that already happened, start now
        let ready_state = js_sys::Reflect::get(document, &JsValue::from_str("readyState"))?;
        if ready_state.as_string().as_deref() == Some("complete") {
            start_typewriter(typewriter, target, timer, delay_ms);
            return Ok(());
        }

        let closure = Closure::once(move |_event: web_sys::Event| {
            start_typewriter(typewriter, target, timer, delay_ms);
        });
        window.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn apply_display(el: &HtmlElement, display: Display) {
        if let Err(e) = el.style().set_property("display", display.as_css()) {
            log::warn!("Modal display update failed: {:?}", e);
        }
    }

    fn setup_modal(window: &Window, document: &Document, config: &ModalConfig) -> Result<(), JsValue> {
        let Some((container, trigger)) = config.resolve(|id| document.get_element_by_id(id)) else {
            log::debug!("Modal #{} not on this page", config.modal_id);
            return Ok(());
        };
        let close = container.query_selector(&config.close_selector())?;
        let container: HtmlElement = container.dyn_into()?;
        let modal = Rc::new(RefCell::new(Modal::new(config.clone())));

        // Open trigger
        {
            let modal = modal.clone();
            let container = container.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                if let Some(display) = modal.borrow_mut().handle(ModalClick::OpenTrigger) {
                    apply_display(&container, display);
                }
            });
            trigger.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Close control
        if let Some(close) = close {
            let modal = modal.clone();
            let container = container.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(display) = modal.borrow_mut().handle(ModalClick::CloseControl) {
                    apply_display(&container, display);
                }
            });
            close.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        } else {
            log::debug!("Modal #{} has no {}", config.modal_id, config.close_selector());
        }

        // Backdrop: only clicks that land on the container itself
        {
            let backdrop: Element = container.clone().into();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
                let click = ModalClick::from_event_target(target.as_ref(), &backdrop);
                if let Some(display) = modal.borrow_mut().handle(click) {
                    apply_display(&container, display);
                }
            });
            window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        log::info!("Modal #{} ready", config.modal_id);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = web_page::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Circuit Field (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to see the page");

    run_headless(300);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the background and typewriter against manual clocks and report
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(frames: usize) {
    use std::cell::RefCell;
    use std::rc::Rc;

    use circuit_field::platform::{ManualFrameClock, ManualTimer};
    use circuit_field::renderer::CommandBuffer;
    use circuit_field::sim::Viewport;
    use circuit_field::ui::{Typewriter, start_typewriter};
    use circuit_field::{AnimationLoop, Driver, Settings};

    let settings = Settings::default();
    let driver = Driver::new(&settings, Viewport::new(1280.0, 720.0), 42);
    let background = Rc::new(RefCell::new(AnimationLoop::new(driver, CommandBuffer::new())));
    let clock = Rc::new(ManualFrameClock::default());
    AnimationLoop::start(background.clone(), clock.clone());

    for _ in 0..frames {
        // Keep only the most recent frame's commands
        background.borrow_mut().surface.reset();
        clock.advance();
    }

    {
        let bg = background.borrow();
        let traces = bg
            .surface
            .commands
            .iter()
            .filter(|c| c.segment_count() == 2)
            .count();
        println!(
            "{} frames at {} fps, last frame: {} draw calls, {} traces",
            bg.driver.stats().frames(),
            bg.driver.stats().fps(),
            bg.surface.commands.len(),
            traces
        );
    }

    let timer = Rc::new(ManualTimer::new());
    let typed = Rc::new(RefCell::new(String::new()));
    start_typewriter(
        Typewriter::new(&settings.typewriter_text),
        typed.clone(),
        timer.clone(),
        settings.typewriter_delay_ms,
    );
    let ticks = timer.run(usize::MAX);
    println!("Typewriter: \"{}\" after {} ticks", typed.borrow(), ticks);
}
