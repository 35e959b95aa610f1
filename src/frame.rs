use crate::overlay::GalleryView;
use crate::AppShared;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tree_core::{FrameClock, FrameInput, InteractionEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct FrameContext {
    pub shared: Rc<AppShared>,
    pub document: web::Document,
    pub gallery: GalleryView,
    pub last_instant: Instant,
    pub elapsed: f32,
    events: Vec<InteractionEvent>,
}

impl FrameContext {
    pub fn new(shared: Rc<AppShared>, document: web::Document) -> Self {
        Self {
            shared,
            document,
            gallery: GalleryView::default(),
            last_instant: Instant::now(),
            elapsed: 0.0,
            events: Vec::new(),
        }
    }

    /// Restart the clock so a paused interval is not seen as one huge frame.
    pub fn resume(&mut self) {
        self.last_instant = Instant::now();
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.elapsed += dt_sec;

        self.events.clear();
        self.events.append(&mut self.shared.pending.borrow_mut());
        let gestures = self.shared.hub.take_gestures();
        self.events
            .extend(gestures.into_iter().map(InteractionEvent::Gesture));

        {
            let input = FrameInput::new(FrameClock::new(self.elapsed, dt_sec))
                .with_source(self.shared.hub.source())
                .with_interaction(self.shared.hub.interaction_vector())
                .with_events(&self.events);
            let mut scene = self.shared.scene.borrow_mut();
            scene.tick(&input);
            let placements = scene.card_placements();
            self.gallery
                .sync(&self.document, scene.overlay_open(), &placements);
        } // scene borrow ends before the renderer reads it back

        if let Err(e) = self
            .shared
            .renderer
            .call1(&JsValue::NULL, &JsValue::from_f64(dt_sec as f64))
        {
            log::error!("[frame] renderer error: {:?}", e);
        }
    }
}

/// requestAnimationFrame loop that can be stopped and resumed any number of times.
pub struct FrameLoop {
    ctx: Rc<RefCell<FrameContext>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    handle: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn new(ctx: FrameContext) -> Self {
        let ctx = Rc::new(RefCell::new(ctx));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(false));

        let tick_clone = tick.clone();
        let ctx_tick = ctx.clone();
        let handle_tick = handle.clone();
        let running_tick = running.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle_tick.set(None);
            if !running_tick.get() {
                return;
            }
            ctx_tick.borrow_mut().frame();
            // the renderer may have stopped us
            if running_tick.get() {
                schedule(&tick_clone, &handle_tick);
            }
        }) as Box<dyn FnMut()>));

        Self {
            ctx,
            tick,
            handle,
            running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn start(&self) {
        if self.running.replace(true) {
            return;
        }
        if let Ok(mut ctx) = self.ctx.try_borrow_mut() {
            ctx.resume();
        }
        schedule(&self.tick, &self.handle);
        log::info!("[frame] loop started");
    }

    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        log::info!("[frame] loop stopped");
    }
}

fn schedule(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, handle: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => handle.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }
}
