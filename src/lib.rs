#![cfg(target_arch = "wasm32")]
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use tree_core::{
    hand_landmark_to_vector, Gesture, GestureLabel, InputError, InputHub, InputSource,
    InteractionEvent, ParticleKind, Scene, SceneConfig,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;

use constants::CANVAS_ID;
use frame::{FrameContext, FrameLoop};

/// State shared by the frame loop, the DOM listeners and the JS-facing API.
pub(crate) struct AppShared {
    pub scene: RefCell<Scene>,
    pub hub: Arc<InputHub>,
    /// Discrete pointer events waiting for the next tick.
    pub pending: RefCell<Vec<InteractionEvent>>,
    /// Called once per frame with the frame delta in seconds. It reads the
    /// scene back through the `TreeApp` accessors.
    pub renderer: js_sys::Function,
}

impl AppShared {
    pub fn queue(&self, event: InteractionEvent) {
        self.pending.borrow_mut().push(event);
    }
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, shared: &Rc<AppShared>) {
    let (w, h) = dom::sync_canvas_backing_size(canvas);
    shared.scene.borrow_mut().set_viewport(w, h);
    let canvas_resize = canvas.clone();
    let shared_resize = shared.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        let (w, h) = dom::sync_canvas_backing_size(&canvas_resize);
        shared_resize.scene.borrow_mut().set_viewport(w, h);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tree-web starting");
    Ok(())
}

fn group_kind(index: usize) -> Result<ParticleKind, JsValue> {
    ParticleKind::ALL
        .get(index)
        .copied()
        .ok_or_else(|| JsValue::from_str(&format!("no particle group {index}")))
}

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

/// Handle owned by the page script. Construct it once the canvas and gallery
/// markup exist; the frame loop starts immediately.
#[wasm_bindgen]
pub struct TreeApp {
    shared: Rc<AppShared>,
    frame_loop: FrameLoop,
}

impl TreeApp {
    fn init(renderer: js_sys::Function, image_count: usize) -> anyhow::Result<TreeApp> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let config = SceneConfig {
            image_count,
            ..SceneConfig::default()
        };
        let scene = Scene::new(&config, &mut rand::thread_rng())?;
        let shared = Rc::new(AppShared {
            scene: RefCell::new(scene),
            hub: Arc::new(InputHub::new()),
            pending: RefCell::new(Vec::new()),
            renderer,
        });

        wire_canvas_resize(&canvas, &shared);
        events::wire_input_handlers(events::InputWiring {
            canvas,
            shared: shared.clone(),
            press_at: Rc::new(Cell::new(None)),
        });
        events::wire_gallery_handlers(&document, &shared);
        overlay::hide(&document);

        let frame_loop = FrameLoop::new(FrameContext::new(shared.clone(), document));
        frame_loop.start();
        Ok(TreeApp { shared, frame_loop })
    }
}

#[wasm_bindgen]
impl TreeApp {
    #[wasm_bindgen(constructor)]
    pub fn new(renderer: js_sys::Function, image_count: usize) -> Result<TreeApp, JsValue> {
        Self::init(renderer, image_count).map_err(to_js)
    }

    /// Gesture recognizer output: category name and confidence score.
    pub fn gesture(&self, category: &str, score: f32) {
        match GestureLabel::from_category(category) {
            Some(label) => self.shared.hub.gesture(Gesture::new(label, score)),
            None => log::debug!("[gesture] ignoring category {category}"),
        }
    }

    /// Tracked hand landmark in normalized image coordinates.
    pub fn hand_landmark(&self, x: f32, y: f32) {
        self.shared
            .hub
            .hand_moved(hand_landmark_to_vector(glam::Vec2::new(x, y)));
    }

    pub fn set_camera_enabled(&self, enabled: bool) {
        let source = if enabled {
            InputSource::Camera
        } else {
            InputSource::Pointer
        };
        self.shared.hub.set_source(source);
    }

    pub fn camera_failed(&self, message: String) {
        self.shared
            .hub
            .report_failure(&InputError::CameraUnavailable(message));
    }

    pub fn gesture_model_failed(&self, message: String) {
        self.shared
            .hub
            .report_failure(&InputError::GestureModelUnavailable(message));
    }

    pub fn stop(&self) {
        self.frame_loop.stop();
    }

    pub fn start(&self) {
        self.frame_loop.start();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn is_tree(&self) -> bool {
        self.shared.scene.borrow().mode() == tree_core::InteractionMode::TreeShape
    }

    pub fn overlay_open(&self) -> bool {
        self.shared.scene.borrow().overlay_open()
    }

    pub fn group_count(&self) -> usize {
        ParticleKind::ALL.len()
    }

    pub fn group_name(&self, index: usize) -> Result<String, JsValue> {
        Ok(format!("{:?}", group_kind(index)?).to_lowercase())
    }

    pub fn group_len(&self, index: usize) -> Result<usize, JsValue> {
        let kind = group_kind(index)?;
        Ok(self.shared.scene.borrow().group(kind).map_or(0, |g| g.len()))
    }

    /// Column-major 4x4 model matrices, 16 floats per instance.
    pub fn group_matrices(&self, index: usize) -> Result<js_sys::Float32Array, JsValue> {
        let kind = group_kind(index)?;
        let scene = self.shared.scene.borrow();
        let mut out = Vec::new();
        if let Some(g) = scene.group(kind) {
            g.write_matrices(&mut out);
        }
        Ok(js_sys::Float32Array::from(out.as_slice()))
    }

    /// RGB triples, or `undefined` for groups without a palette.
    pub fn group_colors(&self, index: usize) -> Result<Option<js_sys::Float32Array>, JsValue> {
        let kind = group_kind(index)?;
        let scene = self.shared.scene.borrow();
        let colors = scene.group(kind).and_then(|g| g.colors());
        Ok(colors.map(|c| {
            let flat: Vec<f32> = c.into_iter().flatten().collect();
            js_sys::Float32Array::from(flat.as_slice())
        }))
    }

    /// Ribbon band matrices (0 = vertical, 1 = horizontal), parallel to the gifts.
    pub fn ribbon_matrices(&self, band: usize) -> Result<js_sys::Float32Array, JsValue> {
        let scene = self.shared.scene.borrow();
        let layer = scene
            .ribbons()
            .get(band)
            .ok_or_else(|| JsValue::from_str(&format!("no ribbon band {band}")))?;
        let mut out = Vec::new();
        layer.write_matrices(&mut out);
        Ok(js_sys::Float32Array::from(out.as_slice()))
    }

    pub fn bow_matrix(&self) -> js_sys::Float32Array {
        let m = self.shared.scene.borrow().bow().transform().matrix();
        js_sys::Float32Array::from(m.to_cols_array().as_slice())
    }

    /// Parallax rotation applied to the whole tree group.
    pub fn tree_matrix(&self) -> js_sys::Float32Array {
        let m = self.shared.scene.borrow().tree_matrix();
        js_sys::Float32Array::from(m.to_cols_array().as_slice())
    }

    pub fn view_projection(&self) -> js_sys::Float32Array {
        let scene = self.shared.scene.borrow();
        let cam = scene.camera();
        let m = cam.projection_matrix() * cam.view_matrix();
        js_sys::Float32Array::from(m.to_cols_array().as_slice())
    }

    /// Seven floats per card: index, x, z, yaw (degrees), scale, opacity,
    /// z-index. Empty while the gallery is closed.
    pub fn card_placements(&self) -> js_sys::Float32Array {
        let packed: Vec<f32> = self
            .shared
            .scene
            .borrow()
            .card_placements()
            .iter()
            .flat_map(|p| {
                [
                    p.index as f32,
                    p.x,
                    p.z,
                    p.yaw_degrees,
                    p.scale,
                    p.opacity,
                    p.z_index as f32,
                ]
            })
            .collect();
        js_sys::Float32Array::from(packed.as_slice())
    }

    /// CSS transforms for the gallery cards, empty while it is closed.
    pub fn card_transforms(&self) -> js_sys::Array {
        self.shared
            .scene
            .borrow()
            .card_placements()
            .iter()
            .map(|p| JsValue::from_str(&p.css_transform()))
            .collect()
    }
}
