use glam::Vec2;
use tree_core::normalize_viewport_point;
use web_sys as web;

/// Window inner size in CSS pixels, or zero when unavailable.
#[inline]
pub fn viewport_size() -> Vec2 {
    let Some(w) = web::window() else {
        return Vec2::ZERO;
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Vec2::new(width as f32, height as f32)
}

#[inline]
pub fn client_point(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Pointer position as an interaction vector over the whole viewport.
#[inline]
pub fn pointer_vector(ev: &web::MouseEvent) -> Vec2 {
    normalize_viewport_point(client_point(ev), viewport_size())
}

/// First touch point as an interaction vector.
#[inline]
pub fn touch_vector(ev: &web::TouchEvent) -> Option<Vec2> {
    let touch = ev.touches().get(0)?;
    let client = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
    Some(normalize_viewport_point(client, viewport_size()))
}

/// Pointer position in normalized device coordinates of the canvas, for picking.
#[inline]
pub fn canvas_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let local = client_point(ev) - Vec2::new(rect.left() as f32, rect.top() as f32);
    normalize_viewport_point(local, Vec2::new(rect.width() as f32, rect.height() as f32))
}
