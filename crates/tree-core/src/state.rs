//! Camera description and picking against the tree's hit region.
//!
//! These types avoid platform-specific APIs; the web frontend feeds them
//! normalized viewport coordinates to decide whether a click landed on the
//! tree.

use crate::constants::*;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Right-handed perspective camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: camera_position_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space ray through a point in normalized device coordinates
    /// ([-1, 1]², y up). Returns `(origin, unit direction)`.
    pub fn ray_through(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        (self.eye, (far - self.eye).normalize())
    }
}

/// Distance along the ray to the tree's invisible cone (apex up, base radius
/// `MAX_RADIUS`, height `TREE_HEIGHT`, centred on the origin), or `None` on a
/// miss. `tree_rotation` is the current group rotation.
pub fn ray_hits_tree(origin: Vec3, dir: Vec3, tree_rotation: Quat) -> Option<f32> {
    let to_local = tree_rotation.inverse();
    let o = to_local * origin;
    let d = to_local * dir;

    let half = TREE_HEIGHT / 2.0;
    let k2 = (MAX_RADIUS / TREE_HEIGHT).powi(2);
    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.map_or(true, |b| t < b) {
            best = Some(t);
        }
    };

    // Lateral surface: x² + z² = k²·(apex_y - y)², for y within the cone.
    let oy = o.y - half;
    let a = d.x * d.x + d.z * d.z - k2 * d.y * d.y;
    let b = 2.0 * (o.x * d.x + o.z * d.z - k2 * oy * d.y);
    let c = o.x * o.x + o.z * o.z - k2 * oy * oy;
    let on_side = |t: f32| {
        let y = o.y + t * d.y;
        (-half..=half).contains(&y)
    };
    if a.abs() > 1e-8 {
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            for t in [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)] {
                if on_side(t) {
                    consider(t);
                }
            }
        }
    } else if b.abs() > 1e-8 {
        let t = -c / b;
        if on_side(t) {
            consider(t);
        }
    }

    // Base disk.
    if d.y.abs() > 1e-8 {
        let t = (-half - o.y) / d.y;
        let p = o + d * t;
        if p.x * p.x + p.z * p.z <= MAX_RADIUS * MAX_RADIUS {
            consider(t);
        }
    }

    best
}
