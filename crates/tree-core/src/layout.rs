//! Procedural layouts for every particle group.
//!
//! Each particle gets two fixed targets: a point inside the tree cone (or the
//! loose cylinder around it, for sparkles) and a point inside the scatter
//! sphere. Values come from independent random draws; only the distributions
//! are stable, so callers that need reproducible output pass a seeded RNG.

use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// The fixed set of particle groups that make up the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Foliage,
    Ornament,
    Gift,
    Bauble,
    Sparkle,
}

impl ParticleKind {
    /// Animation order.
    pub const ALL: [ParticleKind; 5] = [
        ParticleKind::Foliage,
        ParticleKind::Ornament,
        ParticleKind::Bauble,
        ParticleKind::Gift,
        ParticleKind::Sparkle,
    ];

    /// Exponent applied to the uniform height draw. Only meaningful for kinds
    /// that follow the cone.
    pub fn height_exponent(self) -> f32 {
        match self {
            ParticleKind::Foliage => FOLIAGE_HEIGHT_EXPONENT,
            _ => 1.0,
        }
    }

    /// Sparkles form an ambient cloud instead of following the cone.
    pub fn follows_cone(self) -> bool {
        !matches!(self, ParticleKind::Sparkle)
    }

    pub fn scale_range(self) -> (f32, f32) {
        match self {
            ParticleKind::Foliage => (1.0, 1.8),
            ParticleKind::Ornament => (1.5, 3.0),
            ParticleKind::Gift => (4.5, 7.0),
            ParticleKind::Bauble => (1.5, 2.5),
            ParticleKind::Sparkle => (0.5, 1.2),
        }
    }

    pub fn palette(self) -> &'static [u32] {
        match self {
            ParticleKind::Gift => &GIFT_PALETTE,
            ParticleKind::Bauble => &BAUBLE_PALETTE,
            _ => &[],
        }
    }

    pub fn default_count(self) -> usize {
        match self {
            ParticleKind::Foliage => FOLIAGE_COUNT,
            ParticleKind::Ornament => ORNAMENT_COUNT,
            ParticleKind::Gift => GIFT_COUNT,
            ParticleKind::Bauble => BAUBLE_COUNT,
            ParticleKind::Sparkle => SPARKLE_COUNT,
        }
    }
}

/// Immutable per-particle data produced once at start-up.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleRecord {
    pub id: u32,
    pub tree_position: Vec3,
    pub scatter_position: Vec3,
    pub scale: f32,
    /// Euler angles (XYZ), each in [0, π).
    pub rotation_seed: Vec3,
    pub color: Option<[f32; 3]>,
    pub base_speed: f32,
}

pub fn generate_layout<R: Rng + ?Sized>(
    count: usize,
    kind: ParticleKind,
    rng: &mut R,
) -> Vec<ParticleRecord> {
    let (scale_min, scale_max) = kind.scale_range();
    let palette = kind.palette();
    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let tree_position = if kind.follows_cone() {
            sample_cone_position(rng, kind.height_exponent())
        } else {
            sample_cloud_position(rng)
        };
        let scatter_position = sample_scatter_position(rng);
        let rotation_seed = Vec3::new(
            rng.gen::<f32>() * PI,
            rng.gen::<f32>() * PI,
            rng.gen::<f32>() * PI,
        );
        let scale = rng.gen_range(scale_min..=scale_max);
        let color = if palette.is_empty() {
            None
        } else {
            Some(rgb_from_hex(palette[rng.gen_range(0..palette.len())]))
        };
        records.push(ParticleRecord {
            id: i as u32,
            tree_position,
            scatter_position,
            scale,
            rotation_seed,
            color,
            base_speed: rng.gen_range(BASE_SPEED_MIN..=BASE_SPEED_MAX),
        });
    }
    records
}

/// Point inside the tree cone. `height_exponent` < 1 biases samples toward
/// the base; the radial draw uses `sqrt` so points are uniform over each slice.
pub fn sample_cone_position<R: Rng + ?Sized>(rng: &mut R, height_exponent: f32) -> Vec3 {
    let y_norm = rng.gen::<f32>().powf(height_exponent);
    let y = y_norm * TREE_HEIGHT - TREE_HEIGHT / 2.0;
    let r_max = (1.0 - y_norm) * MAX_RADIUS;
    let r = rng.gen::<f32>().sqrt() * r_max;
    let theta = rng.gen::<f32>() * TAU;
    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

/// Point inside the loose cylinder that surrounds the cone.
pub fn sample_cloud_position<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let r = rng.gen::<f32>() * (MAX_RADIUS + CLOUD_RADIUS_PAD);
    let y = rng.gen::<f32>() * (TREE_HEIGHT + CLOUD_HEIGHT_PAD) - TREE_HEIGHT / 2.0 - CLOUD_Y_SHIFT;
    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

/// Uniform point inside the scatter sphere centred at `(0, SCATTER_Y_OFFSET, 0)`.
pub fn sample_scatter_position<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let u = rng.gen::<f32>();
    let v = rng.gen::<f32>();
    let phi = (2.0 * v - 1.0).acos();
    let lambda = TAU * u;
    let radius = rng.gen::<f32>().cbrt() * SCATTER_RADIUS;
    Vec3::new(
        radius * phi.sin() * lambda.cos(),
        radius * phi.sin() * lambda.sin() + SCATTER_Y_OFFSET,
        radius * phi.cos(),
    )
}

/// Normalized height in [0, 1] for a cone point, 0 at the base.
#[inline]
pub fn cone_height_norm(y: f32) -> f32 {
    ((y + TREE_HEIGHT / 2.0) / TREE_HEIGHT).clamp(0.0, 1.0)
}

/// Largest radius the cone allows at height `y`.
#[inline]
pub fn cone_radius_at(y: f32) -> f32 {
    (1.0 - cone_height_norm(y)) * MAX_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn cone_radius_shrinks_to_zero_at_apex() {
        assert!((cone_radius_at(-TREE_HEIGHT / 2.0) - MAX_RADIUS).abs() < 1e-6);
        assert!(cone_radius_at(TREE_HEIGHT / 2.0).abs() < 1e-6);
    }

    #[test]
    fn ids_follow_generation_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let records = generate_layout(16, ParticleKind::Ornament, &mut rng);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.id, i as u32);
        }
    }
}
