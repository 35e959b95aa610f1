//! Per-frame animation of the particle groups.
//!
//! Every tick each particle's live position eases toward its target for the
//! current mode, picks up a little secondary motion and is written out as an
//! [`InstanceTransform`]. The whole transform buffer is rewritten each tick;
//! renderers should treat it as dirty every frame.

use crate::constants::*;
use crate::interaction::InteractionMode;
use crate::layout::{generate_layout, ParticleKind, ParticleRecord};
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

/// Elapsed and per-frame time, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    pub elapsed: f32,
    pub delta: f32,
}

impl FrameClock {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }

    /// Negative or non-finite deltas (clock hiccups, a resumed tab) are
    /// treated as no time passing.
    #[inline]
    pub fn safe_delta(&self) -> f32 {
        if self.delta.is_finite() {
            self.delta.max(0.0)
        } else {
            0.0
        }
    }

    #[inline]
    pub fn safe_elapsed(&self) -> f32 {
        if self.elapsed.is_finite() {
            self.elapsed
        } else {
            0.0
        }
    }
}

/// Exponential-decay step factor, capped so a long frame lands on the target
/// instead of overshooting it.
#[inline]
pub fn lerp_rate(speed: f32, delta: f32) -> f32 {
    (speed * delta).clamp(0.0, 1.0)
}

/// Position, XYZ Euler rotation and per-axis scale of one instance.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceTransform {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl InstanceTransform {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position: position.to_array(),
            rotation: rotation.to_array(),
            scale: scale.to_array(),
        }
    }

    pub fn quat(&self) -> Quat {
        let [x, y, z] = self.rotation;
        Quat::from_euler(EulerRot::XYZ, x, y, z)
    }

    /// Model matrix (scale, then rotation, then translation).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::from_array(self.scale),
            self.quat(),
            Vec3::from_array(self.position),
        )
    }
}

/// How a group moves: its lerp speed, and whether it drifts regardless of mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionProfile {
    pub speed_multiplier: f32,
    pub always_drifting: bool,
    pub pulses: bool,
}

impl MotionProfile {
    pub fn for_kind(kind: ParticleKind) -> Self {
        let speed_multiplier = match kind {
            ParticleKind::Foliage => FOLIAGE_SPEED,
            ParticleKind::Ornament => ORNAMENT_SPEED,
            ParticleKind::Gift => GIFT_SPEED,
            ParticleKind::Bauble => BAUBLE_SPEED,
            ParticleKind::Sparkle => SPARKLE_SPEED,
        };
        let sparkle = kind == ParticleKind::Sparkle;
        Self {
            speed_multiplier,
            always_drifting: sparkle,
            pulses: sparkle,
        }
    }

    fn mode_factor(&self, mode: InteractionMode) -> f32 {
        match mode {
            _ if self.always_drifting => 1.0,
            InteractionMode::TreeShape => TREE_MODE_FACTOR,
            InteractionMode::Scattered => 1.0,
        }
    }

    fn float_wave(&self) -> (f32, f32) {
        if self.always_drifting {
            (SPARKLE_FLOAT_FREQ, SPARKLE_FLOAT_AMPLITUDE)
        } else {
            (FLOAT_FREQ, FLOAT_AMPLITUDE)
        }
    }
}

/// A fixed-size group of records plus the buffers the animator owns.
///
/// `live_positions[i]` and `transforms[i]` always belong to `records[i]`.
#[derive(Clone, Debug)]
pub struct ParticleGroup {
    kind: ParticleKind,
    profile: MotionProfile,
    records: Vec<ParticleRecord>,
    live_positions: Vec<Vec3>,
    transforms: Vec<InstanceTransform>,
}

impl ParticleGroup {
    /// Live positions start on the targets of `mode`, so the first frame is
    /// already in place.
    pub fn new(kind: ParticleKind, records: Vec<ParticleRecord>, mode: InteractionMode) -> Self {
        let live_positions: Vec<Vec3> = records.iter().map(|r| target_for(r, mode)).collect();
        let transforms = vec![InstanceTransform::default(); records.len()];
        Self {
            kind,
            profile: MotionProfile::for_kind(kind),
            records,
            live_positions,
            transforms,
        }
    }

    pub fn generate<R: Rng + ?Sized>(
        kind: ParticleKind,
        count: usize,
        mode: InteractionMode,
        rng: &mut R,
    ) -> Self {
        Self::new(kind, generate_layout(count, kind, rng), mode)
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn profile(&self) -> MotionProfile {
        self.profile
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    pub fn live_positions(&self) -> &[Vec3] {
        &self.live_positions
    }

    pub fn transforms(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    /// Per-instance colours, for groups drawn from a palette.
    pub fn colors(&self) -> Option<Vec<[f32; 3]>> {
        self.records
            .iter()
            .map(|r| r.color)
            .collect::<Option<Vec<_>>>()
            .filter(|c| !c.is_empty())
    }

    /// Advance every particle one frame toward the targets of `mode`.
    pub fn animate(&mut self, mode: InteractionMode, clock: FrameClock) {
        let delta = clock.safe_delta();
        let t = clock.safe_elapsed();
        let profile = self.profile;
        let rate = lerp_rate(profile.speed_multiplier * profile.mode_factor(mode), delta);
        let free = mode == InteractionMode::Scattered || profile.always_drifting;
        let (float_freq, float_amp) = profile.float_wave();

        for ((record, live), out) in self
            .records
            .iter()
            .zip(self.live_positions.iter_mut())
            .zip(self.transforms.iter_mut())
        {
            let id = record.id as f32;
            let mut pos = live.lerp(target_for(record, mode), rate);
            if free {
                // persisted: the float compounds across frames
                pos.y += (t * float_freq + id).sin() * float_amp;
            }
            *live = pos;

            let seed = record.rotation_seed;
            let rotation = if free {
                Vec3::new(seed.x + t * TUMBLE_RATE_X, seed.y + t * TUMBLE_RATE_Y, seed.z)
            } else {
                Vec3::new(
                    seed.x * UPRIGHT_TILT_FRACTION,
                    seed.y,
                    seed.z * UPRIGHT_TILT_FRACTION,
                )
            };

            let scale = if profile.pulses {
                record.scale
                    * ((t * SPARKLE_PULSE_FREQ + id).sin() * SPARKLE_PULSE_DEPTH
                        + SPARKLE_PULSE_BASE)
            } else {
                record.scale
            };

            *out = InstanceTransform::new(pos, rotation, Vec3::splat(scale));
        }
    }

    /// Column-major model matrices, one per instance.
    pub fn write_matrices(&self, out: &mut Vec<f32>) {
        write_matrices(&self.transforms, out);
    }
}

#[inline]
fn target_for(record: &ParticleRecord, mode: InteractionMode) -> Vec3 {
    match mode {
        InteractionMode::TreeShape => record.tree_position,
        InteractionMode::Scattered => record.scatter_position,
    }
}

pub fn write_matrices(transforms: &[InstanceTransform], out: &mut Vec<f32>) {
    out.clear();
    out.reserve(transforms.len() * 16);
    for t in transforms {
        out.extend_from_slice(&t.matrix().to_cols_array());
    }
}

/// The two crossing bands drawn over each gift box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RibbonBand {
    /// Thin along x: wraps around the box front-to-back.
    Vertical,
    /// Thin along z: wraps around the box side-to-side.
    Horizontal,
}

impl RibbonBand {
    pub fn axis_scale(self, base: f32) -> Vec3 {
        match self {
            RibbonBand::Vertical => {
                Vec3::new(base * RIBBON_THIN, base * RIBBON_WRAP, base * RIBBON_WRAP)
            }
            RibbonBand::Horizontal => {
                Vec3::new(base * RIBBON_WRAP, base * RIBBON_WRAP, base * RIBBON_THIN)
            }
        }
    }
}

/// A transform layer that follows the gift group but with its own scale axes.
#[derive(Clone, Debug)]
pub struct RibbonLayer {
    band: RibbonBand,
    transforms: Vec<InstanceTransform>,
}

impl RibbonLayer {
    pub fn new(band: RibbonBand) -> Self {
        Self {
            band,
            transforms: Vec::new(),
        }
    }

    pub fn band(&self) -> RibbonBand {
        self.band
    }

    pub fn transforms(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    /// Copy position and rotation from the animated gifts, override scale.
    pub fn follow(&mut self, gifts: &ParticleGroup) {
        let band = self.band;
        self.transforms.clear();
        self.transforms.extend(
            gifts
                .transforms()
                .iter()
                .zip(gifts.records())
                .map(|(t, r)| InstanceTransform {
                    scale: band.axis_scale(r.scale).to_array(),
                    ..*t
                }),
        );
    }

    pub fn write_matrices(&self, out: &mut Vec<f32>) {
        write_matrices(&self.transforms, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_rate_is_capped() {
        assert_eq!(lerp_rate(2.0, 10.0), 1.0);
        assert_eq!(lerp_rate(2.0, -1.0), 0.0);
        assert!((lerp_rate(1.5, 0.016) - 0.024).abs() < 1e-6);
    }

    #[test]
    fn bad_deltas_count_as_zero() {
        assert_eq!(FrameClock::new(1.0, f32::NAN).safe_delta(), 0.0);
        assert_eq!(FrameClock::new(1.0, -0.5).safe_delta(), 0.0);
        assert_eq!(FrameClock::new(1.0, f32::INFINITY).safe_delta(), 0.0);
    }

    #[test]
    fn identity_transform_matrix() {
        let t = InstanceTransform::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE);
        assert!(t.matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }
}
