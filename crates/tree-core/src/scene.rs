//! One synchronous pass per displayed frame over the whole scene.

use crate::bow::{TopBow, TreeParallax};
use crate::carousel::{Carousel, CardPlacement};
use crate::constants::*;
use crate::error::SceneError;
use crate::input::InputSource;
use crate::interaction::{InteractionEvent, InteractionMode, InteractionState};
use crate::layout::ParticleKind;
use crate::particles::{FrameClock, ParticleGroup, RibbonBand, RibbonLayer};
use crate::state::{ray_hits_tree, Camera};
use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

/// Instance count for each particle group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupCounts {
    pub foliage: usize,
    pub ornament: usize,
    pub gift: usize,
    pub bauble: usize,
    pub sparkle: usize,
}

impl Default for GroupCounts {
    fn default() -> Self {
        Self {
            foliage: FOLIAGE_COUNT,
            ornament: ORNAMENT_COUNT,
            gift: GIFT_COUNT,
            bauble: BAUBLE_COUNT,
            sparkle: SPARKLE_COUNT,
        }
    }
}

impl GroupCounts {
    pub fn get(&self, kind: ParticleKind) -> usize {
        match kind {
            ParticleKind::Foliage => self.foliage,
            ParticleKind::Ornament => self.ornament,
            ParticleKind::Gift => self.gift,
            ParticleKind::Bauble => self.bauble,
            ParticleKind::Sparkle => self.sparkle,
        }
    }

    pub fn total(&self) -> usize {
        ParticleKind::ALL.iter().map(|k| self.get(*k)).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: camera_position_vec3(),
            target: Vec3::ZERO,
            fov_degrees: CAMERA_FOV_DEGREES,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub counts: GroupCounts,
    pub image_count: usize,
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            counts: GroupCounts::default(),
            image_count: DEFAULT_IMAGE_COUNT,
            camera: CameraConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        for kind in ParticleKind::ALL {
            let count = self.counts.get(kind);
            if count > MAX_INSTANCES_PER_GROUP {
                return Err(SceneError::InvalidCount {
                    kind,
                    count,
                    limit: MAX_INSTANCES_PER_GROUP,
                });
            }
        }
        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(SceneError::InvalidFieldOfView(fov));
        }
        let (near, far) = (self.camera.znear, self.camera.zfar);
        if !(near > 0.0 && far > near) || self.camera.position == self.camera.target {
            return Err(SceneError::InvalidCamera);
        }
        Ok(())
    }
}

/// Everything a tick needs from the outside world. The input source toggle is
/// passed in here rather than read from shared state.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    pub clock: FrameClock,
    pub source: InputSource,
    pub interaction: Vec2,
    pub events: &'a [InteractionEvent],
}

impl<'a> FrameInput<'a> {
    pub fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            source: InputSource::Pointer,
            interaction: Vec2::ZERO,
            events: &[],
        }
    }

    pub fn with_source(mut self, source: InputSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_interaction(mut self, interaction: Vec2) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn with_events(mut self, events: &'a [InteractionEvent]) -> Self {
        self.events = events;
        self
    }
}

pub struct Scene {
    interaction: InteractionState,
    groups: Vec<ParticleGroup>,
    ribbons: [RibbonLayer; 2],
    bow: TopBow,
    parallax: TreeParallax,
    carousel: Carousel,
    camera: Camera,
}

impl Scene {
    pub fn new<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<Self, SceneError> {
        config.validate()?;
        let interaction = InteractionState::new();
        let mut groups = Vec::with_capacity(ParticleKind::ALL.len());
        for kind in ParticleKind::ALL {
            groups.push(ParticleGroup::generate(
                kind,
                config.counts.get(kind),
                interaction.mode,
                rng,
            ));
        }
        let camera = Camera {
            eye: config.camera.position,
            target: config.camera.target,
            fovy_radians: config.camera.fov_degrees.to_radians(),
            znear: config.camera.znear,
            zfar: config.camera.zfar,
            ..Camera::default()
        };
        for g in &groups {
            log::debug!("[scene] {:?}: {} instances", g.kind(), g.len());
        }
        log::info!(
            "[scene] {} particles in {} groups, {} images",
            config.counts.total(),
            groups.len(),
            config.image_count
        );
        Ok(Self {
            interaction,
            groups,
            ribbons: [
                RibbonLayer::new(RibbonBand::Vertical),
                RibbonLayer::new(RibbonBand::Horizontal),
            ],
            bow: TopBow::new(),
            parallax: TreeParallax::default(),
            carousel: Carousel::new(config.image_count),
            camera,
        })
    }

    pub fn mode(&self) -> InteractionMode {
        self.interaction.mode
    }

    pub fn overlay_open(&self) -> bool {
        self.interaction.overlay_open
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn groups(&self) -> &[ParticleGroup] {
        &self.groups
    }

    pub fn group(&self, kind: ParticleKind) -> Option<&ParticleGroup> {
        self.groups.iter().find(|g| g.kind() == kind)
    }

    pub fn ribbons(&self) -> &[RibbonLayer; 2] {
        &self.ribbons
    }

    pub fn bow(&self) -> &TopBow {
        &self.bow
    }

    pub fn parallax(&self) -> TreeParallax {
        self.parallax
    }

    /// Rotation applied to the whole tree group (particles, ribbons, bow).
    pub fn tree_matrix(&self) -> Mat4 {
        self.parallax.matrix()
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// Drag input for the gallery. Ignored while the overlay is closed.
    pub fn carousel_mut(&mut self) -> Option<&mut Carousel> {
        self.interaction.overlay_open.then_some(&mut self.carousel)
    }

    pub fn card_placements(&self) -> Vec<CardPlacement> {
        if self.interaction.overlay_open {
            self.carousel.placements().collect()
        } else {
            Vec::new()
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    /// Whether a point in normalized viewport coordinates lies on the tree.
    pub fn hits_tree(&self, ndc: Vec2) -> bool {
        if !ndc.is_finite() {
            return false;
        }
        let (origin, dir) = self.camera.ray_through(ndc);
        ray_hits_tree(origin, dir, self.parallax.rotation()).is_some()
    }

    /// Apply one discrete event immediately. Opening the overlay resets the
    /// carousel; closing it ends any drag in progress.
    pub fn handle_event(&mut self, event: InteractionEvent, source: InputSource) -> bool {
        let before = self.interaction;
        let changed = self.interaction.apply(event, source);
        if before.opens_overlay(&self.interaction) {
            self.carousel.reset();
        } else if before.overlay_open && !self.interaction.overlay_open {
            self.carousel.end_drag();
        }
        changed
    }

    /// Consume this frame's events, then advance every animated part.
    pub fn tick(&mut self, input: &FrameInput<'_>) {
        for event in input.events {
            self.handle_event(*event, input.source);
        }

        let mode = self.interaction.mode;
        self.parallax.update(input.interaction, input.clock);
        for group in &mut self.groups {
            group.animate(mode, input.clock);
        }
        if let Some(gifts) = self.groups.iter().find(|g| g.kind() == ParticleKind::Gift) {
            for ribbon in &mut self.ribbons {
                ribbon.follow(gifts);
            }
        }
        self.bow.update(mode, input.clock);

        if self.interaction.overlay_open {
            self.carousel.step();
        }
    }
}
